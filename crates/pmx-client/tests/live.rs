//! Live cluster integration tests.
//!
//! These talk to a real cluster configured via PMX_API_URL / PMX_TOKEN_ID /
//! PMX_TOKEN_SECRET and are skipped by default.

use pmx_client::PmxClient;

/// Test node storage listing against a live cluster.
#[tokio::test]
#[ignore = "requires a live cluster"]
async fn test_live_storage_listing() {
    dotenvy::dotenv().ok();

    let client = PmxClient::from_env().expect("Failed to create client");
    let node = std::env::var("PMX_TEST_NODE").unwrap_or_else(|_| "pve1".to_string());

    let storages = client.node(&node).storages().await.expect("Failed to list storages");
    println!("Found {} storage pools on {}", storages.len(), node);
    assert!(!storages.is_empty());
}

/// Test SDN zone listing against a live cluster.
#[tokio::test]
#[ignore = "requires a live cluster"]
async fn test_live_sdn_zones() {
    dotenvy::dotenv().ok();

    let client = PmxClient::from_env().expect("Failed to create client");

    let zones = client.cluster().sdn_zones().await.expect("Failed to list SDN zones");
    println!("Found {} SDN zones", zones.len());
}
