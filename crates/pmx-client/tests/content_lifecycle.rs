//! Storage content lifecycle tests against a mocked API.

use std::io::Write;

use pmx_client::{PmxClient, PmxConfig, PmxError, RetryConfig};
use pmx_models::{ChecksumAlgorithm, ContentClass};
use serde_json::json;
use tempfile::NamedTempFile;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UPID: &str = "UPID:pve1:0001C3A8:0A2B3C4D:65B2F1E0:imgcopy:local:root@pam:";

fn client(server: &MockServer) -> PmxClient {
    let mut config = PmxConfig::new(server.uri(), "root@pam!tests", "secret");
    config.retry = RetryConfig {
        max_retries: 2,
        base_delay_ms: 1,
        max_delay_ms: 5,
    };
    PmxClient::new(config).unwrap()
}

fn upload_source() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(b"fake iso payload").expect("write temp file");
    file
}

async fn single_request_body(server: &MockServer) -> String {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    String::from_utf8_lossy(&requests[0].body).into_owned()
}

// =============================================================================
// Upload
// =============================================================================

#[tokio::test]
async fn upload_sends_content_field_and_returns_task() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/nodes/pve1/storage/local/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": UPID })))
        .expect(1)
        .mount(&server)
        .await;

    let file = upload_source();
    let storage = client(&server).node("pve1").storage("local");
    let task = storage
        .upload(ContentClass::Iso, file.path())
        .await
        .unwrap();

    assert_eq!(task.upid().as_str(), UPID);
    assert_eq!(task.node(), Some("pve1"));

    let body = single_request_body(&server).await;
    assert!(body.contains("name=\"content\"\r\n\r\niso"));
}

#[tokio::test]
async fn upload_with_name_includes_filename_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/nodes/pve1/storage/local/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": UPID })))
        .mount(&server)
        .await;

    let file = upload_source();
    let storage = client(&server).node("pve1").storage("local");
    storage
        .upload_with_name(ContentClass::Vztmpl, file.path(), "renamed.tar.gz")
        .await
        .unwrap();

    let body = single_request_body(&server).await;
    assert!(body.contains("name=\"content\"\r\n\r\nvztmpl"));
    assert!(body.contains("name=\"filename\"\r\n\r\nrenamed.tar.gz"));
}

#[tokio::test]
async fn upload_with_hash_without_filename_omits_filename_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/nodes/pve1/storage/local/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": UPID })))
        .mount(&server)
        .await;

    let file = upload_source();
    let storage = client(&server).node("pve1").storage("local");
    storage
        .upload_with_hash(
            ContentClass::Iso,
            file.path(),
            None,
            "deadbeef",
            ChecksumAlgorithm::Sha256,
        )
        .await
        .unwrap();

    let body = single_request_body(&server).await;
    // The file part is also named "filename" but carries a filename
    // attribute; the bare text field must not be present.
    assert!(!body.contains("name=\"filename\"\r\n"));
    assert!(body.contains("name=\"checksum\"\r\n\r\ndeadbeef"));
    assert!(body.contains("name=\"checksum-algorithm\"\r\n\r\nsha256"));
}

#[tokio::test]
async fn upload_with_hash_with_filename_includes_it() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/nodes/pve1/storage/local/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": UPID })))
        .mount(&server)
        .await;

    let file = upload_source();
    let storage = client(&server).node("pve1").storage("local");
    storage
        .upload_with_hash(
            ContentClass::Iso,
            file.path(),
            Some("renamed.iso"),
            "deadbeef",
            ChecksumAlgorithm::Sha1,
        )
        .await
        .unwrap();

    let body = single_request_body(&server).await;
    assert!(body.contains("name=\"filename\"\r\n\r\nrenamed.iso"));
}

#[tokio::test]
async fn upload_rejects_directory() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("temp dir");

    let storage = client(&server).node("pve1").storage("local");
    let err = storage
        .upload(ContentClass::Iso, dir.path())
        .await
        .unwrap_err();

    assert!(matches!(err, PmxError::FileIsDirectory(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn upload_propagates_missing_file_error() {
    let server = MockServer::start().await;

    let storage = client(&server).node("pve1").storage("local");
    let err = storage
        .upload(ContentClass::Iso, "/nonexistent/image.iso")
        .await
        .unwrap_err();

    assert!(matches!(err, PmxError::Io(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// =============================================================================
// URL import
// =============================================================================

#[tokio::test]
async fn download_url_sends_form_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/nodes/pve1/storage/local/download-url"))
        .and(body_string_contains("content=iso"))
        .and(body_string_contains("filename=debian-12.iso"))
        .and(body_string_contains("url=https%3A%2F%2F"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": UPID })))
        .expect(1)
        .mount(&server)
        .await;

    let storage = client(&server).node("pve1").storage("local");
    let task = storage
        .download_url(
            ContentClass::Iso,
            "debian-12.iso",
            "https://cdimage.debian.org/debian-12.iso",
        )
        .await
        .unwrap();

    assert_eq!(task.upid().as_str(), UPID);
}

#[tokio::test]
async fn download_url_with_hash_sends_checksum_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/nodes/pve1/storage/local/download-url"))
        .and(body_string_contains("checksum=deadbeef"))
        .and(body_string_contains("checksum-algorithm=sha512"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": UPID })))
        .expect(1)
        .mount(&server)
        .await;

    let storage = client(&server).node("pve1").storage("local");
    storage
        .download_url_with_hash(
            ContentClass::Vztmpl,
            "alpine.tar.gz",
            "https://example.com/alpine.tar.gz",
            "deadbeef",
            ChecksumAlgorithm::Sha512,
        )
        .await
        .unwrap();
}

// =============================================================================
// Retrieval and deletion
// =============================================================================

#[tokio::test]
async fn iso_synthesizes_missing_volid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nodes/pve1/storage/local/content/local:iso/debian.iso"))
        .and(header("Authorization", "PVEAPIToken=root@pam!tests=secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"path": "/var/lib/vz/template/iso/debian.iso", "size": 792723456}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let storage = client(&server).node("pve1").storage("local");
    let iso = storage.iso("debian.iso").await.unwrap();

    assert_eq!(iso.volid(), "local:iso/debian.iso");
    assert_eq!(iso.path(), "/var/lib/vz/template/iso/debian.iso");
    assert_eq!(iso.node(), "pve1");
    assert_eq!(iso.storage(), "local");
}

#[tokio::test]
async fn iso_keeps_returned_volid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nodes/pve1/storage/local/content/local:iso/debian.iso"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"volid": "local:iso/debian.iso", "size": 1}
        })))
        .mount(&server)
        .await;

    let storage = client(&server).node("pve1").storage("local");
    let iso = storage.iso("debian.iso").await.unwrap();
    assert_eq!(iso.volid(), "local:iso/debian.iso");
}

#[tokio::test]
async fn backup_does_not_synthesize_volid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/nodes/pve1/storage/local/content/local:backup/vzdump.vma.zst",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"path": "/var/lib/vz/dump/vzdump.vma.zst", "size": 4096}
        })))
        .mount(&server)
        .await;

    let storage = client(&server).node("pve1").storage("local");
    let backup = storage.backup("vzdump.vma.zst").await.unwrap();

    assert_eq!(backup.volid(), "");
    assert_eq!(backup.path(), "/var/lib/vz/dump/vzdump.vma.zst");
}

#[tokio::test]
async fn backup_delete_reconstructs_identifier_from_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/nodes/pve1/storage/local/content/local:backup/vzdump.vma.zst",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"path": "/var/lib/vz/dump/vzdump.vma.zst"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(
            "/nodes/pve1/storage/local/content/local:backup/vzdump.vma.zst",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": UPID })))
        .expect(1)
        .mount(&server)
        .await;

    let storage = client(&server).node("pve1").storage("local");
    let backup = storage.backup("vzdump.vma.zst").await.unwrap();
    let task = backup.delete().await.unwrap();
    assert_eq!(task.upid().as_str(), UPID);
}

// =============================================================================
// Transport behavior
// =============================================================================

#[tokio::test]
async fn get_maps_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such volume"))
        .mount(&server)
        .await;

    let storage = client(&server).node("pve1").storage("local");
    let err = storage.iso("missing.iso").await.unwrap_err();
    assert!(matches!(err, PmxError::NotFound(_)));
}

#[tokio::test]
async fn get_retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"volid": "local:iso/debian.iso"}
        })))
        .mount(&server)
        .await;

    let storage = client(&server).node("pve1").storage("local");
    let iso = storage.iso("debian.iso").await.unwrap();

    assert_eq!(iso.volid(), "local:iso/debian.iso");
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn success_without_data_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
        .mount(&server)
        .await;

    let storage = client(&server).node("pve1").storage("local");
    let err = storage.iso("debian.iso").await.unwrap_err();
    assert!(matches!(err, PmxError::InvalidResponse(_)));
}
