use super::{init_logger, test_credential, time, ACCESS_KEY_ID, EMPTY_STRING_SHA256};
use hmacsign_core::{RequestView, SignRequest};
use hmacsign_v4::{RequestSigner, SignerIdentity};
use http::{header, HeaderMap, HeaderValue, Request};
use pretty_assertions::assert_eq;

#[test]
fn test_aws_get_without_headers() {
    init_logger();

    let signer = RequestSigner::new(SignerIdentity::aws(), "s3", "us-east-1");
    let headers = HeaderMap::new();
    let req = RequestView::new("GET", "/", "", &headers, "examplebucket.s3.amazonaws.com");

    let output = signer.sign(
        &req,
        b"",
        &test_credential(),
        time("2024-01-01T00:00:00Z"),
    );

    assert_eq!(output.signed_headers, "host");
    assert_eq!(output.content_sha256, EMPTY_STRING_SHA256);
    assert_eq!(output.date, "20240101T000000Z");
    assert_eq!(
        output.signature,
        "0b8dfd8f0164d0dedda5dfc2860dbbeba568c8279593dbfc649790af682619f6"
    );
    assert_eq!(
        output.authorization,
        format!(
            "AWS4-HMAC-SHA256 Credential={ACCESS_KEY_ID}/20240101/us-east-1/s3/aws4_request, \
             SignedHeaders=host, \
             Signature=0b8dfd8f0164d0dedda5dfc2860dbbeba568c8279593dbfc649790af682619f6"
        )
    );
}

#[test]
fn test_custom_put_with_headers() {
    init_logger();

    let identity = SignerIdentity::custom("NOVA", 1).expect("identity must be valid");
    let signer = RequestSigner::new(identity, "storage", "cn-east-1");

    let body = b"Hello, World!";
    let digest = "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f";

    let mut headers = HeaderMap::new();
    headers.insert("user-agent", HeaderValue::from_static("hmacsign/0.1"));
    headers.insert("content-length", HeaderValue::from_static("13"));
    headers.insert("x-other", HeaderValue::from_static("not signed"));
    headers.insert("x-nova-date", HeaderValue::from_static("20240315T123045Z"));
    headers.insert("x-nova-content-sha256", HeaderValue::from_str(digest).unwrap());
    let req = RequestView::new(
        "PUT",
        "/objects/a.txt",
        "versionId=2&acl",
        &headers,
        "api.example.com",
    );

    let output = signer.sign(&req, body, &test_credential(), time("2024-03-15T12:30:45Z"));

    assert_eq!(output.content_sha256, digest);
    assert_eq!(output.signed_headers, "host;x-nova-content-sha256;x-nova-date");
    assert_eq!(
        output.authorization,
        format!(
            "NOVA1-HMAC-SHA256 Credential={ACCESS_KEY_ID}/20240315/cn-east-1/storage/nova1_request, \
             SignedHeaders=host;x-nova-content-sha256;x-nova-date, \
             Signature=d64bbaa167efcad83605389093e4358bb42160d7b054c6d42bcfe17dc0c900b9"
        )
    );
}

#[test]
fn test_sign_request_on_parts() {
    init_logger();

    let signer = RequestSigner::new(SignerIdentity::aws(), "s3", "us-east-1")
        .with_time(time("2024-01-01T00:00:00Z"));
    let (mut parts, _) = Request::get("http://127.0.0.1:9000/hello")
        .header("accept", "*/*")
        .body(())
        .expect("request must be valid")
        .into_parts();

    signer
        .sign_request(&mut parts, b"", Some(&test_credential()))
        .expect("sign request must succeed");

    assert_eq!(parts.headers["x-amz-date"], "20240101T000000Z");
    assert_eq!(parts.headers["x-amz-content-sha256"], EMPTY_STRING_SHA256);
    assert_eq!(parts.headers["accept"], "*/*");
    assert_eq!(
        parts.headers[header::AUTHORIZATION],
        format!(
            "AWS4-HMAC-SHA256 Credential={ACCESS_KEY_ID}/20240101/us-east-1/s3/aws4_request, \
             SignedHeaders=host;x-amz-content-sha256;x-amz-date, \
             Signature=0efa1c34182756bbc783f90dc08ca08dca94595cef903573f4c3afc2be35d73b"
        )
        .as_str()
    );
}

#[test]
fn test_same_day_requests_differ_only_by_timestamp() {
    let signer = RequestSigner::new(SignerIdentity::aws(), "s3", "us-east-1");
    let headers = HeaderMap::new();
    let req = RequestView::new("GET", "/", "", &headers, "examplebucket.s3.amazonaws.com");

    let morning = signer.sign(&req, b"", &test_credential(), time("2024-01-01T08:00:00Z"));
    let evening = signer.sign(&req, b"", &test_credential(), time("2024-01-01T20:00:00Z"));

    assert_ne!(morning.signature, evening.signature);
    let scope = |auth: &str| auth.split(", ").next().map(str::to_string);
    assert_eq!(scope(&morning.authorization), scope(&evening.authorization));
}
