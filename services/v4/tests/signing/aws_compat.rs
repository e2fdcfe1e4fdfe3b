use std::time::SystemTime;

use aws_credential_types::Credentials;
use aws_sigv4::http_request::{
    PayloadChecksumKind, PercentEncodingMode, SignableBody, SignableRequest, SigningSettings,
};
use aws_sigv4::sign::v4;
use hmacsign_core::time::DateTime;
use hmacsign_core::SignRequest;
use hmacsign_v4::{RequestSigner, SignerIdentity};
use http::Request;
use pretty_assertions::assert_eq;
use test_case::test_case;

use super::{init_logger, test_credential, time, ACCESS_KEY_ID, SECRET_ACCESS_KEY};

const REGION: &str = "test";
const SERVICE: &str = "s3";

fn get_request() -> Request<&'static str> {
    let mut req = Request::new("");
    *req.method_mut() = http::Method::GET;
    *req.uri_mut() = "http://127.0.0.1:9000/hello"
        .parse()
        .expect("url must be valid");

    req
}

fn get_request_with_sorted_query() -> Request<&'static str> {
    let mut req = Request::new("");
    *req.method_mut() = http::Method::GET;
    *req.uri_mut() = "http://127.0.0.1:9000/hello?list-type=2&max-keys=3&prefix=CI"
        .parse()
        .expect("url must be valid");

    req
}

fn get_request_virtual_host() -> Request<&'static str> {
    let mut req = Request::new("");
    *req.method_mut() = http::Method::GET;
    *req.uri_mut() = "http://hello.s3.test.example.com"
        .parse()
        .expect("url must be valid");

    req
}

fn put_request() -> Request<&'static str> {
    let mut req = Request::new("Hello,World!");
    *req.method_mut() = http::Method::PUT;
    *req.uri_mut() = "http://127.0.0.1:9000/hello"
        .parse()
        .expect("url must be valid");

    req
}

/// Sign with the aws-sigv4 reference implementation.
fn sign_with_aws_sigv4(mut req: Request<&'static str>, now: DateTime) -> Request<&'static str> {
    let mut ss = SigningSettings::default();
    ss.percent_encoding_mode = PercentEncodingMode::Double;
    ss.payload_checksum_kind = PayloadChecksumKind::XAmzSha256;
    let id = Credentials::new(
        ACCESS_KEY_ID,
        SECRET_ACCESS_KEY,
        None,
        None,
        "hardcoded-credentials",
    )
    .into();
    let sp = v4::SigningParams::builder()
        .identity(&id)
        .region(REGION)
        .name(SERVICE)
        .time(SystemTime::from(now))
        .settings(ss)
        .build()
        .expect("signing params must be valid");

    let output = aws_sigv4::http_request::sign(
        SignableRequest::new(
            req.method().as_str(),
            req.uri().to_string(),
            req.headers()
                .iter()
                .map(|(k, v)| (k.as_str(), std::str::from_utf8(v.as_bytes()).unwrap())),
            SignableBody::Bytes(req.body().as_bytes()),
        )
        .expect("signable request must be valid"),
        &sp.into(),
    )
    .expect("aws-sigv4 must sign");
    let (instructions, _) = output.into_parts();
    instructions.apply_to_request_http1x(&mut req);

    req
}

fn sign_with_request_signer(req: Request<&'static str>, now: DateTime) -> Request<&'static str> {
    let signer = RequestSigner::new(SignerIdentity::aws(), SERVICE, REGION).with_time(now);

    let (mut parts, body) = req.into_parts();
    signer
        .sign_request(&mut parts, body.as_bytes(), Some(&test_credential()))
        .expect("sign request must succeed");

    Request::from_parts(parts, body)
}

fn format_headers(req: &Request<&str>) -> Vec<String> {
    let mut hs = req
        .headers()
        .iter()
        .map(|(k, v)| format!("{}:{}", k, v.to_str().expect("must be valid")))
        .collect::<Vec<_>>();
    hs.sort();
    hs
}

#[test_case(get_request; "get")]
#[test_case(get_request_with_sorted_query; "get with sorted query")]
#[test_case(get_request_virtual_host; "get virtual host")]
#[test_case(put_request; "put")]
fn test_matches_aws_sigv4(req_fn: fn() -> Request<&'static str>) {
    init_logger();

    let now = time("2024-02-29T17:03:12Z");
    let expected = sign_with_aws_sigv4(req_fn(), now);
    let actual = sign_with_request_signer(req_fn(), now);

    assert_eq!(format_headers(&expected), format_headers(&actual));
}
