use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use hmacsign_core::{Context, ErrorKind, Signer, StaticEnv};
use hmacsign_v4::{
    Config, ConfigCredentialProvider, EnvCredentialProvider, RequestSigner, SignerIdentity,
    StaticCredentialProvider,
};
use http::{header, Request};
use pretty_assertions::assert_eq;

use super::{init_logger, time, ACCESS_KEY_ID, SECRET_ACCESS_KEY};

fn env_context(pairs: &[(&str, &str)]) -> Context {
    let envs = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<HashMap<_, _>>();
    Context::new().with_env(StaticEnv { envs })
}

fn new_parts(uri: &str) -> http::request::Parts {
    Request::get(uri)
        .body(())
        .expect("request must be valid")
        .into_parts()
        .0
}

#[test]
fn test_signer_with_env_provider() {
    init_logger();

    let ctx = env_context(&[
        ("HMACSIGN_ACCESS_KEY_ID", ACCESS_KEY_ID),
        ("HMACSIGN_SECRET_ACCESS_KEY", SECRET_ACCESS_KEY),
    ]);
    let signer = Signer::new(
        ctx,
        EnvCredentialProvider::new(),
        RequestSigner::new(SignerIdentity::aws(), "s3", "us-east-1")
            .with_time(time("2024-01-01T00:00:00Z")),
    );

    let mut parts = new_parts("http://127.0.0.1:9000/hello");
    signer.sign(&mut parts, b"").expect("sign must succeed");

    assert!(parts.headers[header::AUTHORIZATION]
        .to_str()
        .expect("must be valid")
        .ends_with("Signature=0efa1c34182756bbc783f90dc08ca08dca94595cef903573f4c3afc2be35d73b"));
}

#[test]
fn test_signer_without_credential_is_anonymous() {
    let signer = Signer::new(
        env_context(&[]),
        EnvCredentialProvider::new(),
        RequestSigner::new(SignerIdentity::aws(), "s3", "us-east-1"),
    );

    let mut parts = new_parts("http://127.0.0.1:9000/hello");
    signer.sign(&mut parts, b"").expect("sign must succeed");

    assert!(parts.headers.is_empty());
}

#[test]
fn test_signer_rejects_empty_secret() {
    let signer = Signer::new(
        Context::new(),
        StaticCredentialProvider::new(ACCESS_KEY_ID, ""),
        RequestSigner::new(SignerIdentity::aws(), "s3", "us-east-1"),
    );

    let mut parts = new_parts("http://127.0.0.1:9000/hello");
    let err = signer.sign(&mut parts, b"").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    assert!(!parts.headers.contains_key(header::AUTHORIZATION));
}

#[test]
fn test_signer_from_config() {
    let ctx = env_context(&[
        ("HMACSIGN_SHORT_NAME", "NOVA"),
        ("HMACSIGN_REGION", "cn-east-1"),
        ("HMACSIGN_SERVICE", "storage"),
        ("HMACSIGN_ACCESS_KEY_ID", ACCESS_KEY_ID),
        ("HMACSIGN_SECRET_ACCESS_KEY", SECRET_ACCESS_KEY),
    ]);
    let cfg = Config::from_env(&ctx).expect("config must be valid");
    let request_signer = cfg
        .to_request_signer()
        .expect("config must describe a signer");
    let signer = Signer::new(
        Context::new(),
        ConfigCredentialProvider::new(Arc::new(cfg)),
        request_signer,
    );

    let mut parts = new_parts("https://api.example.com/objects/a.txt");
    signer.sign(&mut parts, b"Hello, World!").expect("sign must succeed");

    let auth = parts.headers[header::AUTHORIZATION]
        .to_str()
        .expect("must be valid")
        .to_string();
    assert!(auth.starts_with(&format!(
        "NOVA1-HMAC-SHA256 Credential={ACCESS_KEY_ID}/"
    )));
    assert!(auth.contains("/cn-east-1/storage/nova1_request, "));
    assert!(auth.contains("SignedHeaders=host;x-nova-content-sha256;x-nova-date, "));
}

#[test]
fn test_signer_from_config_without_keys_is_anonymous() {
    let ctx = env_context(&[
        ("HMACSIGN_REGION", "cn-east-1"),
        ("HMACSIGN_SERVICE", "storage"),
    ]);
    let cfg = Config::from_env(&ctx).expect("config must be valid");
    let request_signer = cfg
        .to_request_signer()
        .expect("config must describe a signer");
    let signer = Signer::new(
        Context::new(),
        ConfigCredentialProvider::new(Arc::new(cfg)),
        request_signer,
    );

    let mut parts = new_parts("https://api.example.com/objects/a.txt");
    signer.sign(&mut parts, b"").expect("sign must succeed");

    assert!(parts.headers.is_empty());
}

#[test]
fn test_credential_debug_with_non_ascii_secret() {
    let cred = hmacsign_v4::Credential::new(ACCESS_KEY_ID, "пароль-секрет-ключ");

    let s = format!("{cred:?}");
    assert!(s.contains("пар***люч"));
    assert!(!s.contains("секрет"));
}

#[test]
fn test_shared_identity_across_threads() {
    let identity = Arc::new(SignerIdentity::custom("NOVA", 1).expect("identity must be valid"));
    let now = time("2024-03-15T12:30:45Z");

    let handles = ["us-east-1", "eu-west-1", "ap-south-1"]
        .into_iter()
        .map(|region| {
            let identity = identity.clone();
            thread::spawn(move || {
                let signer = Signer::new(
                    Context::new(),
                    StaticCredentialProvider::new(ACCESS_KEY_ID, SECRET_ACCESS_KEY),
                    RequestSigner::new(identity, "storage", region).with_time(now),
                );
                let mut parts = new_parts("https://api.example.com/");
                signer.sign(&mut parts, b"").expect("sign must succeed");
                parts.headers[header::AUTHORIZATION]
                    .to_str()
                    .expect("must be valid")
                    .to_string()
            })
        })
        .collect::<Vec<_>>();

    let auths = handles
        .into_iter()
        .map(|h| h.join().expect("thread must not panic"))
        .collect::<Vec<_>>();

    assert!(auths[0].contains("/us-east-1/storage/"));
    assert!(auths[1].contains("/eu-west-1/storage/"));
    assert!(auths[2].contains("/ap-south-1/storage/"));
    assert_eq!(Arc::strong_count(&identity), 1);
}
