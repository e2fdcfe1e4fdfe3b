// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! SigV4-style request signing.
//!
//! This crate signs HTTP requests with a scheme modeled on
//! [AWS Signature Version 4](https://docs.aws.amazon.com/IAM/latest/UserGuide/reference_sigv-create-signed-request.html):
//!
//! 1. the signable headers are canonicalized,
//! 2. a canonical request is built from the request line, headers and body digest,
//! 3. a signing key is derived from the secret through an HMAC-SHA256 chain
//!    scoped to day, region and service,
//! 4. the string to sign is HMAC-ed with that key into the signature.
//!
//! Algorithm names and header names come from a [`SignerIdentity`]: either
//! the fixed AWS compatible one or one derived from a short name and version.
//!
//! ## Example
//!
//! ```
//! use hmacsign_core::{Context, Signer};
//! use hmacsign_v4::{RequestSigner, SignerIdentity, StaticCredentialProvider};
//!
//! # fn main() -> hmacsign_core::Result<()> {
//! let identity = SignerIdentity::custom("NOVA", 1)?;
//! let signer = Signer::new(
//!     Context::new(),
//!     StaticCredentialProvider::new("access_key_id", "secret_access_key"),
//!     RequestSigner::new(identity, "storage", "cn-east-1"),
//! );
//!
//! let body = b"Hello, World!";
//! let (mut parts, _) = http::Request::put("https://api.example.com/objects/a.txt")
//!     .body(())
//!     .unwrap()
//!     .into_parts();
//! signer.sign(&mut parts, body)?;
//!
//! assert!(parts.headers.contains_key("x-nova-date"));
//! assert!(parts.headers.contains_key("x-nova-content-sha256"));
//! assert!(parts.headers.contains_key(http::header::AUTHORIZATION));
//! # Ok(())
//! # }
//! ```
//!
//! ## Limitations
//!
//! Path and query are signed exactly as given: no percent re-encoding and
//! no query sorting. Verification lives on the receiving side and is not
//! provided here.

mod constants;

mod identity;
pub use identity::SignerIdentity;

pub mod canonical;
pub use canonical::CanonicalHeaders;

mod key;
pub use key::{generate_signing_key, SigningMaterial};

mod credential;
pub use credential::Credential;

mod config;
pub use config::Config;

mod provide_credential;
pub use provide_credential::*;

mod sign_request;
pub use sign_request::{
    authorization_header, credential_scope, string_to_sign, RequestSigner, SigningOutput,
};
