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

use std::sync::Arc;

use http::header::{self, HeaderName};
use http::request::Parts;
use http::HeaderValue;
use log::debug;

use hmacsign_core::hash::{hex_hmac_sha256, hex_sha256};
use hmacsign_core::time::{now, DateTime};
use hmacsign_core::{RequestView, Result, SignRequest};

use crate::canonical::{body_digest, canonical_request_string, canonicalize_headers};
use crate::key::{generate_signing_key, SigningMaterial};
use crate::{Credential, SignerIdentity};

/// Headers produced by one signing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningOutput {
    /// Value of the identity's date header: the full timestamp.
    pub date: String,
    /// Value of the identity's content hash header: the body digest.
    pub content_sha256: String,
    /// Signed header names joined by `;`.
    pub signed_headers: String,
    /// Hex encoded signature.
    pub signature: String,
    /// Value of the `Authorization` header.
    pub authorization: String,
}

/// RequestSigner that implements SigV4-style signing for one identity,
/// service and region.
///
/// The signer holds no per-request state and can be shared across threads.
#[derive(Debug)]
pub struct RequestSigner {
    identity: Arc<SignerIdentity>,
    service: String,
    region: String,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new(identity: impl Into<Arc<SignerIdentity>>, service: &str, region: &str) -> Self {
        Self {
            identity: identity.into(),
            service: service.into(),
            region: region.into(),

            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// The identity used by this signer.
    pub fn identity(&self) -> &SignerIdentity {
        &self.identity
    }

    /// Sign the request view at `time` without touching any request.
    ///
    /// This is a pure function of its inputs: the same request, body,
    /// credential and time always produce the same output.
    pub fn sign(
        &self,
        req: &RequestView<'_>,
        body: &[u8],
        cred: &Credential,
        time: DateTime,
    ) -> SigningOutput {
        let digest = body_digest(&self.identity, body);
        self.sign_with_digest(req, digest, cred, time)
    }

    fn sign_with_digest(
        &self,
        req: &RequestView<'_>,
        digest: String,
        cred: &Credential,
        time: DateTime,
    ) -> SigningOutput {
        let identity = &*self.identity;

        let headers = canonicalize_headers(identity, req);
        let creq = canonical_request_string(req, &headers, &digest);
        debug!("calculated canonical request: {creq}");

        // Scope: "20220313/<region>/<service>/<version_request>"
        let scope = credential_scope(identity, time, &self.region, &self.service);
        debug!("calculated scope: {scope}");

        let string_to_sign = string_to_sign(identity, time, &scope, &creq);
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = generate_signing_key(
            identity,
            &SigningMaterial::new(
                time,
                &self.region,
                &self.service,
                cred.secret_access_key.as_bytes(),
            ),
        );
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        let signed_headers = headers.signed_headers_string();
        let authorization = authorization_header(
            identity,
            &cred.access_key_id,
            &scope,
            &signed_headers,
            &signature,
        );

        SigningOutput {
            date: identity.format_time(time),
            content_sha256: digest,
            signed_headers,
            signature,
            authorization,
        }
    }
}

impl SignRequest for RequestSigner {
    type Credential = Credential;

    /// Sign the request in place.
    ///
    /// The date and content hash headers are written first so they are
    /// covered by the signature whenever the identity lists them as
    /// signable. `Authorization` is written last and marked sensitive.
    fn sign_request(
        &self,
        req: &mut Parts,
        body: &[u8],
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let now = self.time.unwrap_or_else(now);

        let Some(cred) = credential else {
            return Ok(());
        };

        let digest = body_digest(&self.identity, body);
        req.headers.insert(
            HeaderName::from_bytes(self.identity.date_header().as_bytes())?,
            HeaderValue::try_from(self.identity.format_time(now))?,
        );
        req.headers.insert(
            HeaderName::from_bytes(self.identity.content_sha256_header().as_bytes())?,
            HeaderValue::try_from(digest.as_str())?,
        );

        let output = self.sign_with_digest(&RequestView::from_parts(req), digest, cred, now);

        let mut authorization = HeaderValue::try_from(output.authorization)?;
        authorization.set_sensitive(true);
        req.headers.insert(header::AUTHORIZATION, authorization);

        Ok(())
    }
}

/// Build the credential scope: `YYYYMMDD/<region>/<service>/<version_request>`.
pub fn credential_scope(
    identity: &SignerIdentity,
    time: DateTime,
    region: &str,
    service: &str,
) -> String {
    format!(
        "{}/{}/{}/{}",
        identity.format_short_time(time),
        region,
        service,
        identity.version_request()
    )
}

/// Build the string to sign.
///
/// ```text
/// AWS4-HMAC-SHA256
/// 20220313T072004Z
/// 20220313/<region>/<service>/aws4_request
/// <hashed_canonical_request>
/// ```
pub fn string_to_sign(
    identity: &SignerIdentity,
    time: DateTime,
    scope: &str,
    canonical_request: &str,
) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        identity.auth_header_prefix(),
        identity.format_time(time),
        scope,
        hex_sha256(canonical_request.as_bytes())
    )
}

/// Render the `Authorization` header value.
pub fn authorization_header(
    identity: &SignerIdentity,
    access_key_id: &str,
    scope: &str,
    signed_headers: &str,
    signature: &str,
) -> String {
    format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        identity.auth_header_prefix(),
        access_key_id,
        scope,
        signed_headers,
        signature
    )
}
