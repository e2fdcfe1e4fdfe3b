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

use std::collections::BTreeSet;
use std::time::Duration;

use hmacsign_core::hash::EMPTY_STRING_SHA256;
use hmacsign_core::time::{self, DateTime};
use hmacsign_core::{Error, Result};

use crate::constants::*;

/// SignerIdentity holds every constant that names a signing scheme.
///
/// An identity is built once at startup and read by every signing call.
/// The `with_*` mutators consume the identity and return a new one, so an
/// identity shared behind an `Arc` can't be edited while requests are being
/// signed. To change settings at runtime, build a new identity and publish
/// it in place of the old one.
///
/// Header sets are stored lower-cased and matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerIdentity {
    derive_key_prefix: String,
    time_format: &'static str,
    short_time_format: &'static str,
    auth_header_prefix: String,
    version_request: String,
    empty_body_sha256: &'static str,
    max_skew: Duration,
    date_header: String,
    content_sha256_header: String,
    ignored_headers: BTreeSet<String>,
    signable_headers: BTreeSet<String>,
}

impl SignerIdentity {
    /// The fixed AWS compatible identity: `AWS4-HMAC-SHA256` signing with
    /// `X-Amz-Date` and `X-Amz-Content-Sha256`.
    pub fn aws() -> Self {
        Self::build(
            AWS_DERIVE_KEY_PREFIX.to_string(),
            AWS_AUTH_HEADER_PREFIX.to_string(),
            AWS_VERSION_REQUEST.to_string(),
            X_AMZ_DATE.to_string(),
            X_AMZ_CONTENT_SHA_256.to_string(),
        )
    }

    /// Identity derived from a short name and a version.
    ///
    /// For `("NOVA", 1)`:
    ///
    /// - derive key prefix: `NOVA1`
    /// - auth header prefix: `NOVA1-HMAC-SHA256`
    /// - version request: `nova1_request`
    /// - headers: `X-NOVA-Date`, `X-NOVA-Content-Sha256`
    ///
    /// The short name must be non-empty ASCII alphanumeric since it ends up
    /// in header names.
    pub fn custom(short_name: &str, version: u32) -> Result<Self> {
        if short_name.is_empty() || !short_name.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(Error::config_invalid(format!(
                "short name must be non-empty ascii alphanumeric, got {short_name:?}"
            )));
        }

        let name_version = format!("{short_name}{version}");
        Ok(Self::build(
            name_version.to_uppercase(),
            format!("{name_version}-HMAC-SHA256"),
            format!("{name_version}_request").to_lowercase(),
            format!("X-{short_name}-Date"),
            format!("X-{short_name}-Content-Sha256"),
        ))
    }

    fn build(
        derive_key_prefix: String,
        auth_header_prefix: String,
        version_request: String,
        date_header: String,
        content_sha256_header: String,
    ) -> Self {
        let signable_headers = [date_header.as_str(), content_sha256_header.as_str()]
            .into_iter()
            .map(str::to_ascii_lowercase)
            .collect();

        Self {
            derive_key_prefix,
            time_format: time::ISO8601,
            short_time_format: time::DATE,
            auth_header_prefix,
            version_request,
            empty_body_sha256: EMPTY_STRING_SHA256,
            max_skew: DEFAULT_MAX_SKEW,
            date_header,
            content_sha256_header,
            ignored_headers: DEFAULT_IGNORED_HEADERS
                .iter()
                .map(|v| v.to_ascii_lowercase())
                .collect(),
            signable_headers,
        }
    }

    /// Replace the max clock skew accepted by verifiers.
    pub fn with_max_skew(mut self, max_skew: Duration) -> Self {
        self.max_skew = max_skew;
        self
    }

    /// Replace the ignored header prefixes.
    pub fn with_ignored_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignored_headers = headers
            .into_iter()
            .map(|v| v.as_ref().to_ascii_lowercase())
            .collect();
        self
    }

    /// Replace the signable header allow-list.
    pub fn with_signable_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.signable_headers = headers
            .into_iter()
            .map(|v| v.as_ref().to_ascii_lowercase())
            .collect();
        self
    }

    /// Prefix prepended to the secret before the first HMAC round.
    pub fn derive_key_prefix(&self) -> &str {
        &self.derive_key_prefix
    }

    /// strftime format of the full timestamp, e.g. `20240101T000000Z`.
    pub fn time_format(&self) -> &str {
        self.time_format
    }

    /// strftime format of the day, e.g. `20240101`.
    pub fn short_time_format(&self) -> &str {
        self.short_time_format
    }

    /// Algorithm name leading the string to sign and the auth header.
    pub fn auth_header_prefix(&self) -> &str {
        &self.auth_header_prefix
    }

    /// Request type closing the credential scope.
    pub fn version_request(&self) -> &str {
        &self.version_request
    }

    /// Body digest used for empty bodies.
    pub fn empty_body_sha256(&self) -> &str {
        self.empty_body_sha256
    }

    /// Max clock skew between the date header and verification time.
    pub fn max_skew(&self) -> Duration {
        self.max_skew
    }

    /// Name of the header carrying the full timestamp.
    pub fn date_header(&self) -> &str {
        &self.date_header
    }

    /// Name of the header carrying the body digest.
    pub fn content_sha256_header(&self) -> &str {
        &self.content_sha256_header
    }

    /// Lower-cased ignored header prefixes.
    pub fn ignored_headers(&self) -> &BTreeSet<String> {
        &self.ignored_headers
    }

    /// Lower-cased signable header names.
    pub fn signable_headers(&self) -> &BTreeSet<String> {
        &self.signable_headers
    }

    /// Whether `name` starts with any ignored header prefix.
    pub fn is_ignored(&self, name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        self.ignored_headers
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }

    /// Whether `name` is in the signable allow-list.
    pub fn is_signable(&self, name: &str) -> bool {
        self.signable_headers.contains(&name.to_ascii_lowercase())
    }

    /// Format time as full timestamp: `20240101T000000Z`.
    pub fn format_time(&self, t: DateTime) -> String {
        time::format_iso8601(t)
    }

    /// Format time as UTC day: `20240101`.
    pub fn format_short_time(&self, t: DateTime) -> String {
        time::format_date(t)
    }
}

impl Default for SignerIdentity {
    fn default() -> Self {
        Self::aws()
    }
}
