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

use std::fmt::{Debug, Formatter};

use chrono::NaiveDate;
use hmacsign_core::hash::hmac_sha256;
use hmacsign_core::time::DateTime;

use crate::SignerIdentity;

/// Inputs of one signing key derivation.
#[derive(Clone)]
pub struct SigningMaterial<'a> {
    /// UTC calendar day of the signing time.
    pub date: NaiveDate,
    /// Region of the credential scope.
    pub region: &'a str,
    /// Service of the credential scope.
    pub service: &'a str,
    /// Shared secret.
    pub secret_key: &'a [u8],
}

impl<'a> SigningMaterial<'a> {
    /// Build material for the UTC day of `time`.
    pub fn new(time: DateTime, region: &'a str, service: &'a str, secret_key: &'a [u8]) -> Self {
        Self {
            date: time.date_naive(),
            region,
            service,
            secret_key,
        }
    }
}

impl Debug for SigningMaterial<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningMaterial")
            .field("date", &self.date)
            .field("region", &self.region)
            .field("service", &self.service)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Derive the signing key through the HMAC chain:
///
/// ```text
/// kDate      = HMAC(prefix || secret, YYYYMMDD)
/// kRegion    = HMAC(kDate, region)
/// kService   = HMAC(kRegion, service)
/// signingKey = HMAC(kService, version_request)
/// ```
///
/// Keys only depend on the day, so every request signed on the same UTC day
/// for the same region and service shares one key.
pub fn generate_signing_key(identity: &SignerIdentity, material: &SigningMaterial<'_>) -> Vec<u8> {
    // Sign secret
    let prefix = identity.derive_key_prefix().as_bytes();
    let mut secret = Vec::with_capacity(prefix.len() + material.secret_key.len());
    secret.extend_from_slice(prefix);
    secret.extend_from_slice(material.secret_key);
    // Sign date
    let date = material.date.format(identity.short_time_format()).to_string();
    let sign_date = hmac_sha256(&secret, date.as_bytes());
    // Sign region
    let sign_region = hmac_sha256(&sign_date, material.region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(&sign_region, material.service.as_bytes());
    // Sign request
    hmac_sha256(&sign_service, identity.version_request().as_bytes())
}
