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
use std::time::Duration;

use hmacsign_core::utils::Redact;
use hmacsign_core::{Context, Error, Result};

use crate::constants::*;
use crate::{Credential, RequestSigner, SignerIdentity};

/// Config for the SigV4-style signer.
#[derive(Clone, Default)]
pub struct Config {
    /// Short name of the scheme, `AWS` for the AWS compatible identity.
    pub short_name: Option<String>,
    /// Version of the scheme, defaults to `1` for custom identities.
    pub version: Option<u32>,
    /// Region of the credential scope.
    pub region: Option<String>,
    /// Service of the credential scope.
    pub service: Option<String>,
    /// Access key id.
    pub access_key_id: Option<String>,
    /// Secret access key.
    pub secret_access_key: Option<String>,
    /// Max clock skew accepted by verifiers.
    pub max_skew: Option<Duration>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("short_name", &self.short_name)
            .field("version", &self.version)
            .field("region", &self.region)
            .field("service", &self.service)
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("max_skew", &self.max_skew)
            .finish()
    }
}

impl Config {
    /// Load config from environment variables.
    ///
    /// Returns an error if a numeric variable can't be parsed.
    pub fn from_env(ctx: &Context) -> Result<Self> {
        Ok(Self {
            short_name: ctx.env_var(HMACSIGN_SHORT_NAME),
            version: ctx
                .env_var(HMACSIGN_VERSION)
                .map(|v| v.parse())
                .transpose()?,
            region: ctx.env_var(HMACSIGN_REGION),
            service: ctx.env_var(HMACSIGN_SERVICE),
            access_key_id: ctx.env_var(HMACSIGN_ACCESS_KEY_ID),
            secret_access_key: ctx.env_var(HMACSIGN_SECRET_ACCESS_KEY),
            max_skew: ctx
                .env_var(HMACSIGN_MAX_SKEW_SECS)
                .map(|v| v.parse().map(Duration::from_secs))
                .transpose()?,
        })
    }

    /// Build the signer identity described by this config.
    ///
    /// An unset short name or `AWS` (in any case) selects the AWS
    /// compatible identity.
    pub fn to_identity(&self) -> Result<SignerIdentity> {
        let identity = match self.short_name.as_deref() {
            None => SignerIdentity::aws(),
            Some(name) if name.eq_ignore_ascii_case(AWS_SHORT_NAME) => SignerIdentity::aws(),
            Some(name) => SignerIdentity::custom(name, self.version.unwrap_or(1))?,
        };

        Ok(match self.max_skew {
            Some(v) => identity.with_max_skew(v),
            None => identity,
        })
    }

    /// Build a request signer for the configured identity, service and region.
    ///
    /// Missing service or region are invalid configuration.
    pub fn to_request_signer(&self) -> Result<RequestSigner> {
        let service = self
            .service
            .as_deref()
            .ok_or_else(|| Error::config_invalid("service is required"))?;
        let region = self
            .region
            .as_deref()
            .ok_or_else(|| Error::config_invalid("region is required"))?;

        Ok(RequestSigner::new(self.to_identity()?, service, region))
    }

    /// The configured credential, if both keys are present.
    pub fn credential(&self) -> Option<Credential> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(ak), Some(sk)) => Some(Credential::new(ak, sk)),
            _ => None,
        }
    }
}
