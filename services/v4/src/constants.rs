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

use std::time::Duration;

// Headers used by the AWS compatible identity.
pub const X_AMZ_DATE: &str = "X-Amz-Date";
pub const X_AMZ_CONTENT_SHA_256: &str = "X-Amz-Content-Sha256";
pub const X_AMZN_TRACE_ID: &str = "X-Amzn-Trace-Id";

// Constants of the AWS compatible identity.
pub const AWS_SHORT_NAME: &str = "AWS";
pub const AWS_DERIVE_KEY_PREFIX: &str = "AWS4";
pub const AWS_AUTH_HEADER_PREFIX: &str = "AWS4-HMAC-SHA256";
pub const AWS_VERSION_REQUEST: &str = "aws4_request";

/// Headers that are never signed, matched by prefix.
pub const DEFAULT_IGNORED_HEADERS: [&str; 7] = [
    "Authorization",
    "User-Agent",
    X_AMZN_TRACE_ID,
    "Accept-Encoding",
    "Connection",
    "Content-Length",
    "Accept",
];

pub const DEFAULT_MAX_SKEW: Duration = Duration::from_secs(5 * 60);

// Env values used to configure the signer.
pub const HMACSIGN_SHORT_NAME: &str = "HMACSIGN_SHORT_NAME";
pub const HMACSIGN_VERSION: &str = "HMACSIGN_VERSION";
pub const HMACSIGN_REGION: &str = "HMACSIGN_REGION";
pub const HMACSIGN_SERVICE: &str = "HMACSIGN_SERVICE";
pub const HMACSIGN_ACCESS_KEY_ID: &str = "HMACSIGN_ACCESS_KEY_ID";
pub const HMACSIGN_SECRET_ACCESS_KEY: &str = "HMACSIGN_SECRET_ACCESS_KEY";
pub const HMACSIGN_MAX_SKEW_SECS: &str = "HMACSIGN_MAX_SKEW_SECS";
