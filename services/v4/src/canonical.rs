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

//! Header canonicalization and canonical request building.

use std::collections::BTreeMap;

use hmacsign_core::hash::hex_sha256;
use hmacsign_core::RequestView;

use crate::SignerIdentity;

const HOST: &str = "host";

/// Canonical headers of one request.
///
/// Recomputed for every signing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalHeaders {
    block: String,
    signed_headers: Vec<String>,
}

impl CanonicalHeaders {
    /// Rendered `name:value` lines joined by `\n`, without trailing newline.
    pub fn block(&self) -> &str {
        &self.block
    }

    /// Signed header names in sorted order. Always contains `host` once.
    pub fn signed_headers(&self) -> &[String] {
        &self.signed_headers
    }

    /// Signed header names joined by `;`.
    pub fn signed_headers_string(&self) -> String {
        self.signed_headers.join(";")
    }
}

/// Select, normalize and serialize the headers that must be signed.
///
/// - `host` is always signed, taken from the `Host` header or the authority.
/// - Other headers are signed only when they are signable and not ignored.
///   Ignored prefixes win over the signable list.
/// - Repeated values are trimmed and joined by `,` in insertion order.
/// - Lines are sorted by name and passed through [`strip_excess_spaces`].
///
/// Headers that are not valid utf-8 are rendered lossily.
pub fn canonicalize_headers(identity: &SignerIdentity, req: &RequestView<'_>) -> CanonicalHeaders {
    let mut values: BTreeMap<String, String> = BTreeMap::new();

    for name in req.headers.keys() {
        let name = name.as_str();
        if name == HOST || !identity.is_signable(name) || identity.is_ignored(name) {
            continue;
        }

        let merged = req
            .headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).trim().to_string())
            .collect::<Vec<_>>()
            .join(",");
        values.insert(name.to_string(), merged);
    }
    values.insert(HOST.to_string(), req.host().into_owned());

    let mut block = String::with_capacity(128);
    for (idx, (name, value)) in values.iter().enumerate() {
        if idx != 0 {
            block.push('\n');
        }
        block.push_str(&strip_excess_spaces(&format!("{name}:{value}")));
    }

    CanonicalHeaders {
        block,
        signed_headers: values.into_keys().collect(),
    }
}

/// Trim leading and trailing spaces, then collapse every run of two or
/// more spaces into one.
///
/// Only `' '` is touched. Single spaces and other whitespace stay as is.
pub fn strip_excess_spaces(line: &str) -> String {
    let line = line.trim_matches(' ');
    if !line.contains("  ") {
        return line.to_string();
    }

    let mut s = String::with_capacity(line.len());
    let mut last_is_space = false;
    for c in line.chars() {
        if c == ' ' && last_is_space {
            continue;
        }
        last_is_space = c == ' ';
        s.push(c);
    }
    s
}

/// Lower-case hex SHA256 of the body, or the identity's empty body digest.
pub fn body_digest(identity: &SignerIdentity, body: &[u8]) -> String {
    if body.is_empty() {
        identity.empty_body_sha256().to_string()
    } else {
        hex_sha256(body)
    }
}

/// Build the canonical request string.
///
/// ```text
/// <method>
/// <path>
/// <query>
/// <canonical headers>
///
/// <signed headers>
/// <body digest>
/// ```
///
/// Method, path and query are used exactly as given. The path is not
/// re-encoded and the query is not sorted, so callers must pass them in
/// the form the verifier will see.
pub fn canonical_request_string(
    req: &RequestView<'_>,
    headers: &CanonicalHeaders,
    body_digest: &str,
) -> String {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    for part in [req.method, req.path, req.query, headers.block()] {
        f.push_str(part);
        f.push('\n');
    }
    f.push('\n');
    f.push_str(&headers.signed_headers_string());
    f.push('\n');
    f.push_str(body_digest);

    f
}
