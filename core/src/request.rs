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

use std::borrow::Cow;

use http::header;
use http::HeaderMap;

/// Read-only view of the request being signed.
///
/// The view borrows everything from the caller and never mutates it. Path
/// and query are kept exactly as given: no percent decoding, re-encoding or
/// sorting happens here.
#[derive(Debug, Clone, Copy)]
pub struct RequestView<'a> {
    /// HTTP method.
    pub method: &'a str,
    /// HTTP path.
    pub path: &'a str,
    /// Raw query string without the leading `?`.
    pub query: &'a str,
    /// HTTP headers.
    pub headers: &'a HeaderMap,
    /// URL authority, used when the headers carry no `Host`.
    pub authority: &'a str,
}

impl<'a> RequestView<'a> {
    /// Build a view from raw pieces.
    pub fn new(
        method: &'a str,
        path: &'a str,
        query: &'a str,
        headers: &'a HeaderMap,
        authority: &'a str,
    ) -> Self {
        Self {
            method,
            path,
            query,
            headers,
            authority,
        }
    }

    /// Build a view from http::request::Parts.
    ///
    /// A request without a path is treated as `/`, and a request without
    /// authority yields an empty authority.
    pub fn from_parts(parts: &'a http::request::Parts) -> Self {
        let (path, query) = match parts.uri.path_and_query() {
            Some(paq) => (paq.path(), paq.query().unwrap_or_default()),
            None => ("/", ""),
        };

        Self {
            method: parts.method.as_str(),
            path,
            query,
            headers: &parts.headers,
            authority: parts
                .uri
                .authority()
                .map(|v| v.as_str())
                .unwrap_or_default(),
        }
    }

    /// Value of the `host` line: the `Host` header verbatim if present,
    /// otherwise the URL authority.
    pub fn host(&self) -> Cow<'a, str> {
        match self.headers.get(header::HOST) {
            Some(v) => String::from_utf8_lossy(v.as_bytes()),
            None => Cow::Borrowed(self.authority),
        }
    }
}
