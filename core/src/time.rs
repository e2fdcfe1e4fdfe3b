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

//! Time related utils.

use crate::Result;
use chrono::Utc;

/// DateTime is the alias for chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// Date format: "20220313"
pub const DATE: &str = "%Y%m%d";

/// Time format for ISO 8601 basic: "20220313T072004Z"
pub const ISO8601: &str = "%Y%m%dT%H%M%SZ";

/// Create a new DateTime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time with given strftime style format.
pub fn format(t: DateTime, fmt: &str) -> String {
    t.format(fmt).to_string()
}

/// Format time into date: `20220301`
pub fn format_date(t: DateTime) -> String {
    format(t, DATE)
}

/// Format time into ISO8601 basic: `20220313T072004Z`
pub fn format_iso8601(t: DateTime) -> String {
    format(t, ISO8601)
}

/// Parse time from RFC3339: `2022-03-13T07:20:04Z`
pub fn parse_rfc3339(s: &str) -> Result<DateTime> {
    Ok(chrono::DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
}
