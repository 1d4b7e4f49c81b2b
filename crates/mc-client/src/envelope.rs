//! Response envelope decoding and validation.
//!
//! The provider wraps every answer in an envelope whose `meta.status` and
//! `fail` array carry the real outcome; a transport-level 200 says nothing
//! about whether the call succeeded.
//!
//! ```json
//! { "meta": { "status": 200, "pagination": { "pageSize": 100, "next": "..." } },
//!   "data": [ ... ],
//!   "fail": [ { "key": {...}, "errors": [ { "code": "...", "message": "...", "retryable": false } ] } ] }
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// The provider's internal success status.
pub const SUCCESS_STATUS: u16 = 200;

/// Failure code the provider intermittently reports for valid developer keys.
pub const DEVELOPER_KEY_DEFECT_CODE: &str = "err_developer_key_not_found";

/// A decoded response envelope.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub data: Vec<T>,
    pub meta: Meta,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fail: Vec<FailRecord>,
}

/// Absent and `null` arrays both decode as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// An envelope whose data items have not been narrowed to a concrete type.
pub type RawEnvelope = Envelope<serde_json::Value>;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Meta {
    pub status: u16,
    #[serde(default)]
    pub pagination: Option<PaginationMeta>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

/// One entry of the `fail` array.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FailRecord {
    #[serde(default)]
    pub key: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub errors: Vec<FailError>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FailError {
    /// Empty when the provider omits it; such records never match the defect.
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub retryable: bool,
}

impl<T> Envelope<T> {
    /// The continuation cursor, if the listing has more pages.
    ///
    /// An empty string is treated as no cursor.
    pub fn next_cursor(&self) -> Option<&str> {
        self.meta
            .pagination
            .as_ref()
            .and_then(|p| p.next.as_deref())
            .filter(|next| !next.is_empty())
    }

    pub fn has_failures(&self) -> bool {
        !self.fail.is_empty()
    }
}

impl RawEnvelope {
    /// Convert the data items into `T`.
    pub fn narrow<T: DeserializeOwned>(self) -> serde_json::Result<Envelope<T>> {
        let data = self
            .data
            .into_iter()
            .map(serde_json::from_value)
            .collect::<serde_json::Result<Vec<T>>>()?;

        Ok(Envelope {
            data,
            meta: self.meta,
            fail: self.fail,
        })
    }
}

/// Outcome of decoding a response body.
#[derive(Debug)]
pub enum Decoded {
    Envelope(RawEnvelope),
    Malformed(String),
}

/// Decode a response body into an envelope without trusting its shape.
pub fn decode(body: &[u8]) -> Decoded {
    match serde_json::from_slice::<RawEnvelope>(body) {
        Ok(envelope) => Decoded::Envelope(envelope),
        Err(e) => Decoded::Malformed(e.to_string()),
    }
}

/// What to do with a decoded envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Usable; any failure records are tolerated and only reported.
    Accept,
    /// The developer-key defect: resend the request once.
    RetryOnce,
    /// The envelope reports a non-success status.
    Fail { status: u16 },
}

/// Classify an envelope.
///
/// The defect is recognised only in the first failure record, matching how
/// the provider reports it.
pub fn inspect<T>(envelope: &Envelope<T>) -> Verdict {
    if envelope.meta.status != SUCCESS_STATUS {
        return Verdict::Fail {
            status: envelope.meta.status,
        };
    }

    let defect = envelope.fail.first().is_some_and(|record| {
        record
            .errors
            .iter()
            .any(|e| e.code == DEVELOPER_KEY_DEFECT_CODE)
    });

    if defect {
        Verdict::RetryOnce
    } else {
        Verdict::Accept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: serde_json::Value) -> RawEnvelope {
        match decode(value.to_string().as_bytes()) {
            Decoded::Envelope(e) => e,
            Decoded::Malformed(reason) => panic!("unexpected malformed envelope: {reason}"),
        }
    }

    #[test]
    fn test_accepts_success() {
        let env = envelope(json!({ "meta": { "status": 200 }, "data": [{ "id": "1" }] }));
        assert_eq!(inspect(&env), Verdict::Accept);
        assert_eq!(env.next_cursor(), None);
        assert!(!env.has_failures());
    }

    #[test]
    fn test_body_status_overrides_transport_success() {
        let env = envelope(json!({ "meta": { "status": 500 }, "data": [] }));
        assert_eq!(inspect(&env), Verdict::Fail { status: 500 });
    }

    #[test]
    fn test_developer_key_defect_requests_retry() {
        let env = envelope(json!({
            "meta": { "status": 200 },
            "data": [],
            "fail": [{ "errors": [
                { "code": "err_other", "message": "x", "retryable": false },
                { "code": DEVELOPER_KEY_DEFECT_CODE, "message": "Developer key not found", "retryable": false }
            ]}]
        }));
        assert_eq!(inspect(&env), Verdict::RetryOnce);
    }

    #[test]
    fn test_defect_only_checked_in_first_record() {
        let env = envelope(json!({
            "meta": { "status": 200 },
            "fail": [
                { "errors": [{ "code": "err_validation_failed", "message": "bad" }] },
                { "errors": [{ "code": DEVELOPER_KEY_DEFECT_CODE }] }
            ]
        }));
        assert_eq!(inspect(&env), Verdict::Accept);
        assert!(env.has_failures());
    }

    #[test]
    fn test_other_failures_are_tolerated() {
        let env = envelope(json!({
            "meta": { "status": 200 },
            "data": [{ "id": "ok" }],
            "fail": [{ "key": { "domain": "x" }, "errors": [{ "code": "err_domain_not_found", "message": "nope" }] }]
        }));
        assert_eq!(inspect(&env), Verdict::Accept);
        assert_eq!(env.data.len(), 1);
    }

    #[test]
    fn test_null_arrays_decode_as_empty() {
        let env = envelope(json!({ "meta": { "status": 200 }, "data": [{ "id": "d1" }], "fail": null }));
        assert_eq!(inspect(&env), Verdict::Accept);
        assert_eq!(env.data.len(), 1);
        assert!(!env.has_failures());

        let env = envelope(json!({ "meta": { "status": 200 }, "data": null }));
        assert!(env.data.is_empty());

        let env = envelope(json!({ "meta": { "status": 200 }, "fail": [{ "errors": null }] }));
        assert!(env.has_failures());
        assert_eq!(inspect(&env), Verdict::Accept);
    }

    #[test]
    fn test_failure_without_code_is_tolerated() {
        let env = envelope(json!({
            "meta": { "status": 200 },
            "data": [{ "id": "d1" }],
            "fail": [{ "errors": [{ "message": "partial" }] }]
        }));
        assert_eq!(inspect(&env), Verdict::Accept);
        assert_eq!(env.fail[0].errors[0].code, "");
        assert_eq!(env.data.len(), 1);
    }

    #[test]
    fn test_next_cursor() {
        let env = envelope(json!({
            "meta": { "status": 200, "pagination": { "pageSize": 100, "next": "t1" } }
        }));
        assert_eq!(env.next_cursor(), Some("t1"));
        assert!(env.data.is_empty());

        let env = envelope(json!({
            "meta": { "status": 200, "pagination": { "pageSize": 100, "next": "" } }
        }));
        assert_eq!(env.next_cursor(), None);
    }

    #[test]
    fn test_malformed_bodies() {
        assert!(matches!(decode(b"<html>gateway</html>"), Decoded::Malformed(_)));
        assert!(matches!(decode(br#"{ "data": [] }"#), Decoded::Malformed(_)));
    }

    #[test]
    fn test_narrow() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Item {
            id: String,
        }

        let env = envelope(json!({ "meta": { "status": 200 }, "data": [{ "id": "a" }, { "id": "b" }] }));
        let narrowed: Envelope<Item> = env.narrow().unwrap();
        assert_eq!(
            narrowed.data,
            vec![Item { id: "a".into() }, Item { id: "b".into() }]
        );

        let env = envelope(json!({ "meta": { "status": 200 }, "data": [{ "id": 7 }] }));
        assert!(env.narrow::<Item>().is_err());
    }
}
