//! Request descriptors for the Mimecast API.
//!
//! Every call is a POST with a JSON body of the form:
//!
//! ```json
//! { "data": [ { "domain": "example.com" } ],
//!   "meta": { "pagination": { "pageSize": 100, "pageToken": "..." } } }
//! ```

use serde::Serialize;

use crate::error::{Error, ErrorKind, Result};

/// What a call is for, which decides how its failures are classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// Credential verification; failures are authentication errors.
    Authentication,
    /// Any other read; failures are provider API errors.
    DataFetch,
}

/// The JSON body sent on the wire.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RequestBody {
    data: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<RequestMeta>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
struct RequestMeta {
    pagination: PaginationRequest,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct PaginationRequest {
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_token: Option<String>,
}

/// A single API call: path, body shape and call classification.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    path: String,
    body: RequestBody,
    kind: CallKind,
    idempotent: bool,
}

impl ApiRequest {
    /// A data-fetch request to `path` with an empty `data` array.
    ///
    /// All provider reads are POSTs without side effects, so requests are
    /// marked idempotent (eligible for transport retries) by default.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            body: RequestBody {
                data: Vec::new(),
                meta: None,
            },
            kind: CallKind::DataFetch,
            idempotent: true,
        }
    }

    /// Classify this request as the authentication verification call.
    pub fn authentication(mut self) -> Self {
        self.kind = CallKind::Authentication;
        self
    }

    /// Append one item to the `data` array.
    pub fn datum<T: Serialize>(mut self, item: &T) -> Result<Self> {
        let value = serde_json::to_value(item).map_err(|e| {
            Error::with_source(ErrorKind::Config(format!("unserializable request data: {e}")), e)
        })?;
        self.body.data.push(value);
        Ok(self)
    }

    /// Request one page of a listing, continuing from `page_token` if given.
    pub fn paginate(mut self, page_size: u32, page_token: Option<&str>) -> Self {
        self.body.meta = Some(RequestMeta {
            pagination: PaginationRequest {
                page_size,
                page_token: page_token.map(str::to_string),
            },
        });
        self
    }

    /// Exclude this request from transport-level retries.
    pub fn non_idempotent(mut self) -> Self {
        self.idempotent = false;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> CallKind {
        self.kind
    }

    pub fn is_idempotent(&self) -> bool {
        self.idempotent
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }
}
