//! Classification of raw weatherstack response bodies.
//!
//! The provider reports failures in-band with HTTP 200, so a body has to be
//! matched against both known shapes. Classification is total: every body
//! maps to `Success`, `Error`, or `Unrecognized`, and the caller decides
//! failure semantics.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::TIME_FORMAT;

/// Successful weatherstack payload, reduced to the fields we keep.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SuccessPayload {
    pub location: Location,
    pub current: Current,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    /// Provider-local observation time, pattern `yyyy-MM-dd HH:mm`.
    pub localtime: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Current {
    pub temperature: i32,
}

/// Structured error reported by the provider (bad key, unknown city, quota).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: String,
    #[serde(rename = "type")]
    pub error_type: String,
    pub info: String,
}

/// Outcome of classifying one raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamResponse {
    Success(SuccessPayload),
    Error(ErrorPayload),
    Unrecognized,
}

/// Classify a raw body against the success shape first, then the error shape.
///
/// A success payload whose `localtime` does not parse with the fixed pattern
/// is treated as a provider contract change and classified `Unrecognized`.
pub fn classify(raw: &str) -> UpstreamResponse {
    if let Ok(success) = serde_json::from_str::<SuccessPayload>(raw) {
        if NaiveDateTime::parse_from_str(&success.location.localtime, TIME_FORMAT).is_err() {
            return UpstreamResponse::Unrecognized;
        }
        return UpstreamResponse::Success(success);
    }

    if let Ok(error) = serde_json::from_str::<ErrorPayload>(raw) {
        return UpstreamResponse::Error(error);
    }

    UpstreamResponse::Unrecognized
}

/// Cap a raw body for log and error output.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    // The cut must land on a char boundary; provider bodies are not
    // guaranteed to be ASCII.
    let cut = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
    format!("{}...", &body[..cut])
}
