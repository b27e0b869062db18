use serde::Deserialize;
use serde_json::Value;

use crate::{EndpointKind, FailureKind, MatchRecord, SubmitError, SubmitOutcome};

const DEFAULT_FAILURE_REASON: &str = "Analysis failed";

/// What the transport layer observed, independent of reqwest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    /// Final URL when at least one redirect was followed.
    pub redirected_to: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct AnalyzeBody {
    results: Vec<MatchRecord>,
}

pub(crate) fn is_json(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"))
}

/// Turns a received response into an outcome.
///
/// Legacy endpoints hand the page over on any redirect before the body is
/// looked at; otherwise structured data wins and a redirect is only honored
/// for non-JSON responses.
pub(crate) fn interpret(
    kind: EndpointKind,
    raw: RawResponse,
) -> Result<SubmitOutcome, SubmitError> {
    if kind == EndpointKind::Legacy {
        if let Some(url) = raw.redirected_to {
            return Ok(SubmitOutcome::Redirect { url });
        }
    }

    if is_json(raw.content_type.as_deref()) {
        let value: Value = serde_json::from_slice(&raw.body)
            .map_err(|err| SubmitError::new(FailureKind::MalformedBody, err.to_string()))?;

        if !(200..300).contains(&raw.status) {
            return Err(SubmitError::new(
                FailureKind::DeclaredFailure { status: raw.status },
                failure_reason(&value),
            ));
        }

        let body: AnalyzeBody = serde_json::from_value(value)
            .map_err(|err| SubmitError::new(FailureKind::MalformedBody, err.to_string()))?;
        return Ok(SubmitOutcome::Matches(body.results));
    }

    match raw.redirected_to {
        Some(url) => Ok(SubmitOutcome::Redirect { url }),
        None => Err(SubmitError::new(
            FailureKind::UnexpectedFormat,
            "Unexpected response format",
        )),
    }
}

fn failure_reason(body: &Value) -> String {
    match body.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
        Some(Value::String(_)) | Some(Value::Null) | None => DEFAULT_FAILURE_REASON.to_string(),
        Some(other) => other.to_string(),
    }
}
