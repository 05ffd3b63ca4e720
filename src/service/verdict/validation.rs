//! Parsing and validation of model verdict responses

use serde::Deserialize;

use crate::model::{Verdict, VerdictStatus};
use crate::service::verdict::ScreeningError;

/// Loosely-typed response so that unknown statuses are reported, not just rejected
#[derive(Debug, Deserialize)]
struct RawVerdict {
    status: Option<String>,
    reason: Option<String>,
}

/// Parse the model's JSON answer into a verdict.
///
/// `status` must be exactly `Approved` or `Flagged` and `reason` must be a
/// non-empty string; anything else is a malformed response.
pub fn parse_verdict(text: &str) -> Result<Verdict, ScreeningError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ScreeningError::MalformedResponse("empty body".to_string()));
    }

    let raw: RawVerdict = serde_json::from_str(text)
        .map_err(|e| ScreeningError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let status = match raw.status.as_deref() {
        Some("Approved") => VerdictStatus::Approved,
        Some("Flagged") => VerdictStatus::Flagged,
        Some(other) => {
            return Err(ScreeningError::MalformedResponse(format!(
                "unrecognized status: {}",
                other
            )));
        }
        None => {
            return Err(ScreeningError::MalformedResponse(
                "missing status".to_string(),
            ));
        }
    };

    let reason = match raw.reason {
        Some(reason) if !reason.trim().is_empty() => reason,
        _ => {
            return Err(ScreeningError::MalformedResponse(
                "missing reason".to_string(),
            ));
        }
    };

    Ok(Verdict { status, reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_verdict_is_verbatim() {
        let verdict = parse_verdict(r#"{"status":"Approved","reason":"Dates consistent"}"#).unwrap();
        assert_eq!(verdict.status, VerdictStatus::Approved);
        assert_eq!(verdict.reason, "Dates consistent");

        let verdict =
            parse_verdict("\n {\"status\": \"Flagged\", \"reason\": \"Account holder mismatch\"}\n")
                .unwrap();
        assert_eq!(verdict.status, VerdictStatus::Flagged);
        assert_eq!(verdict.reason, "Account holder mismatch");
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result = parse_verdict(r#"{"status":"Unknown"}"#);
        assert!(matches!(result, Err(ScreeningError::MalformedResponse(_))));

        let result = parse_verdict(r#"{"status":"approved","reason":"lowercase"}"#);
        assert!(matches!(result, Err(ScreeningError::MalformedResponse(_))));
    }

    #[test]
    fn test_missing_fields_rejected() {
        assert!(parse_verdict(r#"{"reason":"no status"}"#).is_err());
        assert!(parse_verdict(r#"{"status":"Approved"}"#).is_err());
        assert!(parse_verdict(r#"{"status":"Approved","reason":"   "}"#).is_err());
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(parse_verdict("").is_err());
        assert!(parse_verdict("Approved").is_err());
        assert!(parse_verdict(r#"["Approved"]"#).is_err());
        assert!(parse_verdict(r#"{"status": 1, "reason": "x"}"#).is_err());
    }
}
