use casaflow_core::{ClientError, ClientResult};
use serde::Deserialize;
use serde_json::Value;

/// Status discriminator every backend response carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ResponseStatus {
    /// The operation succeeded; `data` holds the payload.
    Succeed,
    /// The operation failed; `message`/`code`/`errors` describe why.
    Failed,
    /// Any other status string. Treated the same as `Failed`.
    #[serde(other)]
    Unknown,
}

/// The uniform `{status, data, message, code, errors}` wrapper every API
/// response uses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Outcome discriminator.
    pub status: ResponseStatus,
    /// Payload on success; may carry diagnostic data on failure.
    #[serde(default)]
    pub data: Option<Value>,
    /// User-facing message, mostly present on failures.
    #[serde(default)]
    pub message: Option<String>,
    /// Domain error code for failures callers branch on.
    #[serde(default)]
    pub code: Option<String>,
    /// Per-field validation errors, verbatim.
    #[serde(default)]
    pub errors: Option<Value>,
}

impl Envelope {
    /// Unwraps the envelope into its payload.
    ///
    /// Anything other than `Succeed` becomes [`ClientError::Api`] carrying
    /// the message, code, errors, and data so callers can branch on the
    /// domain code.
    pub fn into_result(self) -> ClientResult<Value> {
        match self.status {
            ResponseStatus::Succeed => Ok(self.data.unwrap_or(Value::Null)),
            ResponseStatus::Failed | ResponseStatus::Unknown => Err(ClientError::Api {
                code: self.code,
                message: self
                    .message
                    .unwrap_or_else(|| "the request failed".to_owned()),
                errors: self.errors,
                data: self.data,
            }),
        }
    }

    /// Parses a raw response body and unwraps it in one step.
    pub fn decode(value: Value) -> ClientResult<Value> {
        let envelope: Self = serde_json::from_value(value)
            .map_err(|error| ClientError::Decode(format!("malformed response envelope: {error}")))?;
        envelope.into_result()
    }
}

#[cfg(test)]
mod tests {
    use casaflow_core::ClientError;
    use serde_json::json;

    use super::Envelope;

    #[test]
    fn succeed_envelope_yields_data() {
        let value = json!({"status": "Succeed", "data": {"id": 7}, "message": null});
        let data = Envelope::decode(value);
        assert_eq!(data.ok(), Some(json!({"id": 7})));
    }

    #[test]
    fn succeed_envelope_without_data_yields_null() {
        let value = json!({"status": "Succeed"});
        assert_eq!(Envelope::decode(value).ok(), Some(serde_json::Value::Null));
    }

    #[test]
    fn failed_envelope_carries_message_and_code() {
        let value = json!({
            "status": "Failed",
            "message": "company restricted",
            "code": "company_restricted",
            "errors": null,
        });
        match Envelope::decode(value) {
            Err(ClientError::Api { code, message, .. }) => {
                assert_eq!(code.as_deref(), Some("company_restricted"));
                assert_eq!(message, "company restricted");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_status_is_treated_as_failure() {
        let value = json!({"status": "Pending", "data": null});
        assert!(Envelope::decode(value).is_err());
    }

    #[test]
    fn non_envelope_body_is_a_decode_error() {
        let value = json!(["not", "an", "envelope"]);
        assert!(matches!(
            Envelope::decode(value),
            Err(ClientError::Decode(_))
        ));
    }
}
