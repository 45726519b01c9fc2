use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use super::error::ValidationError;
use super::validation::validate_payload;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TriggerRequest {
    #[serde(default)]
    pub payload: Option<Value>,
}

/// A validated, non-null payload. Shared read-only between the concurrent
/// deliveries of one trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload(Arc<Value>);

impl Payload {
    pub fn new(payload: Option<Value>) -> Result<Self, ValidationError> {
        validate_payload(payload.as_ref())?;
        match payload {
            Some(value) => Ok(Self(Arc::new(value))),
            None => Err(ValidationError::PayloadRequired),
        }
    }

    pub fn value(&self) -> &Value {
        &self.0
    }
}

impl TryFrom<TriggerRequest> for Payload {
    type Error = ValidationError;

    fn try_from(req: TriggerRequest) -> Result<Self, Self::Error> {
        Self::new(req.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_and_missing_payloads_are_rejected() {
        let req: TriggerRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(Payload::try_from(req), Err(ValidationError::PayloadRequired));

        let req: TriggerRequest = serde_json::from_str(r#"{"payload":null}"#).unwrap();
        assert_eq!(Payload::try_from(req), Err(ValidationError::PayloadRequired));
    }

    #[test]
    fn falsy_payloads_are_kept_as_is() {
        let payload = Payload::new(Some(json!(false))).unwrap();
        assert_eq!(payload.value(), &json!(false));
    }
}
