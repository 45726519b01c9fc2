use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::error::ValidationError;
use super::validation::validate_webhook;

/// Registration body as received. Fields stay optional so that a missing field is
/// reported as a validation error instead of a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub token: Option<String>,
}

/// `null` reads as absent; non-string scalars and containers are rendered to text
/// and left for validation to judge.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// A validated delivery target. Only constructible through validation, immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Webhook {
    url: String,
    token: String,
}

impl Webhook {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Result<Self, ValidationError> {
        let (url, token) = (url.into(), token.into());
        validate_webhook(Some(url.as_str()), Some(token.as_str()))?;
        Ok(Self { url, token })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl TryFrom<RegisterRequest> for Webhook {
    type Error = ValidationError;

    fn try_from(req: RegisterRequest) -> Result<Self, Self::Error> {
        validate_webhook(req.url.as_deref(), req.token.as_deref())?;
        match (req.url, req.token) {
            (Some(url), Some(token)) => Ok(Self { url, token }),
            // unreachable after validation, kept total
            (None, _) => Err(ValidationError::UrlRequired),
            (_, None) => Err(ValidationError::TokenRequired),
        }
    }
}
