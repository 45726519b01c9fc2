use serde_json::Value;

use super::error::ValidationError;

/// Checks a candidate webhook. Checks run url first, then token, and stop at the
/// first failure.
pub fn validate_webhook(url: Option<&str>, token: Option<&str>) -> Result<(), ValidationError> {
    let url = url.ok_or(ValidationError::UrlRequired)?;
    if url.is_empty() {
        return Err(ValidationError::UrlEmpty);
    }
    // relative references like "invalid.com" fail here, only absolute urls parse
    reqwest::Url::parse(url).map_err(|_| ValidationError::UrlInvalid)?;

    let token = token.ok_or(ValidationError::TokenRequired)?;
    if token.is_empty() {
        return Err(ValidationError::TokenEmpty);
    }
    Ok(())
}

/// Any present, non-null value is a payload, falsy ones included.
pub fn validate_payload(payload: Option<&Value>) -> Result<(), ValidationError> {
    match payload {
        None | Some(Value::Null) => Err(ValidationError::PayloadRequired),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const URL: &str = "http://www.urlExample.io";

    #[test]
    fn accepts_absolute_url_and_token() {
        assert_eq!(validate_webhook(Some(URL), Some("token")), Ok(()));
        assert_eq!(
            validate_webhook(Some("https://hooks.example.com:8443/a/b?c=d"), Some("t")),
            Ok(())
        );
    }

    #[test]
    fn url_checks_in_order() {
        assert_eq!(
            validate_webhook(None, Some("token")),
            Err(ValidationError::UrlRequired)
        );
        assert_eq!(
            validate_webhook(Some(""), Some("token")),
            Err(ValidationError::UrlEmpty)
        );
        assert_eq!(
            validate_webhook(Some("invalid.com"), Some("token")),
            Err(ValidationError::UrlInvalid)
        );
    }

    #[test]
    fn token_checks_in_order() {
        assert_eq!(
            validate_webhook(Some(URL), None),
            Err(ValidationError::TokenRequired)
        );
        assert_eq!(
            validate_webhook(Some(URL), Some("")),
            Err(ValidationError::TokenEmpty)
        );
    }

    #[test]
    fn first_failure_short_circuits() {
        // both fields bad, only the url is reported
        assert_eq!(validate_webhook(None, None), Err(ValidationError::UrlRequired));
        assert_eq!(
            validate_webhook(Some("nope"), Some("")),
            Err(ValidationError::UrlInvalid)
        );
    }

    #[test]
    fn payload_must_be_present() {
        assert_eq!(validate_payload(None), Err(ValidationError::PayloadRequired));
        assert_eq!(
            validate_payload(Some(&Value::Null)),
            Err(ValidationError::PayloadRequired)
        );
    }

    #[test]
    fn falsy_payloads_are_accepted() {
        for value in [json!(false), json!(0), json!(""), json!([]), json!({})] {
            assert_eq!(validate_payload(Some(&value)), Ok(()), "{value}");
        }
    }
}
