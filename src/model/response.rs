use serde::{Deserialize, Serialize};

/// One operation's result as reported to the caller: a registration, or one
/// delivery attempt to one webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub status_code: u16,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Success(OutcomeReport),
    Failure(OutcomeReport),
}

impl DeliveryOutcome {
    pub fn report(&self) -> &OutcomeReport {
        match self {
            DeliveryOutcome::Success(report) | DeliveryOutcome::Failure(report) => report,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DeliveryOutcome::Success(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub success: bool,
    pub results: Vec<OutcomeReport>,
    pub errors: Vec<OutcomeReport>,
}

impl ResponseEnvelope {
    /// `success` holds iff there are no errors.
    pub fn build(results: Vec<OutcomeReport>, errors: Vec<OutcomeReport>) -> Self {
        Self {
            success: errors.is_empty(),
            results,
            errors,
        }
    }

    /// Envelope for a completed fan-out. Per-webhook failures land in `errors` but
    /// the fan-out itself succeeded, so `success` is always true.
    pub fn dispatched(outcomes: Vec<DeliveryOutcome>) -> Self {
        let (results, errors) = partition(outcomes);
        Self {
            success: true,
            results,
            errors,
        }
    }

    pub fn len(&self) -> usize {
        self.results.len() + self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn partition(outcomes: Vec<DeliveryOutcome>) -> (Vec<OutcomeReport>, Vec<OutcomeReport>) {
    let mut results = Vec::with_capacity(outcomes.len());
    let mut errors = vec![];
    for outcome in outcomes {
        match outcome {
            DeliveryOutcome::Success(report) => results.push(report),
            DeliveryOutcome::Failure(report) => errors.push(report),
        }
    }
    (results, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(url: &str, status_code: u16) -> OutcomeReport {
        OutcomeReport {
            url: Some(url.to_string()),
            status_code,
            message: format!("posted to {url}"),
        }
    }

    #[test]
    fn build_success_tracks_errors() {
        let ok = ResponseEnvelope::build(vec![report("http://a.io", 200)], vec![]);
        assert!(ok.success);

        let failed = ResponseEnvelope::build(vec![], vec![report("http://a.io", 400)]);
        assert!(!failed.success);

        assert!(ResponseEnvelope::build(vec![], vec![]).success);
    }

    #[test]
    fn dispatched_partitions_and_stays_successful() {
        let envelope = ResponseEnvelope::dispatched(vec![
            DeliveryOutcome::Success(report("http://a.io", 200)),
            DeliveryOutcome::Failure(report("http://b.io", 404)),
            DeliveryOutcome::Success(report("http://c.io", 201)),
        ]);
        assert!(envelope.success);
        assert_eq!(envelope.results.len(), 2);
        assert_eq!(envelope.errors, vec![report("http://b.io", 404)]);
        assert_eq!(envelope.len(), 3);
    }

    #[test]
    fn wire_shape_is_camel_case() {
        let envelope = ResponseEnvelope::build(
            vec![],
            vec![OutcomeReport {
                url: None,
                status_code: 400,
                message: "URL is required".to_string(),
            }],
        );
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "success": false,
                "results": [],
                "errors": [{ "statusCode": 400, "message": "URL is required" }],
            })
        );
    }
}
