pub mod error;
pub mod payload;
pub mod response;
pub mod validation;
pub mod webhook;

pub use payload::{Payload, TriggerRequest};
pub use response::{DeliveryOutcome, OutcomeReport, ResponseEnvelope};
pub use webhook::{RegisterRequest, Webhook};
