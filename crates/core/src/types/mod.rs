//! Data model shared across the gateway and the backend client.

mod query;
mod response;

pub use query::{DetectIntentRequest, QueryInput};
pub use response::{
    base64_bytes, DetectIntentResponse, DetectionResult, FulfillmentMessage, Intent, QueryResult,
};
