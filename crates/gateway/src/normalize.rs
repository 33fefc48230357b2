//! Response Normalizer: raw backend reply to the stable response contract.

use convogate_core::{DetectIntentResponse, DetectionResult, Result};

/// Convert a raw backend reply into a `DetectionResult`.
///
/// Scalar fields are taken by direct projection; absent fields resolve to
/// their zero value, never an error. The fulfillment message list is kept
/// verbatim and additionally encoded element by element into
/// self-contained JSON strings, order preserved. A failure encoding any
/// single message fails the whole normalization: the contract is
/// all-or-nothing, so a success never carries a partial message list.
pub fn normalize(reply: &DetectIntentResponse) -> Result<DetectionResult> {
    let messages = reply.query_result.fulfillment_messages.clone();
    let messages_json = messages
        .iter()
        .map(|message| message.encode())
        .collect::<Result<Vec<_>>>()?;

    Ok(DetectionResult {
        text: reply.query_result.fulfillment_text.clone(),
        audio: reply.output_audio.clone(),
        original_request: reply.query_result.query_text.clone(),
        response_id: reply.response_id.clone(),
        messages,
        messages_json,
        intent: reply.query_result.intent.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use convogate_core::{FulfillmentMessage, Intent, QueryResult};
    use serde_json::json;

    fn reply_with_messages(count: usize) -> DetectIntentResponse {
        DetectIntentResponse {
            response_id: "r-42".to_string(),
            query_result: QueryResult {
                query_text: "hello".to_string(),
                fulfillment_text: "hi!".to_string(),
                fulfillment_messages: (0..count)
                    .map(|i| FulfillmentMessage(json!({"text": {"text": [format!("m{}", i)]}})))
                    .collect(),
                intent: Some(Intent {
                    name: "projects/p/agent/intents/1".to_string(),
                    display_name: "greeting".to_string(),
                }),
            },
            output_audio: vec![1, 2, 3],
        }
    }

    #[test]
    fn projects_scalar_fields() {
        let result = normalize(&reply_with_messages(0)).unwrap();
        assert_eq!(result.text, "hi!");
        assert_eq!(result.original_request, "hello");
        assert_eq!(result.response_id, "r-42");
        assert_eq!(result.audio, vec![1, 2, 3]);
        assert_eq!(result.intent.unwrap().display_name, "greeting");
    }

    #[test]
    fn message_count_and_order_are_preserved() {
        let result = normalize(&reply_with_messages(5)).unwrap();
        assert_eq!(result.messages.len(), 5);
        assert_eq!(result.messages_json.len(), 5);
        for (i, encoded) in result.messages_json.iter().enumerate() {
            let value: serde_json::Value = serde_json::from_str(encoded).unwrap();
            assert_eq!(value["text"]["text"][0], format!("m{}", i));
        }
    }

    #[test]
    fn empty_reply_normalizes_to_zero_values() {
        let result = normalize(&DetectIntentResponse::default()).unwrap();
        assert_eq!(result.text, "");
        assert_eq!(result.original_request, "");
        assert_eq!(result.response_id, "");
        assert!(result.audio.is_empty());
        assert!(result.messages.is_empty());
        assert!(result.messages_json.is_empty());
        assert!(result.intent.is_none());
    }

    #[test]
    fn normalization_is_idempotent() {
        let reply = reply_with_messages(3);
        let first = normalize(&reply).unwrap().to_json().unwrap();
        let second = normalize(&reply).unwrap().to_json().unwrap();
        assert_eq!(first, second);
    }
}
