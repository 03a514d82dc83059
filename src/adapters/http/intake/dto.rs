//! HTTP DTOs for the Dialogflow fulfillment webhook.
//!
//! These types mirror the Dialogflow ES `WebhookRequest` / `WebhookResponse`
//! JSON. Only the fields this webhook reads are modelled; everything else in
//! the envelope is ignored.

use serde::{Deserialize, Serialize};

use crate::domain::intake::{ActiveContexts, ContextParameters, ContextUpdate, Reply};

/// Path segment separating the session from the context short name.
const CONTEXTS_SEGMENT: &str = "/contexts/";

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Fulfillment request sent by the platform for one matched intent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    /// Unique id of this detect-intent response.
    #[serde(default)]
    pub response_id: Option<String>,
    /// Full session path, `projects/<p>/agent/sessions/<id>`.
    pub session: String,
    pub query_result: QueryResult,
}

/// Result of intent classification for the caller's utterance.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// Recognised text of the utterance.
    #[serde(default)]
    pub query_text: String,
    pub intent: MatchedIntent,
    /// Contexts still alive for this session.
    #[serde(default)]
    pub output_contexts: Vec<ContextDto>,
    #[serde(default)]
    pub language_code: Option<String>,
}

/// The intent the platform matched.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedIntent {
    /// Resource name, `projects/<p>/agent/intents/<uuid>`.
    #[serde(default)]
    pub name: Option<String>,
    pub display_name: String,
}

/// A context as carried on the wire, in both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextDto {
    /// Full path, `<session>/contexts/<short-name>`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifespan_count: Option<u32>,
    #[serde(default, skip_serializing_if = "ContextParameters::is_empty")]
    pub parameters: ContextParameters,
}

impl ContextDto {
    /// Short name of the context (`service-context`).
    pub fn short_name(&self) -> &str {
        self.name
            .rsplit(CONTEXTS_SEGMENT)
            .next()
            .unwrap_or(self.name.as_str())
    }

    /// A context echoed with a zero lifespan is already gone.
    pub fn is_alive(&self) -> bool {
        self.lifespan_count != Some(0)
    }

    /// Qualifies a context update with the session path.
    pub fn from_update(session: &str, update: &ContextUpdate) -> Self {
        Self {
            name: format!("{}{}{}", session, CONTEXTS_SEGMENT, update.name),
            lifespan_count: Some(update.lifespan),
            parameters: update.parameters.clone(),
        }
    }
}

impl QueryResult {
    /// Live contexts keyed by short name.
    pub fn active_contexts(&self) -> ActiveContexts {
        let mut contexts = ActiveContexts::new();
        for context in self.output_contexts.iter().filter(|c| c.is_alive()) {
            contexts.insert(context.short_name(), context.parameters.clone());
        }
        contexts
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Fulfillment response returned to the platform.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub fulfillment_text: String,
    pub fulfillment_messages: Vec<FulfillmentMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub output_contexts: Vec<ContextDto>,
}

impl WebhookResponse {
    /// Renders a reply and its context mutations for `session`.
    pub fn render(session: &str, reply: &Reply, updates: &[ContextUpdate]) -> Self {
        let mut fulfillment_messages = vec![FulfillmentMessage::Text(TextMessage {
            text: vec![reply.message().to_string()],
        })];
        if let Some(quick_replies) = reply.quick_replies() {
            fulfillment_messages.push(FulfillmentMessage::Payload(RichContentPayload::chips(
                quick_replies.options(),
            )));
        }

        Self {
            fulfillment_text: reply.message().to_string(),
            fulfillment_messages,
            output_contexts: updates
                .iter()
                .map(|update| ContextDto::from_update(session, update))
                .collect(),
        }
    }
}

/// One rich message in the response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentMessage {
    Text(TextMessage),
    Payload(RichContentPayload),
}

#[derive(Debug, Clone, Serialize)]
pub struct TextMessage {
    pub text: Vec<String>,
}

/// Custom payload rendered by the Dialogflow Messenger client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RichContentPayload {
    /// Rows of rich content items.
    pub rich_content: Vec<Vec<RichContentItem>>,
}

impl RichContentPayload {
    /// A single row holding one chips item.
    pub fn chips(options: &[String]) -> Self {
        Self {
            rich_content: vec![vec![RichContentItem::Chips {
                options: options
                    .iter()
                    .map(|text| ChipOption { text: text.clone() })
                    .collect(),
            }]],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RichContentItem {
    Chips { options: Vec<ChipOption> },
}

#[derive(Debug, Clone, Serialize)]
pub struct ChipOption {
    pub text: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Response DTO
// ════════════════════════════════════════════════════════════════════════════════

/// Standard error response for requests rejected before step logic.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}
