//! Google Apps Script store adapter.
//!
//! Implements `IntakeStore` by POSTing JSON rows to a deployed Apps Script
//! web app, which appends them to the intake spreadsheet.
//!
//! # Wire format
//!
//! - interaction: `{"customer_type": "...", "query": "..."}`
//! - intake: `{"reference_id": "...", "service": "...", "property_type": "...",
//!   "name": "...", "phone": "..."}`
//!
//! Any 2xx answer counts as stored. The client has no global timeout; the
//! save path is bounded by the caller.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;

use crate::config::SheetsConfig;
use crate::domain::intake::IntakeRecord;
use crate::ports::{InteractionEvent, IntakeStore, StoreError};

/// Longest response body kept in a `Rejected` error.
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Serialize)]
struct InteractionRow<'a> {
    customer_type: &'a str,
    query: &'a str,
}

impl<'a> From<&'a InteractionEvent> for InteractionRow<'a> {
    fn from(event: &'a InteractionEvent) -> Self {
        Self {
            customer_type: &event.customer_type,
            query: &event.query,
        }
    }
}

#[derive(Debug, Serialize)]
struct IntakeRow<'a> {
    reference_id: &'a str,
    service: &'a str,
    property_type: &'a str,
    name: &'a str,
    phone: &'a str,
}

impl<'a> From<&'a IntakeRecord> for IntakeRow<'a> {
    fn from(record: &'a IntakeRecord) -> Self {
        Self {
            reference_id: record.reference_id().as_str(),
            service: record.service(),
            property_type: record.property_type(),
            name: record.name(),
            phone: record.phone(),
        }
    }
}

/// Apps Script web app store.
pub struct AppsScriptStore {
    webhook_url: String,
    http_client: Client,
}

impl AppsScriptStore {
    /// Create a store posting to `webhook_url` with a fresh connection pool.
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self::with_client(webhook_url, Client::new())
    }

    /// Create a store sharing an existing client.
    pub fn with_client(webhook_url: impl Into<String>, http_client: Client) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            http_client,
        }
    }

    /// Create a store with a client tagged with this service's user agent.
    ///
    /// Connection setup is bounded by the save timeout; the full request is
    /// bounded by the caller.
    pub fn from_config(config: &SheetsConfig) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder()
            .user_agent(concat!("hvac-assist/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(config.save_timeout())
            .build()?;
        Ok(Self::with_client(config.webhook_url.clone(), http_client))
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    async fn post_row<T: Serialize + ?Sized>(&self, row: &T) -> Result<(), StoreError> {
        let response = self
            .http_client
            .post(self.webhook_url.as_str())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(row)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    StoreError::network(format!("Connection failed: {}", e))
                } else {
                    StoreError::network(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            return Err(StoreError::rejected(status.as_u16(), body));
        }

        tracing::debug!(status = status.as_u16(), body = %body, "Store accepted row");
        Ok(())
    }
}

#[async_trait]
impl IntakeStore for AppsScriptStore {
    async fn log_interaction(&self, event: &InteractionEvent) -> Result<(), StoreError> {
        self.post_row(&InteractionRow::from(event)).await
    }

    async fn save_intake(&self, record: &IntakeRecord) -> Result<(), StoreError> {
        tracing::debug!(reference_id = %record.reference_id(), "Sending intake row");
        self.post_row(&IntakeRow::from(record)).await
    }
}
