//! Spreadsheet store configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Spreadsheet store configuration (Google Apps Script web app)
#[derive(Debug, Clone, Deserialize)]
pub struct SheetsConfig {
    /// Deployed web app URL that appends rows to the intake sheet
    pub webhook_url: String,

    /// Upper bound on the final save call, in seconds
    #[serde(default = "default_save_timeout")]
    pub save_timeout_secs: u64,
}

impl SheetsConfig {
    /// Get the save timeout as Duration
    pub fn save_timeout(&self) -> Duration {
        Duration::from_secs(self.save_timeout_secs)
    }

    /// Validate spreadsheet store configuration
    ///
    /// Staging and production require HTTPS for the web app URL.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.webhook_url.is_empty() {
            return Err(ValidationError::MissingRequired("SHEETS__WEBHOOK_URL"));
        }
        if !self.webhook_url.starts_with("https://") && !self.webhook_url.starts_with("http://") {
            return Err(ValidationError::InvalidWebhookUrl);
        }
        if environment.requires_https() && !self.webhook_url.starts_with("https://") {
            return Err(ValidationError::WebhookUrlMustBeHttps);
        }
        if self.save_timeout_secs == 0 || self.save_timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            save_timeout_secs: default_save_timeout(),
        }
    }
}

fn default_save_timeout() -> u64 {
    10
}
