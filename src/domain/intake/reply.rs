//! Replies rendered by the platform's client UI.

/// Selectable short-text options shown under a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickReplies {
    options: Vec<String>,
}

impl QuickReplies {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }
}

/// Text answer for one turn, optionally with quick-reply chips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    text: String,
    quick_replies: Option<QuickReplies>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quick_replies: None,
        }
    }

    pub fn with_chips<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.quick_replies = Some(QuickReplies::new(options));
        self
    }

    pub fn message(&self) -> &str {
        &self.text
    }

    pub fn quick_replies(&self) -> Option<&QuickReplies> {
        self.quick_replies.as_ref()
    }

    /// Chip labels, empty when the reply has none.
    pub fn chip_labels(&self) -> Vec<&str> {
        self.quick_replies
            .iter()
            .flat_map(|q| q.options().iter().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_reply_has_no_chips() {
        let reply = Reply::text("Can I please have your Phone number ?");
        assert!(reply.quick_replies().is_none());
        assert!(reply.chip_labels().is_empty());
    }

    #[test]
    fn chips_keep_their_order() {
        let reply = Reply::text("Pick one").with_chips(["Yes", "No"]);
        assert_eq!(reply.chip_labels(), vec!["Yes", "No"]);
    }
}
