//! Intents the NLU platform can route to this webhook.
//!
//! The platform identifies intents by their display name. Parsing that name
//! into [`Intent`] happens once at the boundary so every later dispatch is an
//! exhaustive `match`.

use std::fmt;
use std::str::FromStr;

use super::errors::IntakeError;

/// One step of the fixed intake conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Greeting; offers the service chips.
    Welcome,
    /// Caller picked a service.
    ServiceSelection,
    /// Caller picked residential or commercial.
    PropertyType,
    /// Caller gave their name.
    CollectName,
    /// Caller gave their phone number; the intake is filed.
    SaveInformation,
}

impl Intent {
    /// All intents in conversation order.
    pub const ALL: [Intent; 5] = [
        Intent::Welcome,
        Intent::ServiceSelection,
        Intent::PropertyType,
        Intent::CollectName,
        Intent::SaveInformation,
    ];

    /// Display name configured for this intent on the NLU agent.
    pub fn display_name(&self) -> &'static str {
        match self {
            Intent::Welcome => "Default Welcome Intent",
            Intent::ServiceSelection => "Service Selection Intent",
            Intent::PropertyType => "Property Type Intent",
            Intent::CollectName => "Collect Name Intent",
            Intent::SaveInformation => "Save Information Intent",
        }
    }

    /// Resolves an agent display name.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::UnknownIntent`] for any name this webhook does
    /// not fulfil.
    pub fn from_display_name(name: &str) -> Result<Self, IntakeError> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|intent| intent.display_name() == name)
            .ok_or_else(|| IntakeError::unknown_intent(name))
    }

    /// Whether the step records the caller's utterance as an answer.
    pub fn records_answer(&self) -> bool {
        !matches!(self, Intent::Welcome)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Intent {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_display_name(s)
    }
}
