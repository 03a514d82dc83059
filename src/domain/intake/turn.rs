//! A resolved conversation turn.
//!
//! [`IntakeTurn::resolve`] is the single place where the loosely-typed turn
//! (intent + utterance + echoed contexts) is checked against what each step
//! needs. Steps downstream receive owned, typed values only.

use super::context::{ActiveContexts, NameContext, PropertyContext, ServiceContext, TypedContext};
use super::errors::IntakeError;
use super::intent::Intent;

/// One step of the intake with exactly the inputs it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeTurn {
    Welcome,
    SelectService {
        service: String,
    },
    SelectPropertyType {
        property_type: String,
        prior: ServiceContext,
    },
    CollectName {
        name: String,
        prior: PropertyContext,
    },
    SaveInformation {
        phone: String,
        prior: NameContext,
    },
}

impl IntakeTurn {
    /// Builds the typed turn for `intent`.
    ///
    /// The prior context is checked before the answer, so a caller whose
    /// conversation lapsed is told so even if they also sent nothing.
    ///
    /// # Errors
    ///
    /// - [`IntakeError::ContextExpired`] if the prior step's context is gone
    /// - [`IntakeError::EmptyAnswer`] if the utterance is blank
    pub fn resolve(
        intent: Intent,
        utterance: &str,
        contexts: &ActiveContexts,
    ) -> Result<Self, IntakeError> {
        let turn = match intent {
            Intent::Welcome => IntakeTurn::Welcome,
            Intent::ServiceSelection => IntakeTurn::SelectService {
                service: answer(intent, utterance)?,
            },
            Intent::PropertyType => {
                let prior = ServiceContext::from_active(contexts)?;
                IntakeTurn::SelectPropertyType {
                    property_type: answer(intent, utterance)?,
                    prior,
                }
            }
            Intent::CollectName => {
                let prior = PropertyContext::from_active(contexts)?;
                IntakeTurn::CollectName {
                    name: answer(intent, utterance)?,
                    prior,
                }
            }
            Intent::SaveInformation => {
                let prior = NameContext::from_active(contexts)?;
                IntakeTurn::SaveInformation {
                    phone: answer(intent, utterance)?,
                    prior,
                }
            }
        };
        Ok(turn)
    }

    pub fn intent(&self) -> Intent {
        match self {
            IntakeTurn::Welcome => Intent::Welcome,
            IntakeTurn::SelectService { .. } => Intent::ServiceSelection,
            IntakeTurn::SelectPropertyType { .. } => Intent::PropertyType,
            IntakeTurn::CollectName { .. } => Intent::CollectName,
            IntakeTurn::SaveInformation { .. } => Intent::SaveInformation,
        }
    }
}

fn answer(intent: Intent, utterance: &str) -> Result<String, IntakeError> {
    let trimmed = utterance.trim();
    if trimmed.is_empty() {
        return Err(IntakeError::empty_answer(intent));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_contexts(service: &str) -> ActiveContexts {
        let ctx = ServiceContext {
            selected_service: service.to_string(),
        };
        ActiveContexts::new().with(ServiceContext::NAME, ctx.parameters())
    }

    #[test]
    fn welcome_ignores_utterance_and_contexts() {
        let turn = IntakeTurn::resolve(Intent::Welcome, "", &ActiveContexts::new()).unwrap();
        assert_eq!(turn, IntakeTurn::Welcome);
    }

    #[test]
    fn service_selection_trims_answer() {
        let turn =
            IntakeTurn::resolve(Intent::ServiceSelection, "  Tankless \n", &ActiveContexts::new())
                .unwrap();
        assert_eq!(
            turn,
            IntakeTurn::SelectService {
                service: "Tankless".to_string()
            }
        );
    }

    #[test]
    fn property_type_needs_service_context() {
        let err = IntakeTurn::resolve(Intent::PropertyType, "Residential Property", &ActiveContexts::new())
            .unwrap_err();
        assert!(matches!(err, IntakeError::ContextExpired { context: "service-context", .. }));
    }

    #[test]
    fn property_type_with_context_resolves() {
        let turn = IntakeTurn::resolve(
            Intent::PropertyType,
            "Residential Property",
            &service_contexts("Furnace"),
        )
        .unwrap();

        assert_eq!(turn.intent(), Intent::PropertyType);
        match turn {
            IntakeTurn::SelectPropertyType { property_type, prior } => {
                assert_eq!(property_type, "Residential Property");
                assert_eq!(prior.selected_service, "Furnace");
            }
            other => panic!("unexpected turn {other:?}"),
        }
    }

    #[test]
    fn expired_context_wins_over_empty_answer() {
        let err = IntakeTurn::resolve(Intent::SaveInformation, "  ", &ActiveContexts::new()).unwrap_err();
        assert_eq!(err.code(), "CONTEXT_EXPIRED");
    }

    #[test]
    fn empty_answer_with_live_context() {
        let err = IntakeTurn::resolve(Intent::PropertyType, "", &service_contexts("A/C")).unwrap_err();
        assert_eq!(err, IntakeError::empty_answer(Intent::PropertyType));
    }

    #[test]
    fn collect_name_reads_property_context_only() {
        // Only the service context survived: the name step cannot proceed.
        let err = IntakeTurn::resolve(Intent::CollectName, "Jane Doe", &service_contexts("A/C"))
            .unwrap_err();
        assert!(matches!(err, IntakeError::ContextExpired { context: "property-context", .. }));
    }
}
