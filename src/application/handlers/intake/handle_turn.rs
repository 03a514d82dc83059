//! HandleTurnHandler - Runs one step of the intake conversation.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::intake::{
    script, ActiveContexts, ContextUpdate, IntakeError, IntakeRecord, IntakeTurn, Intent,
    NameContext, PropertyContext, ReferenceId, Reply, ServiceContext,
};
use crate::ports::{InteractionEvent, IntakeStore};

use super::call_policy::{BestEffort, Required};

/// Command for one platform turn.
#[derive(Debug, Clone)]
pub struct HandleTurnCommand {
    pub intent: Intent,
    /// Recognised text of the caller's utterance.
    pub utterance: String,
    /// Contexts the platform echoed back for this turn.
    pub contexts: ActiveContexts,
}

/// How the turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStatus {
    /// Step ran and the conversation moves on.
    Advanced,
    /// Intake filed with the store.
    Completed,
    /// Intake could not be filed; the caller got an apology.
    SaveFailed,
    /// A prior context was gone; the conversation restarts.
    Expired,
    /// The answer was blank; the caller is asked again.
    Reprompted,
}

/// Reply plus context mutations for the platform.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub reply: Reply,
    pub context_updates: Vec<ContextUpdate>,
    pub status: TurnStatus,
    /// Set only when the intake was filed.
    pub reference_id: Option<ReferenceId>,
}

impl TurnOutcome {
    fn advanced(reply: Reply, context_updates: Vec<ContextUpdate>) -> Self {
        Self {
            reply,
            context_updates,
            status: TurnStatus::Advanced,
            reference_id: None,
        }
    }

    fn without_updates(reply: Reply, status: TurnStatus) -> Self {
        Self {
            reply,
            context_updates: Vec::new(),
            status,
            reference_id: None,
        }
    }
}

/// Handler for intake conversation turns.
pub struct HandleTurnHandler {
    store: Arc<dyn IntakeStore>,
    best_effort: BestEffort,
    required: Required,
}

impl HandleTurnHandler {
    pub fn new(store: Arc<dyn IntakeStore>, save_timeout: Duration) -> Self {
        Self {
            store,
            best_effort: BestEffort,
            required: Required::new(save_timeout),
        }
    }

    /// Runs the step for `cmd.intent`.
    ///
    /// Expired contexts and blank answers are answered with a normal reply.
    /// Store failures never surface as errors.
    ///
    /// # Errors
    ///
    /// Returns resolution errors other than `ContextExpired` and
    /// `EmptyAnswer` unchanged, for the transport boundary to reject.
    pub async fn handle(&self, cmd: HandleTurnCommand) -> Result<TurnOutcome, IntakeError> {
        tracing::debug!(intent = %cmd.intent, contexts = cmd.contexts.len(), "Handling turn");

        let turn = match IntakeTurn::resolve(cmd.intent, &cmd.utterance, &cmd.contexts) {
            Ok(turn) => turn,
            Err(IntakeError::ContextExpired { context, field }) => {
                tracing::warn!(intent = %cmd.intent, context, field, "Required context missing");
                return Ok(TurnOutcome::without_updates(
                    script::conversation_expired(),
                    TurnStatus::Expired,
                ));
            }
            Err(IntakeError::EmptyAnswer { intent }) => {
                tracing::info!(intent = %intent, "Blank answer, asking again");
                return Ok(TurnOutcome::without_updates(
                    script::repeat_answer(),
                    TurnStatus::Reprompted,
                ));
            }
            Err(other) => return Err(other),
        };

        let outcome = match turn {
            IntakeTurn::Welcome => self.welcome(),
            IntakeTurn::SelectService { service } => self.select_service(service),
            IntakeTurn::SelectPropertyType {
                property_type,
                prior,
            } => Self::select_property_type(prior, property_type),
            IntakeTurn::CollectName { name, prior } => Self::collect_name(prior, name),
            IntakeTurn::SaveInformation { phone, prior } => {
                self.save_information(prior, phone).await
            }
        };
        Ok(outcome)
    }

    fn welcome(&self) -> TurnOutcome {
        self.log_interaction(InteractionEvent::new_interaction());
        TurnOutcome::advanced(script::welcome(), Vec::new())
    }

    fn select_service(&self, service: String) -> TurnOutcome {
        self.log_interaction(InteractionEvent::service_selection(service.clone()));

        let context = ServiceContext {
            selected_service: service,
        };
        TurnOutcome::advanced(script::ask_property_type(), vec![ContextUpdate::set(&context)])
    }

    fn select_property_type(prior: ServiceContext, property_type: String) -> TurnOutcome {
        let context = PropertyContext::new(prior, property_type);
        TurnOutcome::advanced(
            script::ask_name(&context.selected_service),
            vec![ContextUpdate::set(&context)],
        )
    }

    fn collect_name(prior: PropertyContext, name: String) -> TurnOutcome {
        let context = NameContext::new(prior, name);
        TurnOutcome::advanced(script::ask_phone(), vec![ContextUpdate::set(&context)])
    }

    async fn save_information(&self, prior: NameContext, phone: String) -> TurnOutcome {
        let record = IntakeRecord::new(ReferenceId::generate(), prior, phone);
        tracing::debug!(
            reference_id = %record.reference_id(),
            timeout_secs = self.required.timeout().as_secs(),
            "Saving intake"
        );

        match self
            .required
            .call("save_intake", self.store.save_intake(&record))
            .await
        {
            Ok(()) => {
                tracing::info!(
                    reference_id = %record.reference_id(),
                    service = record.service(),
                    property_type = record.property_type(),
                    "Intake saved"
                );
                TurnOutcome {
                    reply: script::thank_you(record.name(), record.reference_id()),
                    context_updates: vec![
                        ContextUpdate::expire::<ServiceContext>(),
                        ContextUpdate::expire::<PropertyContext>(),
                        ContextUpdate::expire::<NameContext>(),
                    ],
                    status: TurnStatus::Completed,
                    reference_id: Some(record.reference_id().clone()),
                }
            }
            Err(e) => {
                tracing::error!(
                    reference_id = %record.reference_id(),
                    error = %e,
                    "Failed to save intake"
                );
                TurnOutcome::without_updates(script::save_failed(), TurnStatus::SaveFailed)
            }
        }
    }

    fn log_interaction(&self, event: InteractionEvent) {
        let store = Arc::clone(&self.store);
        self.best_effort.dispatch("log_interaction", async move {
            store.log_interaction(&event).await
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::TypedContext;
    use crate::ports::StoreError;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    #[derive(Default)]
    struct MockIntakeStore {
        events: Mutex<Vec<InteractionEvent>>,
        records: Mutex<Vec<IntakeRecord>>,
        fail_logging: bool,
        fail_save: bool,
        save_delay: Option<Duration>,
    }

    impl MockIntakeStore {
        fn new() -> Self {
            Self::default()
        }

        fn failing_logging() -> Self {
            Self {
                fail_logging: true,
                ..Self::default()
            }
        }

        fn failing_save() -> Self {
            Self {
                fail_save: true,
                ..Self::default()
            }
        }

        fn slow_save(delay: Duration) -> Self {
            Self {
                save_delay: Some(delay),
                ..Self::default()
            }
        }

        fn events(&self) -> Vec<InteractionEvent> {
            self.events.lock().unwrap().clone()
        }

        fn records(&self) -> Vec<IntakeRecord> {
            self.records.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl IntakeStore for MockIntakeStore {
        async fn log_interaction(&self, event: &InteractionEvent) -> Result<(), StoreError> {
            self.events.lock().unwrap().push(event.clone());
            if self.fail_logging {
                return Err(StoreError::network("Simulated logging failure"));
            }
            Ok(())
        }

        async fn save_intake(&self, record: &IntakeRecord) -> Result<(), StoreError> {
            if let Some(delay) = self.save_delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_save {
                return Err(StoreError::rejected(500, "Simulated save failure"));
            }
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn handler(store: &Arc<MockIntakeStore>) -> HandleTurnHandler {
        HandleTurnHandler::new(store.clone(), Duration::from_secs(10))
    }

    fn command(intent: Intent, utterance: &str, contexts: ActiveContexts) -> HandleTurnCommand {
        HandleTurnCommand {
            intent,
            utterance: utterance.to_string(),
            contexts,
        }
    }

    /// Replays context updates the way the platform would echo them.
    fn echo(updates: &[ContextUpdate]) -> ActiveContexts {
        let mut contexts = ActiveContexts::new();
        for update in updates.iter().filter(|u| !u.is_expiry()) {
            contexts.insert(update.name, update.parameters.clone());
        }
        contexts
    }

    async fn wait_for_events(store: &MockIntakeStore, count: usize) {
        for _ in 0..100 {
            if store.events().len() >= count {
                return;
            }
            tokio::task::yield_now().await;
        }
    }

    fn name_contexts() -> ActiveContexts {
        let name = NameContext {
            name: "Jane Doe".to_string(),
            selected_service: "Tankless".to_string(),
            selected_property_type: "Commercial Property".to_string(),
        };
        ActiveContexts::new().with(NameContext::NAME, name.parameters())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Step Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn welcome_greets_with_service_chips_and_logs() {
        let store = Arc::new(MockIntakeStore::new());
        let outcome = handler(&store)
            .handle(command(Intent::Welcome, "hi", ActiveContexts::new()))
            .await
            .unwrap();

        assert_eq!(outcome.reply.message(), script::WELCOME_TEXT);
        assert_eq!(
            outcome.reply.chip_labels(),
            vec!["Tankless", "Furnace", "Heat Pump", "A/C", "Repairs/maintenance"]
        );
        assert!(outcome.context_updates.is_empty());
        assert_eq!(outcome.status, TurnStatus::Advanced);

        wait_for_events(&store, 1).await;
        assert_eq!(store.events(), vec![InteractionEvent::new_interaction()]);
    }

    #[tokio::test]
    async fn welcome_reply_unchanged_when_logging_fails() {
        let ok_store = Arc::new(MockIntakeStore::new());
        let failing_store = Arc::new(MockIntakeStore::failing_logging());

        let ok = handler(&ok_store)
            .handle(command(Intent::Welcome, "hi", ActiveContexts::new()))
            .await
            .unwrap();
        let degraded = handler(&failing_store)
            .handle(command(Intent::Welcome, "hi", ActiveContexts::new()))
            .await
            .unwrap();

        assert_eq!(ok.reply, degraded.reply);
        assert_eq!(degraded.status, TurnStatus::Advanced);
        wait_for_events(&failing_store, 1).await;
        assert_eq!(failing_store.events().len(), 1);
    }

    #[tokio::test]
    async fn service_selection_sets_service_context_and_logs_query() {
        let store = Arc::new(MockIntakeStore::new());
        let outcome = handler(&store)
            .handle(command(Intent::ServiceSelection, "Heat Pump", ActiveContexts::new()))
            .await
            .unwrap();

        assert_eq!(outcome.reply.message(), "Sure we can help with that ?");
        assert_eq!(
            outcome.reply.chip_labels(),
            vec!["Residential Property", "Commercial Property"]
        );
        assert_eq!(outcome.context_updates.len(), 1);
        let update = &outcome.context_updates[0];
        assert_eq!(update.name, "service-context");
        assert_eq!(update.lifespan, 5);
        assert_eq!(
            Value::Object(update.parameters.clone()),
            json!({ "selectedService": "Heat Pump" })
        );

        wait_for_events(&store, 1).await;
        assert_eq!(
            store.events(),
            vec![InteractionEvent::service_selection("Heat Pump")]
        );
    }

    #[tokio::test]
    async fn property_type_chains_service_into_property_context() {
        let store = Arc::new(MockIntakeStore::new());
        let contexts = ActiveContexts::new().with(
            "service-context",
            json!({ "selectedService": "Furnace" }).as_object().unwrap().clone(),
        );

        let outcome = handler(&store)
            .handle(command(Intent::PropertyType, "Residential Property", contexts))
            .await
            .unwrap();

        assert!(outcome.reply.message().starts_with("Thank you, our Furnace Consultant"));
        assert!(outcome.reply.quick_replies().is_none());
        let update = &outcome.context_updates[0];
        assert_eq!(update.name, "property-context");
        assert_eq!(update.lifespan, 5);
        assert_eq!(
            Value::Object(update.parameters.clone()),
            json!({ "selectedService": "Furnace", "selectedPropertyType": "Residential Property" })
        );
        assert!(store.events().is_empty());
    }

    #[tokio::test]
    async fn collect_name_builds_name_context() {
        let store = Arc::new(MockIntakeStore::new());
        let property = PropertyContext {
            selected_service: "A/C".to_string(),
            selected_property_type: "Commercial Property".to_string(),
        };
        let contexts = ActiveContexts::new().with(PropertyContext::NAME, property.parameters());

        let outcome = handler(&store)
            .handle(command(Intent::CollectName, "Sam Lee", contexts))
            .await
            .unwrap();

        assert_eq!(outcome.reply.message(), "Can I please have your Phone number ?");
        let update = &outcome.context_updates[0];
        assert_eq!(update.name, "name-context");
        assert_eq!(
            Value::Object(update.parameters.clone()),
            json!({
                "name": "Sam Lee",
                "selectedService": "A/C",
                "selectedPropertyType": "Commercial Property"
            })
        );
    }

    #[tokio::test]
    async fn save_information_files_record_and_expires_contexts() {
        let store = Arc::new(MockIntakeStore::new());
        let outcome = handler(&store)
            .handle(command(Intent::SaveInformation, "555-1234", name_contexts()))
            .await
            .unwrap();

        assert_eq!(outcome.status, TurnStatus::Completed);
        let reference_id = outcome.reference_id.clone().expect("reference id");
        assert!(outcome.reply.message().contains("Jane Doe"));
        assert!(outcome.reply.message().contains(reference_id.as_str()));
        assert_eq!(outcome.reply.chip_labels(), vec!["Yes", "No"]);

        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].reference_id(), &reference_id);
        assert_eq!(records[0].service(), "Tankless");
        assert_eq!(records[0].property_type(), "Commercial Property");
        assert_eq!(records[0].name(), "Jane Doe");
        assert_eq!(records[0].phone(), "555-1234");

        let expired: Vec<_> = outcome.context_updates.iter().map(|u| u.name).collect();
        assert_eq!(expired, vec!["service-context", "property-context", "name-context"]);
        assert!(outcome.context_updates.iter().all(ContextUpdate::is_expiry));
    }

    #[tokio::test]
    async fn save_failure_apologises_without_reference() {
        let store = Arc::new(MockIntakeStore::failing_save());
        let outcome = handler(&store)
            .handle(command(Intent::SaveInformation, "555-1234", name_contexts()))
            .await
            .unwrap();

        assert_eq!(outcome.status, TurnStatus::SaveFailed);
        assert_eq!(outcome.reply.message(), script::SAVE_FAILED_TEXT);
        assert!(outcome.reply.quick_replies().is_none());
        assert!(outcome.reference_id.is_none());
        assert!(outcome.context_updates.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn save_timeout_counts_as_failure() {
        let store = Arc::new(MockIntakeStore::slow_save(Duration::from_secs(30)));
        let outcome = handler(&store)
            .handle(command(Intent::SaveInformation, "555-1234", name_contexts()))
            .await
            .unwrap();

        assert_eq!(outcome.status, TurnStatus::SaveFailed);
        assert_eq!(outcome.reply.message(), script::SAVE_FAILED_TEXT);
        assert!(store.records().is_empty());
    }

    #[tokio::test]
    async fn missing_context_restarts_conversation() {
        let store = Arc::new(MockIntakeStore::new());
        for intent in [Intent::PropertyType, Intent::CollectName, Intent::SaveInformation] {
            let outcome = handler(&store)
                .handle(command(intent, "something", ActiveContexts::new()))
                .await
                .unwrap();

            assert_eq!(outcome.status, TurnStatus::Expired, "{intent}");
            assert_eq!(outcome.reply.message(), script::EXPIRED_TEXT);
            assert!(outcome.context_updates.is_empty());
        }
        assert!(store.records().is_empty());
    }

    #[tokio::test]
    async fn blank_answer_is_reprompted() {
        let store = Arc::new(MockIntakeStore::new());
        let outcome = handler(&store)
            .handle(command(Intent::ServiceSelection, "   ", ActiveContexts::new()))
            .await
            .unwrap();

        assert_eq!(outcome.status, TurnStatus::Reprompted);
        assert_eq!(outcome.reply.message(), script::EMPTY_ANSWER_TEXT);
        assert!(outcome.context_updates.is_empty());
        tokio::task::yield_now().await;
        assert!(store.events().is_empty());
    }

    #[tokio::test]
    async fn full_conversation_happy_path() {
        let store = Arc::new(MockIntakeStore::new());
        let handler = handler(&store);

        let welcome = handler
            .handle(command(Intent::Welcome, "Hi", ActiveContexts::new()))
            .await
            .unwrap();
        let service = handler
            .handle(command(Intent::ServiceSelection, "Tankless", echo(&welcome.context_updates)))
            .await
            .unwrap();
        let property = handler
            .handle(command(
                Intent::PropertyType,
                "Commercial Property",
                echo(&service.context_updates),
            ))
            .await
            .unwrap();
        let name = handler
            .handle(command(Intent::CollectName, "Jane Doe", echo(&property.context_updates)))
            .await
            .unwrap();
        let saved = handler
            .handle(command(Intent::SaveInformation, "555-1234", echo(&name.context_updates)))
            .await
            .unwrap();

        assert_eq!(saved.status, TurnStatus::Completed);
        let reference_id = saved.reference_id.expect("reference id");
        assert!(saved.reply.message().contains("Jane Doe"));
        assert!(saved.reply.message().contains(reference_id.as_str()));

        let records = store.records();
        assert_eq!(records.len(), 1);
        let expected = IntakeRecord::new(
            reference_id,
            NameContext {
                name: "Jane Doe".to_string(),
                selected_service: "Tankless".to_string(),
                selected_property_type: "Commercial Property".to_string(),
            },
            "555-1234",
        );
        assert_eq!(records[0], expected);

        wait_for_events(&store, 2).await;
        assert_eq!(store.events().len(), 2);
    }
}
