//! Conversation contexts threaded through the platform.
//!
//! The platform owns context storage: each turn it echoes back the contexts
//! that are still alive, and each reply tells it which contexts to set or
//! expire. Steps never read the raw parameter bags. They receive one of the
//! typed context values below, built by [`TypedContext::from_active`], which
//! fails with [`IntakeError::ContextExpired`] instead of producing blanks.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::errors::IntakeError;

/// Turns a context written by this webhook stays alive.
pub const CONTEXT_LIFESPAN: u32 = 5;

/// Raw parameter bag as carried by the platform.
pub type ContextParameters = Map<String, Value>;

const SELECTED_SERVICE: &str = "selectedService";
const SELECTED_PROPERTY_TYPE: &str = "selectedPropertyType";
const NAME: &str = "name";

/// Contexts echoed back by the platform for the current turn, keyed by
/// short name (`service-context`, not the full session path).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveContexts {
    contexts: HashMap<String, ContextParameters>,
}

impl ActiveContexts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a context, replacing any earlier one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, parameters: ContextParameters) {
        self.contexts.insert(name.into(), parameters);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, parameters: ContextParameters) -> Self {
        self.insert(name, parameters);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ContextParameters> {
        self.contexts.get(name)
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Reads a non-blank string parameter from a named context.
    fn require(&self, context: &'static str, field: &'static str) -> Result<String, IntakeError> {
        self.get(context)
            .and_then(|params| params.get(field))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .ok_or_else(|| IntakeError::context_expired(context, field))
    }
}

/// A context value with a fixed name and a fixed set of required fields.
pub trait TypedContext: Sized {
    /// Short context name on the platform.
    const NAME: &'static str;

    /// Extracts this context from the echoed set.
    ///
    /// # Errors
    ///
    /// [`IntakeError::ContextExpired`] when the context is absent or any
    /// required field is missing or blank.
    fn from_active(contexts: &ActiveContexts) -> Result<Self, IntakeError>;

    /// Parameters to publish for the next turn.
    fn parameters(&self) -> ContextParameters;
}

/// Written after the service choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceContext {
    pub selected_service: String,
}

impl TypedContext for ServiceContext {
    const NAME: &'static str = "service-context";

    fn from_active(contexts: &ActiveContexts) -> Result<Self, IntakeError> {
        Ok(Self {
            selected_service: contexts.require(Self::NAME, SELECTED_SERVICE)?,
        })
    }

    fn parameters(&self) -> ContextParameters {
        let mut params = Map::new();
        params.insert(SELECTED_SERVICE.into(), Value::from(self.selected_service.clone()));
        params
    }
}

/// Written after the property type choice; carries the service forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyContext {
    pub selected_service: String,
    pub selected_property_type: String,
}

impl PropertyContext {
    pub fn new(service: ServiceContext, selected_property_type: impl Into<String>) -> Self {
        Self {
            selected_service: service.selected_service,
            selected_property_type: selected_property_type.into(),
        }
    }
}

impl TypedContext for PropertyContext {
    const NAME: &'static str = "property-context";

    fn from_active(contexts: &ActiveContexts) -> Result<Self, IntakeError> {
        Ok(Self {
            selected_service: contexts.require(Self::NAME, SELECTED_SERVICE)?,
            selected_property_type: contexts.require(Self::NAME, SELECTED_PROPERTY_TYPE)?,
        })
    }

    fn parameters(&self) -> ContextParameters {
        let mut params = Map::new();
        params.insert(SELECTED_SERVICE.into(), Value::from(self.selected_service.clone()));
        params.insert(
            SELECTED_PROPERTY_TYPE.into(),
            Value::from(self.selected_property_type.clone()),
        );
        params
    }
}

/// Written after the caller's name; everything the save step needs except
/// the phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameContext {
    pub name: String,
    pub selected_service: String,
    pub selected_property_type: String,
}

impl NameContext {
    pub fn new(property: PropertyContext, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selected_service: property.selected_service,
            selected_property_type: property.selected_property_type,
        }
    }
}

impl TypedContext for NameContext {
    const NAME: &'static str = "name-context";

    fn from_active(contexts: &ActiveContexts) -> Result<Self, IntakeError> {
        Ok(Self {
            name: contexts.require(Self::NAME, NAME)?,
            selected_service: contexts.require(Self::NAME, SELECTED_SERVICE)?,
            selected_property_type: contexts.require(Self::NAME, SELECTED_PROPERTY_TYPE)?,
        })
    }

    fn parameters(&self) -> ContextParameters {
        let mut params = Map::new();
        params.insert(NAME.into(), Value::from(self.name.clone()));
        params.insert(SELECTED_SERVICE.into(), Value::from(self.selected_service.clone()));
        params.insert(
            SELECTED_PROPERTY_TYPE.into(),
            Value::from(self.selected_property_type.clone()),
        );
        params
    }
}

/// A context mutation returned to the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextUpdate {
    pub name: &'static str,
    /// Zero expires the context.
    pub lifespan: u32,
    pub parameters: ContextParameters,
}

impl ContextUpdate {
    /// Publishes a context for the next [`CONTEXT_LIFESPAN`] turns.
    pub fn set<C: TypedContext>(context: &C) -> Self {
        Self {
            name: C::NAME,
            lifespan: CONTEXT_LIFESPAN,
            parameters: context.parameters(),
        }
    }

    /// Tells the platform to drop a context now.
    pub fn expire<C: TypedContext>() -> Self {
        Self {
            name: C::NAME,
            lifespan: 0,
            parameters: Map::new(),
        }
    }

    pub fn is_expiry(&self) -> bool {
        self.lifespan == 0
    }
}
