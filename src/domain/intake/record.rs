//! The answer set for one completed intake.

use super::context::NameContext;
use super::reference_id::ReferenceId;

/// Accumulated answers plus the reference identifier.
///
/// Built only by the final step and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeRecord {
    reference_id: ReferenceId,
    service: String,
    property_type: String,
    name: String,
    phone: String,
}

impl IntakeRecord {
    pub fn new(reference_id: ReferenceId, contact: NameContext, phone: impl Into<String>) -> Self {
        Self {
            reference_id,
            service: contact.selected_service,
            property_type: contact.selected_property_type,
            name: contact.name,
            phone: phone.into(),
        }
    }

    pub fn reference_id(&self) -> &ReferenceId {
        &self.reference_id
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn property_type(&self) -> &str {
        &self.property_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}
