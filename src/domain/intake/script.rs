//! Fixed wording of the intake conversation.

use super::reference_id::ReferenceId;
use super::reply::Reply;

pub const SERVICE_OPTIONS: [&str; 5] = [
    "Tankless",
    "Furnace",
    "Heat Pump",
    "A/C",
    "Repairs/maintenance",
];

pub const PROPERTY_OPTIONS: [&str; 2] = ["Residential Property", "Commercial Property"];

pub const FOLLOW_UP_OPTIONS: [&str; 2] = ["Yes", "No"];

pub const WELCOME_TEXT: &str = "Hello, I’m HVAC Assist. What product can I help you with? ";

pub const PROPERTY_QUESTION_TEXT: &str = "Sure we can help with that ?";

pub const PHONE_QUESTION_TEXT: &str = "Can I please have your Phone number ?";

pub const SAVE_FAILED_TEXT: &str =
    "I'm sorry, but there was an issue saving your information. Please try again later.";

pub const EXPIRED_TEXT: &str = "Sorry, it looks like our conversation timed out before I got \
                                everything I need. Let's start over. What product can I help you with?";

pub const EMPTY_ANSWER_TEXT: &str = "Sorry, I didn't catch that. Could you say that again?";

pub fn welcome() -> Reply {
    Reply::text(WELCOME_TEXT).with_chips(SERVICE_OPTIONS)
}

pub fn ask_property_type() -> Reply {
    Reply::text(PROPERTY_QUESTION_TEXT).with_chips(PROPERTY_OPTIONS)
}

pub fn ask_name(service: &str) -> Reply {
    Reply::text(format!(
        "Thank you, our {service} Consultant will contact you within the next 2-10 minutes \
         to go over the details and pricing. Can I please have your name ?"
    ))
}

pub fn ask_phone() -> Reply {
    Reply::text(PHONE_QUESTION_TEXT)
}

pub fn thank_you(name: &str, reference_id: &ReferenceId) -> Reply {
    Reply::text(format!(
        "Thank {name}. We will be be in touch with you shortly. Is there anything else I can \
         assist you with today? Your reference number is {reference_id}."
    ))
    .with_chips(FOLLOW_UP_OPTIONS)
}

pub fn save_failed() -> Reply {
    Reply::text(SAVE_FAILED_TEXT)
}

/// Restarts the flow after a required context went missing.
pub fn conversation_expired() -> Reply {
    Reply::text(EXPIRED_TEXT).with_chips(SERVICE_OPTIONS)
}

pub fn repeat_answer() -> Reply {
    Reply::text(EMPTY_ANSWER_TEXT)
}
