pub mod booking;
pub mod catalog;
pub mod chat;
pub mod wizard;

pub use booking::{BookingConfirmation, BookingDraft, BookingField, BookingRequest};
pub use catalog::{parse_time_slot, Catalog, Locale, Localized, Offering, TIME_SLOTS};
pub use chat::{ChatEvent, ChatMessage, ChatSession, Sender};
pub use wizard::{WizardPhase, WizardStep};
