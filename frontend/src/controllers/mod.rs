pub mod conflict_checker;
pub mod request_sequence;
pub mod slot_options;
pub mod slot_updater;

#[cfg(test)]
pub mod testing;

pub use conflict_checker::{AppointmentForm, CheckOutcome, ConfirmPrompt, ConflictChecker};
pub use slot_updater::{SlotSelectView, SlotUpdater};
