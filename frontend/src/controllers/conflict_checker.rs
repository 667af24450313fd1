use std::future::Future;
use std::rc::Rc;

use shared::{AppointmentCheck, AppointmentField, AppointmentFields};

use super::request_sequence::{RequestSequence, RequestTicket};
use crate::services::alerts::{AlertKind, AlertPresenter};
use crate::services::api::SchedulingApi;
use crate::services::logging::Logger;

const COMPONENT: &str = "conflict-checker";
pub const DEFAULT_CONFLICT_MESSAGE: &str = "This appointment conflicts with an existing booking.";
pub const UNVALIDATED_PROMPT: &str =
    "Could not validate appointment for conflicts. Do you want to proceed anyway?";

/// The appointment form as seen by the conflict checker
pub trait AppointmentForm {
    fn fields(&self) -> AppointmentFields;
    /// Submit without going through the submit event again
    fn submit(&self);
}

/// Blocking yes/no question to the user
pub trait ConfirmPrompt {
    fn confirm(&self, message: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Required fields were empty; nothing was validated or submitted
    ValidationSkipped { missing: Vec<AppointmentField> },
    Submitted,
    Blocked { message: String },
    /// Validation service unreachable and the user chose to submit anyway
    SubmittedUnchecked,
    /// Validation service unreachable and the user declined
    Abandoned,
    /// A newer submit attempt replaced this one
    Superseded,
}

/// Validates the requested slot with the backend before letting the form through
pub struct ConflictChecker<F, A, P> {
    form: Rc<F>,
    api: Rc<A>,
    prompt: Rc<P>,
    alerts: Rc<dyn AlertPresenter>,
    sequence: RequestSequence,
}

impl<F, A, P> ConflictChecker<F, A, P>
where
    F: AppointmentForm + 'static,
    A: SchedulingApi + 'static,
    P: ConfirmPrompt + 'static,
{
    pub fn new(form: Rc<F>, api: Rc<A>, prompt: Rc<P>, alerts: Rc<dyn AlertPresenter>) -> Self {
        Self {
            form,
            api,
            prompt,
            alerts,
            sequence: RequestSequence::new(),
        }
    }

    /// Handle a user submit. The caller has already prevented the default
    /// submission; the form is only sent from inside the returned future.
    pub fn check(&self) -> impl Future<Output = CheckOutcome> + 'static {
        let pending = self.begin();
        let form = Rc::clone(&self.form);
        let api = Rc::clone(&self.api);
        let prompt = Rc::clone(&self.prompt);
        let alerts = Rc::clone(&self.alerts);

        async move {
            let (check, ticket) = match pending {
                Ok(pending) => pending,
                Err(missing) => return CheckOutcome::ValidationSkipped { missing },
            };

            let result = api.validate_appointment(&check).await;
            if !ticket.settle() {
                return CheckOutcome::Superseded;
            }

            match result {
                Ok(validation) if validation.valid => {
                    form.submit();
                    CheckOutcome::Submitted
                }
                Ok(validation) => {
                    let message = validation
                        .conflict_message()
                        .unwrap_or(DEFAULT_CONFLICT_MESSAGE)
                        .to_string();
                    Logger::info_with_component(
                        COMPONENT,
                        &format!("Blocked {} {} for doctor {}: {}", check.date, check.time, check.doctor_id, message),
                    );
                    alerts.show(AlertKind::Error, &message);
                    CheckOutcome::Blocked { message }
                }
                Err(err) => {
                    Logger::error_with_component(COMPONENT, &format!("Error checking conflicts: {}", err));
                    if prompt.confirm(UNVALIDATED_PROMPT) {
                        form.submit();
                        CheckOutcome::SubmittedUnchecked
                    } else {
                        CheckOutcome::Abandoned
                    }
                }
            }
        }
    }

    fn begin(&self) -> Result<(AppointmentCheck, RequestTicket), Vec<AppointmentField>> {
        match self.form.fields().conflict_check() {
            Ok(check) => Ok((check, self.sequence.issue())),
            Err(missing) => {
                // TODO: confirm with product whether an incomplete form should be
                // sent unchecked instead of being held here.
                let names: Vec<String> = missing.iter().map(|f| f.to_string()).collect();
                Logger::warn_with_component(
                    COMPONENT,
                    &format!("Validation skipped, missing: {}", names.join(", ")),
                );
                Err(missing)
            }
        }
    }
}
