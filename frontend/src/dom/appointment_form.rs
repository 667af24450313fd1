use shared::AppointmentFields;
use web_sys::HtmlFormElement;

use super::fields::{value_of, FormField};
use super::report;
use crate::controllers::{AppointmentForm, ConfirmPrompt};

/// The appointment create/edit form. Controls are looked up once at start
/// and read on every submit; a missing control reads as empty.
pub struct DomAppointmentForm {
    pub form: HtmlFormElement,
    pub doctor: Option<FormField>,
    pub date: Option<FormField>,
    pub time: Option<FormField>,
    pub appointment_id: Option<FormField>,
}

impl AppointmentForm for DomAppointmentForm {
    fn fields(&self) -> AppointmentFields {
        AppointmentFields::new(
            &value_of(self.doctor.as_ref()),
            &value_of(self.date.as_ref()),
            &value_of(self.time.as_ref()),
            Some(value_of(self.appointment_id.as_ref()).as_str()),
        )
    }

    fn submit(&self) {
        // HTMLFormElement.submit() does not fire the submit event
        report("appointment-form", "submit", self.form.submit());
    }
}

/// `window.confirm` dialog
pub struct BrowserConfirm;

impl ConfirmPrompt for BrowserConfirm {
    fn confirm(&self, message: &str) -> bool {
        gloo::dialogs::confirm(message)
    }
}
