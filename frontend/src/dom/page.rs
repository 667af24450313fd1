use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlFormElement, HtmlSelectElement};

use super::appointment_form::DomAppointmentForm;
use super::fields::{
    FormField, APPOINTMENT_ID_FIELD_ID, DATE_FIELD_IDS, DOCTOR_FIELD_IDS, TIME_FIELD_ID,
};
use super::select_one;
use super::slot_select::DomSlotSelect;

pub const WEEKLY_SCHEDULE_ID: &str = "weekly-schedule";
pub const APPOINTMENT_FORM_SELECTOR: &str = "form[action*=\"appointment\"]";

/// Where the weekly grid goes and whose week it shows
pub struct ScheduleMount {
    pub element: Element,
    pub doctor_id: String,
}

/// Discovers which features apply to the current page.
///
/// Every lookup returns `None` when the page lacks the elements a feature
/// needs; that feature is then simply not started.
pub struct PageContext {
    document: Document,
}

impl PageContext {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn schedule_mount(&self) -> Option<ScheduleMount> {
        let element = self.document.get_element_by_id(WEEKLY_SCHEDULE_ID)?;
        let doctor_id = element.get_attribute("data-doctor-id")?.trim().to_string();
        if doctor_id.is_empty() {
            return None;
        }
        Some(ScheduleMount { element, doctor_id })
    }

    pub fn slot_select(&self) -> Option<DomSlotSelect> {
        let doctor = FormField::by_ids(&self.document, &DOCTOR_FIELD_IDS)?;
        let date = FormField::by_ids(&self.document, &DATE_FIELD_IDS)?;
        let time = self
            .document
            .get_element_by_id(TIME_FIELD_ID)?
            .dyn_into::<HtmlSelectElement>()
            .ok()?;
        Some(DomSlotSelect::new(
            self.document.clone(),
            doctor,
            date,
            time,
            self.appointment_id(),
        ))
    }

    pub fn appointment_form(&self) -> Option<DomAppointmentForm> {
        let form = select_one(&self.document, APPOINTMENT_FORM_SELECTOR)?
            .dyn_into::<HtmlFormElement>()
            .ok()?;
        Some(DomAppointmentForm {
            form,
            doctor: FormField::by_ids(&self.document, &DOCTOR_FIELD_IDS),
            date: FormField::by_ids(&self.document, &DATE_FIELD_IDS),
            time: FormField::by_ids(&self.document, &[TIME_FIELD_ID]),
            appointment_id: self.appointment_id(),
        })
    }

    fn appointment_id(&self) -> Option<FormField> {
        FormField::by_ids(&self.document, &[APPOINTMENT_ID_FIELD_ID])
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::dom::remove_children_except;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn attach(html: &str) -> Element {
        let document = gloo::utils::document();
        let container = document.create_element("div").unwrap();
        container.set_inner_html(html);
        document.body().unwrap().append_child(&container).unwrap();
        container
    }

    #[wasm_bindgen_test]
    fn test_schedule_mount_needs_element_and_doctor_id() {
        let page = PageContext::new(gloo::utils::document());
        assert!(page.schedule_mount().is_none());

        let blank = attach(r#"<div id="weekly-schedule" data-doctor-id="  "></div>"#);
        assert!(page.schedule_mount().is_none());
        blank.remove();

        let unset = attach(r#"<div id="weekly-schedule"></div>"#);
        assert!(page.schedule_mount().is_none());
        unset.remove();

        let ready = attach(r#"<div id="weekly-schedule" data-doctor-id="12"></div>"#);
        let mount = page.schedule_mount().unwrap();
        assert_eq!(mount.doctor_id, "12");
        assert_eq!(mount.element.id(), WEEKLY_SCHEDULE_ID);
        ready.remove();
    }

    #[wasm_bindgen_test]
    fn test_slot_select_absent_without_time_field() {
        let partial = attach(r#"<select id="doctor-select"></select><input id="appointment_date">"#);
        let page = PageContext::new(gloo::utils::document());
        assert!(page.slot_select().is_none());
        partial.remove();
    }

    #[wasm_bindgen_test]
    fn test_placeholder_removed_around_host() {
        let mount = attach(r#"<p class="placeholder">Loading schedule</p>text<span></span>"#);
        let host = gloo::utils::document().create_element("div").unwrap();
        mount.append_child(&host).unwrap();

        remove_children_except(&mount, &host);

        assert_eq!(mount.child_nodes().length(), 1);
        assert!(mount.first_child().unwrap().is_same_node(Some(host.as_ref())));
        mount.remove();
    }
}
