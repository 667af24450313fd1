use shared::SelectionState;
use web_sys::{Document, Element, HtmlOptionElement, HtmlSelectElement};

use super::fields::{value_of, FormField};
use super::report;
use crate::controllers::slot_options::{AvailabilityMessage, SlotOptions};
use crate::controllers::SlotSelectView;

const COMPONENT: &str = "slot-select";
const SPINNER_CLASS: &str = "spinner-border spinner-border-sm text-primary ml-2";
const AVAILABILITY_ID: &str = "availability-message";

/// The doctor, date and time controls of the appointment form
pub struct DomSlotSelect {
    document: Document,
    pub doctor: FormField,
    pub date: FormField,
    time: HtmlSelectElement,
    appointment_id: Option<FormField>,
}

impl DomSlotSelect {
    pub fn new(
        document: Document,
        doctor: FormField,
        date: FormField,
        time: HtmlSelectElement,
        appointment_id: Option<FormField>,
    ) -> Self {
        Self {
            document,
            doctor,
            date,
            time,
            appointment_id,
        }
    }

    fn container(&self) -> Option<Element> {
        self.time.parent_element()
    }

    fn remove_in_container(&self, selector: &str) {
        if let Some(found) = self
            .container()
            .and_then(|parent| parent.query_selector(selector).ok().flatten())
        {
            found.remove();
        }
    }

    fn icon(&self, class: &str) -> Option<Element> {
        let icon = report(COMPONENT, "create icon", self.document.create_element("i"))?;
        icon.set_class_name(class);
        Some(icon)
    }
}

impl SlotSelectView for DomSlotSelect {
    fn selection(&self) -> SelectionState {
        SelectionState::new(
            &self.doctor.value(),
            &self.date.value(),
            Some(value_of(self.appointment_id.as_ref()).as_str()),
        )
    }

    fn selected_time(&self) -> String {
        self.time.value()
    }

    fn clear_options(&self) {
        self.time.set_length(0);
    }

    fn set_disabled(&self, disabled: bool) {
        self.time.set_disabled(disabled);
    }

    fn show_busy(&self) {
        self.hide_busy();
        let Some(spinner) = report(COMPONENT, "create spinner", self.document.create_element("div")) else {
            return;
        };
        spinner.set_class_name(SPINNER_CLASS);
        report(COMPONENT, "set spinner role", spinner.set_attribute("role", "status"));
        report(
            COMPONENT,
            "insert spinner",
            self.time.insert_adjacent_element("afterend", &spinner),
        );
    }

    fn hide_busy(&self) {
        self.remove_in_container(".spinner-border");
    }

    fn render_options(&self, options: &SlotOptions) {
        self.clear_options();
        for option in &options.options {
            let Some(element) = report(
                COMPONENT,
                "create option",
                HtmlOptionElement::new_with_text_and_value(&option.label, &option.value),
            ) else {
                continue;
            };
            element.set_disabled(option.disabled);
            report(COMPONENT, "append option", self.time.append_child(&element));
        }
        self.time.set_value(&options.selected);
        self.time.set_disabled(options.control_disabled);
    }

    fn show_availability(&self, message: &AvailabilityMessage) {
        if let Some(existing) = self.document.get_element_by_id(AVAILABILITY_ID) {
            existing.remove();
        }
        let (Some(container), Some(note)) = (
            self.container(),
            report(COMPONENT, "create message", self.document.create_element("div")),
        ) else {
            return;
        };
        note.set_id(AVAILABILITY_ID);
        note.set_class_name(message.css_class);

        let icon_class = if message.css_class.starts_with("text-success") {
            "fas fa-check-circle"
        } else {
            "fas fa-exclamation-circle"
        };
        if let Some(icon) = self.icon(icon_class) {
            report(COMPONENT, "append icon", note.append_child(&icon));
        }
        let text = self.document.create_text_node(&format!(" {}", message.text));
        report(COMPONENT, "append text", note.append_child(&text));
        report(COMPONENT, "append message", container.append_child(&note));
    }
}
