use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement};

/// A form control whose value the controllers read
#[derive(Clone, Debug)]
pub enum FormField {
    Input(HtmlInputElement),
    Select(HtmlSelectElement),
}

impl FormField {
    pub fn from_element(element: Element) -> Option<Self> {
        element
            .dyn_into::<HtmlSelectElement>()
            .map(FormField::Select)
            .or_else(|element| element.dyn_into::<HtmlInputElement>().map(FormField::Input))
            .ok()
    }

    /// First control found among `ids`, tried in order
    pub fn by_ids(document: &Document, ids: &[&str]) -> Option<Self> {
        ids.iter()
            .filter_map(|id| document.get_element_by_id(id))
            .find_map(Self::from_element)
    }

    pub fn value(&self) -> String {
        match self {
            FormField::Input(input) => input.value(),
            FormField::Select(select) => select.value(),
        }
    }

    pub fn element(&self) -> &Element {
        match self {
            FormField::Input(input) => input,
            FormField::Select(select) => select,
        }
    }
}

pub const DOCTOR_FIELD_IDS: [&str; 2] = ["doctor-select", "doctor_id"];
pub const DATE_FIELD_IDS: [&str; 2] = ["appointment_date", "date"];
pub const TIME_FIELD_ID: &str = "appointment_time";
pub const APPOINTMENT_ID_FIELD_ID: &str = "appointment_id";

/// Read a possibly absent control, treating absence as empty
pub fn value_of(field: Option<&FormField>) -> String {
    field.map(FormField::value).unwrap_or_default()
}
