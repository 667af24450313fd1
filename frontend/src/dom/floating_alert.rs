use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use super::report;
use crate::config::AppConfig;
use crate::services::alerts::{AlertKind, AlertPresenter};
use crate::services::logging::Logger;

const COMPONENT: &str = "alerts";
const FLOATING_SELECTOR: &str = ".alert-floating";

/// Floating Bootstrap alert appended to `<body>`.
///
/// Showing a new alert removes the previous one, so at most one exists.
pub struct FloatingAlerts {
    document: Document,
    dismiss_ms: u32,
    fade_ms: u32,
}

impl FloatingAlerts {
    pub fn new(document: Document, config: &AppConfig) -> Self {
        Self {
            document,
            dismiss_ms: config.alert_dismiss_ms,
            fade_ms: config.alert_fade_ms,
        }
    }

    fn try_show(&self, kind: AlertKind, message: &str) -> Result<(), JsValue> {
        if let Some(existing) = self.document.query_selector(FLOATING_SELECTOR)? {
            existing.remove();
        }

        let alert = self.document.create_element("div")?;
        alert.set_class_name(&kind.class_list());
        alert.set_attribute("role", "alert")?;
        alert.append_child(&self.document.create_text_node(message))?;
        let close = self.close_button(&alert)?;
        alert.append_child(&close)?;

        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        body.append_child(&alert)?;

        schedule_dismissal(alert, self.dismiss_ms, self.fade_ms);
        Ok(())
    }

    fn close_button(&self, alert: &Element) -> Result<Element, JsValue> {
        let button = self.document.create_element("button")?;
        button.set_attribute("type", "button")?;
        button.set_class_name("close");
        button.set_attribute("aria-label", "Close")?;

        let icon = self.document.create_element("span")?;
        icon.set_attribute("aria-hidden", "true")?;
        icon.set_text_content(Some("\u{00d7}"));
        button.append_child(&icon)?;

        let alert = alert.clone();
        EventListener::new(&button, "click", move |_| alert.remove()).forget();
        Ok(button)
    }
}

/// Fade out after `dismiss_ms`, then detach once the fade finished
fn schedule_dismissal(alert: Element, dismiss_ms: u32, fade_ms: u32) {
    Timeout::new(dismiss_ms, move || {
        if alert.parent_node().is_none() {
            return;
        }
        report(COMPONENT, "fade alert", alert.class_list().remove_1("show"));
        Timeout::new(fade_ms, move || {
            if alert.parent_node().is_some() {
                alert.remove();
            }
        })
        .forget();
    })
    .forget();
}

impl AlertPresenter for FloatingAlerts {
    fn show(&self, kind: AlertKind, message: &str) {
        if let Err(err) = self.try_show(kind, message) {
            Logger::warn_with_component(COMPONENT, &format!("Could not show alert: {:?}", err));
        }
    }
}
