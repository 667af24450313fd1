use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlFormElement, ScrollBehavior, ScrollToOptions, Window};

use super::{report, select_all, select_one};
use crate::config::AppConfig;

const COMPONENT: &str = "page";
const YEAR_PLACEHOLDER: &str = "{{ now.year }}";
pub const NAVBAR_SCROLL_THRESHOLD: f64 = 50.0;
pub const BACK_TO_TOP_THRESHOLD: f64 = 300.0;
pub const ANCHOR_SCROLL_OFFSET: f64 = 70.0;
const AUTH_LINK_SELECTOR: &str = ".nav-link[href*=\"login\"], .nav-link[href*=\"register\"]";

/// Footer text with the unrendered year placeholder filled in, if it has one
pub fn fill_year_placeholder(text: &str, year: i32) -> Option<String> {
    text.contains(YEAR_PLACEHOLDER)
        .then(|| text.replace(YEAR_PLACEHOLDER, &year.to_string()))
}

pub fn is_current_page(href: Option<&str>, path: &str) -> bool {
    href == Some(path)
}

pub fn scrolled_past(threshold: f64, scroll_y: f64) -> bool {
    scroll_y > threshold
}

/// Inline styles that keep a login/register nav link visible whatever the
/// theme stylesheet does. The register link is also drawn as a white pill.
pub fn auth_link_styles(href: &str) -> Vec<(&'static str, &'static str)> {
    let mut styles = vec![("opacity", "1"), ("visibility", "visible")];
    if href.contains("register") {
        styles.extend([
            ("background-color", "white"),
            ("color", "#7AAE9F"),
            ("display", "inline-block"),
        ]);
    }
    styles
}

/// Install the page-wide decorations. Each one is skipped when its markup
/// is missing.
pub fn install(window: &Window, document: &Document, config: &AppConfig) {
    patch_footer_year(document);
    mark_active_nav_link(window, document);
    install_auth_button_visibility(document);
    track_navbar_scroll(window, document);
    install_back_to_top(window, document);
    install_sidebar_toggle(document);
    auto_hide_static_alerts(document, config);
    install_smooth_anchors(window, document);
    install_form_validation_styles(document);
}

fn patch_footer_year(document: &Document) {
    let Some(footer) = select_one(document, "footer p") else {
        return;
    };
    let year = js_sys::Date::new_0().get_full_year() as i32;
    if let Some(patched) = fill_year_placeholder(&footer.inner_html(), year) {
        footer.set_inner_html(&patched);
    }
}

fn mark_active_nav_link(window: &Window, document: &Document) {
    let Ok(path) = window.location().pathname() else {
        return;
    };
    for link in select_all(document, ".navbar-nav .nav-link") {
        if is_current_page(link.get_attribute("href").as_deref(), &path) {
            report(COMPONENT, "mark nav link", link.class_list().add_1("active"));
        }
    }
}

fn install_auth_button_visibility(document: &Document) {
    for link in select_all(document, AUTH_LINK_SELECTOR) {
        let href = link.get_attribute("href").unwrap_or_default();
        let Ok(link) = link.dyn_into::<HtmlElement>() else {
            continue;
        };
        let style = link.style();
        for (property, value) in auth_link_styles(&href) {
            report(COMPONENT, "style auth link", style.set_property(property, value));
        }
    }
}

fn toggle_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let result = if on { classes.add_1(class) } else { classes.remove_1(class) };
    report(COMPONENT, "toggle class", result);
}

fn on_scroll<F>(window: &Window, mut handler: F)
where
    F: FnMut(f64) + 'static,
{
    let target = window.clone();
    EventListener::new(window, "scroll", move |_| {
        if let Ok(scroll_y) = target.scroll_y() {
            handler(scroll_y);
        }
    })
    .forget();
}

fn track_navbar_scroll(window: &Window, document: &Document) {
    let document = document.clone();
    on_scroll(window, move |scroll_y| {
        if let Some(navbar) = select_one(&document, ".navbar") {
            toggle_class(&navbar, "navbar-scrolled", scrolled_past(NAVBAR_SCROLL_THRESHOLD, scroll_y));
        }
    });
}

fn smooth_scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

fn install_back_to_top(window: &Window, document: &Document) {
    let button = match select_one(document, ".back-to-top") {
        Some(existing) => existing,
        None => {
            let Some(created) = create_back_to_top(document) else {
                return;
            };
            created
        }
    };

    {
        let button = button.clone();
        on_scroll(window, move |scroll_y| {
            toggle_class(&button, "visible", scrolled_past(BACK_TO_TOP_THRESHOLD, scroll_y));
        });
    }

    let window = window.clone();
    EventListener::new(&button, "click", move |_| smooth_scroll_to(&window, 0.0)).forget();
}

fn create_back_to_top(document: &Document) -> Option<Element> {
    let button = report(COMPONENT, "create back-to-top", document.create_element("div"))?;
    button.set_class_name("back-to-top");
    button.set_inner_html("<i class=\"fas fa-arrow-up\"></i>");
    let body = document.body()?;
    report(COMPONENT, "append back-to-top", body.append_child(&button))?;
    Some(button)
}

fn install_sidebar_toggle(document: &Document) {
    let Some(toggle) = select_one(document, ".sidebar-toggle") else {
        return;
    };
    let document = document.clone();
    EventListener::new(&toggle, "click", move |_| {
        if let Some(sidebar) = select_one(&document, ".sidebar") {
            report(COMPONENT, "toggle sidebar", sidebar.class_list().toggle("sidebar-collapsed"));
        }
        if let Some(content) = select_one(&document, ".content-with-sidebar") {
            report(
                COMPONENT,
                "toggle content",
                content.class_list().toggle("content-with-sidebar-collapsed"),
            );
        }
    })
    .forget();
}

fn auto_hide_static_alerts(document: &Document, config: &AppConfig) {
    let fade_ms = config.alert_fade_ms;
    for alert in select_all(document, ".alert:not(.alert-danger):not(.no-auto-hide)") {
        Timeout::new(config.alert_dismiss_ms, move || {
            report(COMPONENT, "fade alert", alert.class_list().remove_1("show"));
            Timeout::new(fade_ms, move || alert.remove()).forget();
        })
        .forget();
    }
}

fn install_smooth_anchors(window: &Window, document: &Document) {
    for anchor in select_all(document, "a[href^=\"#\"]:not([data-bs-toggle])") {
        let window = window.clone();
        let document = document.clone();
        let href = anchor.get_attribute("href").unwrap_or_default();
        EventListener::new_with_options(
            &anchor,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                let target = select_one(&document, &href)
                    .and_then(|target| target.dyn_into::<HtmlElement>().ok());
                if let Some(target) = target {
                    smooth_scroll_to(&window, f64::from(target.offset_top()) - ANCHOR_SCROLL_OFFSET);
                }
            },
        )
        .forget();
    }
}

fn install_form_validation_styles(document: &Document) {
    for form in select_all(document, ".needs-validation") {
        let Ok(form) = form.dyn_into::<HtmlFormElement>() else {
            continue;
        };
        let target = form.clone();
        EventListener::new_with_options(
            &target,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                if !form.check_validity() {
                    event.prevent_default();
                    event.stop_propagation();
                }
                report(COMPONENT, "mark validated", form.class_list().add_1("was-validated"));
            },
        )
        .forget();
    }
}
