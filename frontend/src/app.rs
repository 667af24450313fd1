use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;
use yew::Callback;

use crate::components::{WeeklySchedule, WeeklyScheduleProps};
use crate::config::AppConfig;
use crate::controllers::{CheckOutcome, ConflictChecker, SlotUpdater};
use crate::dom::appointment_form::{BrowserConfirm, DomAppointmentForm};
use crate::dom::{enhancements, remove_children_except, report};
use crate::dom::floating_alert::FloatingAlerts;
use crate::dom::page::{PageContext, ScheduleMount};
use crate::dom::slot_select::DomSlotSelect;
use crate::services::alerts::{AlertHandle, AlertPresenter};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

const COMPONENT_SCHEDULE: &str = "weekly-schedule";

/// Start every feature the current page supports
pub fn start() {
    let window = gloo::utils::window();
    let document = gloo::utils::document();

    let config = AppConfig::from_document(&document);
    Logger::init(config.log_level);

    let api = Rc::new(ApiClient::with_base_url(config.api_base_url.clone()));
    let alerts: Rc<dyn AlertPresenter> = Rc::new(FloatingAlerts::new(document.clone(), &config));
    let page = PageContext::new(document.clone());

    enhancements::install(&window, &document, &config);

    if let Some(mount) = page.schedule_mount() {
        mount_weekly_schedule(&document, mount, &api, &alerts);
    }
    if let Some(slot_select) = page.slot_select() {
        install_slot_updates(slot_select, &api, &alerts);
    }
    if let Some(form) = page.appointment_form() {
        install_conflict_checker(form, &api, &alerts);
    }
}

fn mount_weekly_schedule(
    document: &Document,
    mount: ScheduleMount,
    api: &Rc<ApiClient>,
    alerts: &Rc<dyn AlertPresenter>,
) {
    Logger::debug_with_component(
        COMPONENT_SCHEDULE,
        &format!("Rendering schedule for doctor {}", mount.doctor_id),
    );
    // Server-rendered placeholder content stays until the grid has rendered
    let Some(host) = report(COMPONENT_SCHEDULE, "create host", document.create_element("div")) else {
        return;
    };
    if report(COMPONENT_SCHEDULE, "append host", mount.element.append_child(&host)).is_none() {
        return;
    }

    let parent = mount.element;
    let keep = host.clone();
    let props = WeeklyScheduleProps {
        doctor_id: mount.doctor_id,
        api: (**api).clone(),
        alerts: AlertHandle(Rc::clone(alerts)),
        on_rendered: Callback::from(move |()| remove_children_except(&parent, &keep)),
    };
    yew::Renderer::<WeeklySchedule>::with_root_and_props(host, props).render();
}

fn install_slot_updates(view: DomSlotSelect, api: &Rc<ApiClient>, alerts: &Rc<dyn AlertPresenter>) {
    let triggers = [view.doctor.element().clone(), view.date.element().clone()];
    let view = Rc::new(view);
    let updater = Rc::new(SlotUpdater::new(Rc::clone(&view), Rc::clone(api), Rc::clone(alerts)));

    for trigger in triggers {
        let updater = Rc::clone(&updater);
        EventListener::new(&trigger, "change", move |_| {
            let refresh = updater.refresh();
            spawn_local(async move {
                let outcome = refresh.await;
                Logger::debug_with_component("slot-updater", &format!("Refresh finished: {:?}", outcome));
            });
        })
        .forget();
    }

    if let Some(initial) = updater.refresh_if_ready() {
        spawn_local(async move {
            initial.await;
        });
    }
}

fn install_conflict_checker(
    form: DomAppointmentForm,
    api: &Rc<ApiClient>,
    alerts: &Rc<dyn AlertPresenter>,
) {
    let target = form.form.clone();
    let checker = ConflictChecker::new(
        Rc::new(form),
        Rc::clone(api),
        Rc::new(BrowserConfirm),
        Rc::clone(alerts),
    );

    EventListener::new_with_options(
        &target,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            let check = checker.check();
            spawn_local(async move {
                match check.await {
                    CheckOutcome::ValidationSkipped { .. } | CheckOutcome::Superseded => {}
                    outcome => Logger::info_with_component(
                        "conflict-checker",
                        &format!("Submit handled: {:?}", outcome),
                    ),
                }
            });
        },
    )
    .forget();
}
