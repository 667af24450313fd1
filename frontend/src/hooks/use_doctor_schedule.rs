use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::alerts::{AlertHandle, AlertKind};
use crate::services::api::{ApiClient, ApiError, SchedulingApi};
use crate::services::logging::Logger;
use crate::services::weekly_grid::WeeklyGrid;

pub const SCHEDULE_FAILED_MESSAGE: &str = "Failed to load doctor schedule. Please try again.";

#[derive(Clone, PartialEq)]
pub enum ScheduleState {
    Loading,
    Loaded(Rc<WeeklyGrid>),
    Failed,
}

/// Fetch a doctor's schedule and lay it out as a weekly grid
pub async fn load_weekly_grid<A: SchedulingApi>(api: &A, doctor_id: &str) -> Result<WeeklyGrid, ApiError> {
    let response = api.doctor_schedule(doctor_id).await?;
    Ok(WeeklyGrid::build(&response.schedules))
}

/// Hook loading the weekly grid once per doctor id.
///
/// A response that arrives after the doctor id changed or the component
/// unmounted is dropped. Failures raise an error alert; there is no retry.
#[hook]
pub fn use_doctor_schedule(api: &ApiClient, doctor_id: &str, alerts: &AlertHandle) -> ScheduleState {
    let state = use_state(|| ScheduleState::Loading);

    {
        let state = state.clone();
        let api = api.clone();
        let alerts = alerts.clone();

        use_effect_with(doctor_id.to_string(), move |doctor_id| {
            let active = Rc::new(Cell::new(true));
            let doctor_id = doctor_id.clone();
            state.set(ScheduleState::Loading);

            {
                let active = active.clone();
                spawn_local(async move {
                    let result = load_weekly_grid(&api, &doctor_id).await;
                    if !active.get() {
                        return;
                    }
                    match result {
                        Ok(grid) => state.set(ScheduleState::Loaded(Rc::new(grid))),
                        Err(err) => {
                            Logger::error_with_component(
                                "weekly-schedule",
                                &format!("Error fetching schedule: {}", err),
                            );
                            alerts.show(AlertKind::Error, SCHEDULE_FAILED_MESSAGE);
                            state.set(ScheduleState::Failed);
                        }
                    }
                });
            }

            move || active.set(false)
        });
    }

    (*state).clone()
}
