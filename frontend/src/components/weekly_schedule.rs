use yew::prelude::*;

use crate::hooks::use_doctor_schedule::{use_doctor_schedule, ScheduleState};
use crate::services::alerts::AlertHandle;
use crate::services::api::ApiClient;
use crate::services::weekly_grid::{GridCell, GridRow, WeeklyGrid, DAY_NAMES};

#[derive(Properties, PartialEq)]
pub struct WeeklyScheduleProps {
    pub doctor_id: String,
    pub api: ApiClient,
    pub alerts: AlertHandle,
    /// Fired once the table is in the DOM
    #[prop_or_default]
    pub on_rendered: Callback<()>,
}

#[function_component(WeeklySchedule)]
pub fn weekly_schedule(props: &WeeklyScheduleProps) -> Html {
    let schedule = use_doctor_schedule(&props.api, &props.doctor_id, &props.alerts);

    let loaded = matches!(schedule, ScheduleState::Loaded(_));
    {
        let on_rendered = props.on_rendered.clone();
        use_effect_with(loaded, move |loaded| {
            if *loaded {
                on_rendered.emit(());
            }
        });
    }

    match schedule {
        ScheduleState::Loaded(grid) => render_grid(&grid),
        // Nothing is drawn until the schedule arrives, or at all on failure
        ScheduleState::Loading | ScheduleState::Failed => html! {},
    }
}

fn render_grid(grid: &WeeklyGrid) -> Html {
    html! {
        <table class="table table-bordered schedule-table">
            <thead>
                <tr>
                    <th>{"Time"}</th>
                    {for DAY_NAMES.iter().map(|day| html! { <th>{*day}</th> })}
                </tr>
            </thead>
            <tbody>
                {for grid.rows.iter().map(render_row)}
            </tbody>
        </table>
    }
}

fn render_row(row: &GridRow) -> Html {
    html! {
        <tr>
            <td class="time-label">{row.time_label()}</td>
            {for row.cells.iter().map(render_cell)}
        </tr>
    }
}

fn render_cell(cell: &GridCell) -> Html {
    let schedule_id = cell
        .occupant
        .as_ref()
        .map(|occupant| occupant.schedule_id.to_string());
    let label = cell.occupant.as_ref().and_then(|occupant| occupant.label.as_ref());

    html! {
        <td class={cell.css_class()}
            data-day={cell.day.to_string()}
            data-hour={cell.hour.to_string()}
            data-schedule-id={schedule_id}>
            {if let Some(label) = label {
                html! {
                    <>
                        <div class="schedule-info">{&label.time_range}</div>
                        <div class="appointment-duration small">{&label.duration}</div>
                    </>
                }
            } else {
                html! {}
            }}
        </td>
    }
}
