use std::future::Future;
use std::rc::Rc;

use shared::{SelectionState, SlotQuery};

use super::request_sequence::{RequestSequence, RequestTicket};
use super::slot_options::{AvailabilityMessage, SlotOptions};
use crate::services::alerts::{AlertKind, AlertPresenter};
use crate::services::api::SchedulingApi;
use crate::services::logging::Logger;

const COMPONENT: &str = "slot-updater";
pub const SLOTS_FAILED_MESSAGE: &str = "Failed to load available slots. Please try again.";

/// The doctor/date/time controls as seen by the slot updater
pub trait SlotSelectView {
    /// Current doctor, date and (when editing) appointment id
    fn selection(&self) -> SelectionState;
    /// Value currently selected in the time selector
    fn selected_time(&self) -> String;
    fn clear_options(&self);
    fn set_disabled(&self, disabled: bool);
    fn show_busy(&self);
    fn hide_busy(&self);
    fn render_options(&self, options: &SlotOptions);
    fn show_availability(&self, message: &AvailabilityMessage);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotRefresh {
    /// Doctor or date empty; options cleared without fetching
    Cleared,
    Populated { count: usize },
    Failed,
    /// A newer request was issued before this one completed
    Superseded,
}

/// Keeps the time selector in step with the chosen doctor and date
pub struct SlotUpdater<V, A> {
    view: Rc<V>,
    api: Rc<A>,
    alerts: Rc<dyn AlertPresenter>,
    sequence: RequestSequence,
}

impl<V, A> SlotUpdater<V, A>
where
    V: SlotSelectView + 'static,
    A: SchedulingApi + 'static,
{
    pub fn new(view: Rc<V>, api: Rc<A>, alerts: Rc<dyn AlertPresenter>) -> Self {
        Self {
            view,
            api,
            alerts,
            sequence: RequestSequence::new(),
        }
    }

    /// Handle a doctor/date change.
    ///
    /// The selection is read and the request ticket taken before this returns,
    /// so two calls in a row always leave the second one as the winner no
    /// matter which response arrives first.
    pub fn refresh(&self) -> impl Future<Output = SlotRefresh> + 'static {
        let pending = self.begin();
        let view = Rc::clone(&self.view);
        let api = Rc::clone(&self.api);
        let alerts = Rc::clone(&self.alerts);

        async move {
            let Some((query, ticket)) = pending else {
                return SlotRefresh::Cleared;
            };

            let result = api.available_slots(&query).await;
            if !ticket.settle() {
                Logger::debug_with_component(
                    COMPONENT,
                    &format!("Discarding superseded slots for doctor {} on {}", query.doctor_id, query.date),
                );
                return SlotRefresh::Superseded;
            }

            view.hide_busy();
            view.set_disabled(false);

            match result {
                Ok(response) => {
                    let options = SlotOptions::from_slots(&response.slots, &view.selected_time());
                    view.render_options(&options);
                    view.show_availability(&AvailabilityMessage::for_count(response.slots.len()));
                    Logger::debug_with_component(
                        COMPONENT,
                        &format!("{} slots for doctor {} on {}", response.slots.len(), query.doctor_id, query.date),
                    );
                    SlotRefresh::Populated {
                        count: response.slots.len(),
                    }
                }
                Err(err) => {
                    Logger::error_with_component(COMPONENT, &format!("Error fetching slots: {}", err));
                    view.clear_options();
                    alerts.show(AlertKind::Error, SLOTS_FAILED_MESSAGE);
                    SlotRefresh::Failed
                }
            }
        }
    }

    /// Refresh at page load, but only when doctor and date are already
    /// filled in (edit pages, re-rendered forms). An incomplete selection is
    /// left untouched.
    pub fn refresh_if_ready(&self) -> Option<impl Future<Output = SlotRefresh> + 'static> {
        self.view.selection().slot_query().map(|_| self.refresh())
    }

    fn begin(&self) -> Option<(SlotQuery, RequestTicket)> {
        match self.view.selection().slot_query() {
            None => {
                if self.sequence.cancel_outstanding() {
                    self.view.hide_busy();
                    self.view.set_disabled(false);
                }
                self.view.clear_options();
                None
            }
            Some(query) => {
                let ticket = self.sequence.issue();
                self.view.set_disabled(true);
                self.view.show_busy();
                Some((query, ticket))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::testing::{FakeApi, FakeSlotView};
    use crate::services::alerts::testing::RecordingAlerts;
    use crate::services::api::ApiError;
    use futures::executor::block_on;
    use shared::AvailableSlotsResponse;

    fn slots(values: &[&str]) -> Result<AvailableSlotsResponse, ApiError> {
        Ok(AvailableSlotsResponse {
            slots: values.iter().map(|s| s.to_string()).collect(),
        })
    }

    fn network_error() -> ApiError {
        ApiError::Network {
            url: "/api/available-slots".to_string(),
            message: "offline".to_string(),
        }
    }

    fn updater(
        view: &Rc<FakeSlotView>,
        api: &Rc<FakeApi>,
        alerts: &Rc<RecordingAlerts>,
    ) -> SlotUpdater<FakeSlotView, FakeApi> {
        SlotUpdater::new(Rc::clone(view), Rc::clone(api), alerts.clone())
    }

    #[test]
    fn test_missing_doctor_clears_without_fetch() {
        let view = Rc::new(FakeSlotView::with_selection("", "2024-06-01", None));
        let api = Rc::new(FakeApi::default());
        let alerts = Rc::new(RecordingAlerts::default());

        let outcome = block_on(updater(&view, &api, &alerts).refresh());

        assert_eq!(outcome, SlotRefresh::Cleared);
        assert!(api.slot_queries.borrow().is_empty());
        let state = view.state.borrow();
        assert_eq!(state.clear_count, 1);
        // Clearing alone does not disable
        assert!(!state.disabled);
    }

    #[test]
    fn test_busy_while_in_flight_then_populated() {
        let view = Rc::new(FakeSlotView::with_selection("3", "2024-06-01", None));
        view.state.borrow_mut().selected = "09:30".to_string();
        let api = Rc::new(FakeApi::default());
        api.push_slots(slots(&["09:00", "09:30"]));
        let alerts = Rc::new(RecordingAlerts::default());

        let pending = updater(&view, &api, &alerts).refresh();
        {
            let state = view.state.borrow();
            assert!(state.disabled);
            assert!(state.busy);
        }

        assert_eq!(block_on(pending), SlotRefresh::Populated { count: 2 });
        let state = view.state.borrow();
        assert!(!state.busy);
        assert!(!state.disabled);
        assert_eq!(state.selected, "09:30");
        assert_eq!(state.options.len(), 3);
        assert_eq!(
            state.availability.as_ref().map(|m| m.text.as_str()),
            Some("2 time slots available")
        );
        assert!(alerts.shown.borrow().is_empty());
    }

    #[test]
    fn test_stale_selection_reverts_to_default() {
        let view = Rc::new(FakeSlotView::with_selection("3", "2024-06-01", None));
        view.state.borrow_mut().selected = "09:30".to_string();
        let api = Rc::new(FakeApi::default());
        api.push_slots(slots(&["10:00"]));
        let alerts = Rc::new(RecordingAlerts::default());

        block_on(updater(&view, &api, &alerts).refresh());
        assert_eq!(view.state.borrow().selected, "");
    }

    #[test]
    fn test_zero_slots_disables_selector() {
        let view = Rc::new(FakeSlotView::with_selection("3", "2024-06-01", None));
        let api = Rc::new(FakeApi::default());
        api.push_slots(slots(&[]));
        let alerts = Rc::new(RecordingAlerts::default());

        assert_eq!(
            block_on(updater(&view, &api, &alerts).refresh()),
            SlotRefresh::Populated { count: 0 }
        );
        let state = view.state.borrow();
        assert_eq!(state.options.len(), 1);
        assert_eq!(state.options[0].label, "No available slots");
        assert!(state.options[0].disabled);
        assert!(state.disabled);
        assert!(!state.busy);
    }

    #[test]
    fn test_failure_clears_and_alerts() {
        let view = Rc::new(FakeSlotView::with_selection("3", "2024-06-01", None));
        let api = Rc::new(FakeApi::default());
        api.push_slots(Err(network_error()));
        let alerts = Rc::new(RecordingAlerts::default());

        assert_eq!(block_on(updater(&view, &api, &alerts).refresh()), SlotRefresh::Failed);
        let state = view.state.borrow();
        assert!(!state.busy);
        assert!(!state.disabled);
        assert!(state.options.is_empty());
        assert_eq!(alerts.messages(), vec![SLOTS_FAILED_MESSAGE.to_string()]);
        assert_eq!(alerts.shown.borrow()[0].0, AlertKind::Error);
        // No retry
        assert_eq!(api.slot_queries.borrow().len(), 1);
    }

    #[test]
    fn test_edit_mode_excludes_current_appointment() {
        let view = Rc::new(FakeSlotView::with_selection("3", "2024-06-01", Some("42")));
        let api = Rc::new(FakeApi::default());
        api.push_slots(slots(&["09:00"]));
        let alerts = Rc::new(RecordingAlerts::default());

        block_on(updater(&view, &api, &alerts).refresh());
        let queries = api.slot_queries.borrow();
        assert_eq!(queries[0].exclude_appointment_id.as_deref(), Some("42"));
    }

    #[test]
    fn test_superseded_response_is_discarded() {
        let view = Rc::new(FakeSlotView::with_selection("3", "2024-06-01", None));
        let api = Rc::new(FakeApi::default());
        api.push_slots(slots(&["09:00"]));
        api.push_slots(slots(&["13:00", "13:30"]));
        let alerts = Rc::new(RecordingAlerts::default());
        let updater = updater(&view, &api, &alerts);

        let first = updater.refresh();
        view.state.borrow_mut().selection.date = "2024-06-02".to_string();
        let second = updater.refresh();

        assert_eq!(block_on(first), SlotRefresh::Superseded);
        // The older response left the control untouched and still busy
        assert!(view.state.borrow().options.is_empty());
        assert!(view.state.borrow().busy);

        assert_eq!(block_on(second), SlotRefresh::Populated { count: 2 });
        let state = view.state.borrow();
        assert_eq!(state.options[1].value, "13:00");
        assert!(!state.busy);
    }

    #[test]
    fn test_clearing_cancels_in_flight_request() {
        let view = Rc::new(FakeSlotView::with_selection("3", "2024-06-01", None));
        let api = Rc::new(FakeApi::default());
        api.push_slots(slots(&["09:00"]));
        let alerts = Rc::new(RecordingAlerts::default());
        let updater = updater(&view, &api, &alerts);

        let in_flight = updater.refresh();
        view.state.borrow_mut().selection.doctor_id.clear();
        assert_eq!(block_on(updater.refresh()), SlotRefresh::Cleared);
        {
            let state = view.state.borrow();
            assert!(!state.busy);
            assert!(!state.disabled);
        }

        assert_eq!(block_on(in_flight), SlotRefresh::Superseded);
        assert!(view.state.borrow().options.is_empty());
    }

    #[test]
    fn test_startup_refresh_when_selection_prefilled() {
        let view = Rc::new(FakeSlotView::with_selection("3", "2024-06-01", Some("42")));
        view.state.borrow_mut().selected = "10:00".to_string();
        let api = Rc::new(FakeApi::default());
        api.push_slots(slots(&["09:30", "10:00"]));
        let alerts = Rc::new(RecordingAlerts::default());

        let startup = updater(&view, &api, &alerts)
            .refresh_if_ready()
            .expect("prefilled selection refreshes");
        assert!(view.state.borrow().busy);

        assert_eq!(block_on(startup), SlotRefresh::Populated { count: 2 });
        assert_eq!(api.slot_queries.borrow().len(), 1);
        assert_eq!(view.state.borrow().selected, "10:00");
    }

    #[test]
    fn test_no_startup_refresh_for_incomplete_selection() {
        let view = Rc::new(FakeSlotView::with_selection("3", "", None));
        let api = Rc::new(FakeApi::default());
        let alerts = Rc::new(RecordingAlerts::default());

        assert!(updater(&view, &api, &alerts).refresh_if_ready().is_none());
        assert!(api.slot_queries.borrow().is_empty());
        // The server-rendered options stay as they are
        assert_eq!(view.state.borrow().clear_count, 0);
    }
}
