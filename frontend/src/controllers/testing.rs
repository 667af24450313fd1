//! In-memory stand-ins for the page and the backend.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use async_trait::async_trait;
use shared::{
    AppointmentCheck, AppointmentFields, AvailableSlotsResponse, DoctorScheduleResponse,
    SelectionState, SlotQuery, ValidationResult,
};

use super::conflict_checker::{AppointmentForm, ConfirmPrompt};
use super::slot_options::{AvailabilityMessage, SlotOption, SlotOptions};
use super::slot_updater::SlotSelectView;
use crate::services::api::{ApiError, SchedulingApi};

fn exhausted(url: &str) -> ApiError {
    ApiError::Network {
        url: url.to_string(),
        message: "no scripted response".to_string(),
    }
}

/// Backend double answering from scripted queues and recording every call
#[derive(Default)]
pub struct FakeApi {
    pub schedules: RefCell<VecDeque<Result<DoctorScheduleResponse, ApiError>>>,
    pub slots: RefCell<VecDeque<Result<AvailableSlotsResponse, ApiError>>>,
    pub validations: RefCell<VecDeque<Result<ValidationResult, ApiError>>>,
    pub schedule_requests: RefCell<Vec<String>>,
    pub slot_queries: RefCell<Vec<SlotQuery>>,
    pub checks: RefCell<Vec<AppointmentCheck>>,
}

impl FakeApi {
    pub fn push_slots(&self, response: Result<AvailableSlotsResponse, ApiError>) {
        self.slots.borrow_mut().push_back(response);
    }

    pub fn push_validation(&self, response: Result<ValidationResult, ApiError>) {
        self.validations.borrow_mut().push_back(response);
    }
}

#[async_trait(?Send)]
impl SchedulingApi for FakeApi {
    async fn doctor_schedule(&self, doctor_id: &str) -> Result<DoctorScheduleResponse, ApiError> {
        self.schedule_requests.borrow_mut().push(doctor_id.to_string());
        self.schedules
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(exhausted("/api/doctor-schedule")))
    }

    async fn available_slots(&self, query: &SlotQuery) -> Result<AvailableSlotsResponse, ApiError> {
        self.slot_queries.borrow_mut().push(query.clone());
        self.slots
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(exhausted("/api/available-slots")))
    }

    async fn validate_appointment(
        &self,
        check: &AppointmentCheck,
    ) -> Result<ValidationResult, ApiError> {
        self.checks.borrow_mut().push(check.clone());
        self.validations
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(exhausted("/api/validate-appointment")))
    }
}

#[derive(Default)]
pub struct SlotViewState {
    pub selection: SelectionState,
    pub options: Vec<SlotOption>,
    pub selected: String,
    pub disabled: bool,
    pub busy: bool,
    pub clear_count: usize,
    pub availability: Option<AvailabilityMessage>,
}

/// Time selector double behaving like a `<select>` element
#[derive(Default)]
pub struct FakeSlotView {
    pub state: RefCell<SlotViewState>,
}

impl FakeSlotView {
    pub fn with_selection(doctor_id: &str, date: &str, appointment_id: Option<&str>) -> Self {
        let view = Self::default();
        view.state.borrow_mut().selection = SelectionState::new(doctor_id, date, appointment_id);
        view
    }
}

impl SlotSelectView for FakeSlotView {
    fn selection(&self) -> SelectionState {
        self.state.borrow().selection.clone()
    }

    fn selected_time(&self) -> String {
        self.state.borrow().selected.clone()
    }

    fn clear_options(&self) {
        let mut state = self.state.borrow_mut();
        state.options.clear();
        state.selected.clear();
        state.clear_count += 1;
    }

    fn set_disabled(&self, disabled: bool) {
        self.state.borrow_mut().disabled = disabled;
    }

    fn show_busy(&self) {
        self.state.borrow_mut().busy = true;
    }

    fn hide_busy(&self) {
        self.state.borrow_mut().busy = false;
    }

    fn render_options(&self, options: &SlotOptions) {
        let mut state = self.state.borrow_mut();
        state.options = options.options.clone();
        state.selected = options.selected.clone();
        state.disabled = options.control_disabled;
    }

    fn show_availability(&self, message: &AvailabilityMessage) {
        self.state.borrow_mut().availability = Some(message.clone());
    }
}

/// Appointment form double counting programmatic submissions
#[derive(Default)]
pub struct FakeForm {
    pub fields: RefCell<AppointmentFields>,
    pub submissions: Cell<usize>,
}

impl FakeForm {
    pub fn with_fields(doctor_id: &str, date: &str, time: &str, appointment_id: Option<&str>) -> Self {
        let form = Self::default();
        *form.fields.borrow_mut() = AppointmentFields::new(doctor_id, date, time, appointment_id);
        form
    }
}

impl AppointmentForm for FakeForm {
    fn fields(&self) -> AppointmentFields {
        self.fields.borrow().clone()
    }

    fn submit(&self) {
        self.submissions.set(self.submissions.get() + 1);
    }
}

/// Confirmation dialog double with a fixed answer
pub struct ScriptedConfirm {
    pub answer: bool,
    pub prompts: RefCell<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl ConfirmPrompt for ScriptedConfirm {
    fn confirm(&self, message: &str) -> bool {
        self.prompts.borrow_mut().push(message.to_string());
        self.answer
    }
}
