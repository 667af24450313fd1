use async_trait::async_trait;
use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{
    AppointmentCheck, AvailableSlotsResponse, DoctorScheduleResponse, SlotQuery, ValidationResult,
};
use thiserror::Error;

/// Ways a backend call can fail. Call sites treat all of them as "fetch failed";
/// the variant only feeds the log line.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("network error calling {url}: {message}")]
    Network { url: String, message: String },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Read-only endpoints consumed by the scheduling pages
#[async_trait(?Send)]
pub trait SchedulingApi {
    async fn doctor_schedule(&self, doctor_id: &str) -> Result<DoctorScheduleResponse, ApiError>;

    async fn available_slots(&self, query: &SlotQuery) -> Result<AvailableSlotsResponse, ApiError>;

    async fn validate_appointment(
        &self,
        check: &AppointmentCheck,
    ) -> Result<ValidationResult, ApiError>;
}

/// API client for the clinic backend, same-origin unless configured otherwise
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

/// Path of the weekly schedule endpoint; the id is a single path segment
pub fn doctor_schedule_path(doctor_id: &str) -> String {
    format!("/api/doctor-schedule/{}", urlencoding::encode(doctor_id))
}

/// Decode a JSON body, reporting failures against `url`
pub fn parse_body<T: DeserializeOwned>(url: String, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode {
        url,
        message: e.to_string(),
    })
}

impl ApiClient {
    /// Create a client with a custom base URL; empty means same-origin
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        url: String,
        query: Vec<(&'static str, String)>,
    ) -> Result<T, ApiError> {
        let response = Request::get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::Network {
                url: url.clone(),
                message: e.to_string(),
            })?;
        Self::decode(url, response).await
    }

    async fn decode<T: DeserializeOwned>(url: String, response: Response) -> Result<T, ApiError> {
        if !response.ok() {
            return Err(ApiError::Status {
                url,
                status: response.status(),
            });
        }
        match response.text().await {
            Ok(body) => parse_body(url, &body),
            Err(e) => Err(ApiError::Decode {
                url,
                message: e.to_string(),
            }),
        }
    }
}

#[async_trait(?Send)]
impl SchedulingApi for ApiClient {
    async fn doctor_schedule(&self, doctor_id: &str) -> Result<DoctorScheduleResponse, ApiError> {
        Self::get_json(self.url(&doctor_schedule_path(doctor_id)), Vec::new()).await
    }

    async fn available_slots(&self, query: &SlotQuery) -> Result<AvailableSlotsResponse, ApiError> {
        Self::get_json(self.url("/api/available-slots"), query.query_pairs()).await
    }

    async fn validate_appointment(
        &self,
        check: &AppointmentCheck,
    ) -> Result<ValidationResult, ApiError> {
        Self::get_json(self.url("/api/validate-appointment"), check.query_pairs()).await
    }
}
