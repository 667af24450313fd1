pub mod use_doctor_schedule;
