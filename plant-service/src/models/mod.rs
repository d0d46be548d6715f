//! Request and response bodies of the HTTP surface.

pub mod treatment_plan;

pub use treatment_plan::{TreatmentPlanRequest, TreatmentPlanResponse};
