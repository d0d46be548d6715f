//! HTTP handlers for the plant service.

pub mod analyze;
pub mod health;
pub mod treatment;

pub use analyze::analyze_image;
pub use health::{health_check, metrics};
pub use treatment::get_treatment_plan;
