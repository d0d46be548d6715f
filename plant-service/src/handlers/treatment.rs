use crate::error::GatewayError;
use crate::models::{TreatmentPlanRequest, TreatmentPlanResponse};
use crate::services::diagnosis::{self, TREATMENT_PLAN};
use crate::services::metrics;
use crate::startup::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use service_core::error::AppError;

const ERROR_CONTEXT: &str = "An error occurred while generating the plan";

/// `POST /get-treatment-plan`: draft a treatment plan for a named disease.
pub async fn get_treatment_plan(
    State(state): State<AppState>,
    payload: Result<Json<TreatmentPlanRequest>, JsonRejection>,
) -> Result<Json<TreatmentPlanResponse>, AppError> {
    let result = match payload {
        Ok(Json(request)) => {
            diagnosis::draft_treatment_plan(state.model.as_ref(), &request.disease_label()).await
        }
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unusable treatment plan body");
            Err(GatewayError::validation(
                "Missing 'disease_name' in request body",
            ))
        }
    };

    match result {
        Ok(plan) => {
            metrics::record_request(TREATMENT_PLAN, "success");
            Ok(Json(TreatmentPlanResponse { plan }))
        }
        Err(e) => {
            metrics::record_request(TREATMENT_PLAN, e.kind());
            if matches!(e, GatewayError::Validation(_)) {
                tracing::info!(error = %e, "Rejected /get-treatment-plan request");
            } else {
                tracing::error!(error = %e, kind = e.kind(), "Error in /get-treatment-plan");
            }
            Err(e.into_app_error(ERROR_CONTEXT))
        }
    }
}
