use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    action_router::{ActionRouterInput, ActionRouterOutput},
    api::{
        error::ApiError,
        handlers::expenses::AmountInput,
        response::ApiResponse,
        validation::validate_budget_category,
    },
    budgets::processor_enums::{BudgetsProcessorInput, BudgetsProcessorOutput, SetBudgetInputArgs},
    utils::app_config::AppConfig,
};

#[derive(Debug, Deserialize)]
pub struct PutBudgetBody {
    pub amount: AmountInput,
}

/// GET /api/budgets - All budgets, one per category
pub async fn get_budgets(
    State(app_config): State<AppConfig>,
) -> Result<(StatusCode, Json<ApiResponse<serde_json::Value>>), ApiError> {
    let action = ActionRouterInput::Budgets(BudgetsProcessorInput::ListBudgets);

    let result = action
        .process(app_config)
        .await
        .map_err(ApiError::from_action_error)?;

    match result {
        ActionRouterOutput::Budgets(BudgetsProcessorOutput::ListBudgets(budgets)) => {
            let json = serde_json::to_value(&budgets)
                .map_err(|e| ApiError::internal_error(format!("Failed to serialize: {}", e)))?;
            Ok((StatusCode::OK, Json(ApiResponse::success(json))))
        }
        _ => Err(ApiError::internal_error("Unexpected response type")),
    }
}

/// GET /api/budgets/{category}
pub async fn get_budget_by_category(
    State(app_config): State<AppConfig>,
    Path(category): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<serde_json::Value>>), ApiError> {
    validate_budget_category(&category)?;

    let action = ActionRouterInput::Budgets(BudgetsProcessorInput::GetBudget(category.clone()));

    let result = action
        .process(app_config)
        .await
        .map_err(ApiError::from_action_error)?;

    match result {
        ActionRouterOutput::Budgets(BudgetsProcessorOutput::GetBudget(Some(budget))) => {
            let json = serde_json::to_value(&budget)
                .map_err(|e| ApiError::internal_error(format!("Failed to serialize: {}", e)))?;
            Ok((StatusCode::OK, Json(ApiResponse::success(json))))
        }
        ActionRouterOutput::Budgets(BudgetsProcessorOutput::GetBudget(None)) => {
            Err(ApiError::not_found(format!("Budget {}", category)))
        }
        _ => Err(ApiError::internal_error("Unexpected response type")),
    }
}

/// PUT /api/budgets/{category} - Create or overwrite the category budget
pub async fn put_budget(
    State(app_config): State<AppConfig>,
    Path(category): Path<String>,
    Json(body): Json<PutBudgetBody>,
) -> Result<(StatusCode, Json<ApiResponse<serde_json::Value>>), ApiError> {
    validate_budget_category(&category)?;

    let action = ActionRouterInput::Budgets(BudgetsProcessorInput::SetBudget(SetBudgetInputArgs {
        category,
        amount: body.amount.into_text(),
    }));

    let result = action
        .process(app_config)
        .await
        .map_err(ApiError::from_action_error)?;

    match result {
        ActionRouterOutput::Budgets(BudgetsProcessorOutput::SetBudget(budget)) => {
            let json = serde_json::to_value(&budget)
                .map_err(|e| ApiError::internal_error(format!("Failed to serialize: {}", e)))?;
            Ok((StatusCode::OK, Json(ApiResponse::success(json))))
        }
        _ => Err(ApiError::internal_error("Unexpected response type")),
    }
}
