use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    action_router::{ActionRouterInput, ActionRouterOutput},
    api::{error::ApiError, response::ApiResponse},
    expenses::processor_enums::{AddExpenseInputArgs, ExpensesProcessorInput, ExpensesProcessorOutput},
    utils::app_config::AppConfig,
};

/// Amount as JSON number or as the raw text a form would send
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    pub fn into_text(self) -> String {
        match self {
            AmountInput::Number(n) => n.to_string(),
            AmountInput::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateExpenseBody {
    pub category: String,
    pub amount: AmountInput,
}

/// GET /api/expenses - Every expense in store order
pub async fn get_expenses(
    State(app_config): State<AppConfig>,
) -> Result<(StatusCode, Json<ApiResponse<serde_json::Value>>), ApiError> {
    let action = ActionRouterInput::Expenses(ExpensesProcessorInput::ListExpenses);

    let result = action
        .process(app_config)
        .await
        .map_err(ApiError::from_action_error)?;

    match result {
        ActionRouterOutput::Expenses(ExpensesProcessorOutput::ListExpenses(records)) => {
            let json = serde_json::to_value(&records)
                .map_err(|e| ApiError::internal_error(format!("Failed to serialize: {}", e)))?;
            Ok((StatusCode::OK, Json(ApiResponse::success(json))))
        }
        _ => Err(ApiError::internal_error("Unexpected response type")),
    }
}

/// POST /api/expenses - Record a new expense dated today
pub async fn create_expense(
    State(app_config): State<AppConfig>,
    Json(body): Json<CreateExpenseBody>,
) -> Result<(StatusCode, Json<ApiResponse<serde_json::Value>>), ApiError> {
    let action = ActionRouterInput::Expenses(ExpensesProcessorInput::AddExpense(AddExpenseInputArgs {
        category: body.category,
        amount: body.amount.into_text(),
    }));

    let result = action
        .process(app_config)
        .await
        .map_err(ApiError::from_action_error)?;

    match result {
        ActionRouterOutput::Expenses(ExpensesProcessorOutput::AddExpense(record)) => {
            let json = serde_json::to_value(&record)
                .map_err(|e| ApiError::internal_error(format!("Failed to serialize: {}", e)))?;
            Ok((StatusCode::CREATED, Json(ApiResponse::success(json))))
        }
        _ => Err(ApiError::internal_error("Unexpected response type")),
    }
}
