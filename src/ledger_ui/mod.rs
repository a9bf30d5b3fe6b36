use anyhow::{Result, anyhow};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;

use crate::action_router::{ActionRouterInput, ActionRouterOutput};
use crate::budgets::processor_enums::{BudgetsProcessorInput, SetBudgetInputArgs};
use crate::expenses::processor_enums::{
    AddExpenseInputArgs, ExpensesProcessorInput, ExpensesProcessorOutput,
};
use crate::store::InvalidDocumentId;
use crate::utils::amount::InvalidAmount;
use crate::utils::app_config::AppConfig;

pub mod templates;

/// HTML page and the htmx fragment endpoints behind its forms
pub fn router() -> Router<AppConfig> {
    Router::new()
        .route("/", get(index_handler))
        .route("/ui/expenses", get(expense_list_handler).post(add_expense_handler))
        .route("/ui/budgets", post(set_budget_handler))
}

#[derive(Deserialize)]
struct ExpenseForm {
    category: String,
    amount: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BudgetForm {
    budget_category: String,
    budget_amount: String,
}

async fn index_handler() -> Html<String> {
    Html(templates::index_page())
}

async fn render_expense_list(app_config: AppConfig) -> Result<String> {
    let action = ActionRouterInput::Expenses(ExpensesProcessorInput::ListExpenses);

    match action.process(app_config).await? {
        ActionRouterOutput::Expenses(ExpensesProcessorOutput::ListExpenses(records)) => {
            Ok(templates::expense_rows(&records))
        }
        _ => Err(anyhow!("Unexpected response type")),
    }
}

// Failed submissions answer with an empty non-2xx body: htmx leaves the page
// and the form untouched.
fn submission_failed(context: &str, err: anyhow::Error) -> Response {
    let rejected_input = err.downcast_ref::<InvalidAmount>().is_some()
        || err.downcast_ref::<InvalidDocumentId>().is_some();

    if rejected_input {
        tracing::warn!("{}: {}", context, err);
        StatusCode::UNPROCESSABLE_ENTITY.into_response()
    } else {
        tracing::error!("{}: {}", context, err);
        StatusCode::BAD_GATEWAY.into_response()
    }
}

// The write already succeeded, so a failed re-read still answers 2xx and only
// suppresses the swap.
async fn refreshed_list(app_config: AppConfig) -> Response {
    match render_expense_list(app_config).await {
        Ok(rows) => Html(rows).into_response(),
        Err(e) => {
            tracing::error!("Error getting expenses: {}", e);
            ([("HX-Reswap", "none")], "").into_response()
        }
    }
}

async fn expense_list_handler(State(app_config): State<AppConfig>) -> Response {
    match render_expense_list(app_config).await {
        Ok(rows) => Html(rows).into_response(),
        Err(e) => {
            tracing::error!("Error getting expenses: {}", e);
            StatusCode::BAD_GATEWAY.into_response()
        }
    }
}

async fn add_expense_handler(
    State(app_config): State<AppConfig>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let action = ActionRouterInput::Expenses(ExpensesProcessorInput::AddExpense(AddExpenseInputArgs {
        category: form.category,
        amount: form.amount,
    }));

    if let Err(e) = action.process(app_config.clone()).await {
        return submission_failed("Error adding expense", e);
    }

    refreshed_list(app_config).await
}

async fn set_budget_handler(
    State(app_config): State<AppConfig>,
    Form(form): Form<BudgetForm>,
) -> Response {
    let action = ActionRouterInput::Budgets(BudgetsProcessorInput::SetBudget(SetBudgetInputArgs {
        category: form.budget_category,
        amount: form.budget_amount,
    }));

    if let Err(e) = action.process(app_config.clone()).await {
        return submission_failed("Error setting budget", e);
    }

    refreshed_list(app_config).await
}
