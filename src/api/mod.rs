pub mod error;
pub mod response;
pub mod validation;
pub mod handlers;

use axum::{Router, routing::get};

use crate::utils::app_config::AppConfig;
use handlers::{budgets::*, expenses::*, health};

/// JSON routes, state supplied by the caller
pub fn router() -> Router<AppConfig> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Expenses
        .route("/api/expenses", get(get_expenses).post(create_expense))
        // Budgets
        .route("/api/budgets", get(get_budgets))
        .route(
            "/api/budgets/:category",
            get(get_budget_by_category).put(put_budget),
        )
}
