// Public library interface for expense-ledger
pub mod action_router;
pub mod api;
pub mod budgets;
pub mod cli_helper;
pub mod cli_utils;
pub mod expenses;
pub mod ledger_ui;
pub mod store;
pub mod utils;
