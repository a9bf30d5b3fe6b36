pub mod budgets;
pub mod expenses;
pub mod health;
