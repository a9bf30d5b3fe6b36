use serde::{Deserialize, Serialize};
use crate::budgets::db_types::BudgetRecord;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SetBudgetInputArgs {
    pub category: String,
    pub amount: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub enum BudgetsProcessorInput {
    SetBudget(SetBudgetInputArgs),
    GetBudget(String),
    ListBudgets,
}

#[derive(Serialize, Debug)]
pub enum BudgetsProcessorOutput {
    SetBudget(BudgetRecord),
    GetBudget(Option<BudgetRecord>),
    ListBudgets(Vec<BudgetRecord>),
}
