use serde::{Deserialize, Serialize};
use crate::expenses::db_types::ExpenseRecord;

/// Raw expense form fields, amount still as typed
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AddExpenseInputArgs {
    pub category: String,
    pub amount: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub enum ExpensesProcessorInput {
    AddExpense(AddExpenseInputArgs),
    ListExpenses,
}

#[derive(Serialize, Debug)]
pub enum ExpensesProcessorOutput {
    AddExpense(ExpenseRecord),
    ListExpenses(Vec<ExpenseRecord>),
}
