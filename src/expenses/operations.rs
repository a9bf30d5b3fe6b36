use anyhow::Result;
use chrono::NaiveDate;

use crate::expenses::config::ExpensesConfig;
use crate::expenses::db_types::{ExpenseRecord, NewExpense};
use crate::expenses::processor_enums::AddExpenseInputArgs;
use crate::store::{DocumentStore, EXPENSES_COLLECTION};
use crate::utils::amount::parse_amount;
use crate::utils::app_config::render_date;

/// Turn submitted form fields into the record to store, dated `today`
pub fn build_expense(
    args: &AddExpenseInputArgs,
    today: NaiveDate,
    config: &ExpensesConfig,
) -> Result<NewExpense> {
    let amount = parse_amount(&args.amount, config.amount_parsing)?;
    let date = render_date(today, &config.date_format)?;

    Ok(NewExpense {
        category: args.category.clone(),
        amount,
        date,
    })
}

pub async fn add_expense(store: &dyn DocumentStore, expense: NewExpense) -> Result<ExpenseRecord> {
    let id = store
        .add_document(EXPENSES_COLLECTION, expense.to_fields())
        .await?;
    Ok(expense.into_record(id))
}

pub async fn list_expenses(store: &dyn DocumentStore) -> Result<Vec<ExpenseRecord>> {
    let docs = store.list_documents(EXPENSES_COLLECTION).await?;
    Ok(docs.into_iter().map(ExpenseRecord::from).collect())
}
