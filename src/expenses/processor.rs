use chrono::Local;

use crate::expenses::config::ExpensesConfig;
use crate::expenses::operations::{add_expense, build_expense, list_expenses};
use crate::expenses::processor_enums::{ExpensesProcessorInput, ExpensesProcessorOutput};
use crate::utils::app_config::AppConfig;
use crate::utils::traits::ActionProcessor;

impl ActionProcessor<ExpensesConfig, ExpensesProcessorOutput> for ExpensesProcessorInput {
    async fn process(
        &self,
        app_config: &AppConfig,
        local_config: &ExpensesConfig,
    ) -> anyhow::Result<ExpensesProcessorOutput> {
        let store = app_config.store.as_ref();
        match self {
            ExpensesProcessorInput::AddExpense(args) => {
                let today = Local::now().date_naive();
                let expense = build_expense(args, today, local_config)?;
                let record = add_expense(store, expense).await?;

                tracing::info!("Expense added successfully: {} in {}", record.id, record.category);
                Ok(ExpensesProcessorOutput::AddExpense(record))
            }
            ExpensesProcessorInput::ListExpenses => {
                let records = list_expenses(store).await?;
                Ok(ExpensesProcessorOutput::ListExpenses(records))
            }
        }
    }
}
