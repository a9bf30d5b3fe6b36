use crate::budgets::operations::{build_budget, get_budget, list_budgets, set_budget};
use crate::budgets::processor_enums::{BudgetsProcessorInput, BudgetsProcessorOutput};
use crate::utils::amount::AmountParsing;
use crate::utils::app_config::AppConfig;
use crate::utils::traits::ActionProcessor;

impl ActionProcessor<AmountParsing, BudgetsProcessorOutput> for BudgetsProcessorInput {
    async fn process(
        &self,
        app_config: &AppConfig,
        local_config: &AmountParsing,
    ) -> anyhow::Result<BudgetsProcessorOutput> {
        let store = app_config.store.as_ref();
        match self {
            BudgetsProcessorInput::SetBudget(args) => {
                let budget = build_budget(args, *local_config)?;
                set_budget(store, &budget).await?;

                tracing::info!("Budget set successfully for {}", budget.category);
                Ok(BudgetsProcessorOutput::SetBudget(budget))
            }
            BudgetsProcessorInput::GetBudget(category) => {
                let budget = get_budget(store, category).await?;
                Ok(BudgetsProcessorOutput::GetBudget(budget))
            }
            BudgetsProcessorInput::ListBudgets => {
                let budgets = list_budgets(store).await?;
                Ok(BudgetsProcessorOutput::ListBudgets(budgets))
            }
        }
    }
}
