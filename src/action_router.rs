use anyhow::Result;
use crate::budgets::processor_enums::{BudgetsProcessorInput, BudgetsProcessorOutput};
use crate::expenses::config::ExpensesConfig;
use crate::expenses::processor_enums::{ExpensesProcessorInput, ExpensesProcessorOutput};
use crate::utils::app_config::AppConfig;
use crate::utils::traits::ActionProcessor;

#[derive(Debug)]
pub enum ActionRouterInput {
    Expenses(ExpensesProcessorInput),
    Budgets(BudgetsProcessorInput),
}

#[derive(Debug)]
pub enum ActionRouterOutput {
    Expenses(ExpensesProcessorOutput),
    Budgets(BudgetsProcessorOutput),
}

impl ActionRouterInput {

    pub async fn process(&self, app_config: AppConfig) -> Result<ActionRouterOutput> {
        match self {
            ActionRouterInput::Expenses(processor) => {
                let config = ExpensesConfig::from(&app_config.settings);

                let res = processor.process(&app_config, &config).await?;
                Ok(ActionRouterOutput::Expenses(res))
            }
            ActionRouterInput::Budgets(processor) => {
                let amount_parsing = app_config.settings.ledger_amount_parsing;

                let res = processor.process(&app_config, &amount_parsing).await?;
                Ok(ActionRouterOutput::Budgets(res))
            }
        }
    }
}
