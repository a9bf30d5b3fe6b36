use anyhow::{Result, anyhow};
use colored::Colorize;
use std::io::Write;

use expense_ledger::action_router::{ActionRouterInput, ActionRouterOutput};
use expense_ledger::budgets::processor_enums::{
    BudgetsProcessorInput, BudgetsProcessorOutput, SetBudgetInputArgs,
};
use expense_ledger::cli_helper::{call_action_router, initialize_app_config};
use expense_ledger::cli_utils::{
    Input, LedgerOperation, format_table, print_error, print_header, print_info, print_success,
};
use expense_ledger::expenses::processor_enums::{
    AddExpenseInputArgs, ExpensesProcessorInput, ExpensesProcessorOutput,
};
use expense_ledger::utils::amount::format_amount;
use expense_ledger::utils::app_config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "warn".to_string())
                .as_str(),
        )
        .with_writer(std::io::stderr)
        .init();

    eprintln!("{}", "╔═══════════════════════════════════════════════════════╗".bright_cyan());
    eprintln!("{}", "║              Expense Ledger CLI                       ║".bright_cyan());
    eprintln!("{}", "╚═══════════════════════════════════════════════════════╝".bright_cyan());
    eprintln!();

    eprint!("Initializing app config... ");
    std::io::stderr().flush().ok();

    let app_config = match initialize_app_config() {
        Ok(config) => {
            eprintln!("{} ({})", "✓ Ready".green(), config.store.backend_name());
            config
        }
        Err(e) => {
            eprintln!("{}", "✗ Failed".red());
            eprintln!("Error: {}", e);
            return Err(e);
        }
    };

    eprintln!();

    loop {
        let op = match LedgerOperation::select() {
            Ok(op) => op,
            Err(e) => {
                print_error(&e.to_string());
                break;
            }
        };

        let outcome = match op {
            LedgerOperation::AddExpense => add_expense(&app_config).await,
            LedgerOperation::ListExpenses => list_expenses(&app_config).await,
            LedgerOperation::SetBudget => set_budget(&app_config).await,
            LedgerOperation::ListBudgets => list_budgets(&app_config).await,
            LedgerOperation::Exit => {
                eprintln!("{}", "Goodbye!".bright_cyan());
                break;
            }
        };

        // A failed operation returns to the menu
        if let Err(e) = outcome {
            print_error(&e.to_string());
        }

        eprintln!();
    }

    Ok(())
}

async fn add_expense(app_config: &AppConfig) -> Result<()> {
    print_header("Add Expense");

    let category = Input::get_string("Category")?;
    let amount = Input::get_amount("Amount")?;

    let input = ActionRouterInput::Expenses(ExpensesProcessorInput::AddExpense(AddExpenseInputArgs {
        category,
        amount,
    }));

    match call_action_router(input, app_config.clone()).await? {
        ActionRouterOutput::Expenses(ExpensesProcessorOutput::AddExpense(record)) => {
            print_success(&format!(
                "Recorded {} for {} on {}",
                format_amount(record.amount),
                record.category,
                record.date
            ));
            Ok(())
        }
        _ => Err(anyhow!("Unexpected output type")),
    }
}

async fn list_expenses(app_config: &AppConfig) -> Result<()> {
    print_header("Expenses");

    let input = ActionRouterInput::Expenses(ExpensesProcessorInput::ListExpenses);

    match call_action_router(input, app_config.clone()).await? {
        ActionRouterOutput::Expenses(ExpensesProcessorOutput::ListExpenses(records)) => {
            if records.is_empty() {
                print_info("No expenses recorded yet");
                return Ok(());
            }

            let rows: Vec<Vec<String>> = records
                .iter()
                .map(|r| vec![r.category.clone(), format_amount(r.amount), r.date.clone()])
                .collect();
            format_table(&["Category", "Amount", "Date"], &rows);
            Ok(())
        }
        _ => Err(anyhow!("Unexpected output type")),
    }
}

async fn set_budget(app_config: &AppConfig) -> Result<()> {
    print_header("Set Budget");

    let category = Input::get_budget_category("Category")?;
    let amount = Input::get_amount("Budget amount")?;

    let input = ActionRouterInput::Budgets(BudgetsProcessorInput::SetBudget(SetBudgetInputArgs {
        category,
        amount,
    }));

    match call_action_router(input, app_config.clone()).await? {
        ActionRouterOutput::Budgets(BudgetsProcessorOutput::SetBudget(budget)) => {
            print_success(&format!(
                "Budget for {} set to {}",
                budget.category,
                format_amount(budget.amount)
            ));
            Ok(())
        }
        _ => Err(anyhow!("Unexpected output type")),
    }
}

async fn list_budgets(app_config: &AppConfig) -> Result<()> {
    print_header("Budgets");

    let input = ActionRouterInput::Budgets(BudgetsProcessorInput::ListBudgets);

    match call_action_router(input, app_config.clone()).await? {
        ActionRouterOutput::Budgets(BudgetsProcessorOutput::ListBudgets(budgets)) => {
            if budgets.is_empty() {
                print_info("No budgets set");
                return Ok(());
            }

            let rows: Vec<Vec<String>> = budgets
                .iter()
                .map(|b| vec![b.category.clone(), format_amount(b.amount)])
                .collect();
            format_table(&["Category", "Budget"], &rows);
            Ok(())
        }
        _ => Err(anyhow!("Unexpected output type")),
    }
}
