use crate::cli_utils::CliResult;
use dialoguer::Select;

pub struct Menu {
    title: String,
    items: Vec<String>,
}

impl Menu {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            items: Vec::new(),
        }
    }

    pub fn items(mut self, items: &[&str]) -> Self {
        self.items.extend(items.iter().map(|s| s.to_string()));
        self
    }

    /// Show the menu and return the selected index
    pub fn interact(&self) -> CliResult<usize> {
        let idx = Select::new()
            .with_prompt(&self.title)
            .items(self.items.as_slice())
            .default(0)
            .interact()?;
        Ok(idx)
    }
}

/// Top level actions of the ledger CLI, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOperation {
    AddExpense,
    ListExpenses,
    SetBudget,
    ListBudgets,
    Exit,
}

impl LedgerOperation {
    pub const ALL: [LedgerOperation; 5] = [
        LedgerOperation::AddExpense,
        LedgerOperation::ListExpenses,
        LedgerOperation::SetBudget,
        LedgerOperation::ListBudgets,
        LedgerOperation::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LedgerOperation::AddExpense => "Add expense",
            LedgerOperation::ListExpenses => "List expenses",
            LedgerOperation::SetBudget => "Set budget",
            LedgerOperation::ListBudgets => "List budgets",
            LedgerOperation::Exit => "Exit",
        }
    }

    pub fn select() -> CliResult<Self> {
        let labels: Vec<&str> = Self::ALL.iter().map(|op| op.label()).collect();
        let idx = Menu::new("Select operation").items(&labels).interact()?;

        Ok(Self::ALL.get(idx).copied().unwrap_or(LedgerOperation::Exit))
    }
}
