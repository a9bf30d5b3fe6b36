use crate::utils::amount::AmountParsing;
use crate::utils::app_config::LedgerSettings;

#[derive(Clone, Debug)]
pub struct ExpensesConfig {
    pub date_format: String,
    pub amount_parsing: AmountParsing,
}

impl From<&LedgerSettings> for ExpensesConfig {
    fn from(settings: &LedgerSettings) -> Self {
        Self {
            date_format: settings.ledger_date_format.clone(),
            amount_parsing: settings.ledger_amount_parsing,
        }
    }
}
