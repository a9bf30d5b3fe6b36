use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use clap::{Args, Parser, ValueEnum};
use dotenvy::dotenv;
use std::fmt::Write;
use std::sync::Arc;

use crate::store::DocumentStore;
use crate::store::firestore::{FirestoreConfig, FirestoreStore};
use crate::store::memory::MemoryStore;
use crate::utils::amount::AmountParsing;

pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Firestore,
    Memory,
}

/// How submissions are turned into records
#[derive(Args, Debug, Clone)]
pub struct LedgerSettings {
    /// chrono format used to stamp expense dates
    #[clap(long, env, default_value = DEFAULT_DATE_FORMAT)]
    pub ledger_date_format: String,
    #[clap(long, env, value_enum, default_value_t = AmountParsing::Lenient)]
    pub ledger_amount_parsing: AmountParsing,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            ledger_date_format: DEFAULT_DATE_FORMAT.to_string(),
            ledger_amount_parsing: AmountParsing::Lenient,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct AppSettings {
    #[clap(long, env, value_enum, default_value_t = StoreBackend::Firestore)]
    pub ledger_store: StoreBackend,
    #[clap(flatten)]
    pub firestore: FirestoreConfig,
    #[clap(flatten)]
    pub ledger: LedgerSettings,
}

#[derive(Parser, Debug)]
struct EnvSettings {
    #[clap(flatten)]
    settings: AppSettings,
}

#[derive(Clone)]
pub struct AppConfig {
    pub store: Arc<dyn DocumentStore>,
    pub settings: LedgerSettings,
}

impl AppConfig {
    pub fn new(store: Arc<dyn DocumentStore>, settings: LedgerSettings) -> Self {
        Self { store, settings }
    }

    /// Config backed by a fresh in-process store
    pub fn in_memory(settings: LedgerSettings) -> Self {
        Self::new(Arc::new(MemoryStore::new()), settings)
    }

    pub fn from_settings(settings: &AppSettings) -> Result<Self> {
        validate_date_format(&settings.ledger.ledger_date_format)?;

        let store: Arc<dyn DocumentStore> = match settings.ledger_store {
            StoreBackend::Firestore => Arc::new(FirestoreStore::new(&settings.firestore)?),
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store, records are lost on exit");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self::new(store, settings.ledger.clone()))
    }

    /// Build from `.env` and environment variables only
    pub fn from_env() -> Result<Self> {
        let _ = dotenv();

        let parsed = EnvSettings::try_parse_from([env!("CARGO_PKG_NAME")])?;
        Self::from_settings(&parsed.settings)
    }
}

/// Format a calendar date, failing on specifiers a date alone cannot fill
/// (`%H`, `%z`...)
pub fn render_date(date: NaiveDate, format: &str) -> Result<String> {
    let mut rendered = String::new();
    write!(rendered, "{}", date.format(format))
        .map_err(|_| anyhow!("date format {:?} cannot render a calendar date", format))?;
    Ok(rendered)
}

/// Rejects chrono formats that would fail while rendering a date
pub fn validate_date_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(anyhow!("invalid date format: {}", format));
    }
    let sample = NaiveDate::from_ymd_opt(2000, 1, 1)
        .ok_or_else(|| anyhow!("sample date out of range"))?;
    render_date(sample, format)?;
    Ok(())
}
