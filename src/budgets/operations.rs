use anyhow::Result;

use crate::budgets::db_types::BudgetRecord;
use crate::budgets::processor_enums::SetBudgetInputArgs;
use crate::store::{BUDGETS_COLLECTION, DocumentStore, validate_document_id};
use crate::utils::amount::{AmountParsing, parse_amount};

pub fn build_budget(args: &SetBudgetInputArgs, amount_parsing: AmountParsing) -> Result<BudgetRecord> {
    validate_document_id(&args.category)?;
    let amount = parse_amount(&args.amount, amount_parsing)?;

    Ok(BudgetRecord {
        category: args.category.clone(),
        amount,
    })
}

/// Create or overwrite the budget for its category
pub async fn set_budget(store: &dyn DocumentStore, budget: &BudgetRecord) -> Result<()> {
    store
        .set_document(BUDGETS_COLLECTION, &budget.category, budget.to_fields())
        .await
}

pub async fn get_budget(store: &dyn DocumentStore, category: &str) -> Result<Option<BudgetRecord>> {
    let doc = store.get_document(BUDGETS_COLLECTION, category).await?;
    Ok(doc.map(BudgetRecord::from))
}

pub async fn list_budgets(store: &dyn DocumentStore) -> Result<Vec<BudgetRecord>> {
    let docs = store.list_documents(BUDGETS_COLLECTION).await?;
    Ok(docs.into_iter().map(BudgetRecord::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn args(category: &str, amount: &str) -> SetBudgetInputArgs {
        SetBudgetInputArgs {
            category: category.to_string(),
            amount: amount.to_string(),
        }
    }

    #[test]
    fn test_build_budget_requires_usable_key() {
        assert!(build_budget(&args("", "200"), AmountParsing::Lenient).is_err());
        assert!(build_budget(&args("a/b", "200"), AmountParsing::Lenient).is_err());
        assert!(build_budget(&args("Food", "abc"), AmountParsing::Strict).is_err());

        let budget = build_budget(&args("Food", "200"), AmountParsing::Strict).unwrap();
        assert_eq!(budget.amount, 200.0);
    }

    #[tokio::test]
    async fn test_second_set_overwrites() -> Result<()> {
        let store = MemoryStore::new();
        set_budget(&store, &build_budget(&args("Food", "200"), AmountParsing::Lenient)?).await?;
        set_budget(&store, &build_budget(&args("Food", "150"), AmountParsing::Lenient)?).await?;

        let budgets = list_budgets(&store).await?;
        assert_eq!(budgets, vec![BudgetRecord { category: "Food".to_string(), amount: 150.0 }]);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_budget() -> Result<()> {
        let store = MemoryStore::new();
        assert!(get_budget(&store, "Travel").await?.is_none());
        Ok(())
    }
}
