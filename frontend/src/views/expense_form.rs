use chrono::NaiveDate;

use crate::api::{ApiClient, Transport};
use crate::error::AppError;
use crate::model::{CategoryRef, ExpenseRecord, NewExpense};
use crate::validate;

/// Raw field values of the new-expense form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub amount: String,
    pub description: String,
    pub category_id: Option<i64>,
    pub date: String,
}

impl ExpenseDraft {
    /// Empty form dated `today`.
    pub fn dated(today: NaiveDate) -> Self {
        Self {
            amount: String::new(),
            description: String::new(),
            category_id: None,
            date: today.format("%Y-%m-%d").to_string(),
        }
    }

    /// Checks the amount first, then the category, then the date.
    pub fn validate(&self) -> Result<NewExpense, AppError> {
        let amount = validate::positive_amount(&self.amount)?;
        let category = validate::category(self.category_id)?;
        let date = validate::date(&self.date)?;
        Ok(NewExpense {
            amount,
            description: self.description.trim().to_string(),
            date,
            category: CategoryRef { id: category },
        })
    }
}

/// Parses the value of the category `<select>`; the placeholder option is `0`.
pub fn parse_category_choice(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok().filter(|id| *id != 0)
}

pub async fn submit<T: Transport>(api: &ApiClient<T>, draft: &ExpenseDraft) -> Result<ExpenseRecord, AppError> {
    let expense = draft.validate()?;
    let created = api.create_expense(&expense).await?;
    log::info!("created expense {} in category {}", created.id, created.category_id);
    Ok(created)
}
