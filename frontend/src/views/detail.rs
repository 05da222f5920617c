use rust_decimal::Decimal;

use crate::api::{ApiClient, Transport};
use crate::error::RequestError;
use crate::model::ExpenseRecord;
use crate::views::summary::Period;

pub async fn load<T: Transport>(
    api: &ApiClient<T>,
    period: Period,
    category_id: i64,
) -> Result<Vec<ExpenseRecord>, RequestError> {
    api.fetch_details(period.year, period.month, category_id).await
}

/// Change to the detail list, applied to whatever the list holds when the
/// response arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseListAction {
    Loaded(Vec<ExpenseRecord>),
    Removed(i64),
}

/// Line items currently shown by the detail screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseList {
    pub records: Vec<ExpenseRecord>,
}

impl ExpenseList {
    pub fn apply(&self, action: ExpenseListAction) -> Self {
        let records = match action {
            ExpenseListAction::Loaded(records) => records,
            ExpenseListAction::Removed(id) => without(&self.records, id),
        };
        Self { records }
    }
}

/// Deletes on the server first; the removal is only handed back once that
/// succeeded.
pub async fn delete<T: Transport>(api: &ApiClient<T>, id: i64) -> Result<ExpenseListAction, RequestError> {
    api.delete_expense(id).await?;
    Ok(ExpenseListAction::Removed(id))
}

/// Drops the first entry with `id`; every other entry is kept.
pub fn without(records: &[ExpenseRecord], id: i64) -> Vec<ExpenseRecord> {
    let mut out = records.to_vec();
    if let Some(pos) = out.iter().position(|r| r.id == id) {
        out.remove(pos);
    }
    out
}

/// Saturates at `Decimal::MAX` instead of overflowing.
pub fn total(records: &[ExpenseRecord]) -> Decimal {
    records
        .iter()
        .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.amount))
}
