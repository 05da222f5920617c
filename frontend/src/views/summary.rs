use chrono::{Datelike, NaiveDate};

use crate::api::{ApiClient, Transport};
use crate::error::RequestError;
use crate::model::CategorySummary;
use crate::summary::aggregate;

/// First year offered by the period selector.
pub const FIRST_YEAR: i32 = 2023;

/// The period a summary is shown for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Self::containing(chrono::Local::now().date_naive())
    }
}

/// Years offered in the selector, oldest first.
pub fn year_options(today: NaiveDate) -> Vec<i32> {
    (FIRST_YEAR..=today.year().max(FIRST_YEAR)).collect()
}

/// One load of the summary screen: a single request, aggregated locally.
pub async fn load<T: Transport>(api: &ApiClient<T>, period: Period) -> Result<Vec<CategorySummary>, RequestError> {
    let entries = api.fetch_summary(Some(period.year), Some(period.month)).await?;
    Ok(aggregate(&entries, Some(period.year), Some(period.month)))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;
    use crate::api::testing::{client, FakeTransport};

    #[tokio::test]
    async fn load_issues_one_request_and_aggregates() {
        let fake = FakeTransport::default();
        fake.push_json(
            200,
            json!([
                { "categoryId": 2, "categoryName": "Food", "year": 2024, "month": 1, "amount": 10 },
                { "categoryId": 2, "categoryName": "Food", "year": 2024, "month": 2, "amount": 5 },
                { "categoryId": 7, "categoryName": "Rent", "year": 2024, "month": 1, "amount": "400.5" },
                { "categoryId": 2, "categoryName": "Food", "year": 2024, "month": 1, "amount": 2.25 }
            ]),
        );

        let rows = load(&client(&fake), Period { year: 2024, month: 1 }).await.unwrap();
        assert_eq!(fake.sent_count(), 1);
        assert_eq!(fake.last().url, "http://api.test/expenses_summary?year=2024&month=1");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category_name, "Food");
        assert_eq!(rows[0].total_amount, Decimal::new(1225, 2));
        assert_eq!(rows[1].total_amount, Decimal::new(4005, 1));
    }

    #[tokio::test]
    async fn load_surfaces_request_errors() {
        let fake = FakeTransport::default();
        fake.push_text(401, "");
        let err = load(&client(&fake), Period { year: 2024, month: 1 }).await.unwrap_err();
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn period_and_year_options() {
        let d = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        assert_eq!(Period::containing(d), Period { year: 2025, month: 6 });
        assert_eq!(year_options(d), vec![2023, 2024, 2025]);
        assert_eq!(year_options(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()), vec![2023]);
    }
}
