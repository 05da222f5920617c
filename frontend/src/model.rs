//! Wire and domain types for the expenses backend.
//!
//! Response types are decoded strictly: a body that does not carry the fields
//! a view needs fails at the API boundary instead of rendering as blanks.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Reference to a category inside a request or response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct CategoryRef {
    pub id: i64,
}

/// A single expense line item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "RawExpense")]
pub struct ExpenseRecord {
    pub id: i64,
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
    #[serde(rename = "categoryId")]
    pub category_id: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExpense {
    id: i64,
    amount: Decimal,
    #[serde(default)]
    description: Option<String>,
    date: String,
    #[serde(default)]
    category_id: Option<i64>,
    #[serde(default)]
    category: Option<CategoryRef>,
}

impl TryFrom<RawExpense> for ExpenseRecord {
    type Error = String;

    fn try_from(raw: RawExpense) -> Result<Self, Self::Error> {
        let category_id = raw
            .category_id
            .or(raw.category.map(|c| c.id))
            .ok_or_else(|| format!("expense {} has no category", raw.id))?;
        if raw.amount.is_sign_negative() && !raw.amount.is_zero() {
            return Err(format!("expense {} has a negative amount", raw.id));
        }
        let date = parse_wire_date(&raw.date)
            .ok_or_else(|| format!("expense {} has an invalid date {:?}", raw.id, raw.date))?;
        Ok(Self {
            id: raw.id,
            amount: raw.amount,
            description: raw.description.unwrap_or_default(),
            date,
            category_id,
        })
    }
}

/// Body of `POST /expenses`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExpense {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
    pub category: CategoryRef,
}

/// One raw, period-tagged entry of `GET /expenses_summary`.
///
/// The amount is kept as the JSON value the server sent; aggregation decides
/// how to read it.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryEntry {
    pub category_id: i64,
    pub category_name: String,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub amount: Value,
}

impl SummaryEntry {
    /// Decodes one entry. Accepts flat `categoryId`/`categoryName` fields or a
    /// nested `category` object, and derives the period from `date` when
    /// `year`/`month` are absent.
    pub fn from_json(value: &Value) -> Result<Self, String> {
        let obj = value
            .as_object()
            .ok_or_else(|| format!("summary entry is not an object: {value}"))?;
        let nested = obj.get("category").and_then(Value::as_object);

        let category_id = obj
            .get("categoryId")
            .and_then(Value::as_i64)
            .or_else(|| nested.and_then(|c| c.get("id")).and_then(Value::as_i64))
            .ok_or_else(|| "summary entry has no category id".to_string())?;
        let category_name = obj
            .get("categoryName")
            .and_then(Value::as_str)
            .or_else(|| nested.and_then(|c| c.get("name")).and_then(Value::as_str))
            .unwrap_or_default()
            .to_string();

        let date = obj.get("date").and_then(Value::as_str).and_then(parse_wire_date);
        let year = obj
            .get("year")
            .and_then(Value::as_i64)
            .and_then(|y| i32::try_from(y).ok())
            .or(date.map(|d| d.year()));
        let month = obj
            .get("month")
            .and_then(Value::as_u64)
            .and_then(|m| u32::try_from(m).ok())
            .or(date.map(|d| d.month()));

        Ok(Self {
            category_id,
            category_name,
            year,
            month,
            amount: obj.get("amount").cloned().unwrap_or(Value::Null),
        })
    }
}

/// Per-category total for one period. Computed on the client, never sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category_id: i64,
    pub category_name: String,
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Goal {
    pub id: i64,
    pub amount: Decimal,
    pub month: u32,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `POST /goals`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGoal {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub month: u32,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `PATCH /goals/{id}`. Unset fields are left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GoalPatch {
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD` and ISO date-times (date part only).
pub fn parse_wire_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let head = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(head, "%Y/%m/%d"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn expense_accepts_flat_category_id() {
        let rec: ExpenseRecord = serde_json::from_value(json!({
            "id": 7, "amount": 12.5, "description": "Lunch",
            "date": "2024-03-02", "categoryId": 3
        }))
        .unwrap();
        assert_eq!(rec.category_id, 3);
        assert_eq!(rec.amount, Decimal::from_str("12.5").unwrap());
        assert_eq!(rec.date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    }

    #[test]
    fn expense_accepts_nested_category_and_datetime() {
        let rec: ExpenseRecord = serde_json::from_value(json!({
            "id": 8, "amount": "3.10", "description": "Bus",
            "date": "2024-03-02T10:15:00", "category": { "id": 4, "name": "Transport" }
        }))
        .unwrap();
        assert_eq!(rec.category_id, 4);
        assert_eq!(rec.date.day(), 2);
    }

    #[test]
    fn expense_without_category_is_rejected() {
        let err = serde_json::from_value::<ExpenseRecord>(json!({
            "id": 9, "amount": 1, "description": "x", "date": "2024-01-01"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("no category"));
    }

    #[test]
    fn expense_with_negative_amount_is_rejected() {
        let res = serde_json::from_value::<ExpenseRecord>(json!({
            "id": 1, "amount": -4, "description": "x", "date": "2024-01-01", "categoryId": 1
        }));
        assert!(res.is_err());
    }

    #[test]
    fn new_expense_serializes_wire_shape() {
        let body = NewExpense {
            amount: Decimal::from_str("0.01").unwrap(),
            description: "Coffee".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            category: CategoryRef { id: 2 },
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(
            v,
            json!({ "amount": 0.01, "description": "Coffee", "date": "2024-01-05", "category": { "id": 2 } })
        );
    }

    #[test]
    fn goal_patch_omits_unset_fields() {
        let patch = GoalPatch {
            amount: Some(Decimal::from(300)),
            ..GoalPatch::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "amount": 300.0 }));
    }

    #[test]
    fn summary_entry_reads_nested_category_and_date() {
        let entry = SummaryEntry::from_json(&json!({
            "category": { "id": 5, "name": "Food" },
            "date": "2023-11-20",
            "amount": 10
        }))
        .unwrap();
        assert_eq!(entry.category_id, 5);
        assert_eq!(entry.category_name, "Food");
        assert_eq!(entry.year, Some(2023));
        assert_eq!(entry.month, Some(11));
    }

    #[test]
    fn summary_entry_prefers_explicit_period() {
        let entry = SummaryEntry::from_json(&json!({
            "categoryId": 1, "categoryName": "Rent", "year": 2024, "month": 2,
            "date": "2023-11-20", "amount": "700"
        }))
        .unwrap();
        assert_eq!((entry.year, entry.month), (Some(2024), Some(2)));
        assert_eq!(entry.amount, json!("700"));
    }

    #[test]
    fn summary_entry_without_category_is_rejected() {
        assert!(SummaryEntry::from_json(&json!({ "amount": 3 })).is_err());
        assert!(SummaryEntry::from_json(&json!([1, 2])).is_err());
    }
}
