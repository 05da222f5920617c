use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

pub const CURRENCY_SYMBOL: &str = "S/";

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("?")
}

fn format_with_commas(digits: &str) -> String {
    let s = digits.chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in s.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

/// `S/ 1,234.50`, `-S/ 12.00`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let abs = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = abs.split_once('.').unwrap_or((abs.as_str(), "00"));
    format!("{}{} {}.{}", sign, CURRENCY_SYMBOL, format_with_commas(int_part), frac_part)
}

/// `12.3% of total`, or `0% of total` when nothing was spent.
pub fn format_share(share: Option<Decimal>) -> String {
    match share {
        Some(p) => format!("{:.1}% of total", p),
        None => "0% of total".to_string(),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(Decimal::from_str("1234.5").unwrap()), "S/ 1,234.50");
        assert_eq!(format_currency(Decimal::from(1_000_000)), "S/ 1,000,000.00");
        assert_eq!(format_currency(Decimal::ZERO), "S/ 0.00");
    }

    #[test]
    fn currency_negative_and_rounding() {
        assert_eq!(format_currency(Decimal::from(-12)), "-S/ 12.00");
        assert_eq!(format_currency(Decimal::from_str("0.005").unwrap()), "S/ 0.01");
    }

    #[test]
    fn share_text() {
        assert_eq!(format_share(None), "0% of total");
        assert_eq!(format_share(Some(Decimal::from_str("33.3").unwrap())), "33.3% of total");
    }

    #[test]
    fn month_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "?");
        assert_eq!(month_name(13), "?");
    }

    #[test]
    fn date_display() {
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()), "07/03/2024");
    }
}
