//! Monthly aggregation of expense contributions.
//!
//! Every record is expanded into its monthly contributions and folded into a
//! single month-ordered map. The same fold backs both views a caller needs:
//! the per-month detail listing and the flat month/total series for charts.
//! A fresh map is built on every call; nothing is retained between calls.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::domain::amortization::{expand, ExpandError};
use crate::domain::models::{ExpenseRecord, MonthKey};

/// One expense's share of a month's spending
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyContribution {
    pub expense_id: String,
    pub name: String,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Running total and contributing expenses for one month
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthBucket {
    pub total: Decimal,
    /// In the order the records were processed
    pub contributions: Vec<MonthlyContribution>,
}

/// Result of aggregating a set of expense records, ascending by month
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedSeries {
    months: BTreeMap<MonthKey, MonthBucket>,
    grand_total: Decimal,
}

impl AggregatedSeries {
    /// Number of distinct months with at least one contribution
    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn month(&self, key: &MonthKey) -> Option<&MonthBucket> {
        self.months.get(key)
    }

    /// Grouped view: each month with its contributing expenses
    pub fn groups(&self) -> impl Iterator<Item = (MonthKey, &MonthBucket)> + '_ {
        self.months.iter().map(|(key, bucket)| (*key, bucket))
    }

    /// Flat view: each month with its total
    pub fn totals(&self) -> impl Iterator<Item = (MonthKey, Decimal)> + '_ {
        self.months.iter().map(|(key, bucket)| (*key, bucket.total))
    }

    /// Sum over every month
    pub fn grand_total(&self) -> Decimal {
        self.grand_total
    }

    fn add(
        &mut self,
        month: MonthKey,
        record: &ExpenseRecord,
        amount: Decimal,
    ) -> Result<(), ExpandError> {
        let overflow = || ExpandError::Overflow { month };
        let grand_total = self.grand_total.checked_add(amount).ok_or_else(overflow)?;
        let bucket = self.months.entry(month).or_default();
        bucket.total = bucket.total.checked_add(amount).ok_or_else(overflow)?;
        self.grand_total = grand_total;

        bucket.contributions.push(MonthlyContribution {
            expense_id: record.id.clone(),
            name: record.name.clone(),
            amount,
            start_date: record.start_date,
            end_date: record.end_date.filter(|_| record.is_long_term),
        });
        Ok(())
    }
}

/// Fold all records' monthly contributions into one series.
///
/// Fails on the first record whose date range is inverted, or when a monthly
/// total or the grand total exceeds the `Decimal` range.
pub fn aggregate<'a, I>(records: I) -> Result<AggregatedSeries, ExpandError>
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut series = AggregatedSeries::default();
    let mut record_count = 0usize;

    for record in records {
        record_count += 1;
        let expansion = expand(record)?;

        if record.is_long_term && expansion.len() == 0 {
            warn!(
                "Long-term expense {} ('{}') has no end date or positive installment; skipping",
                record.id, record.name
            );
            continue;
        }

        for (month, amount) in expansion {
            series.add(month, record, amount)?;
        }
    }

    debug!("Aggregated {} expenses into {} months", record_count, series.len());
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32) -> MonthKey {
        MonthKey::new(y, m).unwrap()
    }

    fn one_time(id: &str, name: &str, amount: Decimal, day: NaiveDate) -> ExpenseRecord {
        ExpenseRecord::one_time(id, "account::1::a", name, amount, day)
    }

    fn loan(id: &str, start: NaiveDate, end: NaiveDate, monthly: Decimal) -> ExpenseRecord {
        ExpenseRecord {
            id: id.to_string(),
            account_id: "account::1::a".to_string(),
            name: "Loan".to_string(),
            amount: dec!(1000),
            is_long_term: true,
            interest_rate: Some(dec!(4)),
            start_date: start,
            end_date: Some(end),
            monthly_expense: Some(monthly),
        }
    }

    #[test]
    fn test_same_month_amounts_are_summed() {
        let records = vec![
            one_time("e1", "Rent", dec!(100), date(2025, 1, 3)),
            one_time("e2", "Food", dec!(50), date(2025, 1, 20)),
        ];

        let series = aggregate(&records).unwrap();
        let january = series.month(&month(2025, 1)).unwrap();

        assert_eq!(series.len(), 1);
        assert_eq!(january.total, dec!(150));
        assert_eq!(january.contributions.len(), 2);
    }

    #[test]
    fn test_detail_keeps_processing_order() {
        let records = vec![
            one_time("e1", "Zebra food", dec!(1), date(2025, 1, 28)),
            one_time("e2", "Apples", dec!(2), date(2025, 1, 2)),
            one_time("e3", "Milk", dec!(3), date(2025, 1, 15)),
        ];

        let series = aggregate(&records).unwrap();
        let names: Vec<&str> = series
            .month(&month(2025, 1))
            .unwrap()
            .contributions
            .iter()
            .map(|c| c.name.as_str())
            .collect();

        assert_eq!(names, vec!["Zebra food", "Apples", "Milk"]);
    }

    #[test]
    fn test_months_are_chronological() {
        let records = vec![
            one_time("e1", "Later", dec!(10), date(2025, 6, 1)),
            loan("e2", date(2024, 11, 5), date(2025, 1, 5), dec!(20)),
            one_time("e3", "Earlier", dec!(10), date(2023, 2, 1)),
        ];

        let series = aggregate(&records).unwrap();
        let months: Vec<MonthKey> = series.totals().map(|(m, _)| m).collect();

        assert_eq!(
            months,
            vec![month(2023, 2), month(2024, 11), month(2024, 12), month(2025, 1), month(2025, 6)]
        );
    }

    #[test]
    fn test_long_term_and_one_time_combine() {
        let records = vec![
            loan("e1", date(2025, 1, 1), date(2025, 3, 1), dec!(50)),
            one_time("e2", "Phone", dec!(300), date(2025, 2, 14)),
        ];

        let series = aggregate(&records).unwrap();
        let totals: Vec<(MonthKey, Decimal)> = series.totals().collect();

        assert_eq!(
            totals,
            vec![
                (month(2025, 1), dec!(50)),
                (month(2025, 2), dec!(350)),
                (month(2025, 3), dec!(50)),
            ]
        );
        assert_eq!(series.grand_total(), dec!(450));

        let february = series.month(&month(2025, 2)).unwrap();
        assert_eq!(february.contributions[0].end_date, Some(date(2025, 3, 1)));
        assert_eq!(february.contributions[0].amount, dec!(50));
        assert_eq!(february.contributions[1].end_date, None);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let records = vec![
            loan("e1", date(2025, 1, 1), date(2025, 6, 1), dec!(12.34)),
            one_time("e2", "Gift", dec!(40), date(2025, 3, 9)),
            one_time("e3", "Books", dec!(0.1), date(2025, 3, 10)),
        ];

        let first = aggregate(&records).unwrap();
        let second = aggregate(&records).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_decimal_sums_do_not_drift() {
        let records: Vec<ExpenseRecord> = (0..10)
            .map(|i| one_time(&format!("e{}", i), "Dime", dec!(0.1), date(2025, 1, 1)))
            .collect();

        let series = aggregate(&records).unwrap();
        assert_eq!(series.month(&month(2025, 1)).unwrap().total, dec!(1.0));
    }

    #[test]
    fn test_gaps_are_not_filled() {
        let records = vec![
            one_time("e1", "January", dec!(10), date(2025, 1, 10)),
            one_time("e2", "March", dec!(20), date(2025, 3, 10)),
        ];

        let series = aggregate(&records).unwrap();
        assert_eq!(series.len(), 2);
        assert!(series.month(&month(2025, 2)).is_none());
    }

    #[test]
    fn test_skipped_long_term_contributes_nothing() {
        let mut no_installment = loan("e1", date(2025, 1, 1), date(2025, 3, 1), dec!(50));
        no_installment.monthly_expense = None;
        let records = vec![no_installment, one_time("e2", "Tea", dec!(3), date(2025, 1, 1))];

        let series = aggregate(&records).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.grand_total(), dec!(3));
    }

    #[test]
    fn test_invalid_range_fails_aggregation() {
        let records = vec![
            one_time("e1", "Fine", dec!(10), date(2025, 1, 10)),
            loan("e2", date(2025, 5, 1), date(2025, 1, 1), dec!(50)),
        ];

        let err = aggregate(&records).unwrap_err();
        assert!(matches!(
            err,
            ExpandError::InvalidRange { ref expense_id, .. } if expense_id == "e2"
        ));
    }

    #[test]
    fn test_total_overflow_is_an_error() {
        let huge = Decimal::MAX / dec!(2) + dec!(1);
        let records = vec![
            one_time("e1", "Huge", huge, date(2025, 1, 1)),
            one_time("e2", "Huge again", huge, date(2025, 1, 1)),
        ];

        let err = aggregate(&records).unwrap_err();
        assert_eq!(err, ExpandError::Overflow { month: month(2025, 1) });
    }

    #[test]
    fn test_grand_total_overflow_across_months_is_an_error() {
        let huge = Decimal::MAX / dec!(2) + dec!(1);
        let records = vec![
            one_time("e1", "January", huge, date(2025, 1, 1)),
            one_time("e2", "February", huge, date(2025, 2, 1)),
        ];

        let err = aggregate(&records).unwrap_err();
        assert_eq!(err, ExpandError::Overflow { month: month(2025, 2) });
    }

    #[test]
    fn test_empty_input() {
        let series = aggregate(std::iter::empty()).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.grand_total(), Decimal::ZERO);
    }
}
