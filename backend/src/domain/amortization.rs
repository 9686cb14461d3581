//! Amortization expansion of a single expense into monthly contributions.
//!
//! A one-time expense contributes its full amount to the month of its date.
//! A long-term expense contributes its derived monthly installment to every
//! calendar month from its start month through its end month, inclusive.
//!
//! Long-term records without an end date or without a positive installment
//! expand to nothing. An end date before the start date is an error.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::iter::FusedIterator;

use crate::domain::models::{ExpenseRecord, MonthKey};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpandError {
    #[error("Expense '{name}' ({expense_id}) ends on {end_date}, before it starts on {start_date}")]
    InvalidRange {
        expense_id: String,
        name: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    #[error("Spending total for {month} is too large to represent")]
    Overflow { month: MonthKey },
}

/// Lazy sequence of `(MonthKey, amount)` contributions made by one expense.
///
/// The number of items is fixed when the expansion is built, so iteration
/// always terminates regardless of the date span.
#[derive(Debug, Clone)]
pub struct Expansion {
    cursor: MonthKey,
    remaining: u64,
    amount: Decimal,
}

impl Expansion {
    fn months(first: MonthKey, count: u64, amount: Decimal) -> Self {
        Self {
            cursor: first,
            remaining: count,
            amount,
        }
    }

    fn empty(anchor: MonthKey) -> Self {
        Self::months(anchor, 0, Decimal::ZERO)
    }
}

impl Iterator for Expansion {
    type Item = (MonthKey, Decimal);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let month = self.cursor;
        self.cursor = month.next();
        Some((month, self.amount))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Expansion {}

impl FusedIterator for Expansion {}

/// Number of calendar months touched by the inclusive range `start..=end`.
///
/// Returns `None` when `end` falls in an earlier month than `start`.
pub fn months_spanned(start: NaiveDate, end: NaiveDate) -> Option<u64> {
    let span = MonthKey::of(start).months_until(&MonthKey::of(end));
    u64::try_from(span).ok().map(|months| months + 1)
}

/// Expand one expense record into its monthly contributions
pub fn expand(record: &ExpenseRecord) -> Result<Expansion, ExpandError> {
    let start_month = MonthKey::of(record.start_date);

    if !record.is_long_term {
        return Ok(Expansion::months(start_month, 1, record.amount));
    }

    let Some(end_date) = record.end_date else {
        return Ok(Expansion::empty(start_month));
    };

    if end_date < record.start_date {
        return Err(ExpandError::InvalidRange {
            expense_id: record.id.clone(),
            name: record.name.clone(),
            start_date: record.start_date,
            end_date,
        });
    }

    let Some(installment) = record.positive_installment() else {
        return Ok(Expansion::empty(start_month));
    };

    // end_date >= start_date was checked above, so the span is never negative
    let count = months_spanned(record.start_date, end_date).unwrap_or(0);
    Ok(Expansion::months(start_month, count, installment))
}
