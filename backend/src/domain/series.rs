//! Chart series formatting for aggregated monthly expenses.

use rust_decimal::Decimal;

use crate::domain::aggregation::AggregatedSeries;

/// Parallel month/total sequences, ascending by month.
///
/// `month[i]` is the "YYYY-MM" key for `expenses[i]`. Only months that
/// received at least one contribution appear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub month: Vec<String>,
    pub expenses: Vec<Decimal>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.month.len()
    }

    pub fn is_empty(&self) -> bool {
        self.month.is_empty()
    }
}

/// Flatten an aggregated series into chart-ready sequences
pub fn format_series(series: &AggregatedSeries) -> ChartSeries {
    let (month, expenses) = series
        .totals()
        .map(|(key, total)| (key.to_string(), total))
        .unzip();

    ChartSeries { month, expenses }
}
