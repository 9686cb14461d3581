//! Derivation of the monthly installment for long-term expenses.
//!
//! The installment is computed once, when a long-term expense is recorded, and
//! stored on the record. Aggregation only ever reads the stored value.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::amortization::months_spanned;

/// Computes the per-month installment of a long-term expense.
///
/// Returns `None` when no meaningful installment exists for the inputs
/// (non-positive amount, inverted range, arithmetic overflow).
pub trait InstallmentStrategy: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    fn monthly_installment(
        &self,
        amount: Decimal,
        interest_rate: Option<Decimal>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Option<Decimal>;
}

/// Simple interest on the principal, spread evenly over the covered months.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleInterest;

impl InstallmentStrategy for SimpleInterest {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn monthly_installment(
        &self,
        amount: Decimal,
        interest_rate: Option<Decimal>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Option<Decimal> {
        if amount <= Decimal::ZERO {
            return None;
        }
        let months = Decimal::from(months_spanned(start_date, end_date)?);
        let rate = interest_rate.unwrap_or(Decimal::ZERO) / Decimal::ONE_HUNDRED;

        let total = amount.checked_mul(Decimal::ONE + rate)?;
        Some(total.checked_div(months)?.round_dp(2))
    }
}

/// Fixed payment of a fully amortized loan with monthly compounding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Annuity;

impl InstallmentStrategy for Annuity {
    fn name(&self) -> &'static str {
        "annuity"
    }

    fn monthly_installment(
        &self,
        amount: Decimal,
        interest_rate: Option<Decimal>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Option<Decimal> {
        if amount <= Decimal::ZERO {
            return None;
        }
        let months = months_spanned(start_date, end_date)?;
        let monthly_rate =
            interest_rate.unwrap_or(Decimal::ZERO) / Decimal::ONE_HUNDRED / Decimal::from(12);

        if monthly_rate.is_zero() {
            return Some(amount.checked_div(Decimal::from(months))?.round_dp(2));
        }

        // payment = P * r * (1 + r)^n / ((1 + r)^n - 1)
        let mut growth = Decimal::ONE;
        for _ in 0..months {
            growth = growth.checked_mul(Decimal::ONE + monthly_rate)?;
        }
        let payment = amount
            .checked_mul(monthly_rate)?
            .checked_mul(growth)?
            .checked_div(growth - Decimal::ONE)?;
        Some(payment.round_dp(2))
    }
}
