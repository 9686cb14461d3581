//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod expenses {
    use rust_decimal::Decimal;

    use crate::domain::aggregation::AggregatedSeries;
    use crate::domain::series::ChartSeries;

    /// Input for recording a new expense.
    #[derive(Debug, Clone)]
    pub struct CreateExpenseCommand {
        pub user_id: String,
        pub account_id: Option<String>,
        pub name: String,
        pub amount: Decimal,
        pub is_long_term: bool,
        pub interest_rate: Option<Decimal>,
        pub start_date: String,
        pub end_date: Option<String>,
    }

    /// Command for deleting one expense.
    #[derive(Debug, Clone)]
    pub struct DeleteExpenseCommand {
        pub user_id: String,
        pub expense_id: String,
    }

    /// Result of deleting an expense.
    #[derive(Debug, Clone)]
    pub struct DeleteExpenseResult {
        pub deleted: bool,
        pub success_message: String,
    }

    /// Both views of one aggregation run.
    #[derive(Debug, Clone)]
    pub struct MonthlySummary {
        pub series: AggregatedSeries,
        pub chart: ChartSeries,
    }
}

pub mod accounts {
    /// Input for creating a named account.
    #[derive(Debug, Clone)]
    pub struct CreateAccountCommand {
        pub user_id: String,
        pub name: String,
    }
}
