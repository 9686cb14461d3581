use crate::domain::aggregation::{AggregatedSeries, MonthBucket, MonthlyContribution};
use crate::domain::commands::expenses::{CreateExpenseCommand, DeleteExpenseResult, MonthlySummary};
use crate::domain::models::{ExpenseRecord, MonthKey};
use crate::domain::series::ChartSeries;
use shared::{
    CreateExpenseRequest, DeleteExpenseResponse, Expense as SharedExpense, ExpenseListResponse,
    MonthlyChartData, MonthlyExpenseDetail, MonthlyExpenseGroup, MonthlyExpensesResponse,
};

/// Mapper between shared expense DTOs and domain types.
pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn to_create_command(
        user_id: String,
        request: CreateExpenseRequest,
    ) -> CreateExpenseCommand {
        CreateExpenseCommand {
            user_id,
            account_id: request.account_id,
            name: request.name,
            amount: request.amount,
            is_long_term: request.is_long_term,
            interest_rate: request.interest_rate,
            start_date: request.start_date,
            end_date: request.end_date,
        }
    }

    pub fn to_dto(domain: ExpenseRecord) -> SharedExpense {
        SharedExpense {
            id: domain.id,
            account_id: domain.account_id,
            name: domain.name,
            amount: domain.amount,
            is_long_term: domain.is_long_term,
            interest_rate: domain.interest_rate,
            start_date: domain.start_date,
            end_date: domain.end_date,
            monthly_expense: domain.monthly_expense,
        }
    }

    pub fn to_expense_list_dto(expenses: Vec<ExpenseRecord>) -> ExpenseListResponse {
        ExpenseListResponse {
            expenses: expenses.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_delete_dto(result: DeleteExpenseResult) -> DeleteExpenseResponse {
        DeleteExpenseResponse {
            deleted: result.deleted,
            success_message: result.success_message,
        }
    }

    pub fn to_monthly_dto(summary: MonthlySummary) -> MonthlyExpensesResponse {
        MonthlyExpensesResponse {
            chart: Self::to_chart_dto(summary.chart),
            grand_total: summary.series.grand_total(),
            groups: Self::to_group_dtos(&summary.series),
        }
    }

    fn to_chart_dto(chart: ChartSeries) -> MonthlyChartData {
        MonthlyChartData {
            month: chart.month,
            expenses: chart.expenses,
        }
    }

    fn to_group_dtos(series: &AggregatedSeries) -> Vec<MonthlyExpenseGroup> {
        series
            .groups()
            .map(|(month, bucket)| Self::to_group_dto(month, bucket))
            .collect()
    }

    fn to_group_dto(month: MonthKey, bucket: &MonthBucket) -> MonthlyExpenseGroup {
        MonthlyExpenseGroup {
            month: month.to_string(),
            label: month.label(),
            total: bucket.total,
            expenses: bucket.contributions.iter().map(Self::to_detail_dto).collect(),
        }
    }

    fn to_detail_dto(contribution: &MonthlyContribution) -> MonthlyExpenseDetail {
        MonthlyExpenseDetail {
            expense_id: contribution.expense_id.clone(),
            name: contribution.name.clone(),
            amount: contribution.amount,
            date: contribution.start_date,
            end_date: contribution.end_date,
        }
    }
}
