//! Report builders.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use voxledger_shared::types::{Category, UserId};

use super::types::{AnalyticsReport, CategoryReport, LimitReport, SummaryLine, SummaryReport};
use crate::assistant::AnalyticsKind;
use crate::budget::{BudgetLedger, LedgerError, LedgerStore};
use crate::clock::Clock;
use crate::expense::Expense;
use crate::period::ResolvedPeriod;

/// Number of expenses listed in a category report.
pub const RECENT_EXPENSES: usize = 5;

/// Analytics service for report generation.
pub struct AnalyticsService;

impl AnalyticsService {
    /// Aggregates expenses per category.
    #[must_use]
    pub fn summary(period: ResolvedPeriod, expenses: &[Expense]) -> SummaryReport {
        let mut per_category: BTreeMap<Category, (Decimal, usize)> = BTreeMap::new();
        for expense in expenses {
            let entry = per_category
                .entry(expense.category)
                .or_insert((Decimal::ZERO, 0));
            entry.0 += expense.amount;
            entry.1 += 1;
        }

        let total: Decimal = per_category.values().map(|(sum, _)| *sum).sum();

        let lines = per_category
            .into_iter()
            .map(|(category, (sum, count))| SummaryLine {
                category,
                total: sum,
                count,
                share_percent: share(sum, total),
            })
            .collect();

        SummaryReport {
            period,
            lines,
            total,
        }
    }

    /// Details one category. `expenses` must already be filtered to it.
    #[must_use]
    pub fn category(
        period: ResolvedPeriod,
        category: Category,
        expenses: &[Expense],
        remaining: Option<Decimal>,
    ) -> CategoryReport {
        let total: Decimal = expenses.iter().map(|e| e.amount).sum();
        let count = expenses.len();
        let average = (count > 0).then(|| (total / Decimal::from(count)).round_dp(2));

        let mut recent = expenses.to_vec();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(RECENT_EXPENSES);

        CategoryReport {
            period,
            category,
            total,
            count,
            average,
            remaining,
            recent,
        }
    }

    /// Builds the report of `kind` from the ledger.
    ///
    /// A category report without a category falls back to a summary.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Storage` if the store fails.
    pub async fn build<S: LedgerStore, C: Clock>(
        ledger: &BudgetLedger<S, C>,
        user_id: UserId,
        period: ResolvedPeriod,
        kind: AnalyticsKind,
        category: Option<Category>,
    ) -> Result<AnalyticsReport, LedgerError> {
        match (kind, category) {
            (AnalyticsKind::Limit, _) => Ok(AnalyticsReport::Limit(LimitReport {
                statuses: ledger.limit_statuses(user_id).await?,
            })),
            (AnalyticsKind::Category, Some(category)) => {
                let expenses = ledger
                    .expenses_in_period(user_id, Some(category), &period)
                    .await?;
                let remaining = ledger.remaining_budget(user_id, category).await?;
                Ok(AnalyticsReport::Category(Self::category(
                    period, category, &expenses, remaining,
                )))
            }
            _ => {
                let expenses = ledger.expenses_in_period(user_id, None, &period).await?;
                Ok(AnalyticsReport::Summary(Self::summary(period, &expenses)))
            }
        }
    }
}

fn share(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        Decimal::ZERO
    } else {
        (part / total * Decimal::ONE_HUNDRED).round_dp(2)
    }
}
