//! Plain-text rendering of reports for chat replies.

use std::fmt::Write as _;

use rust_decimal::{Decimal, RoundingStrategy};
use voxledger_shared::types::{Currency, Money};

use super::types::{AnalyticsReport, CategoryReport, LimitReport, SummaryReport};

/// Renders reports with amounts in one currency.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportFormatter {
    currency: Currency,
}

impl ReportFormatter {
    /// Create a formatter for `currency`.
    #[must_use]
    pub const fn new(currency: Currency) -> Self {
        Self { currency }
    }

    /// Formats an amount, e.g. "450.00 UAH".
    #[must_use]
    pub fn money(&self, amount: Decimal) -> String {
        Money::new(amount, self.currency).to_string()
    }

    /// Renders any report.
    #[must_use]
    pub fn render(&self, report: &AnalyticsReport) -> String {
        match report {
            AnalyticsReport::Summary(r) => self.render_summary(r),
            AnalyticsReport::Category(r) => self.render_category(r),
            AnalyticsReport::Limit(r) => self.render_limits(r),
        }
    }

    /// Renders a summary report.
    #[must_use]
    pub fn render_summary(&self, report: &SummaryReport) -> String {
        let mut out = format!("📊 Spending summary for {}\n\n", report.period);

        if report.lines.is_empty() {
            out.push_str("No expenses in this period.");
            return out;
        }

        for line in &report.lines {
            let _ = writeln!(
                out,
                "• {}: {} ({}%)",
                line.category,
                self.money(line.total),
                one_decimal(line.share_percent)
            );
        }
        let _ = write!(out, "\n💰 Total: {}", self.money(report.total));
        out
    }

    /// Renders a category report.
    #[must_use]
    pub fn render_category(&self, report: &CategoryReport) -> String {
        let mut out = format!("📊 {} for {}\n\n", report.category, report.period);

        if report.count == 0 {
            let _ = write!(out, "No {} expenses in this period.", report.category);
            return out;
        }

        let _ = writeln!(out, "• Total: {}", self.money(report.total));
        let _ = writeln!(out, "• Transactions: {}", report.count);
        if let Some(average) = report.average {
            let _ = writeln!(out, "• Average: {}", self.money(average));
        }

        match report.remaining {
            Some(remaining) => {
                let _ = writeln!(out, "\n💰 Remaining this month: {}", self.money(remaining));
            }
            None => out.push_str("\n💰 Monthly limit: not set\n"),
        }

        out.push_str("\nRecent expenses:");
        for expense in &report.recent {
            let _ = write!(
                out,
                "\n- {}: {} ({})",
                expense.created_at.format("%d.%m.%Y"),
                expense.description,
                self.money(expense.amount)
            );
        }
        out
    }

    /// Renders the budget limits report.
    #[must_use]
    pub fn render_limits(&self, report: &LimitReport) -> String {
        let mut out = String::from("💰 Budget remaining this month\n");

        for status in &report.statuses {
            match (status.remaining, status.remaining_percent) {
                (Some(remaining), Some(percent)) => {
                    let _ = write!(
                        out,
                        "\n{} {}: {} ({}% of limit)",
                        status.indicator.symbol(),
                        status.category,
                        self.money(remaining),
                        one_decimal(percent)
                    );
                }
                _ => {
                    let _ = write!(
                        out,
                        "\n{} {}: limit not set",
                        status.indicator.symbol(),
                        status.category
                    );
                }
            }
        }
        out
    }
}

fn one_decimal(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use voxledger_shared::types::{Category, ExpenseId, UserId};

    use crate::budget::BudgetService;
    use crate::expense::Expense;
    use crate::period::PeriodResolver;

    fn formatter() -> ReportFormatter {
        ReportFormatter::new(Currency::Uah)
    }

    fn now() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 22)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_render_summary() {
        let report = crate::analytics::AnalyticsService::summary(
            PeriodResolver::resolve("last month", now()),
            &[Expense {
                id: ExpenseId::new(1),
                user_id: UserId::new(1),
                category: Category::Foods,
                amount: dec!(450),
                description: "groceries".to_string(),
                original_text: String::new(),
                created_at: now(),
            }],
        );

        let text = formatter().render_summary(&report);

        assert!(text.starts_with("📊 Spending summary for last month (01.04.2025 - 30.04.2025)"));
        assert!(text.contains("• Foods: 450.00 UAH (100.0%)"));
        assert!(text.ends_with("💰 Total: 450.00 UAH"));
    }

    #[test]
    fn test_render_empty_summary() {
        let report = crate::analytics::AnalyticsService::summary(
            PeriodResolver::resolve("today", now()),
            &[],
        );
        assert!(formatter().render_summary(&report).ends_with("No expenses in this period."));
    }

    #[test]
    fn test_render_limits_distinguishes_not_set_from_zero() {
        let report = LimitReport {
            statuses: vec![
                BudgetService::status(Category::Foods, Some(dec!(2000)), dec!(2000)),
                BudgetService::status(Category::Shopping, None, dec!(0)),
                BudgetService::status(Category::Housing, Some(dec!(3000)), dec!(500)),
            ],
        };

        let text = formatter().render_limits(&report);

        assert!(text.contains("❌ Foods: 0.00 UAH (0.0% of limit)"));
        assert!(text.contains("⚪ Shopping: limit not set"));
        assert!(text.contains("✅ Housing: 2500.00 UAH (83.3% of limit)"));
    }

    #[test]
    fn test_one_decimal_rounds_half_away_from_zero() {
        assert_eq!(one_decimal(dec!(33.35)), "33.4");
        assert_eq!(one_decimal(dec!(100)), "100.0");
    }
}
