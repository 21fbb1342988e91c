//! Pure budget arithmetic.

use rust_decimal::Decimal;
use voxledger_shared::types::Category;

use super::error::LedgerError;
use super::types::{BudgetIndicator, LimitCheck, LimitStatus};

/// Budget service for limit evaluation.
pub struct BudgetService;

impl BudgetService {
    /// Evaluates a candidate amount against a limit.
    ///
    /// new_total = current_total + candidate
    /// remaining = limit - new_total (may be negative)
    /// over_limit = new_total > limit
    ///
    /// With no limit the result is unconstrained.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` when either sum overflows.
    pub fn evaluate(
        limit: Option<Decimal>,
        current_total: Decimal,
        candidate: Decimal,
    ) -> Result<LimitCheck, LedgerError> {
        let Some(limit) = limit else {
            return Ok(LimitCheck::unconstrained());
        };

        let new_total = current_total
            .checked_add(candidate)
            .ok_or(LedgerError::InvalidAmount(candidate))?;
        let remaining = limit
            .checked_sub(new_total)
            .ok_or(LedgerError::InvalidAmount(candidate))?;

        Ok(LimitCheck {
            over_limit: new_total > limit,
            remaining: Some(remaining),
            limit: Some(limit),
        })
    }

    /// Remaining share of the limit in percent, rounded to two decimals.
    ///
    /// A zero limit yields 0%.
    #[must_use]
    pub fn remaining_percent(remaining: Decimal, limit: Decimal) -> Decimal {
        if limit.is_zero() {
            Decimal::ZERO
        } else {
            (remaining / limit * Decimal::ONE_HUNDRED).round_dp(2)
        }
    }

    /// Classifies remaining budget.
    #[must_use]
    pub fn indicator(remaining: Decimal, limit: Decimal) -> BudgetIndicator {
        if remaining <= Decimal::ZERO {
            return BudgetIndicator::Exhausted;
        }

        let percent = Self::remaining_percent(remaining, limit);
        if percent < Decimal::from(20) {
            BudgetIndicator::Critical
        } else if percent < Decimal::from(50) {
            BudgetIndicator::Low
        } else if percent < Decimal::from(80) {
            BudgetIndicator::Moderate
        } else {
            BudgetIndicator::Healthy
        }
    }

    /// Builds the status line of a category from its limit and month-to-date spend.
    #[must_use]
    pub fn status(category: Category, limit: Option<Decimal>, spent: Decimal) -> LimitStatus {
        match limit {
            Some(limit) => {
                let remaining = limit - spent;
                LimitStatus {
                    category,
                    limit: Some(limit),
                    spent,
                    remaining: Some(remaining),
                    remaining_percent: Some(Self::remaining_percent(remaining, limit)),
                    indicator: Self::indicator(remaining, limit),
                }
            }
            None => LimitStatus {
                category,
                limit: None,
                spent,
                remaining: None,
                remaining_percent: None,
                indicator: BudgetIndicator::NotSet,
            },
        }
    }
}
