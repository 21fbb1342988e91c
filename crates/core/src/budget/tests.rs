//! Ledger scenario tests and property-based tests for the budget module.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use voxledger_shared::LimitPolicy;
use voxledger_shared::types::{Category, MAX_AMOUNT, PageRequest, UserId};

use super::error::LedgerError;
use super::ledger::BudgetLedger;
use super::memory::InMemoryLedgerStore;
use super::service::BudgetService;
use super::store::LedgerStore;
use super::types::{BudgetIndicator, LimitCheck};
use crate::clock::FixedClock;
use crate::expense::{NewExpense, ValidExpense};
use crate::period::PeriodResolver;

const USER: UserId = UserId(123_456_789);

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn now() -> NaiveDateTime {
    at(2025, 5, 22, 14)
}

fn ledger(policy: LimitPolicy) -> (BudgetLedger<InMemoryLedgerStore, FixedClock>, Arc<InMemoryLedgerStore>) {
    let store = Arc::new(InMemoryLedgerStore::new());
    let ledger = BudgetLedger::new(Arc::clone(&store), FixedClock::new(now()), policy);
    (ledger, store)
}

fn spend(store: &InMemoryLedgerStore, category: Category, amount: Decimal, created_at: NaiveDateTime) {
    store.insert_expense(NewExpense {
        user_id: USER,
        category,
        amount,
        description: "test".to_string(),
        original_text: "test".to_string(),
        created_at,
    });
}

fn valid(category: Category, amount: Decimal) -> ValidExpense {
    ValidExpense {
        amount,
        category,
        description: "coffee".to_string(),
    }
}

#[tokio::test]
async fn test_scenario_foods_over_limit() {
    let (ledger, store) = ledger(LimitPolicy::Soft);
    ledger.set_limit(USER, Category::Foods, dec!(2000)).await.unwrap();
    spend(&store, Category::Foods, dec!(1000), at(2025, 5, 2, 10));
    spend(&store, Category::Foods, dec!(800), at(2025, 5, 20, 10));

    let check = ledger.check(USER, Category::Foods, dec!(300)).await.unwrap();

    assert!(check.over_limit);
    assert_eq!(check.remaining, Some(dec!(-100)));
}

#[tokio::test]
async fn test_scenario_transportation_under_limit() {
    let (ledger, _store) = ledger(LimitPolicy::Soft);
    ledger
        .set_limit(USER, Category::Transportation, dec!(1000))
        .await
        .unwrap();

    let check = ledger
        .check(USER, Category::Transportation, dec!(250))
        .await
        .unwrap();

    assert!(!check.over_limit);
    assert_eq!(check.remaining, Some(dec!(750)));
}

#[tokio::test]
async fn test_scenario_no_limit_is_unconstrained() {
    let (ledger, store) = ledger(LimitPolicy::Soft);
    spend(&store, Category::Entertainment, dec!(5000), at(2025, 5, 3, 20));

    assert_eq!(
        ledger.remaining_budget(USER, Category::Entertainment).await.unwrap(),
        None
    );
    assert_eq!(
        ledger.check(USER, Category::Entertainment, dec!(500)).await.unwrap(),
        LimitCheck::unconstrained()
    );
    assert_eq!(ledger.get_limit(USER, Category::Entertainment).await.unwrap(), None);
}

#[tokio::test]
async fn test_check_ignores_other_months_and_categories() {
    let (ledger, store) = ledger(LimitPolicy::Soft);
    ledger.set_limit(USER, Category::Foods, dec!(1000)).await.unwrap();
    spend(&store, Category::Foods, dec!(900), at(2025, 4, 30, 23));
    spend(&store, Category::Foods, dec!(900), at(2025, 6, 1, 0));
    spend(&store, Category::Shopping, dec!(900), at(2025, 5, 10, 12));
    spend(&store, Category::Foods, dec!(100), at(2025, 5, 1, 0));

    let remaining = ledger.remaining_budget(USER, Category::Foods).await.unwrap();
    assert_eq!(remaining, Some(dec!(900)));
}

#[tokio::test]
async fn test_month_to_date_total_is_zero_without_expenses() {
    let (ledger, store) = ledger(LimitPolicy::Soft);
    spend(&store, Category::Housing, dec!(3000), at(2025, 4, 1, 9));

    let may = ledger
        .month_to_date_total(USER, Category::Housing, 2025, 5)
        .await
        .unwrap();
    let april = ledger
        .month_to_date_total(USER, Category::Housing, 2025, 4)
        .await
        .unwrap();

    assert_eq!(may, Decimal::ZERO);
    assert_eq!(april, dec!(3000));
}

#[tokio::test]
async fn test_month_to_date_total_rejects_invalid_month() {
    let (ledger, _store) = ledger(LimitPolicy::Soft);
    let result = ledger.month_to_date_total(USER, Category::Foods, 2025, 13).await;
    assert!(matches!(result, Err(LedgerError::InvalidMonth(_))));
}

#[tokio::test]
async fn test_soft_policy_records_over_limit_expense() {
    let (ledger, store) = ledger(LimitPolicy::Soft);
    ledger.set_limit(USER, Category::Foods, dec!(100)).await.unwrap();

    let recorded = ledger
        .record_expense(USER, valid(Category::Foods, dec!(150)), "coffee 150".to_string())
        .await
        .unwrap();

    assert!(recorded.check.over_limit);
    assert_eq!(recorded.check.remaining, Some(dec!(-50)));
    assert_eq!(recorded.expense.created_at, now());
    assert_eq!(recorded.expense.original_text, "coffee 150");
    assert_eq!(store.expense_count(), 1);
}

#[tokio::test]
async fn test_hard_policy_refuses_over_limit_expense() {
    let (ledger, store) = ledger(LimitPolicy::Hard);
    ledger.set_limit(USER, Category::Foods, dec!(100)).await.unwrap();

    let result = ledger
        .record_expense(USER, valid(Category::Foods, dec!(150)), "coffee".to_string())
        .await;

    match result {
        Err(LedgerError::LimitExceeded {
            category,
            limit,
            new_total,
            ..
        }) => {
            assert_eq!(category, Category::Foods);
            assert_eq!(limit, dec!(100));
            assert_eq!(new_total, dec!(150));
        }
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
    assert_eq!(store.expense_count(), 0);
}

#[tokio::test]
async fn test_hard_policy_allows_unlimited_category() {
    let (ledger, store) = ledger(LimitPolicy::Hard);

    let recorded = ledger
        .record_expense(USER, valid(Category::Others, dec!(99999)), String::new())
        .await
        .unwrap();

    assert_eq!(recorded.check, LimitCheck::unconstrained());
    assert_eq!(store.expense_count(), 1);
}

#[tokio::test]
async fn test_record_rejects_non_positive_amount() {
    let (ledger, _store) = ledger(LimitPolicy::Soft);
    let result = ledger
        .record_expense(USER, valid(Category::Foods, dec!(0)), String::new())
        .await;
    assert!(matches!(result, Err(LedgerError::InvalidAmount(_))));
}

#[tokio::test]
async fn test_check_rejects_negative_candidate() {
    let (ledger, _store) = ledger(LimitPolicy::Soft);
    let result = ledger.check(USER, Category::Foods, dec!(-1)).await;
    assert!(matches!(result, Err(LedgerError::InvalidAmount(_))));
}

#[tokio::test]
async fn test_oversized_amounts_are_rejected_not_summed() {
    let (ledger, store) = ledger(LimitPolicy::Soft);
    ledger.set_limit(USER, Category::Foods, dec!(2000)).await.unwrap();
    spend(&store, Category::Foods, dec!(10), at(2025, 5, 3, 9));

    let checked = ledger.check(USER, Category::Foods, Decimal::MAX).await;
    assert!(matches!(checked, Err(LedgerError::InvalidAmount(_))));

    let recorded = ledger
        .record_expense(USER, valid(Category::Foods, Decimal::MAX), String::new())
        .await;
    assert!(matches!(recorded, Err(LedgerError::InvalidAmount(_))));

    let just_over = ledger
        .record_expense(USER, valid(Category::Foods, MAX_AMOUNT + dec!(0.01)), String::new())
        .await;
    assert!(matches!(just_over, Err(LedgerError::InvalidAmount(_))));
    assert_eq!(store.expense_count(), 1);

    let at_max = ledger.check(USER, Category::Foods, MAX_AMOUNT).await.unwrap();
    assert!(at_max.over_limit);
}

#[tokio::test]
async fn test_set_limit_rejects_oversized() {
    let (ledger, store) = ledger(LimitPolicy::Soft);

    let result = ledger
        .set_limit(USER, Category::Foods, dec!(1_000_000_000_000))
        .await;

    assert!(matches!(result, Err(LedgerError::InvalidLimit(_))));
    assert!(store.list_limits(USER).await.unwrap().is_empty());
    assert!(ledger.set_limit(USER, Category::Foods, MAX_AMOUNT).await.is_ok());
}

#[tokio::test]
async fn test_set_limit_upserts() {
    let (ledger, store) = ledger(LimitPolicy::Soft);

    let first = ledger.set_limit(USER, Category::Foods, dec!(2000)).await.unwrap();
    let second = ledger.set_limit(USER, Category::Foods, dec!(2500)).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.limit_amount, dec!(2500));
    assert_eq!(store.list_limits(USER).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_set_limit_rejects_non_positive() {
    let (ledger, _store) = ledger(LimitPolicy::Soft);
    let zero = ledger.set_limit(USER, Category::Foods, dec!(0)).await;
    let negative = ledger.set_limit(USER, Category::Foods, dec!(-10)).await;

    assert!(matches!(zero, Err(LedgerError::InvalidLimit(_))));
    assert!(matches!(negative, Err(LedgerError::InvalidLimit(_))));
}

#[tokio::test]
async fn test_storage_failure_propagates() {
    let (ledger, store) = ledger(LimitPolicy::Soft);
    store.set_unavailable(true);

    let result = ledger.check(USER, Category::Foods, dec!(10)).await;
    assert!(matches!(result, Err(LedgerError::Storage(_))));
}

#[tokio::test]
async fn test_limit_statuses_cover_every_category() {
    let (ledger, store) = ledger(LimitPolicy::Soft);
    ledger.set_limit(USER, Category::Foods, dec!(2000)).await.unwrap();
    ledger.set_limit(USER, Category::Housing, dec!(3000)).await.unwrap();
    spend(&store, Category::Foods, dec!(1800), at(2025, 5, 5, 12));
    spend(&store, Category::Housing, dec!(3000), at(2025, 5, 1, 8));

    let statuses = ledger.limit_statuses(USER).await.unwrap();

    assert_eq!(statuses.len(), Category::ALL.len());
    assert_eq!(statuses[0].category, Category::Foods);
    assert_eq!(statuses[0].indicator, BudgetIndicator::Critical);
    assert_eq!(statuses[2].indicator, BudgetIndicator::Exhausted);
    assert_eq!(statuses[2].remaining, Some(dec!(0)));
    assert_eq!(statuses[1].indicator, BudgetIndicator::NotSet);
    assert_eq!(statuses[1].remaining, None);
}

#[tokio::test]
async fn test_seed_default_limits_keeps_existing() {
    let (ledger, _store) = ledger(LimitPolicy::Soft);
    ledger.set_limit(USER, Category::Foods, dec!(5000)).await.unwrap();

    let defaults: BTreeMap<Category, Decimal> =
        [(Category::Foods, dec!(2000)), (Category::Shopping, dec!(1500))].into();
    let seeded = ledger.seed_default_limits(USER, &defaults).await.unwrap();

    assert_eq!(seeded, vec![Category::Shopping]);
    assert_eq!(ledger.get_limit(USER, Category::Foods).await.unwrap(), Some(dec!(5000)));
    assert_eq!(ledger.get_limit(USER, Category::Shopping).await.unwrap(), Some(dec!(1500)));

    let again = ledger.seed_default_limits(USER, &defaults).await.unwrap();
    assert!(again.is_empty());
}

#[tokio::test]
async fn test_expenses_in_period_newest_first() {
    let (ledger, store) = ledger(LimitPolicy::Soft);
    spend(&store, Category::Foods, dec!(10), at(2025, 4, 3, 9));
    spend(&store, Category::Shopping, dec!(20), at(2025, 4, 20, 9));
    spend(&store, Category::Foods, dec!(30), at(2025, 5, 2, 9));

    let period = PeriodResolver::resolve("last month", now());
    let all = ledger.expenses_in_period(USER, None, &period).await.unwrap();
    let foods = ledger
        .expenses_in_period(USER, Some(Category::Foods), &period)
        .await
        .unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(all[0].amount, dec!(20));
    assert_eq!(foods.len(), 1);
    assert_eq!(foods[0].amount, dec!(10));
}

#[tokio::test]
async fn test_list_expenses_paginates() {
    let (ledger, store) = ledger(LimitPolicy::Soft);
    for day in 1..=5 {
        spend(&store, Category::Foods, Decimal::from(day), at(2025, 5, day, 9));
    }

    let page = ledger
        .list_expenses(USER, PageRequest { page: 2, per_page: 2 })
        .await
        .unwrap();

    assert_eq!(page.meta.total, 5);
    assert_eq!(page.meta.total_pages, 3);
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].amount, dec!(3));
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    /// Within the limit: never over, remaining = limit - total - candidate.
    #[test]
    fn test_within_limit_not_over(
        limit in 1i64..1_000_000,
        total_share in 0i64..=100,
        candidate_share in 0i64..=100,
    ) {
        let limit = Decimal::from(limit);
        let current = (limit * Decimal::from(total_share) / dec!(100)).round_dp(2);
        let candidate = ((limit - current) * Decimal::from(candidate_share) / dec!(100)).round_dp(2);
        prop_assume!(current + candidate <= limit);

        let check = BudgetService::evaluate(Some(limit), current, candidate).unwrap();

        prop_assert!(!check.over_limit);
        prop_assert_eq!(check.remaining, Some(limit - current - candidate));
    }

    /// Beyond the limit: over and remaining negative.
    #[test]
    fn test_beyond_limit_is_over(
        limit in 1i64..1_000_000,
        current in 0i64..1_000_000,
        excess in 1i64..1_000_000,
    ) {
        let limit = Decimal::from(limit);
        let current = Decimal::from(current);
        let candidate = (limit - current).max(Decimal::ZERO) + Decimal::from(excess) / dec!(100);

        let check = BudgetService::evaluate(Some(limit), current, candidate).unwrap();

        prop_assert!(check.over_limit);
        prop_assert!(check.remaining.unwrap() < Decimal::ZERO);
    }

    /// No limit: always (false, None).
    #[test]
    fn test_no_limit_never_over(current in 0i64..1_000_000_000, candidate in 0i64..1_000_000_000) {
        let check =
            BudgetService::evaluate(None, Decimal::from(current), Decimal::from(candidate)).unwrap();
        prop_assert_eq!(check, LimitCheck::unconstrained());
    }

    /// Zero limit: percent is 0.
    #[test]
    fn test_remaining_percent_zero_limit(remaining in -1_000_000i64..1_000_000) {
        prop_assert_eq!(
            BudgetService::remaining_percent(Decimal::from(remaining), Decimal::ZERO),
            Decimal::ZERO
        );
    }

    /// `remaining_budget` is idempotent without intervening inserts.
    #[test]
    fn test_remaining_budget_idempotent(
        limit in 1i64..100_000,
        amounts in prop::collection::vec(1i64..10_000, 0..10),
    ) {
        let (ledger, store) = ledger(LimitPolicy::Soft);
        for (i, amount) in amounts.iter().enumerate() {
            let day = u32::try_from(i % 20).unwrap() + 1;
            spend(&store, Category::Foods, Decimal::from(*amount), at(2025, 5, day, 8));
        }

        let (first, second) = block_on(async {
            ledger.set_limit(USER, Category::Foods, Decimal::from(limit)).await.unwrap();
            let first = ledger.remaining_budget(USER, Category::Foods).await.unwrap();
            let second = ledger.remaining_budget(USER, Category::Foods).await.unwrap();
            (first, second)
        });

        let spent: i64 = amounts.iter().sum();
        prop_assert_eq!(first, second);
        prop_assert_eq!(first, Some(Decimal::from(limit - spent)));
    }
}
