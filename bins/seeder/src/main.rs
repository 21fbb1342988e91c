//! Database seeder for Voxledger development and testing.
//!
//! Seeds the configured default budget limits for the authorized user and,
//! when the user has no expenses yet, a handful of sample expenses spread
//! over the current and the previous month.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDateTime};
use rust_decimal::Decimal;
use voxledger_core::budget::{BudgetLedger, LedgerStore};
use voxledger_core::clock::{Clock, SystemClock};
use voxledger_core::expense::NewExpense;
use voxledger_core::period::month_bounds;
use voxledger_db::{ExpenseRepository, SqlLedgerStore, connect_with};
use voxledger_shared::AppConfig;
use voxledger_shared::types::{Category, PageRequest, UserId};

/// (days after the month start, category, amount in cents, description)
const SAMPLES: [(i64, Category, i64, &str); 8] = [
    (0, Category::Housing, 250_000, "Monthly rent"),
    (1, Category::Foods, 45_050, "Groceries at the supermarket"),
    (2, Category::Transportation, 12_000, "Taxi to the office"),
    (3, Category::Entertainment, 30_000, "Cinema tickets"),
    (4, Category::Foods, 18_575, "Lunch at a cafe"),
    (5, Category::Shopping, 89_900, "Running shoes"),
    (6, Category::Others, 15_000, "Pharmacy"),
    (7, Category::Transportation, 6_500, "Metro card top-up"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let owner = UserId::new(config.bot.authorized_user_id);

    println!("Connecting to database...");
    let db = connect_with(&config.database).await?;
    let store = Arc::new(SqlLedgerStore::new(db.clone()));
    let ledger = BudgetLedger::new(Arc::clone(&store), SystemClock, config.budget.policy);

    println!("Seeding default budget limits...");
    let seeded = ledger
        .seed_default_limits(owner, &config.budget.effective_default_limits())
        .await?;
    if seeded.is_empty() {
        println!("  Every category already has a limit, skipping...");
    } else {
        for category in &seeded {
            println!("  Set default limit for {category}");
        }
    }

    println!("Seeding sample expenses...");
    let (_, existing) = store.list_expenses(owner, PageRequest::default()).await?;
    if existing > 0 {
        println!("  User already has {existing} expenses, skipping...");
    } else {
        let repo = ExpenseRepository::new(db);
        let now = SystemClock.now();
        let mut created = 0;
        for month_start in sample_months(now)? {
            for (offset, category, cents, description) in SAMPLES {
                let created_at = month_start + Duration::days(offset) + Duration::hours(12);
                if created_at > now {
                    continue;
                }
                repo.create(NewExpense {
                    user_id: owner,
                    category,
                    amount: Decimal::new(cents, 2),
                    description: description.to_string(),
                    original_text: format!("{description} {}", Decimal::new(cents, 2)),
                    created_at,
                })
                .await?;
                created += 1;
            }
        }
        println!("  Created {created} sample expenses");
    }

    println!("Seeding complete!");
    Ok(())
}

/// Start of the previous month and of the current month.
fn sample_months(now: NaiveDateTime) -> anyhow::Result<[NaiveDateTime; 2]> {
    let (current, _) = month_bounds(now.year(), now.month())?;
    let (year, month) = if now.month() == 1 {
        (now.year() - 1, 12)
    } else {
        (now.year(), now.month() - 1)
    };
    let (previous, _) = month_bounds(year, month)?;
    Ok([previous, current])
}
