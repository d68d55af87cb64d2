mod common;

use std::sync::Arc;

use fintrack_core::budgets::{Budget, BudgetRepository, BudgetRepositoryTrait};
use fintrack_core::categories::{
    Category, CategoryRepository, CategoryRepositoryTrait, KIND_EXPENSE, KIND_INCOME,
};
use fintrack_core::transactions::{
    Transaction, TransactionRepository, TransactionRepositoryTrait, TransactionService,
    TransactionServiceTrait,
};
use fintrack_core::users::{User, UserRepository, UserRepositoryTrait};

use common::{setup, OfflineApi};

fn category(id: &str, name: &str, kind: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        kind: kind.to_string(),
        user_id: "user-1".to_string(),
    }
}

fn transaction(id: &str, amount: f64, date: &str, kind: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        note: "test".to_string(),
        amount,
        date: date.to_string(),
        user_id: "user-1".to_string(),
        kind: kind.to_string(),
        category_id: "cat-1".to_string(),
    }
}

fn budget(id: &str, category_id: &str, limit: f64, month: i32, year: i32) -> Budget {
    Budget {
        id: id.to_string(),
        user_id: "user-1".to_string(),
        category_id: category_id.to_string(),
        limit_amount: limit,
        month,
        year,
    }
}

#[tokio::test]
async fn categories_round_trip_and_allow_duplicate_names() {
    let db = setup();
    let repo = CategoryRepository::new(db.pool.clone(), db.writer.clone());

    repo.upsert_category(category("c1", "Groceries", KIND_EXPENSE)).await.unwrap();
    repo.upsert_category(category("c2", "Groceries", KIND_EXPENSE)).await.unwrap();
    repo.upsert_category(category("c3", "Salary", KIND_INCOME)).await.unwrap();

    // Same name, different ids: both rows survive.
    let all = repo.get_all_categories().unwrap();
    assert_eq!(all.len(), 3);

    let stored = repo.get_category_by_id("c1").unwrap().unwrap();
    assert_eq!(stored, category("c1", "Groceries", KIND_EXPENSE));
    assert!(stored.is_expense());

    let income = repo.get_categories_by_kind(KIND_INCOME).unwrap();
    assert_eq!(income.len(), 1);
    assert_eq!(income[0].name, "Salary");
}

#[tokio::test]
async fn upsert_with_same_id_replaces_the_row() {
    let db = setup();
    let repo = CategoryRepository::new(db.pool.clone(), db.writer.clone());

    repo.upsert_category(category("c1", "Food", KIND_EXPENSE)).await.unwrap();
    repo.upsert_category(category("c1", "Dining", KIND_EXPENSE)).await.unwrap();

    let all = repo.get_all_categories().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Dining");
}

#[tokio::test]
async fn transactions_filter_by_month_prefix() {
    let db = setup();
    let repo = TransactionRepository::new(db.pool.clone(), db.writer.clone());

    repo.upsert_transactions(vec![
        transaction("t1", 100.0, "2025-06-03", KIND_EXPENSE),
        transaction("t2", 2500.0, "2025-06-01T09:00:00Z", KIND_INCOME),
        transaction("t3", 40.0, "2025-05-28", KIND_EXPENSE),
    ])
    .await
    .unwrap();

    let june = repo.get_transactions_in_month(6, 2025).unwrap();
    assert_eq!(june.len(), 2);
    assert!(june.iter().all(|t| t.date.starts_with("2025-06")));
}

#[tokio::test]
async fn monthly_summary_is_computed_from_the_cache() {
    let db = setup();
    let repo = Arc::new(TransactionRepository::new(db.pool.clone(), db.writer.clone()));

    repo.upsert_transactions(vec![
        transaction("t1", 2500.0, "2025-06-01", KIND_INCOME),
        transaction("t2", 300.0, "2025-06-10", KIND_EXPENSE),
        transaction("t3", 200.0, "2025-06-15", KIND_EXPENSE),
        transaction("t4", 999.0, "2025-07-01", KIND_EXPENSE),
    ])
    .await
    .unwrap();

    let service = TransactionService::new(Arc::new(OfflineApi), repo, db.events.clone());
    let summary = service.get_monthly_summary(6, 2025).unwrap();

    assert_eq!(summary.total_income, 2500.0);
    assert_eq!(summary.total_expense, 500.0);
    assert_eq!(summary.balance, 2000.0);
}

#[tokio::test]
async fn budgets_query_by_month_and_join_categories() {
    let db = setup();
    let categories = CategoryRepository::new(db.pool.clone(), db.writer.clone());
    let budgets = BudgetRepository::new(db.pool.clone(), db.writer.clone());

    categories.upsert_category(category("cat-1", "Groceries", KIND_EXPENSE)).await.unwrap();
    categories.upsert_category(category("cat-2", "Transport", KIND_EXPENSE)).await.unwrap();

    budgets.upsert_budgets(vec![
        budget("b1", "cat-1", 400.0, 6, 2025),
        budget("b2", "cat-2", 120.0, 6, 2025),
        budget("b3", "cat-1", 400.0, 7, 2025),
    ])
    .await
    .unwrap();

    let june = budgets.get_budgets_for_month(6, 2025).unwrap();
    assert_eq!(june.len(), 2);

    let joined = budgets.get_budgets_with_categories(6, 2025).unwrap();
    assert_eq!(joined.len(), 2);
    let groceries = joined
        .iter()
        .find(|b| b.budget.category_id == "cat-1")
        .unwrap();
    assert_eq!(groceries.category_name, "Groceries");
    assert_eq!(groceries.category_kind, KIND_EXPENSE);
}

#[tokio::test]
async fn user_rows_round_trip() {
    let db = setup();
    let repo = UserRepository::new(db.pool.clone(), db.writer.clone());

    let user = User {
        id: "user-1".to_string(),
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        created_at: Some("2025-01-01T00:00:00Z".to_string()),
        updated_at: None,
    };

    repo.upsert_user(user.clone()).await.unwrap();
    assert_eq!(repo.get_user_by_id("user-1").unwrap(), Some(user));
    assert_eq!(repo.get_user_by_id("missing").unwrap(), None);
}
