mod common;

use std::sync::Arc;

use fintrack_core::errors::Error;
use fintrack_core::events::StoreEvent;
use fintrack_core::goals::{
    GoalRepository, GoalRepositoryTrait, GoalService, GoalServiceTrait, NewSavingGoal, SyncStatus,
};

use common::{contribution, goal, setup, EchoGoalsApi, OfflineApi, TestDb};

fn goal_service(db: &TestDb, api: Arc<dyn fintrack_core::goals::GoalsApi>) -> GoalService {
    let repository = Arc::new(GoalRepository::new(db.pool.clone(), db.writer.clone()));
    GoalService::new(api, repository, db.tokens.handle(), db.events.clone())
}

fn repository(db: &TestDb) -> GoalRepository {
    GoalRepository::new(db.pool.clone(), db.writer.clone())
}

#[tokio::test]
async fn offline_create_keeps_goal_locally_and_marks_sync_failed() {
    let db = setup();
    let service = goal_service(&db, Arc::new(OfflineApi));
    let repo = repository(&db);

    let mut events = service.observe_goals();

    let created = service
        .create_goal(NewSavingGoal {
            title: "Emergency fund".to_string(),
            goal_amount: 1000.0,
            goal_date: "2026-12-31".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(created.title, "Emergency fund");
    assert_eq!(created.current_amount, 0.0);

    let stored = repo.get_goal_by_id(&created.id).unwrap().unwrap();
    assert_eq!(stored.sync_status(), SyncStatus::SyncFailed);
    assert!(!stored.updated_at.is_empty());

    assert_eq!(events.recv().await.unwrap(), StoreEvent::GoalsChanged);
}

#[tokio::test]
async fn create_reconciles_client_id_with_server_id() {
    let db = setup();
    let service = goal_service(&db, Arc::new(EchoGoalsApi::new("srv-goal-1", "srv-c-1")));
    let repo = repository(&db);

    let created = service
        .create_goal(NewSavingGoal {
            title: "Car".to_string(),
            goal_amount: 5000.0,
            goal_date: "2027-01-01".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(created.id, "srv-goal-1");
    assert_eq!(created.sync_status(), SyncStatus::Synced);

    // The provisional row is gone; only the canonical one remains.
    let all = repo.load_goals().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, "srv-goal-1");
}

#[tokio::test]
async fn reconciliation_keeps_contributions_attached() {
    let db = setup();
    let repo = repository(&db);

    let local = repo.upsert_goal(goal("local-1", "Trip", 800.0, "2026-06-01")).await.unwrap();
    repo.upsert_contribution(contribution("c1", &local.id, 100.0))
        .await
        .unwrap();

    let reconciled = repo
        .replace_goal(&local.id, goal("srv-9", "Trip", 800.0, "2026-06-01"))
        .await
        .unwrap();

    assert_eq!(reconciled.id, "srv-9");
    let contributions = repo.load_contributions("srv-9").unwrap();
    assert_eq!(contributions.len(), 1);
    assert_eq!(contributions[0].id, "c1");
    assert!(repo.load_contributions("local-1").unwrap().is_empty());
}

#[tokio::test]
async fn contributions_drive_progress_and_completion() {
    let db = setup();
    let service = goal_service(&db, Arc::new(OfflineApi));
    let repo = repository(&db);

    let g = repo.upsert_goal(goal("g1", "Laptop", 1000.0, "2026-12-31")).await.unwrap();

    service.add_contribution(&g.id, 400.0, None).await.unwrap();
    let after_first = repo.get_goal_by_id(&g.id).unwrap().unwrap();
    assert_eq!(after_first.current_amount, 400.0);
    assert!(!after_first.is_completed);

    service
        .add_contribution(&g.id, 600.0, Some("bonus".to_string()))
        .await
        .unwrap();
    let after_second = repo.get_goal_by_id(&g.id).unwrap().unwrap();
    assert_eq!(after_second.current_amount, 1000.0);
    assert!(after_second.is_completed);
}

#[tokio::test]
async fn deleting_a_contribution_recomputes_progress() {
    let db = setup();
    let service = goal_service(&db, Arc::new(OfflineApi));
    let repo = repository(&db);

    let g = repo.upsert_goal(goal("g1", "Laptop", 1000.0, "2026-12-31")).await.unwrap();
    let first = service.add_contribution(&g.id, 700.0, None).await.unwrap();
    service.add_contribution(&g.id, 300.0, None).await.unwrap();
    assert!(repo.get_goal_by_id(&g.id).unwrap().unwrap().is_completed);

    service.delete_contribution(&first.id).await.unwrap();

    let after = repo.get_goal_by_id(&g.id).unwrap().unwrap();
    assert_eq!(after.current_amount, 300.0);
    assert!(!after.is_completed);
}

#[tokio::test]
async fn deleting_a_goal_removes_its_contributions() {
    let db = setup();
    let service = goal_service(&db, Arc::new(OfflineApi));
    let repo = repository(&db);

    let g = repo.upsert_goal(goal("g1", "Trip", 500.0, "2026-06-01")).await.unwrap();
    repo.upsert_contribution(contribution("c1", &g.id, 50.0)).await.unwrap();
    repo.upsert_contribution(contribution("c2", &g.id, 75.0)).await.unwrap();

    service.delete_goal(&g.id).await.unwrap();

    assert!(repo.get_goal_by_id(&g.id).unwrap().is_none());
    assert!(repo.load_contributions(&g.id).unwrap().is_empty());
}

#[tokio::test]
async fn rejects_non_positive_amounts_before_touching_the_store() {
    let db = setup();
    let service = goal_service(&db, Arc::new(OfflineApi));
    let repo = repository(&db);

    let created = service
        .create_goal(NewSavingGoal {
            title: "  ".to_string(),
            goal_amount: 100.0,
            goal_date: "2026-01-01".to_string(),
        })
        .await;
    assert!(matches!(created, Err(Error::Validation(_))));

    let g = repo.upsert_goal(goal("g1", "Trip", 500.0, "2026-06-01")).await.unwrap();
    let added = service.add_contribution(&g.id, 0.0, None).await;
    assert!(matches!(added, Err(Error::Validation(_))));
    assert!(repo.load_contributions(&g.id).unwrap().is_empty());
}

#[tokio::test]
async fn past_goal_dates_are_accepted() {
    let db = setup();
    let service = goal_service(&db, Arc::new(OfflineApi));

    let created = service
        .create_goal(NewSavingGoal {
            title: "Overdue already".to_string(),
            goal_amount: 100.0,
            goal_date: "2020-01-01".to_string(),
        })
        .await
        .unwrap();

    let today = chrono::NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
    assert!(created.is_overdue(today));
}

#[tokio::test]
async fn get_goals_falls_back_to_cache_when_offline() {
    let db = setup();
    let service = goal_service(&db, Arc::new(OfflineApi));
    let repo = repository(&db);

    repo.upsert_goal(goal("g1", "Cached", 100.0, "2026-01-01")).await.unwrap();

    let goals = service.get_goals().await.unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].title, "Cached");
}

#[tokio::test]
async fn get_goal_misses_on_both_sides_is_not_found() {
    let db = setup();
    let service = goal_service(&db, Arc::new(OfflineApi));

    match service.get_goal("nope").await {
        Err(Error::NotFound(_)) => {}
        other => panic!("expected NotFound, got {:?}", other.map(|g| g.id)),
    }
}

#[tokio::test]
async fn synced_contribution_replaces_provisional_row() {
    let db = setup();
    let service = goal_service(&db, Arc::new(EchoGoalsApi::new("srv-goal-1", "srv-c-1")));
    let repo = repository(&db);

    let g = repo.upsert_goal(goal("g1", "Trip", 500.0, "2026-06-01")).await.unwrap();
    service.add_contribution(&g.id, 120.0, None).await.unwrap();

    let contributions = repo.load_contributions(&g.id).unwrap();
    assert_eq!(contributions.len(), 1);
    assert_eq!(contributions[0].id, "srv-c-1");
    assert_eq!(contributions[0].amount, 120.0);

    // Progress reflects the single reconciled contribution.
    assert_eq!(repo.total_contributions(&g.id).unwrap(), 120.0);
}
