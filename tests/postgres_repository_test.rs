//! Tests for PgSubscriptionRepository
//!
//! Require a disposable PostgreSQL database in `TEST_DATABASE_URL`; each
//! test returns early when the variable is unset. The table is truncated
//! between tests, so they run serially.

use chrono::NaiveDate;
use serial_test::serial;
use sqlx::postgres::PgConnectOptions;
use subscription_service::subscriptions::{
    CostFilter, InMemorySubscriptionRepository, PgSubscriptionRepository, RepoError, Subscription,
    SubscriptionRepository,
};
use uuid::Uuid;

async fn test_repo() -> Option<PgSubscriptionRepository> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let options: PgConnectOptions = url.parse().unwrap();
    let repo = PgSubscriptionRepository::connect(options, 2).await.unwrap();
    repo.run_migrations().await.unwrap();
    sqlx::query("TRUNCATE subscription")
        .execute(repo.pool())
        .await
        .unwrap();
    Some(repo)
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[tokio::test]
#[serial]
async fn test_crud_roundtrip() {
    let Some(repo) = test_repo().await else {
        return;
    };

    let sub = Subscription::new("Netflix", 500, Uuid::new_v4(), date("2024-01-01"), None);
    let created = repo.create(&sub).await.unwrap();
    assert_eq!(created, sub);
    assert_eq!(repo.get_by_id(sub.id).await.unwrap(), sub);

    let mut changed = sub.clone();
    changed.user_id = Uuid::new_v4();
    changed.service_name = "Netflix Premium".to_string();
    changed.finish_date = Some(date("2024-12-31"));
    let updated = repo.update(&changed).await.unwrap();
    assert_eq!(updated.user_id, sub.user_id);
    assert_eq!(updated.service_name, "Netflix Premium");
    assert_eq!(updated.finish_date, Some(date("2024-12-31")));

    assert_eq!(repo.list().await.unwrap().len(), 1);

    repo.delete(sub.id).await.unwrap();
    assert!(matches!(
        repo.get_by_id(sub.id).await,
        Err(RepoError::NotFound(_))
    ));
    assert!(matches!(repo.delete(sub.id).await, Err(RepoError::NotFound(_))));
    assert!(matches!(repo.update(&sub).await, Err(RepoError::NotFound(_))));
}

#[tokio::test]
#[serial]
async fn test_duplicate_id_fails() {
    let Some(repo) = test_repo().await else {
        return;
    };

    let sub = Subscription::new("Netflix", 500, Uuid::new_v4(), date("2024-01-01"), None);
    repo.create(&sub).await.unwrap();
    assert!(matches!(
        repo.create(&sub).await,
        Err(RepoError::Conflict(id)) if id == sub.id
    ));
}

#[tokio::test]
#[serial]
async fn test_total_cost_matches_in_memory_semantics() {
    let Some(repo) = test_repo().await else {
        return;
    };

    let user = Uuid::new_v4();
    let subs = [
        Subscription::new("Netflix", 500, user, date("2024-01-01"), None),
        Subscription::new("Spotify", 300, user, date("2023-06-01"), Some(date("2023-12-31"))),
        Subscription::new("YouTube", 200, Uuid::new_v4(), date("2024-03-01"), Some(date("2024-09-01"))),
    ];
    for sub in &subs {
        repo.create(sub).await.unwrap();
    }

    assert_eq!(repo.total_cost(&CostFilter::default()).await.unwrap(), 1000);

    let filters = [
        CostFilter {
            user_id: Some(user),
            ..Default::default()
        },
        CostFilter {
            service_name: Some("SPOT".to_string()),
            ..Default::default()
        },
        CostFilter {
            from: Some(date("2024-01-01")),
            to: Some(date("2023-01-01")),
            ..Default::default()
        },
        CostFilter {
            service_name: Some("%".to_string()),
            ..Default::default()
        },
        CostFilter {
            service_name: Some("N_tflix".to_string()),
            ..Default::default()
        },
        CostFilter {
            service_name: Some("flix".to_string()),
            ..Default::default()
        },
    ];
    let expected = [800, 300, 500, 0, 0, 500];

    let memory = InMemorySubscriptionRepository::new();
    for sub in &subs {
        memory.create(sub).await.unwrap();
    }

    for (filter, expected) in filters.iter().zip(expected) {
        assert_eq!(repo.total_cost(filter).await.unwrap(), expected, "{:?}", filter);
        assert_eq!(memory.total_cost(filter).await.unwrap(), expected, "{:?}", filter);
    }
}
