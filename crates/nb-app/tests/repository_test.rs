mod support;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use nb_app::NoticeRepository;
use nb_core::errors::{RepositoryError, ValidationError};
use nb_core::notice::{Category, NoticeFilter, Priority};
use nb_core::ports::ClockPort;
use nb_core::sync::SyncHealth;
use nb_infra::ConnectivityMonitor;
use serde_json::json;

use support::{
    deps, fixed_instant, sample_input, settle, MemoryLocalStore, MemoryRemoteStore, TickingClock,
};

mockall::mock! {
    Clock {}

    impl ClockPort for Clock {
        fn now(&self) -> DateTime<Utc>;
    }
}

struct TestBed {
    local: Arc<MemoryLocalStore>,
    remote: Arc<MemoryRemoteStore>,
    repo: NoticeRepository,
}

fn test_bed(clock: Arc<dyn ClockPort>) -> TestBed {
    let local = Arc::new(MemoryLocalStore::new());
    let remote = Arc::new(MemoryRemoteStore::new());
    let monitor = Arc::new(ConnectivityMonitor::new(true));
    let repo = NoticeRepository::new(deps(
        Arc::clone(&local),
        Arc::clone(&remote),
        monitor,
        clock,
    ));
    TestBed {
        local,
        remote,
        repo,
    }
}

fn fixed_clock() -> Arc<dyn ClockPort> {
    let mut clock = MockClock::new();
    clock.expect_now().return_const(fixed_instant());
    Arc::new(clock)
}

#[tokio::test]
async fn create_commits_locally_and_propagates() {
    let bed = test_bed(fixed_clock());

    let notice = bed
        .repo
        .create(sample_input("Team meeting", "Friday at 10"))
        .await
        .unwrap();
    settle().await;

    assert!(!notice.id.is_empty());
    assert_eq!(notice.created_at, fixed_instant());
    assert_eq!(notice.updated_at, None);
    assert_eq!(bed.local.saved(), vec![notice.clone()]);
    assert_eq!(bed.remote.document(), vec![notice]);
}

#[tokio::test]
async fn create_assigns_unique_ids_and_increasing_timestamps() {
    let bed = test_bed(Arc::new(TickingClock::new()));

    let first = bed.repo.create(sample_input("first", "a")).await.unwrap();
    let second = bed.repo.create(sample_input("second", "b")).await.unwrap();

    assert_ne!(first.id, second.id);
    assert!(second.created_at > first.created_at);
}

#[tokio::test]
async fn create_rejects_blank_fields() {
    let bed = test_bed(fixed_clock());

    let blank_title = bed.repo.create(sample_input("   ", "body")).await;
    let blank_content = bed.repo.create(sample_input("title", "")).await;

    assert_eq!(
        blank_title,
        Err(RepositoryError::Validation(ValidationError::MissingTitle))
    );
    assert_eq!(
        blank_content,
        Err(RepositoryError::Validation(ValidationError::MissingContent))
    );
    assert!(bed.repo.list(&NoticeFilter::default()).await.is_empty());
    assert_eq!(bed.local.save_count(), 0);
}

#[tokio::test]
async fn update_stamps_editor_and_timestamp() {
    let bed = test_bed(fixed_clock());
    let created = bed.repo.create(sample_input("draft", "v1")).await.unwrap();

    let mut edit = sample_input("final", "v2");
    edit.author = None;
    let updated = bed.repo.update(&created.id, edit.clone()).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "final");
    assert_eq!(updated.content, "v2");
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.updated_at, Some(fixed_instant()));
    assert_eq!(updated.modified_by.as_deref(), Some("user_test"));
    // author untouched when the edit does not carry one
    assert_eq!(updated.author, created.author);

    // repeating the same edit under the same clock changes nothing
    let again = bed.repo.update(&created.id, edit).await.unwrap();
    assert_eq!(again, updated);
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let bed = test_bed(fixed_clock());

    let result = bed.repo.update("missing", sample_input("t", "c")).await;

    assert_eq!(
        result,
        Err(RepositoryError::NotFound {
            id: "missing".to_string()
        })
    );
}

#[tokio::test]
async fn delete_removes_everywhere() {
    let bed = test_bed(fixed_clock());
    let notice = bed.repo.create(sample_input("gone soon", "x")).await.unwrap();
    settle().await;

    bed.repo.delete(&notice.id).await.unwrap();
    settle().await;

    assert!(bed.repo.list(&NoticeFilter::default()).await.is_empty());
    assert!(bed.local.saved().is_empty());
    assert!(bed.remote.document().is_empty());

    assert_eq!(
        bed.repo.delete(&notice.id).await,
        Err(RepositoryError::NotFound { id: notice.id })
    );
}

#[tokio::test]
async fn list_filters_and_orders_newest_first() {
    let bed = test_bed(Arc::new(TickingClock::new()));

    let mut urgent = sample_input("Server maintenance", "downtime tonight");
    urgent.category = Category::Urgent;
    urgent.priority = Priority::High;
    bed.repo.create(sample_input("Team meeting", "Friday")).await.unwrap();
    bed.repo.create(urgent).await.unwrap();
    bed.repo.create(sample_input("Lunch menu", "soup")).await.unwrap();

    let all = bed.repo.list(&NoticeFilter::default()).await;
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    assert_eq!(all[0].title, "Lunch menu");

    let urgent_only = bed
        .repo
        .list(&NoticeFilter {
            category: Some(Category::Urgent),
            ..Default::default()
        })
        .await;
    assert_eq!(urgent_only.len(), 1);
    assert_eq!(urgent_only[0].title, "Server maintenance");

    let by_search = bed
        .repo
        .list(&NoticeFilter {
            search: Some("MEETING".to_string()),
            ..Default::default()
        })
        .await;
    assert_eq!(by_search.len(), 1);
    assert_eq!(by_search[0].title, "Team meeting");
}

#[tokio::test]
async fn import_accepts_valid_records_and_skips_malformed_ones() {
    let bed = test_bed(fixed_clock());
    let payload = json!([
        {
            "title": "Kept timestamp",
            "content": "imported",
            "category": "announcement",
            "priority": "high",
            "createdAt": "2023-01-15T08:30:00Z",
            "author": "importer"
        },
        { "title": "No timestamp", "content": "fresh", "category": "general", "priority": "low" },
        { "title": "", "content": "blank title", "category": "general", "priority": "low" },
        { "content": "missing title field" }
    ])
    .to_string();

    let outcome = bed.repo.import_batch(&payload).await.unwrap();
    settle().await;

    assert_eq!(outcome.accepted, 2);
    assert_eq!(outcome.rejected, 2);

    let notices = bed.repo.list(&NoticeFilter::default()).await;
    assert_eq!(notices.len(), 2);
    let kept = notices.iter().find(|n| n.title == "Kept timestamp").unwrap();
    assert_eq!(
        kept.created_at,
        "2023-01-15T08:30:00Z".parse::<DateTime<Utc>>().unwrap()
    );
    let fresh = notices.iter().find(|n| n.title == "No timestamp").unwrap();
    assert_eq!(fresh.created_at, fixed_instant());
    assert_ne!(kept.id, fresh.id);
    assert_eq!(bed.remote.document().len(), 2);
}

#[tokio::test]
async fn import_rejects_payloads_that_are_not_arrays() {
    let bed = test_bed(fixed_clock());

    for payload in ["{\"notices\": []}", "not json at all"] {
        let result = bed.repo.import_batch(payload).await;
        assert!(matches!(
            result,
            Err(RepositoryError::Validation(
                ValidationError::MalformedPayload(_)
            ))
        ));
    }
    assert!(bed.repo.list(&NoticeFilter::default()).await.is_empty());
}

#[tokio::test]
async fn export_then_import_round_trips_the_collection() {
    let bed = test_bed(Arc::new(TickingClock::new()));
    bed.repo.create(sample_input("one", "first body")).await.unwrap();
    bed.repo.create(sample_input("two", "second body")).await.unwrap();

    let exported = bed.repo.export_snapshot().await;

    let other = test_bed(fixed_clock());
    let outcome = other.repo.import_batch(&exported).await.unwrap();
    assert_eq!(outcome.accepted, 2);
    assert_eq!(outcome.rejected, 0);

    let original = bed.repo.list(&NoticeFilter::default()).await;
    let imported = other.repo.list(&NoticeFilter::default()).await;
    for (a, b) in original.iter().zip(&imported) {
        assert_ne!(a.id, b.id);
        assert_eq!(a.title, b.title);
        assert_eq!(a.content, b.content);
        assert_eq!(a.created_at, b.created_at);
    }
}

#[tokio::test]
async fn export_file_name_uses_the_clock_date() {
    let bed = test_bed(fixed_clock());
    assert_eq!(bed.repo.export_file_name(), "notices_2024-05-01.json");
}

#[tokio::test(start_paused = true)]
async fn offline_mutations_propagate_after_reconnection() {
    let monitor = Arc::new(ConnectivityMonitor::new(false));
    let local = Arc::new(MemoryLocalStore::new());
    let remote = Arc::new(
        MemoryRemoteStore::new().respecting_connectivity(Arc::clone(&monitor)),
    );
    let repo = NoticeRepository::new(deps(
        Arc::clone(&local),
        Arc::clone(&remote),
        Arc::clone(&monitor),
        Arc::new(TickingClock::new()),
    ));
    repo.init().await;

    let notice = repo
        .create(sample_input("written offline", "survives the outage"))
        .await
        .unwrap();
    settle().await;

    assert_eq!(local.saved(), vec![notice.clone()]);
    assert!(remote.document().is_empty());
    assert_eq!(*repo.sync_health().borrow(), SyncHealth::Offline);

    monitor.set_online(true);
    tokio::time::sleep(Duration::from_secs(6)).await;
    settle().await;

    assert_eq!(remote.document(), vec![notice]);
    assert_eq!(*repo.sync_health().borrow(), SyncHealth::Synced);
    repo.dispose().await;
}

#[tokio::test]
async fn storage_and_push_failures_degrade_health_without_failing_the_call() {
    let bed = test_bed(fixed_clock());
    bed.local.set_fail_saves(true);
    bed.remote.set_fail_writes(true);

    let notice = bed
        .repo
        .create(sample_input("still accepted", "body"))
        .await
        .unwrap();
    settle().await;

    // the mutation succeeded and the board serves it
    let listed = bed.repo.list(&NoticeFilter::default()).await;
    assert_eq!(listed, vec![notice]);
    assert!(bed.remote.document().is_empty());
    assert_eq!(*bed.repo.sync_health().borrow(), SyncHealth::Degraded);
}
