use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use clubhub::models::Member;
use clubhub::registry::MemberRegistry;
use clubhub::remote::{RemoteError, RemoteRegistry};
use clubhub::services::PollScheduler;
use clubhub::store::SnapshotStore;
use sqlx::SqlitePool;

async fn memory_store() -> SnapshotStore {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create database");

    sqlx::query(
        r#"
        CREATE TABLE snapshots (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create snapshots table");

    SnapshotStore::new(pool)
}

struct FixedRemote {
    members: Mutex<Vec<Member>>,
}

#[async_trait]
impl RemoteRegistry for FixedRemote {
    async fn fetch_all(&self) -> Result<Vec<Member>, RemoteError> {
        Ok(self.members.lock().unwrap().clone())
    }

    async fn replace_all(&self, members: &[Member]) -> Result<(), RemoteError> {
        *self.members.lock().unwrap() = members.to_vec();
        Ok(())
    }
}

fn sample_member(id: i64) -> Member {
    Member {
        id,
        first_name: "Poll".to_string(),
        last_name: "Watcher".to_string(),
        email: "poll@example.edu".to_string(),
        phone: None,
        year: "1st Year".to_string(),
        department: "CSE".to_string(),
        interests: "Web Development".to_string(),
        motivation: "Testing".to_string(),
        newsletter: false,
        join_date: "2026-08-01T10:00:00+00:00".to_string(),
        status: "active".to_string(),
    }
}

#[tokio::test]
async fn scheduler_initialization() {
    let remote = Arc::new(FixedRemote {
        members: Mutex::new(Vec::new()),
    });
    let registry = Arc::new(MemberRegistry::new(memory_store().await, remote));

    let (_scheduler, receiver) = PollScheduler::new(registry, 10);
    assert_eq!(*receiver.borrow(), 0);
}

#[tokio::test]
async fn poll_notifies_observers_when_content_changes() {
    let remote = Arc::new(FixedRemote {
        members: Mutex::new(Vec::new()),
    });
    let registry = Arc::new(MemberRegistry::new(memory_store().await, remote.clone()));
    registry.load().await.expect("initial load");

    let (scheduler, mut changes) = PollScheduler::new(registry, 1);
    let poller = tokio::spawn(scheduler.start());

    // A second device registers a member directly in the remote document.
    *remote.members.lock().unwrap() = vec![sample_member(7)];

    tokio::time::timeout(Duration::from_secs(5), changes.changed())
        .await
        .expect("poller never noticed the change")
        .expect("poller dropped the channel");
    assert_eq!(*changes.borrow(), 1);

    poller.abort();
}

#[tokio::test]
async fn poll_stays_quiet_when_content_is_unchanged() {
    let remote = Arc::new(FixedRemote {
        members: Mutex::new(vec![sample_member(7)]),
    });
    let registry = Arc::new(MemberRegistry::new(memory_store().await, remote));
    registry.load().await.expect("initial load");

    let (scheduler, changes) = PollScheduler::new(registry, 1);
    let poller = tokio::spawn(scheduler.start());

    // Let a few polls run; the list never changes, so no notification.
    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert!(!changes.has_changed().unwrap());

    poller.abort();
}
