pub mod export;

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::AppError;
use crate::models::{Member, MemberFilter, MemberSignup};
use crate::remote::RemoteRegistry;
use crate::store::{MEMBERS_KEY, SnapshotStore};

/// Outcome of the most recent remote exchange. Push and load failures are
/// swallowed (the local snapshot stays authoritative) but they are visible
/// here instead of disappearing into the log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SyncStatus {
    Never,
    Ok { at: String },
    Failed { at: String, reason: String },
}

/// The ordered list of community members, reconciled between the local
/// snapshot store and the remote registry document.
///
/// Mutations update memory first, then write through to the snapshot store,
/// then push the full list remotely as a best-effort background task.
pub struct MemberRegistry {
    store: SnapshotStore,
    remote: Arc<dyn RemoteRegistry>,
    members: RwLock<Vec<Member>>,
    last_sync: Arc<RwLock<SyncStatus>>,
}

impl MemberRegistry {
    pub fn new(store: SnapshotStore, remote: Arc<dyn RemoteRegistry>) -> Self {
        Self {
            store,
            remote,
            members: RwLock::new(Vec::new()),
            last_sync: Arc::new(RwLock::new(SyncStatus::Never)),
        }
    }

    /// Refreshes from the remote registry. On success the local snapshot is
    /// overwritten; on any remote failure the last local snapshot (or the
    /// empty list) is used instead. Remote failures never reach the caller.
    pub async fn load(&self) -> Result<Vec<Member>, AppError> {
        match self.remote.fetch_all().await {
            Ok(list) => {
                self.store.write(MEMBERS_KEY, &list).await?;
                *self.members.write().await = list.clone();
                *self.last_sync.write().await = SyncStatus::Ok {
                    at: Utc::now().to_rfc3339(),
                };
                Ok(list)
            }
            Err(err) => {
                warn!("remote registry unavailable, using local snapshot: {}", err);
                *self.last_sync.write().await = SyncStatus::Failed {
                    at: Utc::now().to_rfc3339(),
                    reason: err.to_string(),
                };
                let list = self
                    .store
                    .read::<Member>(MEMBERS_KEY)
                    .await?
                    .unwrap_or_default();
                *self.members.write().await = list.clone();
                Ok(list)
            }
        }
    }

    /// Appends a validated signup. The id is derived from the current time
    /// in milliseconds and bumped past any existing id on collision.
    pub async fn add(&self, signup: MemberSignup) -> Result<Member, AppError> {
        let (member, snapshot) = {
            let mut members = self.members.write().await;
            let member = signup.into_member(next_id(&members));
            members.push(member.clone());
            (member, members.clone())
        };

        self.store.write(MEMBERS_KEY, &snapshot).await?;
        info!("registered member {} ({})", member.id, member.email);
        self.push_remote(snapshot);
        Ok(member)
    }

    /// Removes the member with the given id. Deleting an unknown id is a
    /// no-op and does not touch the stores.
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let (removed, snapshot) = {
            let mut members = self.members.write().await;
            let before = members.len();
            members.retain(|m| m.id != id);
            (members.len() != before, members.clone())
        };

        if removed {
            self.store.write(MEMBERS_KEY, &snapshot).await?;
            info!("removed member {}", id);
            self.push_remote(snapshot);
        }
        Ok(removed)
    }

    /// Pure projection; no persistence effect.
    pub async fn filter(&self, criteria: &MemberFilter) -> Vec<Member> {
        self.members
            .read()
            .await
            .iter()
            .filter(|m| criteria.matches(m))
            .cloned()
            .collect()
    }

    pub async fn list(&self) -> Vec<Member> {
        self.members.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.members.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.members.read().await.is_empty()
    }

    pub async fn sync_status(&self) -> SyncStatus {
        self.last_sync.read().await.clone()
    }

    /// Best-effort replacement of the remote document. The local mutation
    /// is already persisted; the outcome here only moves the sync status.
    fn push_remote(&self, snapshot: Vec<Member>) {
        let remote = Arc::clone(&self.remote);
        let last_sync = Arc::clone(&self.last_sync);
        tokio::spawn(async move {
            match remote.replace_all(&snapshot).await {
                Ok(()) => {
                    *last_sync.write().await = SyncStatus::Ok {
                        at: Utc::now().to_rfc3339(),
                    };
                }
                Err(err) => {
                    warn!("best-effort remote push failed: {}", err);
                    *last_sync.write().await = SyncStatus::Failed {
                        at: Utc::now().to_rfc3339(),
                        reason: err.to_string(),
                    };
                }
            }
        });
    }
}

fn next_id(members: &[Member]) -> i64 {
    let mut id = Utc::now().timestamp_millis();
    while members.iter().any(|m| m.id == id) {
        id += 1;
    }
    id
}
