use std::sync::Arc;

use sqlx::SqlitePool;

use crate::catalog::CourseCatalog;
use crate::registry::MemberRegistry;
use crate::relay::FormRelay;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub catalog: Arc<CourseCatalog>,
    pub registry: Arc<MemberRegistry>,
    pub relay: Arc<FormRelay>,
    pub admin_token: String,
}
