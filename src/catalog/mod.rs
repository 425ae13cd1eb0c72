use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::AppError;
use crate::models::{Course, CourseStatus, NewCourseRequest, default_catalog};
use crate::store::{COURSES_KEY, SnapshotStore};

/// The ordered list of courses shown on the public site. Backed only by the
/// snapshot store; there is no remote counterpart.
pub struct CourseCatalog {
    store: SnapshotStore,
    courses: RwLock<Vec<Course>>,
}

impl CourseCatalog {
    pub fn new(store: SnapshotStore) -> Self {
        Self {
            store,
            courses: RwLock::new(Vec::new()),
        }
    }

    /// Loads the catalog from the snapshot store. An absent or corrupt
    /// document installs the default course set.
    pub async fn load(&self) -> Result<Vec<Course>, AppError> {
        let courses = match self.store.read::<Course>(COURSES_KEY).await? {
            Some(list) => list,
            None => {
                info!("seeding default course catalog");
                let defaults = default_catalog();
                self.store.write(COURSES_KEY, &defaults).await?;
                defaults
            }
        };
        *self.courses.write().await = courses.clone();
        Ok(courses)
    }

    pub async fn add(&self, req: NewCourseRequest) -> Result<Course, AppError> {
        let (course, snapshot) = {
            let mut courses = self.courses.write().await;
            let course = Course {
                id: next_id(&courses),
                name: req.name,
                description: req.description,
                start_date: req.start_date,
                duration: req.duration,
                level: req.level,
                status: req.status,
                price: req.price,
                icon: req.icon,
                register_link: req.register_link,
            };
            courses.push(course.clone());
            (course, courses.clone())
        };

        self.store.write(COURSES_KEY, &snapshot).await?;
        info!("added course {} ({})", course.id, course.name);
        Ok(course)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let (removed, snapshot) = {
            let mut courses = self.courses.write().await;
            let before = courses.len();
            courses.retain(|c| c.id != id);
            (courses.len() != before, courses.clone())
        };

        if removed {
            self.store.write(COURSES_KEY, &snapshot).await?;
            info!("removed course {}", id);
        }
        Ok(removed)
    }

    /// Transitions are free-form; any status may replace any other.
    pub async fn set_status(
        &self,
        id: i64,
        status: CourseStatus,
    ) -> Result<Option<Course>, AppError> {
        let (updated, snapshot) = {
            let mut courses = self.courses.write().await;
            let updated = courses.iter_mut().find(|c| c.id == id).map(|course| {
                course.status = status;
                course.clone()
            });
            (updated, courses.clone())
        };

        if updated.is_some() {
            self.store.write(COURSES_KEY, &snapshot).await?;
        }
        Ok(updated)
    }

    pub async fn list(&self) -> Vec<Course> {
        self.courses.read().await.clone()
    }
}

fn next_id(courses: &[Course]) -> i64 {
    let mut id = Utc::now().timestamp_millis();
    while courses.iter().any(|c| c.id == id) {
        id += 1;
    }
    id
}
