use clubhub::catalog::CourseCatalog;
use clubhub::models::{CourseStatus, NewCourseRequest};
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

fn new_course(name: &str) -> NewCourseRequest {
    NewCourseRequest {
        name: name.to_string(),
        description: "A brand new course".to_string(),
        start_date: "2026-09-01".to_string(),
        duration: 6,
        level: "Intermediate".to_string(),
        status: CourseStatus::StartingSoon,
        price: 250,
        icon: "fas fa-laptop-code".to_string(),
        register_link: "#".to_string(),
    }
}

#[tokio::test]
async fn empty_store_seeds_default_catalog() {
    let store = memory_store().await;
    let catalog = CourseCatalog::new(store.clone());

    let courses = catalog.load().await.unwrap();
    assert_eq!(courses.len(), 3);
    assert_eq!(
        courses.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    // Reloading must not seed twice.
    let again = CourseCatalog::new(store);
    assert_eq!(again.load().await.unwrap().len(), 3);
}

#[tokio::test]
async fn seed_data_keeps_sentinel_values() {
    let catalog = CourseCatalog::new(memory_store().await);
    let courses = catalog.load().await.unwrap();

    // Duration 0 means open-ended, price 0 means free; both survive as-is.
    assert_eq!(courses[0].duration, 3);
    assert_eq!(courses[0].price, 0);
    assert_eq!(courses[1].duration, 0);
    assert_eq!(courses[1].price, 100);
    assert_eq!(courses[0].status, CourseStatus::Completed);
    assert_eq!(courses[1].status, CourseStatus::StartingSoon);
}

#[tokio::test]
async fn added_courses_persist_across_reload() {
    let store = memory_store().await;

    let catalog = CourseCatalog::new(store.clone());
    catalog.load().await.unwrap();
    let added = catalog.add(new_course("Rust for Club Projects")).await.unwrap();
    assert!(added.id > 3);

    let reopened = CourseCatalog::new(store);
    let courses = reopened.load().await.unwrap();
    assert_eq!(courses.len(), 4);
    assert!(courses.iter().any(|c| c.id == added.id));
}

#[tokio::test]
async fn delete_removes_course_once() {
    let store = memory_store().await;
    let catalog = CourseCatalog::new(store.clone());
    catalog.load().await.unwrap();

    assert!(catalog.delete(1).await.unwrap());
    assert!(!catalog.delete(1).await.unwrap());
    assert_eq!(catalog.list().await.len(), 2);

    let reopened = CourseCatalog::new(store);
    assert_eq!(reopened.load().await.unwrap().len(), 2);
}

#[tokio::test]
async fn status_transitions_are_free_form() {
    let catalog = CourseCatalog::new(memory_store().await);
    catalog.load().await.unwrap();

    // Any status may replace any other, including moving a completed
    // course back to starting-soon.
    let started = catalog.set_status(1, CourseStatus::Started).await.unwrap();
    assert_eq!(started.unwrap().status, CourseStatus::Started);

    let reopened = catalog
        .set_status(1, CourseStatus::StartingSoon)
        .await
        .unwrap();
    assert_eq!(reopened.unwrap().status, CourseStatus::StartingSoon);

    assert!(catalog.set_status(99, CourseStatus::Completed).await.unwrap().is_none());
}

#[tokio::test]
async fn corrupt_catalog_snapshot_reseeds_defaults() {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create database");
    sqlx::query("CREATE TABLE snapshots (key TEXT PRIMARY KEY, value TEXT NOT NULL)")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO snapshots (key, value) VALUES ('courses', '{broken')")
        .execute(&pool)
        .await
        .unwrap();

    let catalog = CourseCatalog::new(SnapshotStore::new(pool));
    assert_eq!(catalog.load().await.unwrap().len(), 3);
}
