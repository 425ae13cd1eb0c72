use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CourseStatus {
    Completed,
    Started,
    StartingSoon,
}

/// A catalog entry. Duration 0 is the documented "open-ended" sentinel and
/// price 0 means free; both are stored as plain integers and left to the
/// consumer to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub duration: u32,
    pub level: String,
    pub status: CourseStatus,
    pub price: u32,
    pub icon: String,
    pub register_link: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseRequest {
    pub name: String,
    pub description: String,
    pub start_date: String,
    #[serde(default)]
    pub duration: u32,
    pub level: String,
    pub status: CourseStatus,
    #[serde(default)]
    pub price: u32,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_register_link")]
    pub register_link: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCourseStatusRequest {
    pub status: CourseStatus,
}

fn default_icon() -> String {
    "fas fa-code".to_string()
}

fn default_register_link() -> String {
    "#".to_string()
}

/// The catalog installed on first run, before any admin edits.
pub fn default_catalog() -> Vec<Course> {
    vec![
        Course {
            id: 1,
            name: "Tech HTML".to_string(),
            description: "Master the fundamentals of HTML5.".to_string(),
            start_date: "2025-09-30".to_string(),
            duration: 3,
            level: "Beginner".to_string(),
            status: CourseStatus::Completed,
            price: 0,
            icon: "fas fa-code".to_string(),
            register_link: "#".to_string(),
        },
        Course {
            id: 2,
            name: "Programming with C".to_string(),
            description: "Learn the fundamentals of C programming language. Master variables, functions, arrays and pointers. Course runs until students understand the topic.".to_string(),
            start_date: "2025-11-05".to_string(),
            duration: 0,
            level: "Beginner".to_string(),
            status: CourseStatus::StartingSoon,
            price: 100,
            icon: "fas fa-terminal".to_string(),
            register_link: "https://forms.gle/6X8Z77YwKmVVE1VRA".to_string(),
        },
        Course {
            id: 3,
            name: "Python Basics and Beyond".to_string(),
            description: "Learn the basics of Python, one of the most powerful and beginner-friendly programming languages. This course covers core concepts like variables, loops, functions, and object-oriented programming through hands-on projects.".to_string(),
            start_date: "2025-11-07".to_string(),
            duration: 0,
            level: "Beginner".to_string(),
            status: CourseStatus::StartingSoon,
            price: 100,
            icon: "fas fa-terminal".to_string(),
            register_link: "https://forms.gle/zMUg1FhmkHEVHVcC8".to_string(),
        },
    ]
}
