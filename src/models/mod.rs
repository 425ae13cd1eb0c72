pub mod course;
pub mod member;

pub use course::{Course, CourseStatus, NewCourseRequest, UpdateCourseStatusRequest, default_catalog};
pub use member::{MEMBER_STATUS_ACTIVE, Member, MemberFilter, MemberSignup};
