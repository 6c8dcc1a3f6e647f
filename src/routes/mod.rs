pub mod grading;
pub mod student;
