pub use attempt::{Attempt, AttemptSnapshot, GradeState};

mod attempt;
