pub use gate::GradeReleaseGate;
pub use policy::GradeReleasePolicy;
pub use predicate::{Predicate, TimestampColumn};

mod gate;
mod policy;
mod predicate;
