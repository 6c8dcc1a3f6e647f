use serde::Serialize;

/// Score of a graded attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Points {
    maximum: i64,
    achieved: i64,
}

impl Points {
    #[must_use]
    pub const fn new(maximum: i64, achieved: i64) -> Self {
        Self { maximum, achieved }
    }

    /// Points stored as two nullable columns; a score needs both.
    #[must_use]
    pub const fn from_parts(maximum: Option<i64>, achieved: Option<i64>) -> Option<Self> {
        match (maximum, achieved) {
            (Some(maximum), Some(achieved)) => Some(Self::new(maximum, achieved)),
            _ => None,
        }
    }

    #[must_use]
    pub const fn maximum(&self) -> i64 {
        self.maximum
    }

    #[must_use]
    pub const fn achieved(&self) -> i64 {
        self.achieved
    }
}
