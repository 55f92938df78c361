//! Score Value Object
//!
//! プレイヤーのスコア。負の値は存在しない。
//!
//! ## 不変条件
//! - 0 以上の 64bit 整数
//! - 保存済みスコアは単調非減少（更新判定は [`Score::exceeds`]）

use serde::Serialize;
use thiserror::Error;

/// Error returned when a score value is out of range
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("Score cannot be negative (got {0})")]
    Negative(i64),
}

/// Non-negative score value
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct Score(i64);

impl Score {
    /// Initial score of a freshly created account
    pub const ZERO: Score = Score(0);

    pub fn new(value: i64) -> Result<Self, ScoreError> {
        if value < 0 {
            return Err(ScoreError::Negative(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Strictly greater than `current`; equal scores never replace
    #[inline]
    pub fn exceeds(&self, current: Score) -> bool {
        self.0 > current.0
    }
}

impl TryFrom<i64> for Score {
    type Error = ScoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for i64 {
    fn from(score: Score) -> Self {
        score.0
    }
}
