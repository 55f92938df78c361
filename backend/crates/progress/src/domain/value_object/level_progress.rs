//! Level Progress Value Object
//!
//! レベルごとのクリア状況（真偽値の並び）。
//!
//! ## 保存形式 (v1)
//! - `t` = クリア済み, `f` = 未クリア
//! - `,` 区切り、空白なし: `"f,f,t,f"`
//! - 空の並びは空文字列 `""`
//! - それ以外のトークンはすべてデコードエラー

use serde::Serialize;
use thiserror::Error;

const COMPLETED_TOKEN: &str = "t";
const INCOMPLETE_TOKEN: &str = "f";
const SEPARATOR: char = ',';

/// Error returned when a stored level string is malformed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelDecodeError {
    #[error("Invalid level token {token:?} at index {index}")]
    InvalidToken { index: usize, token: String },
}

/// Ordered level-completion flags
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct LevelProgress(Vec<bool>);

impl LevelProgress {
    pub fn new(levels: Vec<bool>) -> Self {
        Self(levels)
    }

    /// `count` levels, none completed
    pub fn all_incomplete(count: usize) -> Self {
        Self(vec![false; count])
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<bool> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.0.iter().filter(|done| **done).count()
    }

    /// Encode to the storage text format
    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(|done| if *done { COMPLETED_TOKEN } else { INCOMPLETE_TOKEN })
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Decode from the storage text format
    pub fn decode(encoded: &str) -> Result<Self, LevelDecodeError> {
        if encoded.is_empty() {
            return Ok(Self::default());
        }

        encoded
            .split(SEPARATOR)
            .enumerate()
            .map(|(index, token)| match token {
                COMPLETED_TOKEN => Ok(true),
                INCOMPLETE_TOKEN => Ok(false),
                other => Err(LevelDecodeError::InvalidToken {
                    index,
                    token: other.to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl From<Vec<bool>> for LevelProgress {
    fn from(levels: Vec<bool>) -> Self {
        Self(levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        let levels = LevelProgress::new(vec![false, false, true, false]);
        assert_eq!(levels.encode(), "f,f,t,f");
        assert_eq!(LevelProgress::new(vec![true]).encode(), "t");
        assert_eq!(LevelProgress::default().encode(), "");
    }

    #[test]
    fn test_decode() {
        assert_eq!(
            LevelProgress::decode("t,f,t").unwrap().as_slice(),
            &[true, false, true]
        );
        assert!(LevelProgress::decode("").unwrap().is_empty());
    }

    #[test]
    fn test_roundtrip_over_all_short_sequences() {
        for len in 0..=6usize {
            for bits in 0u32..(1 << len) {
                let levels: Vec<bool> = (0..len).map(|i| bits & (1 << i) != 0).collect();
                let progress = LevelProgress::new(levels.clone());
                let decoded = LevelProgress::decode(&progress.encode()).unwrap();
                assert_eq!(decoded.as_slice(), levels.as_slice());
            }
        }
    }

    #[test]
    fn test_decode_rejects_malformed() {
        for bad in ["true", "T", "t,,f", ",", "t, f", " t", "t,", "x", "t;f"] {
            assert!(LevelProgress::decode(bad).is_err(), "{bad:?} should fail");
        }
    }

    #[test]
    fn test_decode_error_reports_position() {
        let err = LevelProgress::decode("t,f,yes").unwrap_err();
        assert_eq!(
            err,
            LevelDecodeError::InvalidToken {
                index: 2,
                token: "yes".to_string()
            }
        );
    }

    #[test]
    fn test_all_incomplete() {
        let levels = LevelProgress::all_incomplete(20);
        assert_eq!(levels.len(), 20);
        assert_eq!(levels.completed_count(), 0);
        assert_eq!(levels.encode().split(',').count(), 20);
    }
}
