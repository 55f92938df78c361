//! User Name Value Object
//!
//! ユーザー名はログインとランキング表示に使われる**公開ハンドル**。
//!
//! ## 設計方針
//! - 大文字・小文字は区別する（"Alice" と "alice" は別アカウント）
//! - 正規化は行わない。入力された文字列がそのまま保存される
//! - 一意性はストレージ側の UNIQUE 制約で最終的に保証する
//!
//! ## 不変条件
//! - 長さ: 1〜100文字
//! - 空白のみは禁止、先頭・末尾の空白も禁止
//! - 制御文字禁止

use serde::Serialize;
use std::fmt;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 100;

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// User name is empty or whitespace only
    Empty,

    /// User name is too long (maximum: USER_NAME_MAX_LENGTH)
    TooLong { length: usize, max: usize },

    /// User name has leading or trailing whitespace
    SurroundingWhitespace,

    /// User name contains a control character
    ControlCharacter { position: usize },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "User name cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "User name is too long ({length} chars, maximum {max})")
            }
            Self::SurroundingWhitespace => {
                write!(f, "User name cannot start or end with whitespace")
            }
            Self::ControlCharacter { position } => {
                write!(f, "User name contains a control character at position {position}")
            }
        }
    }
}

impl std::error::Error for UserNameError {}

/// Validated user name (case-sensitive)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Create a new UserName from raw input
    pub fn new(input: impl Into<String>) -> Result<Self, UserNameError> {
        let input = input.into();
        Self::validate(&input)?;
        Ok(Self(input))
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    fn validate(input: &str) -> Result<(), UserNameError> {
        if input.trim().is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = input.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if input.trim() != input {
            return Err(UserNameError::SurroundingWhitespace);
        }

        if let Some(position) = input.chars().position(char::is_control) {
            return Err(UserNameError::ControlCharacter { position });
        }

        Ok(())
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.0
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(UserName::new("alice").is_ok());
        assert!(UserName::new("a").is_ok());
        assert!(UserName::new("Player One").is_ok());
        assert!(UserName::new("ゲーマー").is_ok());
    }

    #[test]
    fn test_case_is_preserved_and_significant() {
        let upper = UserName::new("Alice").unwrap();
        let lower = UserName::new("alice").unwrap();
        assert_eq!(upper.as_str(), "Alice");
        assert_ne!(upper, lower);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(UserName::new(""), Err(UserNameError::Empty));
        assert_eq!(UserName::new("   "), Err(UserNameError::Empty));
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(
            UserName::new(" alice"),
            Err(UserNameError::SurroundingWhitespace)
        );
        assert_eq!(
            UserName::new("alice\t"),
            Err(UserNameError::SurroundingWhitespace)
        );
    }

    #[test]
    fn test_length_limit() {
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
        assert!(matches!(
            UserName::new("a".repeat(USER_NAME_MAX_LENGTH + 1)),
            Err(UserNameError::TooLong { length: 101, max: 100 })
        ));
    }

    #[test]
    fn test_control_character() {
        assert_eq!(
            UserName::new("ali\u{0}ce"),
            Err(UserNameError::ControlCharacter { position: 3 })
        );
    }

    #[test]
    fn test_display_and_serialize() {
        let name = UserName::new("bob").unwrap();
        assert_eq!(name.to_string(), "bob");
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"bob\"");
    }
}
