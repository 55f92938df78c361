//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum shared by every layer of the service.
//! Each kind corresponds to one failure category of the progress core and
//! maps onto exactly one HTTP status at the boundary.

use serde::Serialize;

/// エラー種別の列挙体
///
/// コアが返しうる失敗カテゴリを定義します。
/// HTTP 層はこの分類だけを見てステータスコードを決定します。
///
/// ## Notes
/// * `Integrity` と `Internal` はどちらも 500 ですが、
///   保存データの破損を呼び出し側のミスと区別するため別の種別にしています。
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::NotFound;
/// assert_eq!(kind.status_code(), 404);
/// assert_eq!(kind.as_str(), "Not Found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400 - 呼び出し側の入力が不正（負のスコア、null のレベル列、空の資格情報など）
    InvalidInput,
    /// 401 - 認証失敗（どのフィールドが誤りかは明かさない）
    AuthFailure,
    /// 404 - 参照先のユーザー／レコードが存在しない
    NotFound,
    /// 409 - 一意制約との競合（ユーザー名の重複）
    Conflict,
    /// 500 - 保存データのデコード失敗（データ破損）
    Integrity,
    /// 500 - その他の内部エラー
    Internal,
    /// 503 - 永続化層に到達できない
    Unavailable,
}

impl ErrorKind {
    /// HTTP ステータスコードを取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::InvalidInput.status_code(), 400);
    /// assert_eq!(ErrorKind::Unavailable.status_code(), 503);
    /// ```
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::InvalidInput => 400,
            ErrorKind::AuthFailure => 401,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::Integrity => 500,
            ErrorKind::Internal => 500,
            ErrorKind::Unavailable => 503,
        }
    }

    /// ユーザー向けの文字列表現を取得
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "Invalid Input",
            ErrorKind::AuthFailure => "Unauthorized",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::Integrity => "Data Integrity Error",
            ErrorKind::Internal => "Internal Server Error",
            ErrorKind::Unavailable => "Service Unavailable",
        }
    }

    /// 機械可読なコード（レスポンスの `code` フィールド用）
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::AuthFailure => "AUTH_FAILURE",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::Integrity => "INTEGRITY",
            ErrorKind::Internal => "INTERNAL",
            ErrorKind::Unavailable => "UNAVAILABLE",
        }
    }

    /// サーバー側のエラーかどうかを判定
    ///
    /// 5xx系のエラーは `true` を返します。
    /// これらのエラーはログに記録すべきです。
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::InvalidInput.status_code(), 400);
        assert_eq!(ErrorKind::AuthFailure.status_code(), 401);
        assert_eq!(ErrorKind::NotFound.status_code(), 404);
        assert_eq!(ErrorKind::Conflict.status_code(), 409);
        assert_eq!(ErrorKind::Integrity.status_code(), 500);
        assert_eq!(ErrorKind::Internal.status_code(), 500);
        assert_eq!(ErrorKind::Unavailable.status_code(), 503);
    }

    #[test]
    fn test_integrity_is_distinct_from_internal() {
        assert_ne!(ErrorKind::Integrity, ErrorKind::Internal);
        assert_ne!(ErrorKind::Integrity.code(), ErrorKind::Internal.code());
        assert_ne!(ErrorKind::Integrity.as_str(), ErrorKind::Internal.as_str());
    }

    #[test]
    fn test_is_server_error() {
        assert!(!ErrorKind::InvalidInput.is_server_error());
        assert!(!ErrorKind::NotFound.is_server_error());
        assert!(ErrorKind::Integrity.is_server_error());
        assert!(ErrorKind::Unavailable.is_server_error());
    }

    #[test]
    fn test_serialize_code() {
        let json = serde_json::to_string(&ErrorKind::InvalidInput).unwrap();
        assert_eq!(json, "\"INVALID_INPUT\"");
    }
}
