//! 데이터 수집 오류 타입.

use thiserror::Error;

/// 데이터 수집 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// HTTP 요청 실패
    #[error("HTTP 요청 실패: {0}")]
    Http(#[from] reqwest::Error),

    /// 200 이외의 응답
    #[error("HTTP {status}: {url}")]
    Status { status: u16, url: String },

    /// 제한 시간 초과
    #[error("타임아웃: {0}")]
    Timeout(String),

    /// 응답 파싱 실패
    #[error("파싱 실패: {0}")]
    Parse(String),

    /// 계산에 필요한 데이터 부족
    #[error("데이터 부족: {0}")]
    Insufficient(String),

    /// Yahoo Finance API 오류
    #[error("Yahoo API 오류 ({symbol}): {message}")]
    Yahoo { symbol: String, message: String },
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Parse(err.to_string())
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::Parse(err.to_string())
    }
}

/// 데이터 수집 Result 타입.
pub type Result<T> = std::result::Result<T, DataError>;
