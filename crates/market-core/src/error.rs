//! 공통 에러 타입.

use thiserror::Error;

/// 실행 시작 단계의 에러.
///
/// 파이프라인 단계 내부의 실패는 각 크레이트의 에러로 표현되고,
/// 단계 경계에서 `Outcome::Degraded`로 변환됩니다.
#[derive(Debug, Error)]
pub enum DigestError {
    /// 설정 파일을 읽거나 해석할 수 없음
    #[error("설정 에러: {0}")]
    Config(String),
}

impl From<config::ConfigError> for DigestError {
    fn from(err: config::ConfigError) -> Self {
        DigestError::Config(err.to_string())
    }
}

/// 공통 Result 타입.
pub type DigestResult<T> = Result<T, DigestError>;
