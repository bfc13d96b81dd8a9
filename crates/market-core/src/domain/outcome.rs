//! 수집 결과 타입.
//!
//! 외부 소스 호출은 실패해도 실행을 중단하지 않습니다. 대신 `Degraded`로
//! 사유를 남기고, 표시 단계에서만 대체값("N/A", 빈 목록 등)으로 바뀝니다.

use serde::Serialize;
use std::fmt::Display;

/// 수집 성공 또는 대체값 사용 여부를 나타내는 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Outcome<T> {
    /// 소스에서 정상 수집됨
    Fetched(T),
    /// 수집 실패, 대체값 사용
    Degraded {
        /// 실패 사유
        reason: String,
    },
}

impl<T> Outcome<T> {
    /// 수집 성공 결과를 생성합니다.
    pub fn fetched(value: T) -> Self {
        Self::Fetched(value)
    }

    /// 대체값 결과를 생성합니다.
    pub fn degraded(reason: impl Into<String>) -> Self {
        Self::Degraded {
            reason: reason.into(),
        }
    }

    /// `Result`를 결과로 변환합니다. 에러 메시지가 사유가 됩니다.
    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Fetched(value),
            Err(e) => Self::degraded(e.to_string()),
        }
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    /// 수집된 값을 참조로 반환합니다.
    pub fn as_fetched(&self) -> Option<&T> {
        match self {
            Self::Fetched(value) => Some(value),
            Self::Degraded { .. } => None,
        }
    }

    /// 대체 사유를 반환합니다.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Fetched(_) => None,
            Self::Degraded { reason } => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Fetched(value) => Outcome::Fetched(f(value)),
            Self::Degraded { reason } => Outcome::Degraded { reason },
        }
    }

    /// 로그/리포트용 짧은 상태 문자열.
    pub fn status_label(&self) -> &'static str {
        match self {
            Self::Fetched(_) => "fetched",
            Self::Degraded { .. } => "degraded",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result() {
        let ok: Outcome<u32> = Outcome::from_result(Ok::<_, String>(3));
        assert_eq!(ok.as_fetched(), Some(&3));
        assert!(ok.reason().is_none());

        let err: Outcome<u32> = Outcome::from_result(Err("timeout"));
        assert!(!err.is_fetched());
        assert_eq!(err.reason(), Some("timeout"));
    }

    #[test]
    fn test_map_keeps_reason() {
        let degraded: Outcome<u32> = Outcome::degraded("no file");
        let mapped = degraded.map(|v| v * 2);
        assert_eq!(mapped.reason(), Some("no file"));

        let fetched = Outcome::fetched(2).map(|v| v * 2);
        assert_eq!(fetched, Outcome::Fetched(4));
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_value(Outcome::fetched(1)).unwrap();
        assert_eq!(json["status"], "fetched");
        assert_eq!(json["value"], 1);

        let json = serde_json::to_value(Outcome::<u32>::degraded("x")).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["value"]["reason"], "x");
    }
}
