//! # Market Core
//!
//! 일일 마켓 업데이트 파이프라인의 핵심 도메인 타입을 제공합니다.
//!
//! 이 크레이트는 파이프라인 전반에서 사용되는 기본 타입을 제공합니다:
//! - 종목 시세, F&O 밴 리스트, 52주 신고가/신저가 레코드
//! - 수집 결과를 나타내는 `Outcome` (수집 성공 / 대체값)
//! - 값/변동률 표시 형식
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod format;
pub mod logging;

pub use crate::config::*;
pub use domain::*;
pub use error::*;
pub use format::{format_change, format_value};
pub use logging::*;
