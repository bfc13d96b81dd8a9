//! 마켓 업데이트 이미지 렌더링.
//!
//! 1080×1080 캔버스에 다음을 그립니다:
//! - 헤더: 제목, 날짜, 시장 분위기, 태그라인
//! - 종목 카드 8개 (2열 그리드)
//! - 하단 3열: F&O 밴 리스트, 52주 신고가, 52주 신저가
//! - 푸터
//!
//! TrueType 글꼴을 읽을 수 없으면 내장 8×8 비트맵 글꼴로 대체합니다.

pub mod card;
pub mod columns;
pub mod error;
pub mod renderer;
pub mod surface;
pub mod typeface;

pub use error::{RenderError, Result};
pub use renderer::{ImageRenderer, RenderInput};
pub use typeface::{FontSet, Typeface};
