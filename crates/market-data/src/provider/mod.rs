//! 시세 Provider 모듈.
//!
//! ## 일봉 종가 Provider
//! - `YahooHistoryProvider`: `yahoo_finance_api` 커넥터
//! - `ChartApiProvider`: Yahoo v8 chart JSON 엔드포인트 직접 호출 (기본 URL 설정 가능)
//! - `CompositeHistoryProvider`: 위 Provider들을 순서대로 시도
//!
//! ## 실시간 시세
//! - `LivePageQuoteFetcher`: 웹 페이지의 `__NEXT_DATA__` 스크립트에서 시세 추출

pub mod chart_api;
pub mod history;
pub mod live_quote;
pub mod yahoo;

pub use chart_api::ChartApiProvider;
pub use history::{CompositeHistoryProvider, HistoryProvider};
pub use live_quote::{extract_quote, LivePageQuoteFetcher, LiveQuoteSource};
pub use yahoo::YahooHistoryProvider;
