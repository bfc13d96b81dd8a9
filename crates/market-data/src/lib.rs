//! 시장 데이터 수집.
//!
//! 이 crate는 다음을 제공합니다:
//! - 종목 시세 수집 (Yahoo Finance 일봉, 실시간 시세 페이지)
//! - 거래소 아카이브 CSV 수집 (F&O 밴 리스트, 52주 신고가/신저가)
//! - 최근 영업일을 거슬러 올라가며 첫 성공 결과를 찾는 스캔 유틸리티
//!
//! 모든 수집 함수는 실패해도 에러를 반환하지 않고 `Outcome::Degraded`로
//! 사유를 남깁니다.

pub mod archive;
pub mod error;
pub mod provider;
pub mod quotes;
pub mod scan;

pub use archive::{parse_ban_list, parse_extremes, ArchiveClient};
pub use error::{DataError, Result};
pub use provider::{
    ChartApiProvider, CompositeHistoryProvider, HistoryProvider, LivePageQuoteFetcher,
    LiveQuoteSource, YahooHistoryProvider,
};
pub use quotes::MarketDataFetcher;
pub use scan::{first_success, trailing_dates};
