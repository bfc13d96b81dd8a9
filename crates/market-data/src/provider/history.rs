//! 일봉 종가 Provider trait과 복합 Provider.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{DataError, Result};

/// 일봉 종가 시계열 Provider.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// 최근 `bars`개 일봉의 유효 종가 (오래된 순).
    async fn daily_closes(&self, symbol: &str, bars: usize) -> Result<Vec<Decimal>>;

    /// Provider 이름 (로그용).
    fn name(&self) -> &str;
}

/// 복합 종가 Provider.
///
/// 등록된 Provider를 순서대로 시도하여 종가가 2개 이상인 첫 결과를 반환합니다.
pub struct CompositeHistoryProvider {
    providers: Vec<Box<dyn HistoryProvider>>,
}

impl CompositeHistoryProvider {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Provider 추가.
    pub fn add_provider(&mut self, provider: Box<dyn HistoryProvider>) {
        self.providers.push(provider);
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for CompositeHistoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryProvider for CompositeHistoryProvider {
    async fn daily_closes(&self, symbol: &str, bars: usize) -> Result<Vec<Decimal>> {
        let mut last_error = None;

        for provider in &self.providers {
            match provider.daily_closes(symbol, bars).await {
                Ok(closes) if closes.len() >= 2 => {
                    debug!(provider = provider.name(), symbol, count = closes.len(), "종가 수신");
                    return Ok(closes);
                }
                Ok(closes) => {
                    warn!(provider = provider.name(), symbol, count = closes.len(), "유효 종가 부족");
                    last_error = Some(DataError::Insufficient(format!(
                        "{symbol}: 유효 종가 {}개",
                        closes.len()
                    )));
                }
                Err(e) => {
                    warn!(provider = provider.name(), symbol, error = %e, "종가 조회 실패");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| DataError::Insufficient(format!("{symbol}: 등록된 Provider 없음"))))
    }

    fn name(&self) -> &str {
        "composite"
    }
}
