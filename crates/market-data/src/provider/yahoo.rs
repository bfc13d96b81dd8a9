//! `yahoo_finance_api` 커넥터 기반 종가 Provider.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::debug;
use yahoo_finance_api as yahoo;

use super::history::HistoryProvider;
use crate::error::{DataError, Result};

/// Yahoo Finance 종가 Provider.
pub struct YahooHistoryProvider {
    connector: yahoo::YahooConnector,
    timeout: Duration,
}

impl YahooHistoryProvider {
    pub fn new(timeout: Duration) -> Result<Self> {
        let connector = yahoo::YahooConnector::new().map_err(|e| DataError::Yahoo {
            symbol: String::new(),
            message: format!("커넥터 생성 실패: {}", e),
        })?;

        Ok(Self { connector, timeout })
    }
}

#[async_trait]
impl HistoryProvider for YahooHistoryProvider {
    async fn daily_closes(&self, symbol: &str, bars: usize) -> Result<Vec<Decimal>> {
        // 주말/휴장일을 고려하여 bars일 범위를 조회
        let range = format!("{}d", bars.max(2));

        let response = tokio::time::timeout(
            self.timeout,
            self.connector.get_quote_range(symbol, "1d", &range),
        )
        .await
        .map_err(|_| DataError::Timeout(format!("Yahoo {symbol}")))?
        .map_err(|e| DataError::Yahoo {
            symbol: symbol.to_string(),
            message: format!("{}", e),
        })?;

        let quotes = response.quotes().map_err(|e| DataError::Yahoo {
            symbol: symbol.to_string(),
            message: format!("{}", e),
        })?;

        debug!("{} 캔들 {} 개 수신", symbol, quotes.len());

        Ok(quotes
            .iter()
            .filter(|q| q.close.is_finite() && q.close > 0.0)
            .filter_map(|q| Decimal::from_f64_retain(q.close))
            .collect())
    }

    fn name(&self) -> &str {
        "yahoo_connector"
    }
}
