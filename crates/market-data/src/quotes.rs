//! 종목 시세 수집기.

use tracing::{info, warn};

use market_core::{
    InstrumentConfig, InstrumentQuote, InstrumentSource, MarketConfig, MarketSnapshot, Outcome,
    Quote,
};

use crate::error::{DataError, Result};
use crate::provider::{
    ChartApiProvider, CompositeHistoryProvider, HistoryProvider, LivePageQuoteFetcher,
    LiveQuoteSource, YahooHistoryProvider,
};

/// 설정된 종목들의 시세를 순서대로 수집합니다.
///
/// 한 종목의 실패는 해당 종목만 대체값으로 바꾸며 나머지 수집은 계속됩니다.
pub struct MarketDataFetcher {
    history: Box<dyn HistoryProvider>,
    live: Box<dyn LiveQuoteSource>,
    instruments: Vec<InstrumentConfig>,
    bars: usize,
}

impl MarketDataFetcher {
    pub fn new(
        history: Box<dyn HistoryProvider>,
        live: Box<dyn LiveQuoteSource>,
        instruments: Vec<InstrumentConfig>,
        bars: usize,
    ) -> Self {
        Self {
            history,
            live,
            instruments,
            bars,
        }
    }

    /// 설정으로 기본 Provider 체인을 구성합니다.
    ///
    /// 체인 순서: `yahoo_finance_api` 커넥터 (활성화 시) → chart API.
    pub fn from_config(config: &MarketConfig) -> Result<Self> {
        let mut chain = CompositeHistoryProvider::new();

        if config.use_yahoo_connector {
            match YahooHistoryProvider::new(config.request_timeout()) {
                Ok(provider) => chain.add_provider(Box::new(provider)),
                Err(e) => warn!(error = %e, "Yahoo 커넥터 생성 실패, chart API만 사용"),
            }
        }
        chain.add_provider(Box::new(ChartApiProvider::new(
            config.chart_api_base_url.clone(),
            config.request_timeout(),
        )?));

        let live = LivePageQuoteFetcher::new(
            config.live_quote_url.clone(),
            &config.live_quote_user_agent,
            config.request_timeout(),
        )?;

        Ok(Self::new(
            Box::new(chain),
            Box::new(live),
            config.instruments.clone(),
            config.history_bars,
        ))
    }

    /// 모든 종목의 시세를 수집합니다.
    pub async fn fetch_all(&self) -> MarketSnapshot {
        let mut quotes = Vec::with_capacity(self.instruments.len());

        for instrument in &self.instruments {
            let outcome = Outcome::from_result(self.fetch_one(instrument).await);

            match &outcome {
                Outcome::Fetched(quote) => info!(
                    instrument = %instrument.name,
                    value = %quote.value,
                    change_pct = quote.change_pct,
                    "시세 수집"
                ),
                Outcome::Degraded { reason } => {
                    warn!(instrument = %instrument.name, %reason, "시세 수집 실패, 대체값 사용")
                }
            }

            quotes.push(InstrumentQuote::new(instrument.name.clone(), outcome));
        }

        let snapshot = MarketSnapshot::new(quotes);
        info!(
            fetched = snapshot.fetched_count(),
            total = snapshot.len(),
            "시장 데이터 수집 완료"
        );
        snapshot
    }

    async fn fetch_one(&self, instrument: &InstrumentConfig) -> Result<Quote> {
        match &instrument.source {
            InstrumentSource::LivePage => self.live.fetch_quote().await,
            InstrumentSource::History {
                symbol,
                fallback_symbol,
            } => match self.history_quote(symbol).await {
                Ok(quote) => Ok(quote),
                Err(e) => match fallback_symbol {
                    Some(fallback) => {
                        warn!(symbol = %symbol, fallback = %fallback, error = %e, "대체 심볼로 재시도");
                        self.history_quote(fallback).await
                    }
                    None => Err(e),
                },
            },
        }
    }

    async fn history_quote(&self, symbol: &str) -> Result<Quote> {
        let closes = self.history.daily_closes(symbol, self.bars).await?;
        Quote::from_close_series(&closes).ok_or_else(|| {
            DataError::Insufficient(format!("{symbol}: 유효 종가 {}개", closes.len()))
        })
    }
}
