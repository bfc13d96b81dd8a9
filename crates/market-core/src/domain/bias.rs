//! 시장 분위기(바이어스) 판정.

use serde::Serialize;
use std::fmt;

use super::quote::{InstrumentQuote, MarketSnapshot};
use super::outcome::Outcome;

/// 상승 종목 비율로 판정한 시장 분위기.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketBias {
    Bullish,
    Bearish,
    Neutral,
}

impl MarketBias {
    /// 상승 비율 기준 (이상이면 강세)
    pub const BULLISH_RATIO: f64 = 0.6;
    /// 하락 비율 기준 (이하이면 약세)
    pub const BEARISH_RATIO: f64 = 0.4;

    /// 스냅샷 전체 종목 중 상승 종목 비율로 판정합니다.
    ///
    /// 수집 실패 종목도 분모에 포함됩니다.
    pub fn from_snapshot(snapshot: &MarketSnapshot) -> Self {
        Self::from_quotes(&snapshot.quotes)
    }

    pub fn from_quotes(quotes: &[InstrumentQuote]) -> Self {
        if quotes.is_empty() {
            return Self::Bearish;
        }

        let advancing = quotes.iter().filter(|q| is_advancing(q)).count();
        let ratio = advancing as f64 / quotes.len() as f64;

        if ratio >= Self::BULLISH_RATIO {
            Self::Bullish
        } else if ratio <= Self::BEARISH_RATIO {
            Self::Bearish
        } else {
            Self::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Bullish => "BULLISH",
            Self::Bearish => "BEARISH",
            Self::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for MarketBias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 소수점 2자리 반올림 기준으로 0보다 큰 변동률인지.
fn is_advancing(quote: &InstrumentQuote) -> bool {
    match &quote.outcome {
        Outcome::Fetched(q) => (q.change_pct * 100.0).round() > 0.0,
        Outcome::Degraded { .. } => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quote::Quote;
    use rust_decimal::Decimal;

    fn quotes(changes: &[Option<f64>]) -> Vec<InstrumentQuote> {
        changes
            .iter()
            .enumerate()
            .map(|(i, change)| match change {
                Some(pct) => InstrumentQuote::new(
                    format!("I{i}"),
                    Outcome::fetched(Quote::new(Decimal::ONE_HUNDRED, *pct)),
                ),
                None => InstrumentQuote::placeholder(format!("I{i}"), "failed"),
            })
            .collect()
    }

    #[test]
    fn test_bias_thresholds() {
        // 5/8 = 0.625
        let bullish = quotes(&[
            Some(1.0), Some(0.5), Some(0.2), Some(0.1), Some(2.0),
            Some(-1.0), Some(-0.3), None,
        ]);
        assert_eq!(MarketBias::from_quotes(&bullish), MarketBias::Bullish);

        // 4/8 = 0.5
        let neutral = quotes(&[
            Some(1.0), Some(0.5), Some(0.2), Some(0.1),
            Some(-1.0), Some(-0.3), None, None,
        ]);
        assert_eq!(MarketBias::from_quotes(&neutral), MarketBias::Neutral);

        // 3/8 = 0.375
        let bearish = quotes(&[
            Some(1.0), Some(0.5), Some(0.2),
            Some(-1.0), Some(-0.3), None, None, None,
        ]);
        assert_eq!(MarketBias::from_quotes(&bearish), MarketBias::Bearish);
    }

    #[test]
    fn test_rounded_zero_is_not_advancing() {
        let flat = quotes(&[Some(0.004), Some(0.001)]);
        assert_eq!(MarketBias::from_quotes(&flat), MarketBias::Bearish);
    }
}
