//! 도메인 모델.
//!
//! 한 번의 실행 동안만 존재하는 값 타입들입니다. 어떤 것도 영속화되지 않습니다.

pub mod bias;
pub mod extremes;
pub mod outcome;
pub mod quote;

pub use bias::MarketBias;
pub use extremes::{BanList, ExtremeRow, ExtremesRecord};
pub use outcome::Outcome;
pub use quote::{
    Direction, InstrumentQuote, MarketSnapshot, Quote, PLACEHOLDER_CHANGE, PLACEHOLDER_VALUE,
};
