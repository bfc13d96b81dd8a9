//! 설정 관리.
//!
//! 한 번의 실행 동안 각 단계에 전달되는 설정 객체입니다.
//! 모든 필드에 기본값이 있으므로 설정 파일 없이도 실행할 수 있습니다.
//!
//! 로드 순서: 기본값 → TOML 파일(선택) → `DIGEST_` 환경 변수.
//!
//! ```toml
//! timezone = "Asia/Kolkata"
//!
//! [render]
//! output_path = "out/global_market_update.png"
//!
//! [[market.instruments]]
//! name = "Nasdaq"
//! source = { kind = "history", symbol = "^IXIC" }
//! ```

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::DigestResult;

/// 실행 전체 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DigestConfig {
    /// 기준일 계산에 사용하는 거래소 시간대 (IANA 이름)
    pub timezone: String,
    /// 시세 수집 설정
    pub market: MarketConfig,
    /// 거래소 아카이브(CSV) 설정
    pub archive: ArchiveConfig,
    /// 이미지 렌더링 설정
    pub render: RenderConfig,
    /// SNS 게시 설정
    pub publish: PublishConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            timezone: "Asia/Kolkata".to_string(),
            market: MarketConfig::default(),
            archive: ArchiveConfig::default(),
            render: RenderConfig::default(),
            publish: PublishConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl DigestConfig {
    /// 파일(선택)과 환경 변수에서 설정을 로드합니다.
    pub fn load(path: Option<&Path>) -> DigestResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("DIGEST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }

    /// 설정된 시간대. 알 수 없는 이름이면 Asia/Kolkata.
    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or_else(|_| {
            tracing::warn!(timezone = %self.timezone, "알 수 없는 시간대, Asia/Kolkata 사용");
            chrono_tz::Asia::Kolkata
        })
    }

    /// 거래소 시간대 기준 오늘 날짜.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz()).date_naive()
    }
}

// ============================================================================
// 시세
// ============================================================================

/// 종목 시세 출처.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InstrumentSource {
    /// 시계열 제공자의 일봉 종가
    History {
        /// 제공자 심볼 (예: "^IXIC")
        symbol: String,
        /// 기본 심볼이 모두 실패했을 때 시도할 심볼
        #[serde(default)]
        fallback_symbol: Option<String>,
    },
    /// 웹 페이지에 포함된 실시간 시세 (GIFT Nifty)
    LivePage,
}

/// 수집 대상 종목.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InstrumentConfig {
    /// 카드/게시글에 표시할 이름
    pub name: String,
    /// 시세 출처
    pub source: InstrumentSource,
}

impl InstrumentConfig {
    pub fn history(name: &str, symbol: &str) -> Self {
        Self {
            name: name.to_string(),
            source: InstrumentSource::History {
                symbol: symbol.to_string(),
                fallback_symbol: None,
            },
        }
    }

    pub fn live_page(name: &str) -> Self {
        Self {
            name: name.to_string(),
            source: InstrumentSource::LivePage,
        }
    }
}

/// 시세 수집 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MarketConfig {
    /// 수집 대상 종목 (카드 순서와 동일)
    pub instruments: Vec<InstrumentConfig>,
    /// 조회할 일봉 개수
    pub history_bars: usize,
    /// 시세 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
    /// `yahoo_finance_api` 커넥터 사용 여부 (체인의 첫 번째 제공자)
    pub use_yahoo_connector: bool,
    /// Yahoo v8 chart API 기본 URL (체인의 두 번째 제공자)
    pub chart_api_base_url: String,
    /// 실시간 시세 페이지 URL
    pub live_quote_url: String,
    /// 실시간 시세 페이지 요청에 사용할 User-Agent
    pub live_quote_user_agent: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            instruments: default_instruments(),
            history_bars: 5,
            request_timeout_secs: 10,
            use_yahoo_connector: true,
            chart_api_base_url: "https://query1.finance.yahoo.com".to_string(),
            live_quote_url: "https://groww.in/indices/global-indices/sgx-nifty".to_string(),
            live_quote_user_agent: "Mozilla/5.0".to_string(),
        }
    }
}

impl MarketConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// 기본 종목 목록.
pub fn default_instruments() -> Vec<InstrumentConfig> {
    vec![
        InstrumentConfig::live_page("GIFTNIFTY"),
        InstrumentConfig::history("Nikkei 225", "^N225"),
        InstrumentConfig::history("Dow Jones Fut", "YM=F"),
        InstrumentConfig::history("S&P 500", "^GSPC"),
        InstrumentConfig::history("Nasdaq", "^IXIC"),
        InstrumentConfig::history("Hang Seng", "^HSI"),
        InstrumentConfig::history("Gold (Fut)", "GC=F"),
        InstrumentConfig::history("Bitcoin", "BTC-USD"),
    ]
}

// ============================================================================
// 아카이브
// ============================================================================

/// 거래소 아카이브 CSV 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// 아카이브 기본 URL
    pub base_url: String,
    /// 쿠키 발급용 홈페이지 URL (빈 문자열이면 생략)
    pub warmup_url: String,
    /// Referer 헤더
    pub referer: String,
    /// User-Agent 헤더
    pub user_agent: String,
    /// 밴 리스트 경로 템플릿 (`{date}` = DDMMYYYY)
    pub ban_list_path: String,
    /// 52주 고저 경로 템플릿 (`{date}` = DDMMYYYY)
    pub extremes_path: String,
    /// 오늘 포함 거슬러 올라갈 일수
    pub lookback_days: u32,
    /// 홈페이지 요청 타임아웃 (초)
    pub warmup_timeout_secs: u64,
    /// 밴 리스트 요청 타임아웃 (초)
    pub ban_list_timeout_secs: u64,
    /// 52주 고저 요청 타임아웃 (초)
    pub extremes_timeout_secs: u64,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nsearchives.nseindia.com".to_string(),
            warmup_url: "https://www.nseindia.com/".to_string(),
            referer: "https://www.nseindia.com/".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
            ban_list_path: "/archives/fo/sec_ban/fo_secban_{date}.csv".to_string(),
            extremes_path: "/content/CM_52_wk_High_low_{date}.csv".to_string(),
            lookback_days: 5,
            warmup_timeout_secs: 5,
            ban_list_timeout_secs: 5,
            extremes_timeout_secs: 10,
        }
    }
}

impl ArchiveConfig {
    pub fn warmup_timeout(&self) -> Duration {
        Duration::from_secs(self.warmup_timeout_secs)
    }

    pub fn ban_list_timeout(&self) -> Duration {
        Duration::from_secs(self.ban_list_timeout_secs)
    }

    pub fn extremes_timeout(&self) -> Duration {
        Duration::from_secs(self.extremes_timeout_secs)
    }
}

// ============================================================================
// 렌더링
// ============================================================================

/// `#RRGGBB` 형식 색상.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(pub [u8; 3]);

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("잘못된 색상 형식: {value}"));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| format!("잘못된 색상 형식: {value}"))
        };
        Ok(Self([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        let [r, g, b] = color.0;
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

/// 색상 팔레트.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Palette {
    pub background: HexColor,
    pub card: HexColor,
    pub text_main: HexColor,
    pub text_sub: HexColor,
    pub accent: HexColor,
    pub positive: HexColor,
    pub negative: HexColor,
    pub neutral: HexColor,
    pub ban: HexColor,
    pub high: HexColor,
    pub header_text: HexColor,
    pub header_date: HexColor,
    pub watermark: HexColor,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: HexColor::rgb(0x0F, 0x17, 0x2A),
            card: HexColor::rgb(0x1E, 0x29, 0x3B),
            text_main: HexColor::rgb(0xFF, 0xFF, 0xFF),
            text_sub: HexColor::rgb(0x94, 0xA3, 0xB8),
            accent: HexColor::rgb(0x38, 0xBD, 0xF8),
            positive: HexColor::rgb(0x10, 0xB9, 0x81),
            negative: HexColor::rgb(0xEF, 0x44, 0x44),
            neutral: HexColor::rgb(0xF5, 0x9E, 0x0B),
            ban: HexColor::rgb(0xF4, 0x3F, 0x5E),
            high: HexColor::rgb(0x34, 0xD3, 0x99),
            header_text: HexColor::rgb(255, 255, 255),
            header_date: HexColor::rgb(180, 180, 200),
            watermark: HexColor::rgb(0xD1, 0xD5, 0xDB),
        }
    }
}

/// 레이아웃 좌표 (픽셀).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    /// 카드 그리드 시작 y
    pub grid_top: i32,
    /// 카드 그리드 왼쪽/오른쪽 열 x
    pub grid_columns: [i32; 2],
    pub card_width: u32,
    pub card_height: u32,
    pub card_gap: u32,
    pub card_radius: u32,
    /// 하단 목록 세 열의 x (밴 / 신고가 / 신저가)
    pub list_columns: [i32; 3],
    /// 카드 그리드 아래 하단 목록까지 간격
    pub list_offset: i32,
    pub list_line_height: i32,
    /// 목록 열마다 표시할 최대 항목 수
    pub list_limit: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1080,
            grid_top: 230,
            grid_columns: [50, 550],
            card_width: 480,
            card_height: 100,
            card_gap: 20,
            card_radius: 12,
            list_columns: [60, 420, 760],
            list_offset: 45,
            list_line_height: 35,
            list_limit: 5,
        }
    }
}

/// 이미지 렌더링 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// 출력 PNG 경로
    pub output_path: PathBuf,
    /// 일반 글꼴 파일
    pub font_regular: PathBuf,
    /// 굵은 글꼴 파일
    pub font_bold: PathBuf,
    pub title: String,
    /// 헤더 오른쪽 태그라인
    pub tagline: String,
    /// 푸터 앞에 붙는 계정 핸들 (선택)
    pub brand_handle: Option<String>,
    /// 카드 8칸의 종목 순서
    pub card_order: Vec<String>,
    pub palette: Palette,
    pub layout: Layout,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("global_market_update.png"),
            font_regular: PathBuf::from("arial.ttf"),
            font_bold: PathBuf::from("arialbd.ttf"),
            title: "Global Market Update".to_string(),
            tagline: "Live Data | F&O Update".to_string(),
            brand_handle: None,
            card_order: default_instruments().into_iter().map(|i| i.name).collect(),
            palette: Palette::default(),
            layout: Layout::default(),
        }
    }
}

// ============================================================================
// 게시
// ============================================================================

/// SNS 게시 설정.
///
/// 인증 정보는 여기 두지 않고 환경 변수에서만 읽습니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PublishConfig {
    /// 게시 단계 활성화
    pub enabled: bool,
    /// 미디어 업로드 엔드포인트 (v1.1)
    pub media_upload_url: String,
    /// 게시글 작성 엔드포인트 (v2)
    pub post_url: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// 게시글에 포함할 종목 (순서대로)
    pub featured: Vec<String>,
    /// 게시글 끝에 붙는 해시태그
    pub hashtags: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            media_upload_url: "https://upload.twitter.com/1.1/media/upload.json".to_string(),
            post_url: "https://api.twitter.com/2/tweets".to_string(),
            timeout_secs: 30,
            featured: vec![
                "GIFTNIFTY".to_string(),
                "S&P 500".to_string(),
                "Nasdaq".to_string(),
            ],
            hashtags: "#StockMarket #Nifty #Trading".to_string(),
        }
    }
}

impl PublishConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ============================================================================
// 로깅
// ============================================================================

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        let config = DigestConfig::load(None).expect("기본 설정 로드");

        assert_eq!(config.market.instruments.len(), 8);
        assert_eq!(config.render.card_order.len(), 8);
        assert_eq!(config.render.card_order[0], "GIFTNIFTY");
        assert_eq!(config.archive.lookback_days, 5);
        assert_eq!(config.render.layout.width, 1080);
        assert_eq!(config.tz(), chrono_tz::Asia::Kolkata);
    }

    #[test]
    fn test_load_toml_file() {
        let path = std::env::temp_dir().join(format!("digest-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            r##"
timezone = "Asia/Tokyo"

[render]
output_path = "out/update.png"
brand_handle = "@desk"

[render.palette]
background = "#000000"

[[market.instruments]]
name = "Nasdaq"
source = { kind = "history", symbol = "^IXIC", fallback_symbol = "QQQ" }

[[market.instruments]]
name = "GIFTNIFTY"
source = { kind = "live_page" }
"##,
        )
        .unwrap();

        let config = DigestConfig::load(Some(&path)).expect("파일 설정 로드");
        std::fs::remove_file(&path).ok();

        assert_eq!(config.tz(), chrono_tz::Asia::Tokyo);
        assert_eq!(config.render.output_path, PathBuf::from("out/update.png"));
        assert_eq!(config.render.brand_handle.as_deref(), Some("@desk"));
        assert_eq!(config.render.palette.background, HexColor::rgb(0, 0, 0));
        // 지정하지 않은 색상은 기본값 유지
        assert_eq!(config.render.palette.card, Palette::default().card);
        assert_eq!(
            config.market.instruments,
            vec![
                InstrumentConfig {
                    name: "Nasdaq".to_string(),
                    source: InstrumentSource::History {
                        symbol: "^IXIC".to_string(),
                        fallback_symbol: Some("QQQ".to_string()),
                    },
                },
                InstrumentConfig::live_page("GIFTNIFTY"),
            ]
        );
        assert_eq!(config.market.history_bars, 5);
    }

    #[test]
    fn test_hex_color_parse() {
        assert_eq!(
            HexColor::try_from("#0F172A".to_string()),
            Ok(HexColor::rgb(0x0F, 0x17, 0x2A))
        );
        assert_eq!(String::from(HexColor::rgb(0xEF, 0x44, 0x44)), "#EF4444");
        assert!(HexColor::try_from("#12345".to_string()).is_err());
        assert!(HexColor::try_from("zzzzzz".to_string()).is_err());
    }

    #[test]
    fn test_unknown_timezone_falls_back() {
        let config = DigestConfig {
            timezone: "Mars/Olympus".to_string(),
            ..Default::default()
        };
        assert_eq!(config.tz(), chrono_tz::Asia::Kolkata);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let path = std::env::temp_dir().join("digest-config-does-not-exist.toml");
        let err = DigestConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, crate::DigestError::Config(_)));
    }
}
