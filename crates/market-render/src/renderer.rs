//! 마켓 업데이트 이미지 렌더러.

use chrono::NaiveDate;
use image::{ImageFormat, Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tracing::info;

use market_core::{
    BanList, ExtremesRecord, InstrumentQuote, MarketBias, MarketSnapshot, Outcome, RenderConfig,
};

use crate::card::draw_card;
use crate::columns::{draw_column, ListColumn};
use crate::error::Result;
use crate::surface::{rgb, Anchor, Canvas, Marker};
use crate::typeface::FontSet;

/// 렌더링 입력.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub snapshot: &'a MarketSnapshot,
    pub ban_list: &'a Outcome<BanList>,
    pub extremes: &'a Outcome<ExtremesRecord>,
    /// 헤더/푸터에 표시할 기준일
    pub date: NaiveDate,
}

/// 이미지 렌더러.
pub struct ImageRenderer {
    config: RenderConfig,
    fonts: FontSet,
}

impl ImageRenderer {
    /// 설정의 글꼴 파일을 읽어 렌더러를 생성합니다.
    pub fn new(config: RenderConfig) -> Self {
        let fonts = FontSet::load(&config.font_regular, &config.font_bold);
        Self::with_fonts(config, fonts)
    }

    pub fn with_fonts(config: RenderConfig, fonts: FontSet) -> Self {
        Self { config, fonts }
    }

    /// 설정된 출력 경로에 PNG를 저장합니다.
    pub fn render(&self, input: RenderInput<'_>) -> Result<PathBuf> {
        let path = self.config.output_path.clone();
        self.render_to(input, &path)?;
        Ok(path)
    }

    /// 지정한 경로에 PNG를 저장합니다.
    pub fn render_to(&self, input: RenderInput<'_>, path: &Path) -> Result<()> {
        let image = self.compose(input);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        image.save_with_format(path, ImageFormat::Png)?;

        info!(path = %path.display(), "이미지 저장 완료");
        Ok(())
    }

    /// 메모리에 이미지를 그립니다.
    pub fn compose(&self, input: RenderInput<'_>) -> RgbImage {
        let layout = &self.config.layout;
        let palette = &self.config.palette;
        let mut canvas = Canvas::new(layout.width, layout.height, rgb(palette.background));

        self.draw_header(&mut canvas, &input);
        let grid_bottom = self.draw_grid(&mut canvas, input.snapshot);
        self.draw_lists(&mut canvas, &input, grid_bottom + layout.list_offset);
        self.draw_footer(&mut canvas, input.date);

        canvas.into_image()
    }

    fn draw_header(&self, canvas: &mut Canvas, input: &RenderInput<'_>) {
        let palette = &self.config.palette;
        let center_x = canvas.width() as i32 / 2;
        let right_x = canvas.width() as i32 - 60;

        canvas.text(
            &self.fonts.bold,
            72.0,
            (center_x, 70),
            Anchor::MiddleMiddle,
            rgb(palette.header_text),
            &self.config.title,
        );
        canvas.text(
            &self.fonts.regular,
            42.0,
            (center_x, 135),
            Anchor::MiddleMiddle,
            rgb(palette.header_date),
            &input.date.format("%d %b, %Y").to_string(),
        );

        let bias = MarketBias::from_snapshot(input.snapshot);
        canvas.text(
            &self.fonts.bold,
            28.0,
            (60, 185),
            Anchor::LeftMiddle,
            self.bias_color(bias),
            &format!("MARKET BIAS: {}", bias),
        );
        canvas.text(
            &self.fonts.regular,
            22.0,
            (right_x, 185),
            Anchor::RightMiddle,
            rgb(palette.accent),
            &self.tagline(input.extremes),
        );

        canvas.hline(50, canvas.width() as i32 - 50, 210, 2, rgb(palette.card));
    }

    /// 카드 그리드를 그리고 마지막 행의 아래쪽 y를 반환합니다.
    fn draw_grid(&self, canvas: &mut Canvas, snapshot: &MarketSnapshot) -> i32 {
        let layout = &self.config.layout;
        let row_step = (layout.card_height + layout.card_gap) as i32;
        let mut bottom = layout.grid_top;

        for (i, name) in self.config.card_order.iter().enumerate() {
            let x = layout.grid_columns[i % 2];
            let y = layout.grid_top + (i / 2) as i32 * row_step;

            let placeholder;
            let quote = match snapshot.get(name) {
                Some(quote) => quote,
                None => {
                    placeholder = InstrumentQuote::placeholder(name.clone(), "스냅샷에 없음");
                    &placeholder
                }
            };

            draw_card(canvas, &self.fonts, &self.config.palette, layout, (x, y), quote);
            bottom = y + layout.card_height as i32;
        }

        bottom
    }

    fn draw_lists(&self, canvas: &mut Canvas, input: &RenderInput<'_>, top: i32) {
        let palette = &self.config.palette;
        let layout = &self.config.layout;

        let empty: &[String] = &[];
        let bans = input
            .ban_list
            .as_fetched()
            .map_or(empty, |list| list.symbols.as_slice());
        let (highs, lows) = input
            .extremes
            .as_fetched()
            .map_or((empty, empty), |r| (r.highs.as_slice(), r.lows.as_slice()));

        let columns = [
            ListColumn {
                heading: "F&O BAN LIST".to_string(),
                heading_color: rgb(palette.ban),
                marker: Marker::Bullet,
                items: bans,
            },
            ListColumn {
                heading: format!("52W HIGHS ({})", highs.len()),
                heading_color: rgb(palette.high),
                marker: Marker::Up,
                items: highs,
            },
            ListColumn {
                heading: format!("52W LOWS ({})", lows.len()),
                heading_color: rgb(palette.neutral),
                marker: Marker::Down,
                items: lows,
            },
        ];

        for (x, column) in layout.list_columns.iter().zip(columns.iter()) {
            draw_column(canvas, &self.fonts, palette, layout, (*x, top), column);
        }
    }

    fn draw_footer(&self, canvas: &mut Canvas, date: NaiveDate) {
        let text = self.footer_text(date);
        let center_x = canvas.width() as i32 / 2;
        let y = canvas.height() as i32 - 35;

        canvas.text(
            &self.fonts.regular,
            24.0,
            (center_x, y),
            Anchor::MiddleMiddle,
            rgb(self.config.palette.watermark),
            &text,
        );
    }

    fn bias_color(&self, bias: MarketBias) -> Rgb<u8> {
        let palette = &self.config.palette;
        match bias {
            MarketBias::Bullish => rgb(palette.positive),
            MarketBias::Bearish => rgb(palette.negative),
            MarketBias::Neutral => rgb(palette.neutral),
        }
    }

    /// 태그라인 뒤에 52주 데이터 기준일을 붙입니다 (없으면 `N/A`).
    pub fn tagline(&self, extremes: &Outcome<ExtremesRecord>) -> String {
        let as_of = extremes
            .as_fetched()
            .map_or_else(|| "N/A".to_string(), |r| r.display_date());
        format!("{} | 52W {}", self.config.tagline, as_of)
    }

    /// 푸터 문구.
    pub fn footer_text(&self, date: NaiveDate) -> String {
        let body = format!(
            "Data as of {} | For Informational Use Only",
            date.format("%d-%b-%Y")
        );
        match self.config.brand_handle.as_deref().filter(|h| !h.trim().is_empty()) {
            Some(handle) => format!("{} | {}", handle, body),
            None => body,
        }
    }
}
