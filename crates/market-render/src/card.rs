//! 종목 카드.

use image::Rgb;

use market_core::{Direction, InstrumentQuote, Layout, Palette};

use crate::surface::{rgb, Anchor, Canvas, Marker};
use crate::typeface::FontSet;

const TITLE_SIZE: f32 = 18.0;
const VALUE_SIZE: f32 = 34.0;
const CHANGE_SIZE: f32 = 26.0;
const PADDING: i32 = 15;

/// 변동률 부호에 따른 카드 강조.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTone {
    Positive,
    Negative,
    Plain,
}

impl CardTone {
    pub fn from_change(change: &str) -> Self {
        match Direction::from_change_str(change) {
            Direction::Up => Self::Positive,
            Direction::Down => Self::Negative,
            Direction::Flat => Self::Plain,
        }
    }

    pub fn color(&self, palette: &Palette) -> Rgb<u8> {
        match self {
            Self::Positive => rgb(palette.positive),
            Self::Negative => rgb(palette.negative),
            Self::Plain => rgb(palette.text_main),
        }
    }

    pub fn marker(&self) -> Option<Marker> {
        match self {
            Self::Positive => Some(Marker::Up),
            Self::Negative => Some(Marker::Down),
            Self::Plain => None,
        }
    }
}

/// 부호를 제거한 변동률 (`-0.35%` → `0.35%`).
pub fn unsigned_change(change: &str) -> String {
    change.replace(['+', '-'], "")
}

/// (x, y)에 종목 카드를 그립니다.
pub fn draw_card(
    canvas: &mut Canvas,
    fonts: &FontSet,
    palette: &Palette,
    layout: &Layout,
    (x, y): (i32, i32),
    quote: &InstrumentQuote,
) {
    let width = layout.card_width as i32;
    canvas.fill_rounded_rect(
        x,
        y,
        layout.card_width,
        layout.card_height,
        layout.card_radius,
        rgb(palette.card),
    );

    canvas.text(
        &fonts.bold,
        TITLE_SIZE,
        (x + PADDING, y + PADDING),
        Anchor::LeftTop,
        rgb(palette.text_sub),
        &quote.name.to_uppercase(),
    );
    canvas.text(
        &fonts.bold,
        VALUE_SIZE,
        (x + PADDING, y + 45),
        Anchor::LeftTop,
        rgb(palette.text_main),
        &quote.display_value(),
    );

    let change = quote.display_change();
    let tone = CardTone::from_change(&change);
    let color = tone.color(palette);
    let drawn = canvas.text(
        &fonts.bold,
        CHANGE_SIZE,
        (x + width - PADDING, y + 48),
        Anchor::RightTop,
        color,
        &unsigned_change(&change),
    );

    if let Some(marker) = tone.marker() {
        let size = (CHANGE_SIZE * 0.6) as u32;
        let center = (
            drawn.left - 8 - size as i32 / 2,
            drawn.top + drawn.height as i32 / 2,
        );
        canvas.marker(marker, center, size, color);
    }
}
