//! 하단 목록 열 (F&O 밴 리스트, 52주 신고가/신저가).

use image::Rgb;

use market_core::{Layout, Palette};

use crate::surface::{rgb, Anchor, Canvas, Marker};
use crate::typeface::FontSet;

const HEADING_SIZE: f32 = 24.0;
const ITEM_SIZE: f32 = 24.0;
const OVERFLOW_SIZE: f32 = 22.0;
/// 제목 아래 첫 항목까지 간격
const FIRST_ITEM_OFFSET: i32 = 40;
/// 도형과 텍스트 사이 들여쓰기
const ITEM_INDENT: i32 = 24;

/// 화면에 표시할 항목과 생략된 개수.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLines<'a> {
    pub entries: &'a [String],
    pub overflow: usize,
}

impl ColumnLines<'_> {
    /// 생략된 항목이 있으면 `+ N more`.
    pub fn overflow_label(&self) -> Option<String> {
        (self.overflow > 0).then(|| format!("+ {} more", self.overflow))
    }
}

/// 최대 `limit`개까지만 표시합니다.
pub fn visible_lines(items: &[String], limit: usize) -> ColumnLines<'_> {
    let shown = items.len().min(limit);
    ColumnLines {
        entries: &items[..shown],
        overflow: items.len() - shown,
    }
}

/// 목록 열 하나.
pub struct ListColumn<'a> {
    pub heading: String,
    pub heading_color: Rgb<u8>,
    pub marker: Marker,
    pub items: &'a [String],
}

/// (x, top)에 목록 열을 그립니다. 빈 목록은 `None`.
pub fn draw_column(
    canvas: &mut Canvas,
    fonts: &FontSet,
    palette: &Palette,
    layout: &Layout,
    (x, top): (i32, i32),
    column: &ListColumn<'_>,
) {
    canvas.text(
        &fonts.bold,
        HEADING_SIZE,
        (x, top),
        Anchor::LeftTop,
        column.heading_color,
        &column.heading,
    );

    let mut y = top + FIRST_ITEM_OFFSET;
    let main = rgb(palette.text_main);

    if column.items.is_empty() {
        canvas.text(&fonts.regular, ITEM_SIZE, (x, y), Anchor::LeftTop, main, "None");
        return;
    }

    let lines = visible_lines(column.items, layout.list_limit);
    for entry in lines.entries {
        let drawn = canvas.text(
            &fonts.regular,
            ITEM_SIZE,
            (x + ITEM_INDENT, y),
            Anchor::LeftTop,
            main,
            entry,
        );
        let marker_size = (ITEM_SIZE * 0.55) as u32;
        canvas.marker(
            column.marker,
            (x + marker_size as i32 / 2, y + drawn.height as i32 / 2),
            marker_size,
            main,
        );
        y += layout.list_line_height;
    }

    if let Some(label) = lines.overflow_label() {
        canvas.text(
            &fonts.regular,
            OVERFLOW_SIZE,
            (x, y),
            Anchor::LeftTop,
            rgb(palette.text_sub),
            &label,
        );
    }
}
