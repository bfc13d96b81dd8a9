//! 글꼴 로딩과 텍스트 측정/그리기.

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use std::path::Path;
use tracing::{debug, warn};

/// 비트맵 글꼴 한 글자의 픽셀 크기
const BITMAP_CELL: u32 = 8;

/// 텍스트를 그리는 글꼴.
pub enum Typeface {
    /// TrueType/OpenType 외곽선 글꼴
    Outline(FontVec),
    /// 내장 8×8 비트맵 글꼴 (ASCII만 지원)
    Bitmap,
}

impl Typeface {
    /// 글꼴 파일을 읽습니다. 실패하면 비트맵 글꼴로 대체합니다.
    pub fn load(path: &Path) -> Self {
        let loaded = std::fs::read(path)
            .map_err(|e| e.to_string())
            .and_then(|bytes| FontVec::try_from_vec(bytes).map_err(|e| e.to_string()));

        match loaded {
            Ok(font) => {
                debug!(path = %path.display(), "글꼴 로드");
                Self::Outline(font)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "글꼴 로드 실패, 내장 비트맵 글꼴 사용");
                Self::Bitmap
            }
        }
    }

    pub fn is_bitmap(&self) -> bool {
        matches!(self, Self::Bitmap)
    }

    /// 텍스트 상자 크기 (너비, 줄 높이).
    pub fn measure(&self, size: f32, text: &str) -> (u32, u32) {
        match self {
            Self::Outline(font) => {
                let scale = PxScale::from(size);
                let (width, _) = text_size(scale, font, text);
                let scaled = font.as_scaled(scale);
                let height = (scaled.ascent() - scaled.descent()).ceil().max(0.0) as u32;
                (width, height)
            }
            Self::Bitmap => {
                let cell = BITMAP_CELL * bitmap_scale(size);
                (text.chars().count() as u32 * cell, cell)
            }
        }
    }

    /// (x, y)를 텍스트 상자의 왼쪽 위로 하여 그립니다.
    pub fn draw(&self, image: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, size: f32, text: &str) {
        match self {
            Self::Outline(font) => draw_text_mut(image, color, x, y, PxScale::from(size), font, text),
            Self::Bitmap => draw_bitmap_text(image, color, x, y, bitmap_scale(size), text),
        }
    }
}

/// 비트맵 글꼴 확대 배율. 12px당 1배, 최소 1배.
fn bitmap_scale(size: f32) -> u32 {
    ((size / 12.0).round() as u32).max(1)
}

fn draw_bitmap_text(image: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, scale: u32, text: &str) {
    let cell = (BITMAP_CELL * scale) as i32;

    for (i, ch) in text.chars().enumerate() {
        // 지원하지 않는 문자는 공백
        let Some(glyph) = BASIC_FONTS.get(ch) else {
            continue;
        };
        let origin_x = x + i as i32 * cell;

        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..BITMAP_CELL {
                if bits & (1 << col) == 0 {
                    continue;
                }
                let px = origin_x + (col * scale) as i32;
                let py = y + (row as u32 * scale) as i32;
                draw_filled_rect_mut(image, Rect::at(px, py).of_size(scale, scale), color);
            }
        }
    }
}

/// 일반/굵은 글꼴 쌍.
pub struct FontSet {
    pub regular: Typeface,
    pub bold: Typeface,
}

impl FontSet {
    pub fn load(regular: &Path, bold: &Path) -> Self {
        Self {
            regular: Typeface::load(regular),
            bold: Typeface::load(bold),
        }
    }

    /// 내장 비트맵 글꼴만 사용합니다.
    pub fn bitmap() -> Self {
        Self {
            regular: Typeface::Bitmap,
            bold: Typeface::Bitmap,
        }
    }

    pub fn pick(&self, bold: bool) -> &Typeface {
        if bold {
            &self.bold
        } else {
            &self.regular
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_font_falls_back_to_bitmap() {
        let face = Typeface::load(Path::new("/nonexistent/arial.ttf"));
        assert!(face.is_bitmap());
    }

    #[test]
    fn test_invalid_font_file_falls_back_to_bitmap() {
        let path = std::env::temp_dir().join(format!("not-a-font-{}.ttf", std::process::id()));
        std::fs::write(&path, b"definitely not a font").unwrap();

        let face = Typeface::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(face.is_bitmap());
    }

    #[test]
    fn test_bitmap_measure() {
        let face = Typeface::Bitmap;
        // 24px → 2배 → 16px 셀
        assert_eq!(face.measure(24.0, "NIFTY"), (80, 16));
        assert_eq!(face.measure(8.0, "A"), (8, 8));
    }

    #[test]
    fn test_bitmap_draw_sets_pixels() {
        let mut image = RgbImage::from_pixel(40, 20, Rgb([0, 0, 0]));
        Typeface::Bitmap.draw(&mut image, Rgb([255, 255, 255]), 2, 2, 12.0, "H");

        let lit = image.pixels().filter(|p| p.0 == [255, 255, 255]).count();
        assert!(lit > 0);
        // 글자 상자 밖은 그대로
        assert_eq!(image.get_pixel(30, 15).0, [0, 0, 0]);
    }
}
