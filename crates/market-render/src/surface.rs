//! 캔버스와 도형 그리기.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;

use market_core::HexColor;

use crate::typeface::Typeface;

/// 설정 색상을 픽셀 색상으로 변환합니다.
pub fn rgb(color: HexColor) -> Rgb<u8> {
    Rgb(color.0)
}

/// 텍스트 기준점 위치.
///
/// 첫 글자는 가로, 둘째 글자는 세로 기준입니다 (`l`/`m`/`r`, `t`/`m`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    LeftTop,
    RightTop,
    LeftMiddle,
    RightMiddle,
    MiddleMiddle,
}

/// 그려진 텍스트 상자.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBox {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

/// 글머리 기호/화살표 도형.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Bullet,
    Up,
    Down,
}

/// 그리기 대상 캔버스.
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgb<u8>) {
        if width == 0 || height == 0 {
            return;
        }
        draw_filled_rect_mut(&mut self.image, Rect::at(x, y).of_size(width, height), color);
    }

    /// 모서리가 둥근 사각형을 채웁니다.
    pub fn fill_rounded_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        radius: u32,
        color: Rgb<u8>,
    ) {
        let r = radius.min(width / 2).min(height / 2);
        if r == 0 {
            self.fill_rect(x, y, width, height, color);
            return;
        }

        let ri = r as i32;
        self.fill_rect(x + ri, y, width - 2 * r, height, color);
        self.fill_rect(x, y + ri, width, height - 2 * r, color);

        let right = x + width as i32 - 1 - ri;
        let bottom = y + height as i32 - 1 - ri;
        for center in [(x + ri, y + ri), (right, y + ri), (x + ri, bottom), (right, bottom)] {
            draw_filled_circle_mut(&mut self.image, center, ri, color);
        }
    }

    /// 가로 구분선.
    pub fn hline(&mut self, x0: i32, x1: i32, y: i32, thickness: u32, color: Rgb<u8>) {
        let width = (x1 - x0).max(0) as u32;
        self.fill_rect(x0, y - thickness as i32 / 2, width, thickness, color);
    }

    /// 기준점과 앵커로 텍스트를 그리고 그려진 상자를 반환합니다.
    pub fn text(
        &mut self,
        face: &Typeface,
        size: f32,
        (x, y): (i32, i32),
        anchor: Anchor,
        color: Rgb<u8>,
        text: &str,
    ) -> TextBox {
        let (width, height) = face.measure(size, text);
        let (w, h) = (width as i32, height as i32);

        let left = match anchor {
            Anchor::LeftTop | Anchor::LeftMiddle => x,
            Anchor::RightTop | Anchor::RightMiddle => x - w,
            Anchor::MiddleMiddle => x - w / 2,
        };
        let top = match anchor {
            Anchor::LeftTop | Anchor::RightTop => y,
            Anchor::LeftMiddle | Anchor::RightMiddle | Anchor::MiddleMiddle => y - h / 2,
        };

        face.draw(&mut self.image, color, left, top, size, text);
        TextBox {
            left,
            top,
            width,
            height,
        }
    }

    /// (cx, cy)를 중심으로 `size` 크기의 도형을 그립니다.
    pub fn marker(&mut self, marker: Marker, (cx, cy): (i32, i32), size: u32, color: Rgb<u8>) {
        let half = (size / 2).max(2) as i32;

        match marker {
            Marker::Bullet => {
                draw_filled_circle_mut(&mut self.image, (cx, cy), (half / 2).max(2), color);
            }
            Marker::Up => {
                let points = [
                    Point::new(cx, cy - half),
                    Point::new(cx + half, cy + half),
                    Point::new(cx - half, cy + half),
                ];
                draw_polygon_mut(&mut self.image, &points, color);
            }
            Marker::Down => {
                let points = [
                    Point::new(cx - half, cy - half),
                    Point::new(cx + half, cy - half),
                    Point::new(cx, cy + half),
                ];
                draw_polygon_mut(&mut self.image, &points, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    #[test]
    fn test_rounded_rect_leaves_corners() {
        let mut canvas = Canvas::new(100, 60, BLACK);
        canvas.fill_rounded_rect(10, 10, 80, 40, 12, WHITE);
        let image = canvas.into_image();

        assert_eq!(*image.get_pixel(50, 30), WHITE);
        assert_eq!(*image.get_pixel(10, 30), WHITE);
        // 모서리 바깥
        assert_eq!(*image.get_pixel(10, 10), BLACK);
        assert_eq!(*image.get_pixel(89, 49), BLACK);
    }

    #[test]
    fn test_text_anchor_positions() {
        let face = Typeface::Bitmap;
        let mut canvas = Canvas::new(200, 100, BLACK);

        // 24px 비트맵 → 글자당 16px
        let right = canvas.text(&face, 24.0, (180, 10), Anchor::RightTop, WHITE, "ABC");
        assert_eq!((right.left, right.top, right.width), (132, 10, 48));

        let centered = canvas.text(&face, 24.0, (100, 50), Anchor::MiddleMiddle, WHITE, "AB");
        assert_eq!((centered.left, centered.top), (84, 42));

        let left_middle = canvas.text(&face, 12.0, (5, 80), Anchor::LeftMiddle, WHITE, "A");
        assert_eq!((left_middle.left, left_middle.top), (5, 76));
    }

    #[test]
    fn test_markers_fill_center() {
        let mut canvas = Canvas::new(60, 20, BLACK);
        canvas.marker(Marker::Up, (10, 10), 12, WHITE);
        canvas.marker(Marker::Down, (30, 10), 12, WHITE);
        canvas.marker(Marker::Bullet, (50, 10), 12, WHITE);
        let image = canvas.into_image();

        for x in [10, 30, 50] {
            assert_eq!(*image.get_pixel(x, 10), WHITE);
        }
        // 위쪽 화살표의 윗 모서리는 비어 있음
        assert_eq!(*image.get_pixel(4, 4), BLACK);
    }
}
