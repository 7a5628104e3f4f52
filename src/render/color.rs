// SPDX-License-Identifier: GPL-3.0-or-later
use std::convert::From;

/// An RGB888 color, as stored in each cell of the rendered grid.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl From<colorous::Color> for Color {
    fn from(other_color: colorous::Color) -> Self {
        Color {
            red: other_color.r,
            green: other_color.g,
            blue: other_color.b,
        }
    }
}

impl From<Color> for image::Rgb<u8> {
    fn from(color: Color) -> Self {
        image::Rgb(color.as_array())
    }
}

impl From<&image::Rgb<u8>> for Color {
    fn from(pixel: &image::Rgb<u8>) -> Self {
        Self::new(pixel[0], pixel[1], pixel[2])
    }
}

impl Color {
    pub const BLACK: Self = Self {
        red: u8::MIN,
        green: u8::MIN,
        blue: u8::MIN,
    };

    pub const WHITE: Self = Self {
        red: u8::MAX,
        green: u8::MAX,
        blue: u8::MAX,
    };

    /// The fill every cell starts with before the first frame is drawn.
    pub const PURPLE: Self = Self {
        red: u8::MAX,
        green: u8::MIN,
        blue: u8::MAX,
    };

    /// Create a new [Color] with the given 8-bit color values.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// The 8-bit color value of the red component.
    pub fn red(&self) -> u8 {
        self.red
    }

    /// The 8-bit color value of the green component.
    pub fn green(&self) -> u8 {
        self.green
    }

    /// The 8-bit color value of the blue component.
    pub fn blue(&self) -> u8 {
        self.blue
    }

    /// The relative luminance of the color in the sRGB colorspace, as [defined by the
    /// W3C][w3c-lum].
    /// [w3c-lum]: https://www.w3.org/TR/2008/REC-WCAG20-20081211/#relativeluminancedef
    pub fn luminance(&self) -> f32 {
        let colors = [self.red, self.green, self.blue];
        let colors = colors.iter().map(|c| {
            let c = *c as f32 / u8::MAX as f32;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        });
        let scaling_coefficients = [0.2126, 0.7152, 0.0722];
        scaling_coefficients
            .iter()
            .zip(colors)
            .map(|(l, r)| l * r)
            .sum()
    }

    /// Linear blend between this color and `other`, `t` running from 0.0 (self) to 1.0.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let t = t.max(0.0).min(1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self::new(
            mix(self.red, other.red),
            mix(self.green, other.green),
            mix(self.blue, other.blue),
        )
    }

    /// The components in bitmap pixel order: blue, green, red.
    pub fn as_bgr(&self) -> [u8; 3] {
        [self.blue(), self.green(), self.red()]
    }

    /// The red, green, and blue components as a 3 element array.
    pub fn as_array(&self) -> [u8; 3] {
        [self.red(), self.green(), self.blue()]
    }
}

#[cfg(test)]
mod color_test {
    use super::Color;
    use float_cmp::{approx_eq, F32Margin};

    #[test]
    fn new_order() {
        let c = Color::new(25, 125, 225);
        assert_eq!(c.red(), 25);
        assert_eq!(c.green(), 125);
        assert_eq!(c.blue(), 225);
    }

    #[test]
    fn bgr_order() {
        assert_eq!(Color::new(1, 2, 3).as_bgr(), [3, 2, 1]);
    }

    #[test]
    fn image_pixel() {
        let pixel: image::Rgb<u8> = Color::new(0x0A, 0xBC, 0xFF).into();
        assert_eq!(pixel, image::Rgb([0x0A, 0xBC, 0xFF]));
        assert_eq!(Color::from(&pixel), Color::new(0x0A, 0xBC, 0xFF));
    }

    #[test]
    fn luminance() {
        assert!(approx_eq!(
            f32,
            Color::BLACK.luminance(),
            0.0,
            F32Margin::default()
        ));
        assert!(approx_eq!(
            f32,
            Color::WHITE.luminance(),
            1.0,
            F32Margin::default()
        ));
    }

    #[test]
    fn lerp() {
        let mid = Color::BLACK.lerp(&Color::new(200, 100, 50), 0.5);
        assert_eq!(mid, Color::new(100, 50, 25));
        assert_eq!(Color::BLACK.lerp(&Color::WHITE, 0.0), Color::BLACK);
        assert_eq!(Color::BLACK.lerp(&Color::WHITE, 1.0), Color::WHITE);
    }
}
