use crate::NumRange;

/// An RGB color with each component in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color3 {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Color3 {
    const COMPONENT_RANGE: NumRange<f32> = NumRange::new(0.0, 1.0);

    /// Out-of-range components are clamped
    pub fn new(red: f32, green: f32, blue: f32) -> Self {
        let range = Self::COMPONENT_RANGE;
        Self {
            red: range.clamp(red),
            green: range.clamp(green),
            blue: range.clamp(blue),
        }
    }

    /// From 8-bit channels, for writing palette constants
    pub const fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
        }
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        self.components().map(|c| (c * 255.0).round() as u8)
    }

    /// `#rrggbb`, as used for SVG fills
    pub fn to_html(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Opaque RGBA, the layout of the mesh color attribute
    pub fn to_rgba(self) -> [f32; 4] {
        [self.red, self.green, self.blue, 1.0]
    }

    /// Blend from this color to another. `t` is clamped to `[0, 1]`; `0`
    /// gives `self` back exactly and `1` gives `other`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = Self::COMPONENT_RANGE.clamp(t);
        let mix = |a: f32, b: f32| a * (1.0 - t) + b * t;
        Self::new(
            mix(self.red, other.red),
            mix(self.green, other.green),
            mix(self.blue, other.blue),
        )
    }

    fn components(self) -> [f32; 3] {
        [self.red, self.green, self.blue]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_html() {
        assert_eq!(Color3::from_rgb8(20, 77, 163).to_html(), "#144da3");
        assert_eq!(Color3::new(1.0, 0.0, 0.0).to_html(), "#ff0000");
    }

    #[test]
    fn test_new_clamps() {
        assert_eq!(Color3::new(1.5, -0.2, 0.4).to_rgba(), [1.0, 0.0, 0.4, 1.0]);
    }

    #[test]
    fn test_lerp() {
        let black = Color3::new(0.0, 0.0, 0.0);
        let white = Color3::new(1.0, 1.0, 1.0);
        assert_eq!(black.lerp(white, 0.0), black);
        assert_eq!(black.lerp(white, 1.0), white);
        assert_eq!(black.lerp(white, 0.5), Color3::new(0.5, 0.5, 0.5));
        assert_eq!(black.lerp(white, 7.0), white);
    }
}
