//! RGBA color type with parsing, HSL manipulation and CSS rendering.
//!
//! Colors in a LESS tree come from three places:
//!
//! - **Hex literals**: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
//! - **Named keywords**: CSS color names like `red`, `aliceblue`
//! - **Function results**: `rgb()`, `hsl()`, `lighten()`, `mix()` and friends
//!
//! Channels are kept as unrounded `f64` values so chained operations don't
//! accumulate rounding error; they are clamped and rounded only when the
//! color is rendered with [`Color::to_css`].
//!
//! ```
//! use lesstree::Color;
//!
//! let brand = Color::parse("#d9534f").unwrap();
//! assert_eq!(brand.to_css(), "#d9534f");
//!
//! let lighter = Color::rgb(0.0, 0.0, 0.0).lighten(0.1);
//! assert_eq!(lighter.to_css(), "#1a1a1a");
//! ```

use std::fmt;

use phf::phf_map;

/// Error returned when color parsing fails.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorParseError {
    /// Human-readable description of the parsing error.
    pub message: String,
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ColorParseError {}

/// An RGBA color as it appears in a LESS expression tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Color {
    /// Red, green and blue channels (0-255, unrounded).
    pub rgb: [f64; 3],
    /// Alpha component (0.0 = transparent, 1.0 = opaque).
    pub alpha: f64,
    /// The source text the color was written as, e.g. `red` or `#FFF`.
    ///
    /// A literal color renders back as written. Any manipulation produces a
    /// color without one.
    pub original: Option<String>,
}

impl Default for Color {
    fn default() -> Self {
        Self {
            rgb: [0.0, 0.0, 0.0],
            alpha: 1.0,
            original: None,
        }
    }
}

impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    pub fn rgba(r: f64, g: f64, b: f64, alpha: f64) -> Self {
        Self {
            rgb: [r, g, b],
            alpha,
            original: None,
        }
    }

    /// Returns a copy of this color with the specified alpha value.
    pub fn with_alpha(&self, alpha: f64) -> Self {
        Self::rgba(self.rgb[0], self.rgb[1], self.rgb[2], alpha)
    }

    /// Parses a color string.
    ///
    /// Supports hex literals (with or without alpha), `transparent` and the
    /// CSS named colors. Functional notations (`rgb()`, `hsl()`) are calls in
    /// a LESS tree and are handled by the function registry instead.
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ColorParseError {
                message: "empty color string".to_string(),
            });
        }

        if let Some(hex) = input.strip_prefix('#') {
            let mut color = Self::parse_hex(hex)?;
            color.original = Some(input.to_string());
            return Ok(color);
        }

        Self::from_keyword(input).ok_or_else(|| ColorParseError {
            message: format!("unknown color name: {}", input),
        })
    }

    /// Looks up a CSS color keyword, remembering how it was spelled.
    pub fn from_keyword(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        if lower == "transparent" {
            let mut color = Self::rgba(0.0, 0.0, 0.0, 0.0);
            color.original = Some(name.to_string());
            return Some(color);
        }
        NAMED_COLORS.get(lower.as_str()).map(|&(r, g, b)| Self {
            rgb: [r as f64, g as f64, b as f64],
            alpha: 1.0,
            original: Some(name.to_string()),
        })
    }

    fn parse_hex(hex: &str) -> Result<Self, ColorParseError> {
        let hex = hex.to_lowercase();
        let chars: Vec<char> = hex.chars().collect();

        match chars.len() {
            3 | 4 => {
                // #RGB[A] -> #RRGGBB[AA]
                let mut channels = [0u8; 4];
                channels[3] = 255;
                for (slot, &c) in channels.iter_mut().zip(&chars) {
                    *slot = Self::parse_hex_digit(c)? * 17;
                }
                Ok(Self::from_bytes(channels))
            }
            6 | 8 => {
                let mut channels = [0u8; 4];
                channels[3] = 255;
                for (slot, pair) in channels.iter_mut().zip(chars.chunks(2)) {
                    *slot = Self::parse_hex_pair(pair[0], pair[1])?;
                }
                Ok(Self::from_bytes(channels))
            }
            _ => Err(ColorParseError {
                message: format!("invalid hex color length: {}", chars.len()),
            }),
        }
    }

    fn from_bytes([r, g, b, a]: [u8; 4]) -> Self {
        Self::rgba(r as f64, g as f64, b as f64, a as f64 / 255.0)
    }

    fn parse_hex_digit(c: char) -> Result<u8, ColorParseError> {
        c.to_digit(16).map(|d| d as u8).ok_or_else(|| ColorParseError {
            message: format!("invalid hex digit: {}", c),
        })
    }

    fn parse_hex_pair(c1: char, c2: char) -> Result<u8, ColorParseError> {
        let high = Self::parse_hex_digit(c1)?;
        let low = Self::parse_hex_digit(c2)?;
        Ok(high * 16 + low)
    }

    /// Renders the color the way LESS prints it.
    ///
    /// Literal colors print as written, computed opaque colors as lowercase
    /// `#rrggbb`, computed translucent colors as `rgba(r, g, b, a)`.
    pub fn to_css(&self) -> String {
        if let Some(original) = &self.original {
            return original.clone();
        }

        let [r, g, b] = self.rgb.map(clamp_channel);
        let alpha = self.alpha.clamp(0.0, 1.0);
        if alpha < 1.0 {
            format!("rgba({}, {}, {}, {})", r, g, b, alpha)
        } else {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        }
    }

    /// Converts to hue (degrees), saturation and lightness (both 0-1).
    pub fn to_hsl(&self) -> (f64, f64, f64) {
        let [r, g, b] = self.rgb.map(|c| c / 255.0);

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return (0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + (if g < b { 6.0 } else { 0.0 })
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (h * 60.0, s, l)
    }

    /// Creates a color from HSL values (hue in degrees, s/l in 0-1).
    pub fn from_hsl(h: f64, s: f64, l: f64, alpha: f64) -> Self {
        let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;
            (
                Self::hue_to_rgb(p, q, h + 1.0 / 3.0),
                Self::hue_to_rgb(p, q, h),
                Self::hue_to_rgb(p, q, h - 1.0 / 3.0),
            )
        };

        Self::rgba(r * 255.0, g * 255.0, b * 255.0, alpha)
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }

        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    fn map_hsl(&self, f: impl FnOnce(f64, f64, f64) -> (f64, f64, f64)) -> Self {
        let (h, s, l) = self.to_hsl();
        let (h, s, l) = f(h, s, l);
        Self::from_hsl(h, s, l, self.alpha)
    }

    /// Increases lightness by `amount` (0-1, absolute).
    pub fn lighten(&self, amount: f64) -> Self {
        self.map_hsl(|h, s, l| (h, s, l + amount))
    }

    /// Decreases lightness by `amount` (0-1, absolute).
    pub fn darken(&self, amount: f64) -> Self {
        self.map_hsl(|h, s, l| (h, s, l - amount))
    }

    /// Increases saturation by `amount` (0-1, absolute).
    pub fn saturate(&self, amount: f64) -> Self {
        self.map_hsl(|h, s, l| (h, s + amount, l))
    }

    /// Decreases saturation by `amount` (0-1, absolute).
    pub fn desaturate(&self, amount: f64) -> Self {
        self.map_hsl(|h, s, l| (h, s - amount, l))
    }

    /// Rotates the hue by `degrees`.
    pub fn spin(&self, degrees: f64) -> Self {
        self.map_hsl(|h, s, l| (h + degrees, s, l))
    }

    /// Mixes two colors; `weight` (0-1) is the share of `self`.
    pub fn mix(&self, other: &Color, weight: f64) -> Self {
        let w = weight * 2.0 - 1.0;
        let a = self.alpha - other.alpha;

        let w1 = if w * a == -1.0 {
            (w + 1.0) / 2.0
        } else {
            ((w + a) / (1.0 + w * a) + 1.0) / 2.0
        };
        let w2 = 1.0 - w1;

        let mut rgb = [0.0; 3];
        for (i, channel) in rgb.iter_mut().enumerate() {
            *channel = self.rgb[i] * w1 + other.rgb[i] * w2;
        }
        let alpha = self.alpha * weight + other.alpha * (1.0 - weight);
        Self::rgba(rgb[0], rgb[1], rgb[2], alpha)
    }

    /// Applies `f` channel-wise, used by color arithmetic.
    pub fn zip_channels(&self, other: [f64; 3], f: impl Fn(f64, f64) -> f64) -> Self {
        let mut rgb = self.rgb;
        for (channel, rhs) in rgb.iter_mut().zip(other) {
            *channel = f(*channel, rhs);
        }
        Self::rgba(rgb[0], rgb[1], rgb[2], self.alpha)
    }
}

fn clamp_channel(c: f64) -> u8 {
    c.round().clamp(0.0, 255.0) as u8
}

/// CSS named colors.
static NAMED_COLORS: phf::Map<&'static str, (u8, u8, u8)> = phf_map! {
    "aliceblue" => (240, 248, 255),
    "antiquewhite" => (250, 235, 215),
    "aqua" => (0, 255, 255),
    "aquamarine" => (127, 255, 212),
    "azure" => (240, 255, 255),
    "beige" => (245, 245, 220),
    "bisque" => (255, 228, 196),
    "black" => (0, 0, 0),
    "blanchedalmond" => (255, 235, 205),
    "blue" => (0, 0, 255),
    "blueviolet" => (138, 43, 226),
    "brown" => (165, 42, 42),
    "burlywood" => (222, 184, 135),
    "cadetblue" => (95, 158, 160),
    "chartreuse" => (127, 255, 0),
    "chocolate" => (210, 105, 30),
    "coral" => (255, 127, 80),
    "cornflowerblue" => (100, 149, 237),
    "cornsilk" => (255, 248, 220),
    "crimson" => (220, 20, 60),
    "cyan" => (0, 255, 255),
    "darkblue" => (0, 0, 139),
    "darkcyan" => (0, 139, 139),
    "darkgoldenrod" => (184, 134, 11),
    "darkgray" => (169, 169, 169),
    "darkgrey" => (169, 169, 169),
    "darkgreen" => (0, 100, 0),
    "darkkhaki" => (189, 183, 107),
    "darkmagenta" => (139, 0, 139),
    "darkolivegreen" => (85, 107, 47),
    "darkorange" => (255, 140, 0),
    "darkorchid" => (153, 50, 204),
    "darkred" => (139, 0, 0),
    "darksalmon" => (233, 150, 122),
    "darkseagreen" => (143, 188, 143),
    "darkslateblue" => (72, 61, 139),
    "darkslategray" => (47, 79, 79),
    "darkslategrey" => (47, 79, 79),
    "darkturquoise" => (0, 206, 209),
    "darkviolet" => (148, 0, 211),
    "deeppink" => (255, 20, 147),
    "deepskyblue" => (0, 191, 255),
    "dimgray" => (105, 105, 105),
    "dimgrey" => (105, 105, 105),
    "dodgerblue" => (30, 144, 255),
    "firebrick" => (178, 34, 34),
    "floralwhite" => (255, 250, 240),
    "forestgreen" => (34, 139, 34),
    "fuchsia" => (255, 0, 255),
    "gainsboro" => (220, 220, 220),
    "ghostwhite" => (248, 248, 255),
    "gold" => (255, 215, 0),
    "goldenrod" => (218, 165, 32),
    "gray" => (128, 128, 128),
    "grey" => (128, 128, 128),
    "green" => (0, 128, 0),
    "greenyellow" => (173, 255, 47),
    "honeydew" => (240, 255, 240),
    "hotpink" => (255, 105, 180),
    "indianred" => (205, 92, 92),
    "indigo" => (75, 0, 130),
    "ivory" => (255, 255, 240),
    "khaki" => (240, 230, 140),
    "lavender" => (230, 230, 250),
    "lavenderblush" => (255, 240, 245),
    "lawngreen" => (124, 252, 0),
    "lemonchiffon" => (255, 250, 205),
    "lightblue" => (173, 216, 230),
    "lightcoral" => (240, 128, 128),
    "lightcyan" => (224, 255, 255),
    "lightgoldenrodyellow" => (250, 250, 210),
    "lightgray" => (211, 211, 211),
    "lightgrey" => (211, 211, 211),
    "lightgreen" => (144, 238, 144),
    "lightpink" => (255, 182, 193),
    "lightsalmon" => (255, 160, 122),
    "lightseagreen" => (32, 178, 170),
    "lightskyblue" => (135, 206, 250),
    "lightslategray" => (119, 136, 153),
    "lightslategrey" => (119, 136, 153),
    "lightsteelblue" => (176, 196, 222),
    "lightyellow" => (255, 255, 224),
    "lime" => (0, 255, 0),
    "limegreen" => (50, 205, 50),
    "linen" => (250, 240, 230),
    "magenta" => (255, 0, 255),
    "maroon" => (128, 0, 0),
    "mediumaquamarine" => (102, 205, 170),
    "mediumblue" => (0, 0, 205),
    "mediumorchid" => (186, 85, 211),
    "mediumpurple" => (147, 112, 219),
    "mediumseagreen" => (60, 179, 113),
    "mediumslateblue" => (123, 104, 238),
    "mediumspringgreen" => (0, 250, 154),
    "mediumturquoise" => (72, 209, 204),
    "mediumvioletred" => (199, 21, 133),
    "midnightblue" => (25, 25, 112),
    "mintcream" => (245, 255, 250),
    "mistyrose" => (255, 228, 225),
    "moccasin" => (255, 228, 181),
    "navajowhite" => (255, 222, 173),
    "navy" => (0, 0, 128),
    "oldlace" => (253, 245, 230),
    "olive" => (128, 128, 0),
    "olivedrab" => (107, 142, 35),
    "orange" => (255, 165, 0),
    "orangered" => (255, 69, 0),
    "orchid" => (218, 112, 214),
    "palegoldenrod" => (238, 232, 170),
    "palegreen" => (152, 251, 152),
    "paleturquoise" => (175, 238, 238),
    "palevioletred" => (219, 112, 147),
    "papayawhip" => (255, 239, 213),
    "peachpuff" => (255, 218, 185),
    "peru" => (205, 133, 63),
    "pink" => (255, 192, 203),
    "plum" => (221, 160, 221),
    "powderblue" => (176, 224, 230),
    "purple" => (128, 0, 128),
    "rebeccapurple" => (102, 51, 153),
    "red" => (255, 0, 0),
    "rosybrown" => (188, 143, 143),
    "royalblue" => (65, 105, 225),
    "saddlebrown" => (139, 69, 19),
    "salmon" => (250, 128, 114),
    "sandybrown" => (244, 164, 96),
    "seagreen" => (46, 139, 87),
    "seashell" => (255, 245, 238),
    "sienna" => (160, 82, 45),
    "silver" => (192, 192, 192),
    "skyblue" => (135, 206, 235),
    "slateblue" => (106, 90, 205),
    "slategray" => (112, 128, 144),
    "slategrey" => (112, 128, 144),
    "snow" => (255, 250, 250),
    "springgreen" => (0, 255, 127),
    "steelblue" => (70, 130, 180),
    "tan" => (210, 180, 140),
    "teal" => (0, 128, 128),
    "thistle" => (216, 191, 216),
    "tomato" => (255, 99, 71),
    "turquoise" => (64, 224, 208),
    "violet" => (238, 130, 238),
    "wheat" => (245, 222, 179),
    "white" => (255, 255, 255),
    "whitesmoke" => (245, 245, 245),
    "yellow" => (255, 255, 0),
    "yellowgreen" => (154, 205, 50),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Color::parse("#f00").unwrap().rgb, [255.0, 0.0, 0.0]);
        assert_eq!(Color::parse("#d9534f").unwrap().to_css(), "#d9534f");
        assert_eq!(Color::parse("#D9534F").unwrap().to_css(), "#D9534F");
        assert_eq!(Color::parse("#FFF").unwrap().to_css(), "#FFF");

        let translucent = Color::parse("#ff000080").unwrap();
        assert!((translucent.alpha - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_rejects_bad_hex() {
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#ggg").is_err());
        assert!(Color::parse("").is_err());
    }

    #[test]
    fn test_keyword_renders_as_written() {
        let color = Color::parse("Red").unwrap();
        assert_eq!(color.rgb, [255.0, 0.0, 0.0]);
        assert_eq!(color.to_css(), "Red");
        assert!(Color::from_keyword("aliceblue").is_some());
        assert!(Color::from_keyword("bold").is_none());
    }

    #[test]
    fn test_manipulation_drops_original_text() {
        let color = Color::parse("black").unwrap().lighten(0.1);
        assert_eq!(color.original, None);
        assert_eq!(color.to_css(), "#1a1a1a");

        let color = Color::parse("#FFF").unwrap().darken(0.2);
        assert_eq!(color.to_css(), "#cccccc");
    }

    #[test]
    fn test_translucent_renders_rgba() {
        let color = Color::rgb(255.0, 0.0, 0.0).with_alpha(0.5);
        assert_eq!(color.to_css(), "rgba(255, 0, 0, 0.5)");
    }

    #[test]
    fn test_hsl_round_trip() {
        let original = Color::rgb(217.0, 83.0, 79.0);
        let (h, s, l) = original.to_hsl();
        let back = Color::from_hsl(h, s, l, 1.0);
        assert_eq!(back.to_css(), "#d9534f");
    }

    #[test]
    fn test_darken_and_spin() {
        let white = Color::rgb(255.0, 255.0, 255.0);
        assert_eq!(white.darken(0.5).to_css(), "#808080");

        let red = Color::rgb(255.0, 0.0, 0.0);
        assert_eq!(red.spin(120.0).to_css(), "#00ff00");
    }

    #[test]
    fn test_mix_halfway() {
        let black = Color::rgb(0.0, 0.0, 0.0);
        let white = Color::rgb(255.0, 255.0, 255.0);
        assert_eq!(black.mix(&white, 0.5).to_css(), "#808080");
    }
}
