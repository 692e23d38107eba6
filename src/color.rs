/// RGB color with f32 channels, nominally in [0,255]. Fractional channel
/// values (the randomizer produces them) are carried through unchanged and
/// only rounded when a pixel is written.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const BROWN: Color = Color::new(165.0, 42.0, 42.0);
    pub const GREEN: Color = Color::new(0.0, 128.0, 0.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            self.r.clamp(0.0, 255.0).round() as u8,
            self.g.clamp(0.0, 255.0).round() as u8,
            self.b.clamp(0.0, 255.0).round() as u8,
            255,
        ]
    }

    /// Parse a CSS-style color string: `#rgb`, `#rrggbb`, `rgb(r,g,b)` with
    /// fractional components allowed, or a basic color name. Returns `None`
    /// for anything malformed; callers keep their previous/default color,
    /// mirroring how a canvas ignores invalid style assignments.
    pub fn parse(s: &str) -> Option<Color> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        if let Some(body) = s
            .strip_prefix("rgb(")
            .or_else(|| s.strip_prefix("RGB("))
            .and_then(|r| r.strip_suffix(')'))
        {
            let mut it = body.split(',');
            let r: f32 = it.next()?.trim().parse().ok()?;
            let g: f32 = it.next()?.trim().parse().ok()?;
            let b: f32 = it.next()?.trim().parse().ok()?;
            if it.next().is_some() || !(r.is_finite() && g.is_finite() && b.is_finite()) {
                return None;
            }
            return Some(Color::new(r, g, b));
        }
        Self::named(&s.to_ascii_lowercase())
    }

    fn parse_hex(hex: &str) -> Option<Color> {
        let v = |c: u8| -> Option<f32> {
            (c as char).to_digit(16).map(|d| d as f32)
        };
        match hex.len() {
            3 => {
                let b = hex.as_bytes();
                Some(Color::new(
                    v(b[0])? * 17.0,
                    v(b[1])? * 17.0,
                    v(b[2])? * 17.0,
                ))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Color::new(r as f32, g as f32, b as f32))
            }
            _ => None,
        }
    }

    fn named(name: &str) -> Option<Color> {
        let (r, g, b) = match name {
            "black" => (0, 0, 0),
            "white" => (255, 255, 255),
            "red" => (255, 0, 0),
            "green" => (0, 128, 0),
            "blue" => (0, 0, 255),
            "brown" => (165, 42, 42),
            "orange" => (255, 165, 0),
            "yellow" => (255, 255, 0),
            "purple" => (128, 0, 128),
            "pink" => (255, 192, 203),
            "gray" | "grey" => (128, 128, 128),
            _ => return None,
        };
        Some(Color::new(r as f32, g as f32, b as f32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_defaults() {
        assert_eq!(Color::parse("brown"), Some(Color::BROWN));
        assert_eq!(Color::parse("Green"), Some(Color::GREEN));
    }

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Color::parse("#fff"), Some(Color::new(255.0, 255.0, 255.0)));
        assert_eq!(Color::parse("#a52a2a"), Some(Color::BROWN));
    }

    #[test]
    fn parses_rgb_with_fractional_channels() {
        let c = Color::parse("rgb(12.5, 0, 254.9)").unwrap();
        assert_eq!(c, Color::new(12.5, 0.0, 254.9));
    }

    #[test]
    fn malformed_strings_parse_to_none() {
        for s in ["", "#12", "#gggggg", "rgb(1,2)", "rgb(1,2,3,4)", "chartreuse-ish"] {
            assert_eq!(Color::parse(s), None, "{s:?}");
        }
    }

    #[test]
    fn fractional_channels_round_at_pixel_boundary() {
        assert_eq!(Color::new(12.5, -3.0, 300.0).to_rgba8(), [13, 0, 255, 255]);
    }
}
