use layers::Rgba;

/// A color string that matched none of the supported CSS forms.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorError {
    pub input: String,
}

impl ColorError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

impl std::fmt::Display for ColorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unrecognized color: {}", self.input)
    }
}

impl std::error::Error for ColorError {}

/// Parses a CSS-style color: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`,
/// `rgb(r, g, b)`, `rgba(r, g, b, a)` with alpha in [0, 1], or one of the
/// basic named colors.
pub fn parse_color(input: &str) -> Result<Rgba, ColorError> {
    let trimmed = input.trim();
    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| ColorError::new(input));
    }
    let lower = trimmed.to_ascii_lowercase();
    if let Some(body) = lower.strip_prefix("rgba(").and_then(|s| s.strip_suffix(')')) {
        return parse_components(body, true).ok_or_else(|| ColorError::new(input));
    }
    if let Some(body) = lower.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
        return parse_components(body, false).ok_or_else(|| ColorError::new(input));
    }
    named_color(&lower).ok_or_else(|| ColorError::new(input))
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let mut channels = [0u8, 0, 0, 255];
    match hex.len() {
        3 | 4 => {
            for (i, c) in hex.chars().enumerate() {
                let nibble = c.to_digit(16)? as u8;
                channels[i] = (nibble << 4) | nibble;
            }
        }
        6 | 8 => {
            for i in 0..hex.len() / 2 {
                channels[i] = u8::from_str_radix(&hex[2 * i..2 * i + 2], 16).ok()?;
            }
        }
        _ => return None,
    }
    Some(Rgba::new(channels[0], channels[1], channels[2], channels[3]))
}

fn parse_components(body: &str, has_alpha: bool) -> Option<Rgba> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let expected = if has_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }
    let channel = |raw: &str| -> Option<u8> {
        let value: i64 = raw.parse().ok()?;
        u8::try_from(value).ok()
    };
    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let a = if has_alpha {
        let value: f64 = parts[3].parse().ok()?;
        if !(0.0..=1.0).contains(&value) {
            return None;
        }
        (value * 255.0).round() as u8
    } else {
        255
    };
    Some(Rgba::new(r, g, b, a))
}

fn named_color(name: &str) -> Option<Rgba> {
    let (r, g, b) = match name {
        "black" => (0x00, 0x00, 0x00),
        "silver" => (0xc0, 0xc0, 0xc0),
        "gray" | "grey" => (0x80, 0x80, 0x80),
        "white" => (0xff, 0xff, 0xff),
        "maroon" => (0x80, 0x00, 0x00),
        "red" => (0xff, 0x00, 0x00),
        "purple" => (0x80, 0x00, 0x80),
        "fuchsia" | "magenta" => (0xff, 0x00, 0xff),
        "green" => (0x00, 0x80, 0x00),
        "lime" => (0x00, 0xff, 0x00),
        "olive" => (0x80, 0x80, 0x00),
        "yellow" => (0xff, 0xff, 0x00),
        "navy" => (0x00, 0x00, 0x80),
        "blue" => (0x00, 0x00, 0xff),
        "teal" => (0x00, 0x80, 0x80),
        "aqua" | "cyan" => (0x00, 0xff, 0xff),
        "orange" => (0xff, 0xa5, 0x00),
        _ => return None,
    };
    Some(Rgba::opaque(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::parse_color;
    use layers::Rgba;

    #[test]
    fn short_hex_expands_nibbles() {
        assert_eq!(parse_color("#07f").unwrap(), Rgba::opaque(0x00, 0x77, 0xff));
        assert_eq!(parse_color("#f70").unwrap(), Rgba::opaque(0xff, 0x77, 0x00));
        assert_eq!(parse_color("#07f8").unwrap(), Rgba::new(0x00, 0x77, 0xff, 0x88));
    }

    #[test]
    fn long_hex_forms() {
        assert_eq!(parse_color("#102030").unwrap(), Rgba::opaque(0x10, 0x20, 0x30));
        assert_eq!(
            parse_color("#10203040").unwrap(),
            Rgba::new(0x10, 0x20, 0x30, 0x40)
        );
    }

    #[test]
    fn rgb_functional_forms() {
        assert_eq!(parse_color("rgb(255, 128, 0)").unwrap(), Rgba::opaque(255, 128, 0));
        assert_eq!(
            parse_color("rgba(10, 20, 30, 0.5)").unwrap(),
            Rgba::new(10, 20, 30, 128)
        );
        assert_eq!(parse_color("RGB(1,2,3)").unwrap(), Rgba::opaque(1, 2, 3));
    }

    #[test]
    fn named_colors() {
        assert_eq!(parse_color("white").unwrap(), Rgba::WHITE);
        assert_eq!(parse_color("Navy").unwrap(), Rgba::opaque(0, 0, 0x80));
        assert_eq!(parse_color("grey").unwrap(), parse_color("gray").unwrap());
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#gg0011").is_err());
        assert!(parse_color("rgb(256, 0, 0)").is_err());
        assert!(parse_color("rgb(1, 2)").is_err());
        assert!(parse_color("rgba(1, 2, 3, 1.5)").is_err());
        assert!(parse_color("chartreuse-ish").is_err());
        assert!(parse_color("").is_err());
    }
}
