//! SGR color codes for told lines and relayed streams.
//!
//! A [`ColorSpec`] describes which attributes a caller asks for. Rendering it
//! yields a [`ColorCodes`] pair: the sequence that switches the attributes on
//! and the sequence that switches weight and hue back to neutral.
//!
//! ```text
//! ColorSpec { color: Yellow, bright: true }  ->  "\x1b[1;33m" ... "\x1b[22;39m"
//! ```

use serde::{Deserialize, Serialize};

/// Weight and hue reset, emitted after every colored piece of output.
const RESET_WEIGHT_AND_HUE: &str = "\x1b[22;39m";

/// Foreground hue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Terminal default foreground
    None,
    Red,
    Green,
    Yellow,
    Blue,
    Purple,
    Cyan,
    White,
}

impl Color {
    /// SGR parameter selecting this hue
    pub fn sgr_code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Purple => 35,
            Color::Cyan => 36,
            Color::White => 37,
            Color::None => 39,
        }
    }

    /// Parse a color name as used on the command line
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "none" | "default" => Some(Color::None),
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            "blue" => Some(Color::Blue),
            "purple" | "magenta" => Some(Color::Purple),
            "cyan" => Some(Color::Cyan),
            "white" => Some(Color::White),
            _ => None,
        }
    }
}

/// Requested text attributes. `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSpec {
    pub color: Option<Color>,
    pub bright: Option<bool>,
    pub faint: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
}

/// Rendered escape sequences. Both are empty when nothing is to be colored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorCodes {
    pub prefix: String,
    pub postfix: String,
}

impl ColorSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn bright(mut self, bright: bool) -> Self {
        self.bright = Some(bright);
        self
    }

    pub fn faint(mut self, faint: bool) -> Self {
        self.faint = Some(faint);
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn underline(mut self, underline: bool) -> Self {
        self.underline = Some(underline);
        self
    }

    /// True if the color spec neither picks a hue nor a weight.
    ///
    /// Faint, italic and underline alone do not trigger any coloring.
    pub fn is_plain(&self) -> bool {
        self.color.is_none() && self.bright.is_none()
    }

    /// SGR parameters in emission order: weight, italic, underline, hue
    fn sgr_params(&self) -> Vec<u8> {
        let mut params = Vec::with_capacity(4);
        if self.bright.is_some() || self.faint.is_some() {
            let weight = if self.bright == Some(true) {
                1
            } else if self.faint == Some(true) {
                2
            } else {
                22
            };
            params.push(weight);
        }
        if let Some(italic) = self.italic {
            params.push(if italic { 3 } else { 23 });
        }
        if let Some(underline) = self.underline {
            params.push(if underline { 4 } else { 24 });
        }
        if let Some(color) = self.color {
            params.push(color.sgr_code());
        }
        params
    }

    /// Render for a destination.
    ///
    /// Non-interactive destinations never get escape sequences. The postfix
    /// only resets weight and hue; italic and underline stay as requested.
    pub fn render(&self, tty: bool) -> ColorCodes {
        if !tty || self.is_plain() {
            return ColorCodes::default();
        }
        ColorCodes {
            prefix: sgr_sequence(&self.sgr_params()),
            postfix: RESET_WEIGHT_AND_HUE.to_string(),
        }
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        ColorSpec::new().color(color)
    }
}

/// Build `ESC [ p1;p2;... m`
pub fn sgr_sequence(params: &[u8]) -> String {
    let joined = params
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(";");
    format!("\x1b[{}m", joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_spec_renders_nothing() {
        assert_eq!(ColorSpec::new().render(true), ColorCodes::default());

        // Faint, italic and underline alone are not enough
        let spec = ColorSpec::new().faint(true).italic(true).underline(true);
        assert_eq!(spec.render(true), ColorCodes::default());
    }

    #[test]
    fn test_non_tty_renders_nothing() {
        let spec = ColorSpec::new().color(Color::Red).bright(true);
        assert_eq!(spec.render(false), ColorCodes::default());
    }

    #[test]
    fn test_hue_only() {
        let codes = ColorSpec::from(Color::Yellow).render(true);
        assert_eq!(codes.prefix, "\x1b[33m");
        assert_eq!(codes.postfix, "\x1b[22;39m");
    }

    #[test]
    fn test_bright_hue() {
        let codes = ColorSpec::new().color(Color::Cyan).bright(true).render(true);
        assert_eq!(codes.prefix, "\x1b[1;36m");
        assert_eq!(codes.postfix, "\x1b[22;39m");
    }

    #[test]
    fn test_weight_variants() {
        // Bright wins over faint
        let spec = ColorSpec::new().bright(true).faint(true);
        assert_eq!(spec.render(true).prefix, "\x1b[1m");

        let spec = ColorSpec::new().bright(false).faint(true);
        assert_eq!(spec.render(true).prefix, "\x1b[2m");

        let spec = ColorSpec::new().bright(false);
        assert_eq!(spec.render(true).prefix, "\x1b[22m");

        let spec = ColorSpec::new().color(Color::Blue).faint(false);
        assert_eq!(spec.render(true).prefix, "\x1b[22;34m");
    }

    #[test]
    fn test_full_parameter_order() {
        let spec = ColorSpec::new()
            .color(Color::Purple)
            .bright(true)
            .italic(false)
            .underline(true);
        let codes = spec.render(true);
        assert_eq!(codes.prefix, "\x1b[1;23;4;35m");
        // Italic and underline are not reset
        assert_eq!(codes.postfix, "\x1b[22;39m");
    }

    #[test]
    fn test_color_none_resets_hue() {
        let codes = ColorSpec::new().color(Color::None).bright(false).render(true);
        assert_eq!(codes.prefix, "\x1b[22;39m");
    }

    #[test]
    fn test_color_by_name() {
        assert_eq!(Color::by_name("Green"), Some(Color::Green));
        assert_eq!(Color::by_name("magenta"), Some(Color::Purple));
        assert_eq!(Color::by_name("orange"), None);
    }

    #[test]
    fn test_spec_from_toml() {
        let spec: ColorSpec = toml::from_str("color = \"white\"\nbright = true\n").unwrap();
        assert_eq!(spec, ColorSpec::new().color(Color::White).bright(true));
    }
}
