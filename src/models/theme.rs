//! Color themes for rendered graphs

use plotters::style::RGBColor;

/// Selectable palette, from the `theme` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Trans,
}

/// Colors used by the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub line: RGBColor,
    /// `None` leaves the canvas transparent
    pub background: Option<RGBColor>,
    pub text: RGBColor,
    pub watermark: RGBColor,
    pub watermark_credit: RGBColor,
}

impl Theme {
    /// Unknown names fall back to the light theme
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "dark" => Theme::Dark,
            "trans" => Theme::Trans,
            _ => Theme::Light,
        }
    }

    pub fn palette(self) -> Palette {
        let watermark = RGBColor(0x66, 0x66, 0x66);
        let watermark_credit = RGBColor(0x88, 0x88, 0x88);
        match self {
            Theme::Light => Palette {
                line: RGBColor(0xFF, 0xC6, 0x00),
                background: Some(RGBColor(0xFF, 0xFF, 0xFF)),
                text: RGBColor(0x00, 0x00, 0x00),
                watermark,
                watermark_credit,
            },
            Theme::Dark => Palette {
                line: RGBColor(0xFF, 0xD7, 0x00),
                background: Some(RGBColor(0x0D, 0x11, 0x17)),
                text: RGBColor(0xFF, 0xFF, 0xFF),
                watermark,
                watermark_credit,
            },
            Theme::Trans => Palette {
                line: RGBColor(0xFF, 0xD7, 0x00),
                background: None,
                text: RGBColor(0xFF, 0xFF, 0xFF),
                watermark,
                watermark_credit,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_theme() {
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse("TRANS"), Theme::Trans);
        assert_eq!(Theme::parse("light"), Theme::Light);
        assert_eq!(Theme::parse("neon"), Theme::Light);
    }

    #[test]
    fn test_trans_has_no_background() {
        assert!(Theme::Trans.palette().background.is_none());
        assert!(Theme::Dark.palette().background.is_some());
    }
}
