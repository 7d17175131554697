//! Console color theme
//!
//! Adapts to dark and light terminal backgrounds. Auto-detects via the
//! COLORFGBG env var; `Theme::plain()` turns styling off entirely.

use crossterm::style::Color;

/// Colors for each kind of console text.
/// `None` prints with the terminal's default color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Titles and menu headers
    pub accent: Option<Color>,
    /// Hints and prompts
    pub dim: Option<Color>,
    /// Victories, rewards
    pub good: Option<Color>,
    /// Damage, defeat, errors
    pub bad: Option<Color>,
    /// The player's cell on the map
    pub map_player: Option<Color>,
    pub map_zone: Option<Color>,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            accent: Some(Color::Cyan),
            dim: Some(Color::DarkGrey),
            good: Some(Color::Green),
            bad: Some(Color::Red),
            map_player: Some(Color::Yellow),
            map_zone: Some(Color::Grey),
        }
    }

    pub fn light() -> Self {
        Self {
            accent: Some(Color::DarkBlue),
            dim: Some(Color::DarkGrey),
            good: Some(Color::DarkGreen),
            bad: Some(Color::DarkRed),
            map_player: Some(Color::DarkMagenta),
            map_zone: Some(Color::Black),
        }
    }

    /// No colors at all (pipes, tests)
    pub fn plain() -> Self {
        Self {
            accent: None,
            dim: None,
            good: None,
            bad: None,
            map_player: None,
            map_zone: None,
        }
    }

    /// Pick dark or light from COLORFGBG ("fg;bg"); dark when unknown
    pub fn detect() -> Self {
        match std::env::var("COLORFGBG") {
            Ok(value) if is_light_background(&value) => Self::light(),
            _ => Self::dark(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

fn is_light_background(colorfgbg: &str) -> bool {
    colorfgbg
        .rsplit(';')
        .next()
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .is_some_and(|bg| bg == 7 || bg == 15)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_background_detection() {
        assert!(is_light_background("0;15"));
        assert!(is_light_background("0;default;7"));
        assert!(!is_light_background("15;0"));
        assert!(!is_light_background("garbage"));
    }

    #[test]
    fn test_plain_has_no_colors() {
        let theme = Theme::plain();
        assert!(theme.accent.is_none());
        assert!(theme.bad.is_none());
    }
}
