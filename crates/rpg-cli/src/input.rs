//! Input parsing - turn typed lines into menu picks
//!
//! Every parser is total: unrecognized text gives `None` and the caller
//! asks again.

use rpg_core::player::{ClassKind, Stat};
use rpg_core::world::Direction;
use strum::IntoEnumIterator;

/// 1-based menu number in `1..=count`
pub fn parse_choice(line: &str, count: usize) -> Option<usize> {
    let n: usize = line.trim().parse().ok()?;
    (1..=count).contains(&n).then_some(n)
}

pub fn parse_yes_no(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Class by name, any case
pub fn parse_class(line: &str) -> Option<ClassKind> {
    line.trim().parse().ok()
}

/// Direction by name or first letter
pub fn parse_direction(line: &str) -> Option<Direction> {
    let text = line.trim().to_ascii_lowercase();
    if text.is_empty() {
        return None;
    }
    Direction::iter().find(|d| {
        let name = d.to_string().to_ascii_lowercase();
        name == text || (text.len() == 1 && name.starts_with(&text))
    })
}

/// Stat by name, any case
pub fn parse_stat(line: &str) -> Option<Stat> {
    let text = line.trim();
    Stat::iter().find(|s| s.to_string().eq_ignore_ascii_case(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice_bounds() {
        assert_eq!(parse_choice("1", 3), Some(1));
        assert_eq!(parse_choice(" 3 \n", 3), Some(3));
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("-1", 3), None);
        assert_eq!(parse_choice("two", 3), None);
        assert_eq!(parse_choice("", 3), None);
    }

    #[test]
    fn test_parse_yes_no() {
        assert_eq!(parse_yes_no("Y"), Some(true));
        assert_eq!(parse_yes_no("no\n"), Some(false));
        assert_eq!(parse_yes_no("maybe"), None);
    }

    #[test]
    fn test_parse_class_never_evaluates_text() {
        assert_eq!(parse_class("mage"), Some(ClassKind::Mage));
        assert_eq!(parse_class("ROGUE"), Some(ClassKind::Rogue));
        assert_eq!(parse_class("__import__('os')"), None);
        assert_eq!(parse_class(""), None);
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!(parse_direction("up"), Some(Direction::Up));
        assert_eq!(parse_direction("R"), Some(Direction::Right));
        assert_eq!(parse_direction("l"), Some(Direction::Left));
        assert_eq!(parse_direction("north"), None);
        assert_eq!(parse_direction(""), None);
    }

    #[test]
    fn test_parse_stat() {
        assert_eq!(parse_stat("defense"), Some(Stat::Defense));
        assert_eq!(parse_stat("Magic"), Some(Stat::Magic));
        assert_eq!(parse_stat("luck"), None);
    }
}
