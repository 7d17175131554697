//! Flavor text for zones and areas
//!
//! Area descriptions are stitched together from word lists, e.g.
//! "This dark tower smells cold." Zone descriptions count the zones in
//! column order starting from the top-left one.

use rpg_core::GameRng;

pub static ADJECTIVES: &[&str] = &[
    "dark", "mighty", "cold", "warm", "wet", "dry", "quiet", "loud", "smelly", "clean", "dirty",
    "empty", "full", "bright", "giant", "tiny", "unusual", "strange", "odd", "weird",
];

pub static NOUNS: &[&str] = &[
    "room", "tower", "ruins", "bathroom", "bedroom", "hut", "fort", "basement", "attic", "garage",
    "closet", "office", "library", "garden", "yard", "field", "balcony", "staircase", "hallway",
];

pub static VERBS: &[&str] = &["smells", "feels", "looks", "sounds", "tastes", "seems", "appears"];

/// Text of the top-left zone
pub const STARTING_ZONE: &str = "This is the starting zone.";

static ORDINALS: &[&str] = &[
    "first",
    "second",
    "third",
    "fourth",
    "fifth",
    "sixth",
    "seventh",
    "eighth",
    "ninth",
    "tenth",
    "eleventh",
    "twelfth",
    "thirteenth",
    "fourteenth",
    "fifteenth",
    "sixteenth",
    "seventeenth",
    "eighteenth",
    "nineteenth",
    "twentieth",
    "twenty-first",
    "twenty-second",
    "twenty-third",
    "twenty-fourth",
    "twenty-fifth",
];

fn pick(words: &'static [&'static str], rng: &mut GameRng) -> &'static str {
    rng.choose(words).copied().unwrap_or_default()
}

/// Random one-line description for an area
pub fn create_description(rng: &mut GameRng) -> String {
    format!(
        "This {} {} {} {}.",
        pick(ADJECTIVES, rng),
        pick(NOUNS, rng),
        pick(VERBS, rng),
        pick(ADJECTIVES, rng)
    )
}

/// English ordinal for a 1-based position ("seventh", "31st")
pub fn ordinal(n: usize) -> String {
    if let Some(word) = n.checked_sub(1).and_then(|i| ORDINALS.get(i)) {
        return (*word).to_string();
    }
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Description of the zone at a 0-based column-major index
pub fn zone_description(index: usize) -> String {
    if index == 0 {
        STARTING_ZONE.to_string()
    } else {
        format!("This is the {} zone.", ordinal(index + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_description_shape() {
        let mut rng = GameRng::new(3);
        for _ in 0..50 {
            let text = create_description(&mut rng);
            let words: Vec<&str> = text.trim_end_matches('.').split(' ').collect();
            assert_eq!(words.len(), 5);
            assert_eq!(words[0], "This");
            assert!(ADJECTIVES.contains(&words[1]));
            assert!(NOUNS.contains(&words[2]));
            assert!(VERBS.contains(&words[3]));
            assert!(ADJECTIVES.contains(&words[4]));
        }
    }

    #[test]
    fn test_zone_descriptions() {
        assert_eq!(zone_description(0), "This is the starting zone.");
        assert_eq!(zone_description(6), "This is the seventh zone.");
        assert_eq!(zone_description(24), "This is the twenty-fifth zone.");
        assert_eq!(zone_description(25), "This is the 26th zone.");
    }

    #[test]
    fn test_ordinal_suffixes() {
        assert_eq!(ordinal(31), "31st");
        assert_eq!(ordinal(42), "42nd");
        assert_eq!(ordinal(113), "113th");
        assert_eq!(ordinal(103), "103rd");
    }
}
