//! Area name tables

use rpg_core::world::Biome;

/// Name of the safe area every zone opens onto
pub const ENTRY_AREA: &str = "Crossroads";

static FOREST: &[&str] = &["Thicket", "Old Grove", "Fern Hollow", "Mossy Glade"];
static PLAINS: &[&str] = &["Meadow", "Windy Steppe", "Farmstead", "Tall Grass"];
static SWAMP: &[&str] = &["Mire", "Sunken Path", "Reed Bed", "Stagnant Pool"];
static CAVES: &[&str] = &["Grotto", "Dripping Tunnel", "Crystal Hall", "Deep Shaft"];
static MOUNTAINS: &[&str] = &["Ridge", "Rocky Pass", "Summit", "Scree Slope"];

/// Candidate area names for a biome
pub fn area_names(biome: Biome) -> &'static [&'static str] {
    match biome {
        Biome::Forest => FOREST,
        Biome::Plains => PLAINS,
        Biome::Swamp => SWAMP,
        Biome::Caves => CAVES,
        Biome::Mountains => MOUNTAINS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_biome_has_names() {
        for biome in Biome::iter() {
            let names = area_names(biome);
            assert!(names.len() >= 3, "{biome}");
            assert!(!names.contains(&ENTRY_AREA));
        }
    }
}
