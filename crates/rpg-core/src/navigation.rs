//! Navigation between zones and areas
//!
//! All position changes go through here. A move either succeeds and
//! updates the [`Position`], or fails and leaves it untouched.

use strum::IntoEnumIterator;

use crate::errors::GameError;
use crate::gameloop::Position;
use crate::world::{Area, AreaId, Direction, World, Zone, ZoneId};

/// Where a zone move landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneEntry<'w> {
    pub zone: &'w Zone,
    pub area: &'w Area,
}

impl ZoneEntry<'_> {
    pub fn describe(&self) -> String {
        format!("{}\n{}", self.zone.describe(), self.area.describe())
    }
}

/// A neighbouring zone and the direction it lies in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReachableZone<'w> {
    pub direction: Direction,
    pub zone: &'w Zone,
}

/// Move into an adjacent zone, landing in its entry area
pub fn move_zone<'w>(
    world: &'w World,
    position: &mut Position,
    target: ZoneId,
) -> Result<ZoneEntry<'w>, GameError> {
    let neighbors = world.graph().neighbors(position.zone)?;
    if !world.graph().contains(target) {
        return Err(GameError::not_found("zone", target));
    }
    if !neighbors.contains(&target) {
        return Err(GameError::invalid_move(format!(
            "{} is not next to {}",
            target, position.zone
        )));
    }

    let zone = world.zone(target)?;
    let area = world.entry_area(target)?;
    tracing::debug!(from = %position.zone, to = %target, "moved zone");
    position.zone = target;
    position.area = area.id;
    Ok(ZoneEntry { zone, area })
}

/// Move one step up/down/left/right
pub fn move_direction<'w>(
    world: &'w World,
    position: &mut Position,
    direction: Direction,
) -> Result<ZoneEntry<'w>, GameError> {
    let target = world
        .graph()
        .neighbor_in(position.zone, direction)?
        .ok_or_else(|| {
            GameError::invalid_move(format!(
                "you can't go any further {}",
                direction.to_string().to_lowercase()
            ))
        })?;
    move_zone(world, position, target)
}

/// Move to another area of the current zone
pub fn move_area<'w>(
    world: &'w World,
    position: &mut Position,
    target: AreaId,
) -> Result<&'w Area, GameError> {
    let zone = world.zone(position.zone)?;
    if zone.areas.len() <= 1 {
        return Err(GameError::NoOtherAreas {
            zone: zone.id.to_string(),
        });
    }
    if target.zone != position.zone {
        return Err(GameError::invalid_move(format!(
            "{} is not in zone {}",
            target, position.zone
        )));
    }
    if target == position.area {
        return Err(GameError::invalid_move(format!("you are already in {}", target)));
    }

    let area = zone
        .area(target)
        .ok_or_else(|| GameError::not_found("area", target))?;
    tracing::debug!(from = %position.area, to = %target, "moved area");
    position.area = target;
    Ok(area)
}

/// Zones one move away, ordered up/down/left/right
pub fn list_reachable_zones<'w>(
    world: &'w World,
    position: &Position,
) -> Result<Vec<ReachableZone<'w>>, GameError> {
    let mut reachable = Vec::new();
    for direction in Direction::iter() {
        if let Some(id) = world.graph().neighbor_in(position.zone, direction)? {
            reachable.push(ReachableZone {
                direction,
                zone: world.zone(id)?,
            });
        }
    }
    Ok(reachable)
}

/// Every other area of the current zone
pub fn list_reachable_areas<'w>(
    world: &'w World,
    position: &Position,
) -> Result<Vec<&'w Area>, GameError> {
    Ok(world
        .areas_of(position.zone)?
        .iter()
        .filter(|a| a.id != position.area)
        .collect())
}

pub fn describe_area(world: &World, area: AreaId) -> Result<String, GameError> {
    Ok(world.area(area)?.describe())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::test_support::small_world;

    fn z(s: &str) -> ZoneId {
        s.parse().unwrap()
    }

    fn start(world: &World, zone: &str) -> Position {
        Position::at_entry(world, z(zone)).unwrap()
    }

    #[test]
    fn test_move_zone_to_neighbor() {
        let world = small_world(5, 5);
        let mut pos = start(&world, "A1");

        let entry = move_zone(&world, &mut pos, z("B1")).unwrap();
        assert_eq!(entry.zone.id, z("B1"));
        assert_eq!(entry.area.name, "Gate");
        assert_eq!(pos.zone, z("B1"));
        assert_eq!(pos.area, AreaId::new(z("B1"), 0));
        assert!(pos.is_in_zone(z("B1")));
        assert!(!pos.is_in_zone(z("A1")));
    }

    #[test]
    fn test_move_zone_rejects_non_neighbors() {
        let world = small_world(5, 5);
        let mut pos = start(&world, "A1");

        for target in ["C1", "B2", "A1", "E5"] {
            let result = move_zone(&world, &mut pos, z(target));
            assert!(matches!(result, Err(GameError::InvalidMove { .. })), "{target}");
        }
        assert_eq!(pos, start(&world, "A1"));
    }

    #[test]
    fn test_move_zone_unknown_target() {
        let world = small_world(2, 2);
        let mut pos = start(&world, "A1");
        let result = move_zone(&world, &mut pos, z("C1"));
        assert!(matches!(result, Err(GameError::NotFound { .. })));
    }

    #[test]
    fn test_move_direction_stops_at_border() {
        let world = small_world(5, 5);
        let mut pos = start(&world, "A1");

        assert!(matches!(
            move_direction(&world, &mut pos, Direction::Up),
            Err(GameError::InvalidMove { .. })
        ));
        move_direction(&world, &mut pos, Direction::Down).unwrap();
        move_direction(&world, &mut pos, Direction::Right).unwrap();
        assert_eq!(pos.zone, z("B2"));
    }

    #[test]
    fn test_move_area_within_zone() {
        let world = small_world(3, 3);
        let mut pos = start(&world, "A1");
        let grove = AreaId::new(z("A1"), 1);

        let area = move_area(&world, &mut pos, grove).unwrap();
        assert_eq!(area.name, "Grove");
        assert!(pos.is_in_area(grove));

        // And back to the gate
        move_area(&world, &mut pos, AreaId::new(z("A1"), 0)).unwrap();
    }

    #[test]
    fn test_move_area_rejects_current_and_foreign() {
        let world = small_world(3, 3);
        let mut pos = start(&world, "A1");

        let current = pos.area;
        let same = move_area(&world, &mut pos, current);
        assert!(matches!(same, Err(GameError::InvalidMove { .. })));

        let foreign = move_area(&world, &mut pos, AreaId::new(z("A2"), 1));
        assert!(matches!(foreign, Err(GameError::InvalidMove { .. })));

        let missing = move_area(&world, &mut pos, AreaId::new(z("A1"), 7));
        assert!(matches!(missing, Err(GameError::NotFound { .. })));
    }

    #[test]
    fn test_single_area_zone_has_no_other_areas() {
        let world = small_world(3, 3);
        let mut pos = start(&world, "B1");

        for target in [pos.area, AreaId::new(z("B1"), 1), AreaId::new(z("A1"), 1)] {
            let result = move_area(&world, &mut pos, target);
            assert!(matches!(result, Err(GameError::NoOtherAreas { .. })));
        }
    }

    #[test]
    fn test_list_reachable_zones() {
        let world = small_world(5, 5);
        let pos = start(&world, "C3");
        let reachable = list_reachable_zones(&world, &pos).unwrap();
        let summary: Vec<(Direction, String)> = reachable
            .iter()
            .map(|r| (r.direction, r.zone.id.to_string()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Direction::Up, "C2".to_string()),
                (Direction::Down, "C4".to_string()),
                (Direction::Left, "B3".to_string()),
                (Direction::Right, "D3".to_string()),
            ]
        );
    }

    #[test]
    fn test_list_reachable_areas_excludes_current() {
        let world = small_world(3, 3);
        let pos = start(&world, "A1");
        let areas = list_reachable_areas(&world, &pos).unwrap();
        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].name, "Grove");

        let lonely = start(&world, "B1");
        assert!(list_reachable_areas(&world, &lonely).unwrap().is_empty());
    }

    #[test]
    fn test_describe_area() {
        let world = small_world(3, 3);
        let text = describe_area(&world, AreaId::new(z("A1"), 1)).unwrap();
        assert_eq!(text, "Grove (Forest): Tall trees.");
    }
}
