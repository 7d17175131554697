//! World state
//!
//! The world is built once at startup and never mutated: the zone graph,
//! the zone and area tables and the enemy template registry. Everything
//! else borrows it.

mod graph;
pub mod options;
mod zone;

use std::collections::BTreeMap;

pub use graph::ZoneGraph;
pub use options::{GameOptions, OptionsError};
pub use zone::{Area, AreaId, Biome, Direction, Zone, ZoneId};

use crate::errors::GameError;
use crate::monster::EnemyRegistry;

#[derive(Debug, Clone)]
pub struct World {
    graph: ZoneGraph,
    zones: BTreeMap<ZoneId, Zone>,
    enemies: EnemyRegistry,
}

impl World {
    /// Assemble a world from its graph, zone table and enemy registry.
    ///
    /// Every graph node needs a zone with at least one area, and every
    /// zone must be a graph node.
    pub fn new(
        graph: ZoneGraph,
        zones: impl IntoIterator<Item = Zone>,
        enemies: EnemyRegistry,
    ) -> Result<Self, GameError> {
        let zones: BTreeMap<ZoneId, Zone> = zones.into_iter().map(|z| (z.id, z)).collect();

        for id in zones.keys() {
            if !graph.contains(*id) {
                return Err(GameError::not_found("zone", id));
            }
        }
        for id in graph.zones() {
            let zone = zones
                .get(&id)
                .ok_or_else(|| GameError::not_found("zone", id))?;
            if zone.areas.is_empty() {
                return Err(GameError::not_found("entry area of zone", id));
            }
        }

        Ok(Self {
            graph,
            zones,
            enemies,
        })
    }

    pub fn graph(&self) -> &ZoneGraph {
        &self.graph
    }

    pub fn enemies(&self) -> &EnemyRegistry {
        &self.enemies
    }

    pub fn width(&self) -> u8 {
        self.graph.width()
    }

    pub fn height(&self) -> u8 {
        self.graph.height()
    }

    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.zones.values()
    }

    pub fn zone(&self, id: ZoneId) -> Result<&Zone, GameError> {
        self.zones
            .get(&id)
            .ok_or_else(|| GameError::not_found("zone", id))
    }

    pub fn neighbors(&self, id: ZoneId) -> Result<Vec<ZoneId>, GameError> {
        Ok(self.graph.neighbors(id)?.iter().copied().collect())
    }

    /// Areas of a zone in stable order; the first is the entry area
    pub fn areas_of(&self, id: ZoneId) -> Result<&[Area], GameError> {
        Ok(&self.zone(id)?.areas)
    }

    pub fn entry_area(&self, id: ZoneId) -> Result<&Area, GameError> {
        self.zone(id)?
            .entry_area()
            .ok_or_else(|| GameError::not_found("entry area of zone", id))
    }

    pub fn area(&self, id: AreaId) -> Result<&Area, GameError> {
        self.zone(id.zone)?
            .area(id)
            .ok_or_else(|| GameError::not_found("area", id))
    }
}
