//! Zone adjacency graph
//!
//! Zones form a 4-neighbour grid graph. Edges never wrap around the
//! border and are always stored in both directions.

use std::collections::{BTreeMap, BTreeSet};

use strum::IntoEnumIterator;

use super::zone::{Direction, ZoneId};
use crate::errors::GameError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneGraph {
    width: u8,
    height: u8,
    edges: BTreeMap<ZoneId, BTreeSet<ZoneId>>,
}

impl ZoneGraph {
    /// Build the grid graph over `ids` for a `width` x `height` world.
    ///
    /// Each node is linked up/down/left/right to the nodes that exist,
    /// skipping edges that would cross the grid border. Ids outside the
    /// grid are rejected.
    pub fn build(
        width: u8,
        height: u8,
        ids: impl IntoIterator<Item = ZoneId>,
    ) -> Result<Self, GameError> {
        let mut edges: BTreeMap<ZoneId, BTreeSet<ZoneId>> = BTreeMap::new();
        for id in ids {
            if !id.in_grid(width, height) {
                return Err(GameError::not_found("zone", id));
            }
            edges.entry(id).or_default();
        }

        let nodes: Vec<ZoneId> = edges.keys().copied().collect();
        for node in nodes {
            for direction in Direction::iter() {
                let Some(next) = node.step(direction, width, height) else {
                    continue;
                };
                if !edges.contains_key(&next) {
                    continue;
                }
                edges.entry(node).or_default().insert(next);
                edges.entry(next).or_default().insert(node);
            }
        }

        tracing::debug!(width, height, zones = edges.len(), "built zone graph");

        Ok(Self {
            width,
            height,
            edges,
        })
    }

    /// Full grid of `width` x `height` zones
    pub fn grid(width: u8, height: u8) -> Result<Self, GameError> {
        Self::build(width, height, ZoneId::grid(width, height))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn contains(&self, zone: ZoneId) -> bool {
        self.edges.contains_key(&zone)
    }

    /// All zones, row by row
    pub fn zones(&self) -> impl Iterator<Item = ZoneId> + '_ {
        self.edges.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Adjacent zones
    pub fn neighbors(&self, zone: ZoneId) -> Result<&BTreeSet<ZoneId>, GameError> {
        self.edges
            .get(&zone)
            .ok_or_else(|| GameError::not_found("zone", zone))
    }

    pub fn is_adjacent(&self, from: ZoneId, to: ZoneId) -> Result<bool, GameError> {
        Ok(self.neighbors(from)?.contains(&to))
    }

    /// Neighbor in a given direction, if that edge exists
    pub fn neighbor_in(
        &self,
        zone: ZoneId,
        direction: Direction,
    ) -> Result<Option<ZoneId>, GameError> {
        let neighbors = self.neighbors(zone)?;
        Ok(zone
            .step(direction, self.width, self.height)
            .filter(|next| neighbors.contains(next)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn z(s: &str) -> ZoneId {
        s.parse().unwrap()
    }

    #[test]
    fn test_five_by_five_degrees() {
        let graph = ZoneGraph::grid(5, 5).unwrap();
        assert_eq!(graph.len(), 25);
        assert_eq!(graph.neighbors(z("A1")).unwrap().len(), 2);
        assert_eq!(graph.neighbors(z("E5")).unwrap().len(), 2);
        assert_eq!(graph.neighbors(z("C1")).unwrap().len(), 3);
        assert_eq!(graph.neighbors(z("A3")).unwrap().len(), 3);
        assert_eq!(graph.neighbors(z("C3")).unwrap().len(), 4);
    }

    #[test]
    fn test_a1_neighbors() {
        let graph = ZoneGraph::grid(5, 5).unwrap();
        let n: Vec<String> = graph
            .neighbors(z("A1"))
            .unwrap()
            .iter()
            .map(|id| id.to_string())
            .collect();
        assert_eq!(n, vec!["B1", "A2"]);
    }

    #[test]
    fn test_unknown_zone_is_not_found() {
        let graph = ZoneGraph::grid(5, 5).unwrap();
        assert!(matches!(
            graph.neighbors(z("F1")),
            Err(GameError::NotFound { .. })
        ));
    }

    #[test]
    fn test_build_rejects_ids_outside_grid() {
        let result = ZoneGraph::build(2, 2, [z("A1"), z("C1")]);
        assert!(matches!(result, Err(GameError::NotFound { .. })));
    }

    #[test]
    fn test_partial_node_set_only_links_existing_nodes() {
        let graph = ZoneGraph::build(3, 1, [z("A1"), z("C1")]).unwrap();
        assert!(graph.neighbors(z("A1")).unwrap().is_empty());
        assert!(graph.neighbors(z("C1")).unwrap().is_empty());
    }

    #[test]
    fn test_single_row_grid() {
        let graph = ZoneGraph::grid(3, 1).unwrap();
        assert_eq!(graph.neighbors(z("A1")).unwrap().len(), 1);
        assert_eq!(graph.neighbors(z("B1")).unwrap().len(), 2);
    }

    #[test]
    fn test_neighbor_in_direction() {
        let graph = ZoneGraph::grid(5, 5).unwrap();
        assert_eq!(graph.neighbor_in(z("B2"), Direction::Up).unwrap(), Some(z("B1")));
        assert_eq!(graph.neighbor_in(z("B1"), Direction::Up).unwrap(), None);
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(ZoneGraph::grid(4, 6).unwrap(), ZoneGraph::grid(4, 6).unwrap());
    }
}
