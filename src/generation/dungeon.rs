//! # Dungeon Generation
//!
//! Grid-based room-and-corridor topology provider.
//!
//! Each grid cell receives one room that straddles the cell's centre row and
//! centre column. Horizontally adjacent rooms are joined along the shared
//! centre row, vertically adjacent rooms along the shared centre column, so
//! every corridor is a straight box with a door at each end.

use crate::game::{DoorKind, Position, Topology, TopologyBuilder};
use crate::generation::{GenerationConfig, Generator};
use crate::utils::BoundingBox;
use crate::{LanternError, LanternResult};
use rand::rngs::StdRng;
use rand::Rng;

/// Primary topology generator.
#[derive(Debug, Clone, Default)]
pub struct RoomCorridorGenerator {
    /// Keep only a random spanning tree of the neighbour corridors
    pub sparse: bool,
}

impl RoomCorridorGenerator {
    /// Creates a generator that connects every pair of neighbouring rooms.
    ///
    /// # Examples
    ///
    /// ```
    /// use lantern::{GenerationConfig, Generator, RoomCorridorGenerator};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let config = GenerationConfig::for_testing(3);
    /// let mut rng = StdRng::seed_from_u64(config.seed);
    /// let topology = RoomCorridorGenerator::new().generate(&config, &mut rng).unwrap();
    /// assert_eq!(topology.rooms.len(), 6);
    /// ```
    pub fn new() -> Self {
        Self { sparse: false }
    }

    /// Creates a generator that keeps only a spanning tree of corridors.
    pub fn sparse() -> Self {
        Self { sparse: true }
    }

    fn place_room(
        cell: BoundingBox,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> BoundingBox {
        let center = cell.center();
        let r_len = pick_extent(
            config.min_room_size,
            config.max_room_size.min(cell.r_len - 3),
            rng,
        );
        let c_len = pick_extent(
            config.min_room_size * 2,
            (config.max_room_size * 2).min(cell.c_len - 3),
            rng,
        );
        let r = pick_origin(cell.top(), cell.r_len, center.r, r_len, rng);
        let c = pick_origin(cell.left(), cell.c_len, center.c, c_len, rng);
        BoundingBox::new(r, c, r_len, c_len)
    }

    fn door_kind(door_idx: usize, config: &GenerationConfig, rng: &mut StdRng) -> DoorKind {
        if rng.gen_bool(config.opening_chance) {
            DoorKind::Opening
        } else if rng.gen_bool(config.locked_chance) {
            DoorKind::Locked {
                key_id: door_idx as i32,
            }
        } else {
            DoorKind::Closed
        }
    }

    /// Neighbour pairs to connect, as (room, room, horizontal).
    fn connections(
        &self,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> Vec<(usize, usize, bool)> {
        let rows = config.grid_rows as usize;
        let cols = config.grid_cols as usize;
        let mut edges = Vec::new();
        for gi in 0..rows {
            for gj in 0..cols {
                let idx = gi * cols + gj;
                if gj + 1 < cols {
                    edges.push((idx, idx + 1, true));
                }
                if gi + 1 < rows {
                    edges.push((idx, idx + cols, false));
                }
            }
        }
        if !self.sparse {
            return edges;
        }

        // Random spanning tree via union-find over shuffled edges.
        for i in (1..edges.len()).rev() {
            let j = rng.gen_range(0..=i);
            edges.swap(i, j);
        }
        let mut parent: Vec<usize> = (0..rows * cols).collect();
        fn find(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }
        edges
            .into_iter()
            .filter(|(a, b, _)| {
                let ra = find(&mut parent, *a);
                let rb = find(&mut parent, *b);
                if ra == rb {
                    false
                } else {
                    parent[ra] = rb;
                    true
                }
            })
            .collect()
    }
}

fn pick_extent(lo: i32, hi: i32, rng: &mut StdRng) -> i32 {
    if hi <= lo {
        lo
    } else {
        rng.gen_range(lo..=hi)
    }
}

/// Origin along one axis so that the box lies within the cell, keeps one
/// free cell towards the cell edges and has the centre at least two cells
/// from either wall.
fn pick_origin(cell_start: i32, cell_len: i32, center: i32, len: i32, rng: &mut StdRng) -> i32 {
    let lo = (cell_start + 1).max(center + 2 - len);
    let hi = (cell_start + cell_len - 2 - len).min(center - 2);
    if hi < lo {
        center - len / 2
    } else {
        rng.gen_range(lo..=hi)
    }
}

impl Generator<Topology> for RoomCorridorGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> LanternResult<Topology> {
        config.validate()?;
        let (cell_h, cell_w) = config.cell_size();
        let mut builder = TopologyBuilder::new(Position::new(config.world_rows, config.world_cols));

        let mut rooms = Vec::new();
        for gi in 0..config.grid_rows {
            for gj in 0..config.grid_cols {
                let cell = BoundingBox::new(gi * cell_h, gj * cell_w, cell_h, cell_w);
                let bb = Self::place_room(cell, config, rng);
                rooms.push((builder.add_room(bb), bb, cell.center()));
            }
        }

        let mut door_idx = 0;
        for (a, b, horizontal) in self.connections(config, rng) {
            let (room_a, bb_a, center_a) = rooms[a];
            let (room_b, bb_b, _) = rooms[b];
            let (corridor_bb, door_a, door_b) = if horizontal {
                let row = center_a.r;
                (
                    BoundingBox::new(row - 1, bb_a.right(), 2, bb_b.left() - bb_a.right()),
                    Position::new(row, bb_a.right()),
                    Position::new(row, bb_b.left()),
                )
            } else {
                let col = center_a.c;
                (
                    BoundingBox::new(bb_a.bottom(), col - 1, bb_b.top() - bb_a.bottom(), 2),
                    Position::new(bb_a.bottom(), col),
                    Position::new(bb_b.top(), col),
                )
            };
            let corridor = builder.add_corridor(corridor_bb);
            for (room, pos) in [(room_a, door_a), (room_b, door_b)] {
                let kind = Self::door_kind(door_idx, config, rng);
                builder.add_door(room, corridor, pos, kind)?;
                door_idx += 1;
            }
        }

        let topology = builder.build()?;
        self.validate(&topology, config)?;
        log::debug!(
            "{} produced {} rooms, {} corridors, {} doors",
            self.generator_type(),
            topology.rooms.len(),
            topology.corridors.len(),
            topology.doors.len()
        );
        Ok(topology)
    }

    fn validate(&self, content: &Topology, config: &GenerationConfig) -> LanternResult<()> {
        content.validate()?;
        let expected = (config.grid_rows * config.grid_cols) as usize;
        if content.rooms.len() != expected {
            return Err(LanternError::InvalidTopology(format!(
                "expected {} rooms, found {}",
                expected,
                content.rooms.len()
            )));
        }
        if content.corridors.len() + 1 < expected {
            return Err(LanternError::InvalidTopology(
                "rooms are not connected".to_string(),
            ));
        }
        for (idx, room) in content.rooms.iter().enumerate() {
            let overlapping = content.rooms[idx + 1..]
                .iter()
                .any(|other| room.bb.overlaps(&other.bb));
            if overlapping {
                return Err(LanternError::InvalidTopology(format!(
                    "room {} overlaps another room",
                    idx
                )));
            }
        }
        if expected > 1 && content.rooms.iter().any(|room| room.doors.is_empty()) {
            return Err(LanternError::InvalidTopology(
                "a room has no doors".to_string(),
            ));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "RoomCorridorGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn generate(seed: u64, generator: RoomCorridorGenerator) -> Topology {
        let config = GenerationConfig::for_testing(seed);
        let mut rng = StdRng::seed_from_u64(seed);
        generator.generate(&config, &mut rng).unwrap()
    }

    #[test]
    fn test_full_grid_connects_all_neighbours() {
        let topology = generate(1, RoomCorridorGenerator::new());
        // 2x3 grid: 4 horizontal + 3 vertical neighbour pairs.
        assert_eq!(topology.rooms.len(), 6);
        assert_eq!(topology.corridors.len(), 7);
        assert_eq!(topology.doors.len(), 14);
        assert_eq!(topology.room_corridor_map.len(), 7);
    }

    #[test]
    fn test_sparse_grid_is_a_spanning_tree() {
        let topology = generate(2, RoomCorridorGenerator::sparse());
        assert_eq!(topology.corridors.len(), topology.rooms.len() - 1);
    }

    #[test]
    fn test_rooms_have_floor() {
        for seed in 0..20 {
            let topology = generate(seed, RoomCorridorGenerator::new());
            for room in &topology.rooms {
                assert!(room.bb.r_len >= 4 && room.bb.c_len >= 8);
            }
        }
    }

    #[test]
    fn test_locked_doors_have_unique_key_ids() {
        let topology = generate(5, RoomCorridorGenerator::new());
        let mut ids: Vec<i32> = topology
            .doors
            .iter()
            .filter(|d| d.is_locked)
            .map(|d| d.key_id)
            .collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = generate(9, RoomCorridorGenerator::new());
        let b = generate(9, RoomCorridorGenerator::new());
        let boxes = |t: &Topology| t.rooms.iter().map(|r| r.bb).collect::<Vec<_>>();
        assert_eq!(boxes(&a), boxes(&b));
    }
}
