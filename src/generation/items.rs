//! # Item Placement
//!
//! Rejection sampling of keys and lamps onto room floors. Every call
//! shares one attempt budget across all items it places and either places
//! everything or nothing.

use crate::config::MAX_PLACEMENT_ATTEMPTS;
use crate::game::{Key, Lamp, LampType, Position, Topology};
use crate::{LanternError, LanternResult};
use rand::Rng;

/// Draws `count` uniformly random world cells lying on some room floor.
///
/// Cells come from the closed range `[0, world_size]` on both axes. Fails
/// with [`LanternError::PlacementExhausted`] once `MAX_PLACEMENT_ATTEMPTS`
/// draws have been spent without accepting all of them.
///
/// # Examples
///
/// ```
/// use lantern::{sample_room_floor_positions, BoundingBox, Position, TopologyBuilder};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut builder = TopologyBuilder::new(Position::new(30, 30));
/// builder.add_room(BoundingBox::new(5, 5, 6, 6));
/// let topology = builder.build().unwrap();
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let cells = sample_room_floor_positions(&topology, 3, "lamp", &mut rng).unwrap();
/// assert!(cells.iter().all(|p| topology.is_inside_any_room(*p)));
/// ```
pub fn sample_room_floor_positions<R: Rng + ?Sized>(
    topology: &Topology,
    count: usize,
    what: &'static str,
    rng: &mut R,
) -> LanternResult<Vec<Position>> {
    let world = topology.world_size;
    let mut accepted = Vec::with_capacity(count);
    let mut attempts = 0;
    while accepted.len() < count {
        if attempts >= MAX_PLACEMENT_ATTEMPTS {
            log::warn!(
                "Gave up placing {} after {} attempts ({} of {} placed)",
                what,
                attempts,
                accepted.len(),
                count
            );
            return Err(LanternError::PlacementExhausted { what, attempts });
        }
        attempts += 1;
        let pos = Position::new(
            rng.gen_range(0..=world.r.max(0)),
            rng.gen_range(0..=world.c.max(0)),
        );
        if topology.is_inside_any_room(pos) {
            accepted.push(pos);
        }
    }
    Ok(accepted)
}

/// Creates one key per locked door, carrying that door's `key_id`.
pub fn generate_keys<R: Rng + ?Sized>(topology: &Topology, rng: &mut R) -> LanternResult<Vec<Key>> {
    let key_ids: Vec<i32> = topology
        .doors
        .iter()
        .filter(|door| door.is_locked)
        .map(|door| door.key_id)
        .collect();
    let positions = sample_room_floor_positions(topology, key_ids.len(), "key", rng)?;

    Ok(key_ids
        .into_iter()
        .zip(positions)
        .map(|(key_id, pos)| {
            let mut key = Key::new(pos, key_id);
            key.randomize_fg_color(rng);
            key
        })
        .collect())
}

/// Creates `count` lamps with random light types.
pub fn generate_lamps<R: Rng + ?Sized>(
    topology: &Topology,
    count: usize,
    rng: &mut R,
) -> LanternResult<Vec<Lamp>> {
    let positions = sample_room_floor_positions(topology, count, "lamp", rng)?;
    Ok(positions
        .into_iter()
        .map(|pos| Lamp::new(pos, LampType::random(rng)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{DoorKind, RoomId, TopologyBuilder};
    use crate::utils::BoundingBox;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn locked_topology() -> Topology {
        let mut builder = TopologyBuilder::new(Position::new(40, 40));
        builder.add_room(BoundingBox::new(2, 2, 8, 8));
        let corridor = builder.add_corridor(BoundingBox::new(4, 10, 2, 10));
        builder
            .add_door(RoomId(0), corridor, Position::new(5, 10), DoorKind::Locked { key_id: 9 })
            .unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_positions_avoid_walls() {
        let topology = locked_topology();
        let mut rng = StdRng::seed_from_u64(4);
        let cells = sample_room_floor_positions(&topology, 50, "lamp", &mut rng).unwrap();
        assert_eq!(cells.len(), 50);
        for pos in cells {
            assert!((3..=9).contains(&pos.r) && (3..=9).contains(&pos.c), "{:?}", pos);
        }
    }

    #[test]
    fn test_one_key_per_locked_door() {
        let topology = locked_topology();
        let mut rng = StdRng::seed_from_u64(4);
        let keys = generate_keys(&topology, &mut rng).unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].key_id, 9);
    }

    #[test]
    fn test_exhaustion_without_room_floor() {
        let mut builder = TopologyBuilder::new(Position::new(20, 20));
        // A 1x1 room is all wall.
        builder.add_room(BoundingBox::new(3, 3, 1, 1));
        let topology = builder.build().unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let result = generate_lamps(&topology, 1, &mut rng);
        assert!(matches!(
            result,
            Err(LanternError::PlacementExhausted { what: "lamp", attempts }) if attempts == MAX_PLACEMENT_ATTEMPTS
        ));
    }

    #[test]
    fn test_zero_count_needs_no_floor() {
        let topology = Topology::default();
        let mut rng = StdRng::seed_from_u64(4);
        assert!(generate_lamps(&topology, 0, &mut rng).unwrap().is_empty());
    }
}
