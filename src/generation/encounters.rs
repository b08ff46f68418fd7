//! # Encounter Placement
//!
//! Spawns NPCs of random race and class on room floors.

use crate::game::{Containment, Npc, Topology};
use crate::generation::sample_room_floor_positions;
use crate::LanternResult;
use rand::Rng;

/// Creates `count` NPCs, each starting inside the room it was placed in.
///
/// Uses the same shared attempt budget as item placement and returns no
/// NPCs at all if it runs out.
pub fn generate_npcs<R: Rng + ?Sized>(
    topology: &Topology,
    count: usize,
    rng: &mut R,
) -> LanternResult<Vec<Npc>> {
    let positions = sample_room_floor_positions(topology, count, "npc", rng)?;
    let npcs = positions
        .into_iter()
        .map(|pos| {
            let mut npc = Npc::random(pos, rng);
            if let Some(room) = topology.room_interior_at(pos) {
                npc.containment = Containment::in_room(room);
            }
            npc
        })
        .collect();
    Ok(npcs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Position, TopologyBuilder};
    use crate::utils::BoundingBox;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_npcs_start_in_their_room() {
        let mut builder = TopologyBuilder::new(Position::new(50, 50));
        builder.add_room(BoundingBox::new(2, 2, 10, 10));
        builder.add_room(BoundingBox::new(30, 30, 10, 10));
        let topology = builder.build().unwrap();

        let mut rng = StdRng::seed_from_u64(12);
        let npcs = generate_npcs(&topology, 10, &mut rng).unwrap();
        assert_eq!(npcs.len(), 10);
        for npc in &npcs {
            let room = npc.containment.room.expect("placed NPC has a room");
            assert!(topology.rooms[room.0].bb.is_inside_interior(npc.pos));
            assert!(npc.fog_of_war);
            assert!(!npc.is_dead());
        }
    }
}
