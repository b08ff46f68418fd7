//! # Player
//!
//! The controllable agent: grid position, containment and inventory.

use crate::game::{Containment, Direction, Key, Position, Topology};
use crate::rendering::{Color, Style};
use serde::{Deserialize, Serialize};

/// Indices into the engine's key and lamp lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub key_idcs: Vec<usize>,
    pub lamp_idcs: Vec<usize>,
    pub selected: usize,
    pub visible: bool,
}

impl Inventory {
    pub fn len(&self) -> usize {
        self.key_idcs.len() + self.lamp_idcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Key ids of every key held, resolved against the engine's key list.
    pub fn held_key_ids<'a>(&'a self, keys: &'a [Key]) -> impl Iterator<Item = i32> + 'a {
        self.key_idcs
            .iter()
            .filter_map(move |idx| keys.get(*idx))
            .map(|key| key.key_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub glyph: char,
    pub style: Style,
    pub world_pos: Position,
    pub is_spawned: bool,
    pub containment: Containment,
    pub inventory: Inventory,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            glyph: '@',
            style: Style::new(Color::Magenta, Color::White),
            world_pos: Position::origin(),
            is_spawned: false,
            containment: Containment::default(),
            inventory: Inventory::default(),
        }
    }
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes one cardinal step if the target cell lies inside the current
    /// room or corridor. Diagonal and `None` directions are refused.
    ///
    /// Returns whether the player moved.
    pub fn try_step(&mut self, dir: Direction, topology: &Topology) -> bool {
        if !dir.is_cardinal() {
            return false;
        }
        let target = self.world_pos + dir.to_delta();
        if !self.containment.allows(topology, target) {
            return false;
        }
        self.world_pos = target;
        true
    }

    pub fn toggle_inventory(&mut self) {
        self.inventory.visible = !self.inventory.visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{DoorKind, RoomId, TopologyBuilder};
    use crate::utils::BoundingBox;

    fn single_room() -> Topology {
        let mut builder = TopologyBuilder::new(Position::new(30, 30));
        builder.add_room(BoundingBox::new(5, 5, 4, 4));
        let corridor = builder.add_corridor(BoundingBox::new(9, 6, 6, 2));
        builder
            .add_door(RoomId(0), corridor, Position::new(9, 7), DoorKind::Opening)
            .unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_step_is_gated_by_current_room() {
        let topology = single_room();
        let mut player = Player::new();
        player.world_pos = Position::new(7, 8);
        player.containment = Containment::in_room(RoomId(0));

        assert!(player.try_step(Direction::East, &topology));
        assert_eq!(player.world_pos, Position::new(7, 9));
        assert!(!player.try_step(Direction::East, &topology));
        assert_eq!(player.world_pos, Position::new(7, 9));
    }

    #[test]
    fn test_diagonal_steps_are_refused() {
        let topology = single_room();
        let mut player = Player::new();
        player.world_pos = Position::new(7, 7);
        player.containment = Containment::in_room(RoomId(0));
        assert!(!player.try_step(Direction::Southeast, &topology));
        assert!(!player.try_step(Direction::None, &topology));
        assert_eq!(player.world_pos, Position::new(7, 7));
    }

    #[test]
    fn test_inventory_toggle_and_key_ids() {
        let mut player = Player::new();
        player.toggle_inventory();
        assert!(player.inventory.visible);
        player.toggle_inventory();
        assert!(!player.inventory.visible);

        let keys = vec![
            Key::new(Position::new(1, 1), 10),
            Key::new(Position::new(2, 2), 20),
        ];
        player.inventory.key_idcs.push(1);
        let held: Vec<i32> = player.inventory.held_key_ids(&keys).collect();
        assert_eq!(held, vec![20]);
        assert_eq!(player.inventory.len(), 1);
    }
}
