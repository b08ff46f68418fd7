//! # Game State Module
//!
//! The tick-driven engine that owns every piece of mutable session state.
//!
//! [`GameState::update`] advances the sun, applies one input event to the
//! player, refreshes containment, visibility and the viewport, then steps
//! every NPC. [`GameState::draw`] only reads the result.

use crate::config::{self, FOG_REVEAL_RADIUS, MAX_PLACEMENT_ATTEMPTS};
use crate::game::{
    validate_scroll_fraction, Direction, DoorId, Key, Lamp, Npc, Player, Position,
    ScreenScrollingMode, SolarCycle, Topology, Viewport,
};
use crate::generation::{generate_keys, generate_lamps, generate_npcs};
use crate::input::PlayerInput;
use crate::rendering::{
    draw_box, draw_fog, draw_inventory, Color, DrawSurface, MessageLevel, MessageLog, RoomStyle,
    Style,
};
use crate::{LanternError, LanternResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DOOR_REVEALED_BG: Color = Color::Yellow;

/// Session settings for the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed of the engine's random source
    pub seed: u64,
    pub use_fog_of_war: bool,
    pub screen_rows: i32,
    pub screen_cols: i32,
    /// Sun direction at time zero; `None` picks one at random
    pub sun_start: Option<Direction>,
    pub minutes_per_day: f32,
    pub scrolling_mode: ScreenScrollingMode,
    /// Page-wise scroll margin as a fraction of the screen size
    pub scroll_fraction: f32,
    pub num_lamps: usize,
    pub num_npcs: usize,
}

impl EngineConfig {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            use_fog_of_war: true,
            screen_rows: config::DEFAULT_SCREEN_ROWS,
            screen_cols: config::DEFAULT_SCREEN_COLS,
            sun_start: None,
            minutes_per_day: config::DEFAULT_MINUTES_PER_DAY,
            scrolling_mode: ScreenScrollingMode::PageWise,
            scroll_fraction: config::DEFAULT_SCROLL_FRACTION,
            num_lamps: 6,
            num_npcs: 10,
        }
    }

    /// Small, fully deterministic settings for tests.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            use_fog_of_war: true,
            screen_rows: 20,
            screen_cols: 60,
            sun_start: Some(Direction::East),
            minutes_per_day: config::DEFAULT_MINUTES_PER_DAY,
            scrolling_mode: ScreenScrollingMode::AlwaysCentered,
            scroll_fraction: config::DEFAULT_SCROLL_FRACTION,
            num_lamps: 2,
            num_npcs: 3,
        }
    }

    pub fn validate(&self) -> LanternResult<()> {
        if self.screen_rows <= 0 || self.screen_cols <= 0 {
            return Err(LanternError::InvalidConfiguration(format!(
                "screen size {}x{} must be positive",
                self.screen_rows, self.screen_cols
            )));
        }
        if !self.minutes_per_day.is_finite() || self.minutes_per_day <= 0.0 {
            return Err(LanternError::InvalidConfiguration(format!(
                "day length must be positive, got {}",
                self.minutes_per_day
            )));
        }
        if self.sun_start == Some(Direction::None) {
            return Err(LanternError::InvalidConfiguration(
                "sun cannot start without a direction".to_string(),
            ));
        }
        validate_scroll_fraction(self.scroll_fraction)
    }

    /// Loads settings from a JSON file.
    ///
    /// # Examples
    ///
    /// ```
    /// use lantern::EngineConfig;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let path = dir.path().join("engine.json");
    /// std::fs::write(&path, EngineConfig::new(5).to_json().unwrap()).unwrap();
    /// let loaded = EngineConfig::load_from_json(&path).unwrap();
    /// assert_eq!(loaded.seed, 5);
    /// ```
    pub fn load_from_json<P: AsRef<Path>>(path: P) -> LanternResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        log::info!("Loaded engine configuration from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_json(&self) -> LanternResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save_to_json<P: AsRef<Path>>(&self, path: P) -> LanternResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Central engine state.
///
/// Rooms, corridors and doors come from an external topology provider via
/// [`GameState::load_dungeon`]; everything else is placed by the engine
/// from its own seeded random source.
#[derive(Debug, Clone)]
pub struct GameState {
    pub topology: Topology,
    /// One style per room, indexed like `topology.rooms`
    pub room_styles: Vec<RoomStyle>,
    pub solar: SolarCycle,
    pub player: Player,
    pub keys: Vec<Key>,
    pub lamps: Vec<Lamp>,
    pub npcs: Vec<Npc>,
    pub viewport: Viewport,
    pub messages: MessageLog,
    scrolling_mode: ScreenScrollingMode,
    scroll_fraction: f32,
    use_fog_of_war: bool,
    rng: StdRng,
    last_sim_time: Option<f64>,
}

impl GameState {
    /// Creates an empty engine with no dungeon loaded.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            topology: Topology::default(),
            room_styles: Vec::new(),
            solar: SolarCycle::new(),
            player: Player::new(),
            keys: Vec::new(),
            lamps: Vec::new(),
            npcs: Vec::new(),
            viewport: Viewport::new(Position::new(config.screen_rows, config.screen_cols)),
            messages: MessageLog::new(),
            scrolling_mode: config.scrolling_mode,
            scroll_fraction: config.scroll_fraction,
            use_fog_of_war: config.use_fog_of_war,
            rng: StdRng::seed_from_u64(config.seed),
            last_sim_time: None,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(&EngineConfig::new(seed))
    }

    /// Builds a ready-to-play session: loads and styles the dungeon, spawns
    /// the player, configures the sun and places keys, lamps and NPCs.
    ///
    /// # Examples
    ///
    /// ```
    /// use lantern::{EngineConfig, GameState, GenerationConfig, Generator, RoomCorridorGenerator};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let gen_config = GenerationConfig::for_testing(1);
    /// let topology = RoomCorridorGenerator::new()
    ///     .generate(&gen_config, &mut StdRng::seed_from_u64(1))
    ///     .unwrap();
    /// let state = GameState::from_config(&EngineConfig::for_testing(1), topology).unwrap();
    /// assert!(state.player.is_spawned);
    /// ```
    pub fn from_config(config: &EngineConfig, topology: Topology) -> LanternResult<Self> {
        config.validate()?;
        let mut state = Self::new(config);
        state.load_dungeon(topology)?;
        state.style_dungeon();
        state.place_player(None)?;
        match config.sun_start {
            Some(dir) => state.configure_sun(dir, config.minutes_per_day)?,
            None => state.configure_sun_random(config.minutes_per_day)?,
        }
        state.place_keys()?;
        state.place_lamps(config.num_lamps)?;
        state.place_npcs(config.num_npcs)?;
        state.set_screen_scrolling_mode(config.scrolling_mode, config.scroll_fraction)?;
        Ok(state)
    }

    /// Takes ownership of a topology after checking its invariants.
    pub fn load_dungeon(&mut self, topology: Topology) -> LanternResult<()> {
        topology.validate()?;
        log::info!(
            "Loaded dungeon {}x{}: {} rooms, {} corridors, {} doors",
            topology.world_size.r,
            topology.world_size.c,
            topology.rooms.len(),
            topology.corridors.len(),
            topology.doors.len()
        );
        self.room_styles = vec![RoomStyle::default(); topology.rooms.len()];
        self.topology = topology;
        Ok(())
    }

    /// Assigns a random style to every room.
    pub fn style_dungeon(&mut self) {
        let rng = &mut self.rng;
        self.room_styles = self
            .topology
            .rooms
            .iter()
            .map(|_| RoomStyle::random(rng))
            .collect();
    }

    /// Spawns the player in a corridor.
    ///
    /// Starts at `world_pos` or the world centre and random-walks with
    /// steps of up to two cells until the position lies in a corridor.
    pub fn place_player(&mut self, world_pos: Option<Position>) -> LanternResult<()> {
        if self.topology.corridors.is_empty() {
            return Err(LanternError::InvalidState(
                "cannot spawn the player in a dungeon without corridors".to_string(),
            ));
        }
        let world = self.topology.world_size;
        let mut pos = world_pos.unwrap_or(world / 2);
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            if let Some(corridor) = self.topology.corridor_at(pos) {
                self.player.world_pos = pos;
                self.player.is_spawned = true;
                self.player.containment.corridor = Some(corridor);
                self.viewport.center_on(pos);
                log::info!("Player spawned at {:?} in corridor {}", pos, corridor.0);
                return Ok(());
            }
            let jitter = Position::new(self.rng.gen_range(-2..=2), self.rng.gen_range(-2..=2));
            pos = (pos + jitter).clamp_to(world);
        }
        log::warn!("Could not find a corridor to spawn the player in");
        Err(LanternError::PlacementExhausted {
            what: "player",
            attempts: MAX_PLACEMENT_ATTEMPTS,
        })
    }

    pub fn configure_sun(&mut self, sun_dir: Direction, minutes_per_day: f32) -> LanternResult<()> {
        self.solar.configure(sun_dir, minutes_per_day)
    }

    pub fn configure_sun_random(&mut self, minutes_per_day: f32) -> LanternResult<()> {
        self.solar.configure_random(minutes_per_day, &mut self.rng)
    }

    /// Places one key per locked door. Nothing is added on failure.
    pub fn place_keys(&mut self) -> LanternResult<()> {
        let keys = generate_keys(&self.topology, &mut self.rng)?;
        log::info!("Placed {} keys", keys.len());
        self.keys.extend(keys);
        Ok(())
    }

    /// Places `num_lamps` lamps. Nothing is added on failure.
    pub fn place_lamps(&mut self, num_lamps: usize) -> LanternResult<()> {
        let lamps = generate_lamps(&self.topology, num_lamps, &mut self.rng)?;
        log::info!("Placed {} lamps", lamps.len());
        self.lamps.extend(lamps);
        Ok(())
    }

    /// Places `num_npcs` NPCs. Nothing is added on failure.
    pub fn place_npcs(&mut self, num_npcs: usize) -> LanternResult<()> {
        let npcs = generate_npcs(&self.topology, num_npcs, &mut self.rng)?;
        log::info!("Placed {} NPCs", npcs.len());
        self.npcs.extend(npcs);
        Ok(())
    }

    /// Sets the scrolling policy. The fraction is only used page-wise and
    /// must lie in (0, 1); a rejected call keeps the previous policy.
    pub fn set_screen_scrolling_mode(
        &mut self,
        mode: ScreenScrollingMode,
        scroll_fraction: f32,
    ) -> LanternResult<()> {
        if mode == ScreenScrollingMode::PageWise {
            if let Err(err) = validate_scroll_fraction(scroll_fraction) {
                log::error!("{}", err);
                return Err(err);
            }
            self.scroll_fraction = scroll_fraction;
        }
        self.scrolling_mode = mode;
        Ok(())
    }

    pub fn scrolling_mode(&self) -> ScreenScrollingMode {
        self.scrolling_mode
    }

    pub fn use_fog_of_war(&self) -> bool {
        self.use_fog_of_war
    }

    pub fn set_use_fog_of_war(&mut self, enabled: bool) {
        self.use_fog_of_war = enabled;
    }

    /// Advances one tick to `sim_time_s` seconds of simulated time.
    pub fn update(&mut self, sim_time_s: f64, input: PlayerInput) {
        let dt = self
            .last_sim_time
            .map_or(0.0, |prev| (sim_time_s - prev).max(0.0)) as f32;
        self.last_sim_time = Some(sim_time_s);

        self.solar.update(sim_time_s);

        if self.player.is_spawned {
            self.apply_input(input, sim_time_s);
            let pos = self.player.world_pos;
            self.player.containment.update(&self.topology, pos);
            if self.use_fog_of_war {
                self.update_visibility();
            }
            self.viewport.follow(pos, self.scrolling_mode, self.scroll_fraction);
        }

        for npc in &mut self.npcs {
            npc.update(dt, &self.topology, &mut self.rng);
        }
    }

    fn apply_input(&mut self, input: PlayerInput, sim_time_s: f64) {
        match input {
            PlayerInput::Move(dir) => {
                self.player.try_step(dir, &self.topology);
            }
            PlayerInput::Interact => self.interact(sim_time_s),
            PlayerInput::ToggleInventory => self.player.toggle_inventory(),
            PlayerInput::Quit | PlayerInput::None => {}
        }
    }

    /// Operates adjacent doors of the box the player stands in, then picks
    /// up whatever lies underfoot.
    fn interact(&mut self, sim_time_s: f64) {
        let pos = self.player.world_pos;
        let held: Vec<i32> = self.player.inventory.held_key_ids(&self.keys).collect();
        let containment = self.player.containment;

        if let Some(corridor) = containment.corridor_containing(&self.topology, pos) {
            let door_ids: Vec<DoorId> = self
                .topology
                .corridor(corridor)
                .map(|c| c.door_ids().collect())
                .unwrap_or_default();
            for id in door_ids {
                self.operate_door(id, pos, &held, sim_time_s);
            }
        } else if let Some(room) = containment.room_containing(&self.topology, pos) {
            let door_ids = self
                .topology
                .room(room)
                .map(|r| r.doors.clone())
                .unwrap_or_default();
            for id in door_ids {
                if self.operate_door(id, pos, &held, sim_time_s) {
                    break;
                }
            }
        }

        self.pick_up_items(pos, sim_time_s);
    }

    /// Unlocks or toggles one door. Returns whether its state changed.
    fn operate_door(&mut self, id: DoorId, pos: Position, held: &[i32], sim_time_s: f64) -> bool {
        let Some(door) = self.topology.door_mut(id) else {
            return false;
        };
        if !door.is_locked {
            return door.try_toggle(pos);
        }
        if door.try_unlock(pos, held.iter().copied()) {
            self.messages
                .add("You unlocked the door!", MessageLevel::Guide, sim_time_s);
            return true;
        }
        if door.is_door && door.is_adjacent_to(pos) {
            self.messages
                .add("The door is locked.", MessageLevel::Warning, sim_time_s);
        }
        false
    }

    fn pick_up_items(&mut self, pos: Position, sim_time_s: f64) {
        for (idx, key) in self.keys.iter_mut().enumerate() {
            if !key.item.picked_up && key.item.pos == pos {
                key.item.picked_up = true;
                self.player.inventory.key_idcs.push(idx);
                self.messages
                    .add("You picked up a key!", MessageLevel::Guide, sim_time_s);
                log::info!("Picked up key {} at {:?}", key.key_id, pos);
            }
        }
        for (idx, lamp) in self.lamps.iter_mut().enumerate() {
            if !lamp.item.picked_up && lamp.item.pos == pos {
                lamp.item.picked_up = true;
                self.player.inventory.lamp_idcs.push(idx);
                self.messages
                    .add("You picked up a lamp!", MessageLevel::Guide, sim_time_s);
                log::info!("Picked up {:?} lamp at {:?}", lamp.lamp_type, pos);
            }
        }
    }

    /// Clears fog around the player in the boxes it occupies and reveals
    /// nearby doors, items and NPCs.
    fn update_visibility(&mut self) {
        let pos = self.player.world_pos;
        let near = |p: Position| p.euclidean_distance(pos) <= FOG_REVEAL_RADIUS;

        for key in self.keys.iter_mut().filter(|k| near(k.item.pos)) {
            key.item.fog_of_war = false;
        }
        for lamp in self.lamps.iter_mut().filter(|l| near(l.item.pos)) {
            lamp.item.fog_of_war = false;
        }
        for npc in self.npcs.iter_mut().filter(|n| near(n.pos)) {
            npc.fog_of_war = false;
        }

        let containment = self.player.containment;
        let mut door_ids = Vec::new();
        if let Some(id) = containment.corridor_containing(&self.topology, pos) {
            if let Some(corridor) = self.topology.corridor_mut(id) {
                let bb = corridor.bb;
                corridor.fog.reveal_around(&bb, pos);
                door_ids.extend(corridor.door_ids());
            }
        }
        if let Some(id) = containment.room_containing(&self.topology, pos) {
            if let Some(room) = self.topology.room_mut(id) {
                let bb = room.bb;
                room.fog.reveal_around(&bb, pos);
                door_ids.extend(room.doors.iter().copied());
            }
        }
        for id in door_ids {
            if let Some(door) = self.topology.door_mut(id) {
                if near(door.pos) {
                    door.fog_of_war = false;
                }
            }
        }
    }

    /// Inventory lines in display order: keys first, then lamps.
    pub fn inventory_entries(&self) -> Vec<String> {
        let keys = self
            .player
            .inventory
            .key_idcs
            .iter()
            .filter_map(|idx| self.keys.get(*idx))
            .map(|key| format!("Key {}", key.key_id));
        let lamps = self
            .player
            .inventory
            .lamp_idcs
            .iter()
            .filter_map(|idx| self.lamps.get(*idx))
            .map(|lamp| format!("Lamp ({})", lamp.lamp_type.name()));
        keys.chain(lamps).collect()
    }

    /// Draws the frame back to front onto `surface`.
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S, sim_time_s: f64) {
        let fog = self.use_fog_of_war;
        let shadow = self.solar.shadow_dir();

        let corridor_style = RoomStyle::corridor();
        for corridor in &self.topology.corridors {
            let top_left = self.viewport.to_screen(corridor.bb.pos());
            draw_box(
                surface,
                top_left,
                corridor.bb.r_len,
                corridor.bb.c_len,
                &corridor_style,
                shadow,
            );
            if fog {
                draw_fog(surface, top_left, &corridor.fog);
            }
        }
        // Room walls go over the corridor ends they share.
        for (room, style) in self.topology.rooms.iter().zip(&self.room_styles) {
            let top_left = self.viewport.to_screen(room.bb.pos());
            draw_box(surface, top_left, room.bb.r_len, room.bb.c_len, style, shadow);
            if fog {
                draw_fog(surface, top_left, &room.fog);
            }
        }

        let items = self
            .lamps
            .iter()
            .map(|lamp| &lamp.item)
            .chain(self.keys.iter().map(|key| &key.item));
        for item in items.filter(|item| item.is_drawable(fog)) {
            surface.put(self.viewport.to_screen(item.pos), item.glyph, item.style);
        }

        for door in &self.topology.doors {
            let bg = if fog && door.fog_of_war {
                Color::Black
            } else {
                DOOR_REVEALED_BG
            };
            surface.put(
                self.viewport.to_screen(door.pos),
                door.state().glyph(),
                Style::new(Color::Black, bg),
            );
        }

        for npc in self.npcs.iter().filter(|npc| !(fog && npc.fog_of_war)) {
            let (glyph, style) = npc.appearance();
            surface.put(self.viewport.to_screen(npc.pos), glyph, style);
        }

        if self.player.is_spawned {
            surface.put(
                self.viewport.to_screen(self.player.world_pos),
                self.player.glyph,
                self.player.style,
            );
        }

        if self.player.inventory.visible {
            draw_inventory(surface, &self.inventory_entries(), self.player.inventory.selected);
        }

        self.messages.draw(surface, sim_time_s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{DoorKind, LampType, RoomId, TopologyBuilder};
    use crate::game::{Class, Race};
    use crate::rendering::{TextSurface, WallType};
    use crate::utils::BoundingBox;

    /// Room rows/cols 10..=20 with a corridor running north from (10, 15),
    /// whose door is locked with key 7.
    fn locked_room() -> Topology {
        let mut builder = TopologyBuilder::new(Position::new(100, 100));
        let room = builder.add_room(BoundingBox::new(10, 10, 10, 10));
        let corridor = builder.add_corridor(BoundingBox::new(2, 14, 8, 2));
        builder
            .add_door(room, corridor, Position::new(10, 15), DoorKind::Locked { key_id: 7 })
            .unwrap();
        builder.build().unwrap()
    }

    fn spawned(topology: Topology) -> GameState {
        let mut state = GameState::new(&EngineConfig::for_testing(3));
        state.load_dungeon(topology).unwrap();
        state.place_player(Some(Position::new(5, 15))).unwrap();
        state
    }

    #[test]
    fn test_player_spawns_in_corridor() {
        let state = spawned(locked_room());
        assert!(state.player.is_spawned);
        assert_eq!(state.player.world_pos, Position::new(5, 15));
        assert!(state.player.containment.corridor.is_some());
        assert_eq!(state.viewport.to_screen(Position::new(5, 15)), Position::new(10, 30));
    }

    #[test]
    fn test_spawn_fails_without_corridors() {
        let mut builder = TopologyBuilder::new(Position::new(20, 20));
        builder.add_room(BoundingBox::new(2, 2, 5, 5));
        let mut state = GameState::with_seed(1);
        state.load_dungeon(builder.build().unwrap()).unwrap();
        assert!(matches!(
            state.place_player(None),
            Err(LanternError::InvalidState(_))
        ));
        assert!(!state.player.is_spawned);
    }

    #[test]
    fn test_spawn_walk_is_bounded() {
        // The walk is clamped to the world, so a corridor beyond it is never hit.
        let mut builder = TopologyBuilder::new(Position::new(20, 20));
        builder.add_room(BoundingBox::new(2, 2, 5, 5));
        builder.add_corridor(BoundingBox::new(40, 40, 4, 2));
        let mut state = GameState::with_seed(1);
        state.load_dungeon(builder.build().unwrap()).unwrap();
        assert!(matches!(
            state.place_player(None),
            Err(LanternError::PlacementExhausted { what: "player", .. })
        ));
        assert!(!state.player.is_spawned);
    }

    #[test]
    fn test_locked_door_opens_only_with_key() {
        let mut state = spawned(locked_room());
        state.player.world_pos = Position::new(9, 15);

        state.update(0.0, PlayerInput::Interact);
        let door = &state.topology.doors[0];
        assert!(door.is_locked && !door.is_open);
        assert_eq!(state.messages.last().map(|m| m.level), Some(MessageLevel::Warning));

        state.keys.push(Key::new(Position::new(0, 0), 7));
        state.player.inventory.key_idcs.push(0);
        state.update(0.1, PlayerInput::Interact);
        let door = &state.topology.doors[0];
        assert!(!door.is_locked);
        assert!(!door.is_open);

        state.update(0.2, PlayerInput::Interact);
        assert!(state.topology.doors[0].is_open);
        state.update(0.3, PlayerInput::Interact);
        assert!(!state.topology.doors[0].is_open);
    }

    #[test]
    fn test_pickup_records_indices_once() {
        let mut state = spawned(locked_room());
        let pos = state.player.world_pos;
        state.lamps.push(Lamp::new(Position::new(1, 1), LampType::Isotropic));
        state.lamps.push(Lamp::new(pos, LampType::Directional));

        state.update(1.0, PlayerInput::Interact);
        state.update(1.1, PlayerInput::Interact);
        assert_eq!(state.player.inventory.lamp_idcs, vec![1]);
        assert!(state.lamps[1].item.picked_up);
        assert_eq!(
            state.messages.last().map(|m| m.text.as_str()),
            Some("You picked up a lamp!")
        );
        assert_eq!(state.inventory_entries(), vec!["Lamp (directional)".to_string()]);
    }

    #[test]
    fn test_walk_into_room_updates_containment_and_fog() {
        let mut state = spawned(locked_room());
        state.topology.doors[0].is_locked = false;
        for t in 0..5 {
            state.update(t as f64, PlayerInput::Move(Direction::South));
        }
        assert_eq!(state.player.world_pos, Position::new(10, 15));
        assert_eq!(state.player.containment.room, Some(RoomId(0)));
        assert!(!state.topology.doors[0].fog_of_war);

        state.update(5.0, PlayerInput::Move(Direction::South));
        assert_eq!(state.player.world_pos, Position::new(11, 15));
        let room = &state.topology.rooms[0];
        assert!(!room.fog.is_fogged(Position::new(1, 5)));
        assert!(room.fog.is_fogged(Position::new(9, 9)));
    }

    #[test]
    fn test_rejected_scroll_fraction_keeps_mode() {
        let mut state = GameState::with_seed(1);
        state
            .set_screen_scrolling_mode(ScreenScrollingMode::WhenOutsideScreen, 5.0)
            .unwrap();
        assert!(state
            .set_screen_scrolling_mode(ScreenScrollingMode::PageWise, 0.0)
            .is_err());
        assert_eq!(state.scrolling_mode(), ScreenScrollingMode::WhenOutsideScreen);
    }

    #[test]
    fn test_draw_shows_player_and_hides_fogged_door() {
        let state = spawned(locked_room());
        let mut surface = TextSurface::new(20, 60);
        state.draw(&mut surface, 0.0);
        assert_eq!(surface.glyph_at(Position::new(10, 30)), Some('@'));
        let door_screen = state.viewport.to_screen(Position::new(10, 15));
        assert_eq!(surface.glyph_at(door_screen), Some('G'));
        assert_eq!(surface.style_at(door_screen).map(|s| s.bg), Some(Color::Black));
    }

    #[test]
    fn test_room_walls_cover_corridor_ends() {
        let mut state = spawned(locked_room());
        state.set_use_fog_of_war(false);
        state.room_styles = vec![RoomStyle {
            wall_type: WallType::Line,
            ..RoomStyle::default()
        }];

        let mut surface = TextSurface::new(20, 60);
        state.draw(&mut surface, 0.0);
        let glyph = |pos| surface.glyph_at(state.viewport.to_screen(pos));
        assert_eq!(glyph(Position::new(10, 14)), Some('-'));
        assert_eq!(glyph(Position::new(10, 16)), Some('-'));
        assert_eq!(glyph(Position::new(2, 14)), Some('$'));
    }

    #[test]
    fn test_reveal_radius_covers_knight_offset_only() {
        let mut state = spawned(locked_room());
        state.keys.push(Key::new(Position::new(7, 16), 1));
        state.keys.push(Key::new(Position::new(7, 17), 2));
        state.lamps.push(Lamp::new(Position::new(4, 13), LampType::Isotropic));
        state.lamps.push(Lamp::new(Position::new(3, 13), LampType::Isotropic));
        let mut rng = StdRng::seed_from_u64(2);
        for pos in [Position::new(6, 17), Position::new(3, 17)] {
            let mut npc = Npc::new(pos, Race::Human, Class::WarriorFighter, &mut rng);
            npc.take_damage(10_000);
            state.npcs.push(npc);
        }

        state.update(0.0, PlayerInput::None);
        assert!(!state.keys[0].item.fog_of_war);
        assert!(state.keys[1].item.fog_of_war);
        assert!(!state.lamps[0].item.fog_of_war);
        assert!(state.lamps[1].item.fog_of_war);
        assert!(!state.npcs[0].fog_of_war);
        assert!(state.npcs[1].fog_of_war);
    }

    #[test]
    fn test_draw_skips_unrevealed_items() {
        let mut state = spawned(locked_room());
        state.lamps.push(Lamp::new(Position::new(8, 15), LampType::Directional));
        state.keys.push(Key::new(Position::new(7, 16), 4));
        state.keys.push(Key::new(Position::new(5, 18), 5));
        state.update(0.0, PlayerInput::None);

        let mut surface = TextSurface::new(20, 60);
        state.draw(&mut surface, 0.0);
        let lamp_screen = state.viewport.to_screen(Position::new(8, 15));
        let far_key_screen = state.viewport.to_screen(Position::new(5, 18));
        assert_ne!(surface.glyph_at(lamp_screen), Some('Y'));
        assert_ne!(surface.glyph_at(far_key_screen), Some('F'));
        let near_key_screen = state.viewport.to_screen(Position::new(7, 16));
        assert_eq!(surface.glyph_at(near_key_screen), Some('F'));

        state.set_use_fog_of_war(false);
        let mut surface = TextSurface::new(20, 60);
        state.draw(&mut surface, 0.0);
        assert_eq!(surface.glyph_at(lamp_screen), Some('Y'));
        assert_eq!(surface.glyph_at(far_key_screen), Some('F'));
    }

    #[test]
    fn test_engine_config_round_trip() {
        let config = EngineConfig::for_testing(8);
        let parsed: EngineConfig = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
        assert!(EngineConfig {
            minutes_per_day: -1.0,
            ..EngineConfig::default()
        }
        .validate()
        .is_err());
    }
}
