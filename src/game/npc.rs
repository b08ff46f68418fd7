//! # NPC Physics
//!
//! Non-player characters wander with a stochastic acceleration model in
//! sub-cell space. The rounded cell is checked against the NPC's current
//! corridor and room; leaving both may start a short wall-collision
//! resolution that snaps the NPC back and pushes it inwards.

use crate::game::{Containment, Position, Topology};
use crate::rendering::{Color, Style};
use crate::utils::{randn_range, randn_range_int, BBLocation};
use crate::config;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Ticks a wall-collision resolution lasts while still outside; it ends
/// on the tick the counter reaches this value.
pub const RECOVERY_TICKS: u32 = 2;

/// Speed along each pushed axis while resolving a wall collision.
const RESOLVE_VEL: f32 = 5.0;

/// One in `RESOLVE_CHANCE + 1` outside ticks starts a resolution.
const RESOLVE_CHANCE: u32 = 5;

const CORPSE_GLYPH: char = '&';
const CORPSE_STYLE: Style = Style::new(Color::Red, Color::DarkGray);
const RESOLVING_BG: Color = Color::DarkBlue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Race {
    Human,
    Elf,
    HalfElf,
    Gnome,
    Halfling,
    Dwarf,
    HalfOrc,
    Ogre,
    Hobgoblin,
    Goblin,
    Orc,
    Troll,
    Monster,
    Lich,
    LichKing,
    Basilisk,
    Bear,
    Kobold,
    Skeleton,
    Giant,
    HugeSpider,
    Wolf,
    Wyvern,
    Griffin,
    Ghoul,
    Dragon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Class {
    WarriorFighter,
    WarriorRanger,
    WarriorPaladin,
    WarriorBarbarian,
    PriestCleric,
    PriestDruid,
    PriestMonk,
    PriestShaman,
    WizardMage,
    WizardSorcerer,
    RogueThief,
    RogueBard,
}

impl Class {
    pub const ALL: [Class; 12] = [
        Class::WarriorFighter,
        Class::WarriorRanger,
        Class::WarriorPaladin,
        Class::WarriorBarbarian,
        Class::PriestCleric,
        Class::PriestDruid,
        Class::PriestMonk,
        Class::PriestShaman,
        Class::WizardMage,
        Class::WizardSorcerer,
        Class::RogueThief,
        Class::RogueBard,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Appearance and motion-parameter ranges for one race.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaceProfile {
    pub glyph: char,
    pub style: Style,
    pub acc_step: (f32, f32),
    pub acc_lim: (f32, f32),
    pub vel_lim: (f32, f32),
    pub prob_change_acc: (i32, i32),
}

const fn profile(
    glyph: char,
    fg: Color,
    bg: Color,
    acc_step: (f32, f32),
    acc_lim: (f32, f32),
    vel_lim: (f32, f32),
    prob_change_acc: (i32, i32),
) -> RaceProfile {
    RaceProfile {
        glyph,
        style: Style::new(fg, bg),
        acc_step,
        acc_lim,
        vel_lim,
        prob_change_acc,
    }
}

/// Indexed by `Race as usize`.
static RACE_PROFILES: [RaceProfile; 26] = [
    profile('@', Color::Magenta, Color::LightGray, (0.2, 2.0), (20.0, 50.0), (4.0, 15.0), (4, 10)),
    profile('@', Color::Magenta, Color::DarkGreen, (0.4, 4.0), (25.0, 70.0), (6.0, 20.0), (4, 10)),
    profile('@', Color::Magenta, Color::DarkYellow, (0.3, 3.0), (25.0, 60.0), (5.0, 17.0), (4, 10)),
    profile('b', Color::Magenta, Color::LightGray, (0.1, 1.0), (10.0, 20.0), (0.5, 2.5), (1, 4)),
    profile('b', Color::Magenta, Color::LightGray, (0.1, 1.5), (11.0, 25.0), (0.7, 3.0), (1, 5)),
    profile('0', Color::White, Color::DarkGray, (0.15, 1.8), (12.0, 30.0), (0.4, 4.0), (5, 20)),
    profile('3', Color::Yellow, Color::Green, (0.15, 2.0), (30.0, 80.0), (1.5, 5.0), (2, 18)),
    profile('O', Color::Green, Color::DarkYellow, (0.4, 1.0), (2.0, 8.0), (1.0, 6.0), (4, 10)),
    profile('a', Color::Yellow, Color::Cyan, (0.5, 1.5), (10.0, 50.0), (4.0, 9.0), (4, 14)),
    profile('G', Color::Green, Color::DarkCyan, (0.5, 1.5), (8.0, 45.0), (4.5, 10.0), (3, 12)),
    profile('2', Color::DarkYellow, Color::Cyan, (0.5, 2.5), (50.0, 80.0), (6.0, 18.0), (4, 8)),
    profile('R', Color::LightGray, Color::DarkRed, (0.1, 1.4), (5.0, 15.0), (2.0, 12.0), (10, 40)),
    profile('M', Color::Cyan, Color::DarkGreen, (0.05, 2.5), (2.0, 25.0), (1.0, 8.0), (8, 25)),
    profile('z', Color::DarkYellow, Color::DarkBlue, (0.4, 3.0), (25.0, 55.0), (2.0, 9.0), (5, 8)),
    profile('Z', Color::Yellow, Color::DarkBlue, (0.5, 3.5), (25.0, 60.0), (2.5, 10.0), (4, 6)),
    profile('S', Color::Green, Color::DarkGray, (0.5, 1.8), (2.0, 25.0), (4.0, 8.0), (16, 28)),
    profile('B', Color::Red, Color::DarkRed, (1.0, 2.5), (3.0, 10.0), (3.0, 18.0), (5, 8)),
    profile('x', Color::Blue, Color::LightGray, (0.5, 1.5), (25.0, 40.0), (2.0, 10.0), (3, 9)),
    profile('%', Color::White, Color::DarkGray, (0.5, 1.5), (10.0, 60.0), (1.0, 4.0), (11, 19)),
    profile('O', Color::DarkMagenta, Color::LightGray, (0.5, 1.5), (1.0, 5.0), (0.5, 4.5), (20, 40)),
    profile('W', Color::DarkGray, Color::White, (0.5, 1.5), (10.0, 70.0), (3.0, 20.0), (3, 17)),
    profile('m', Color::LightGray, Color::DarkGray, (1.5, 3.5), (15.0, 60.0), (10.0, 24.0), (2, 9)),
    profile('w', Color::DarkMagenta, Color::Blue, (0.5, 1.5), (2.0, 15.0), (8.0, 20.0), (7, 15)),
    profile('g', Color::DarkRed, Color::Blue, (0.5, 1.5), (10.0, 25.0), (9.0, 21.0), (10, 20)),
    profile('h', Color::LightGray, Color::Yellow, (0.5, 1.5), (30.0, 60.0), (10.0, 20.0), (1, 5)),
    profile('R', Color::Red, Color::DarkMagenta, (0.5, 4.5), (7.0, 30.0), (11.0, 29.0), (14, 30)),
];

impl Race {
    pub const ALL: [Race; 26] = [
        Race::Human,
        Race::Elf,
        Race::HalfElf,
        Race::Gnome,
        Race::Halfling,
        Race::Dwarf,
        Race::HalfOrc,
        Race::Ogre,
        Race::Hobgoblin,
        Race::Goblin,
        Race::Orc,
        Race::Troll,
        Race::Monster,
        Race::Lich,
        Race::LichKing,
        Race::Basilisk,
        Race::Bear,
        Race::Kobold,
        Race::Skeleton,
        Race::Giant,
        Race::HugeSpider,
        Race::Wolf,
        Race::Wyvern,
        Race::Griffin,
        Race::Ghoul,
        Race::Dragon,
    ];

    pub fn profile(self) -> &'static RaceProfile {
        &RACE_PROFILES[self as usize]
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Motion parameters sampled once per NPC from its race profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionParams {
    pub acc_step: f32,
    pub acc_lim: f32,
    pub vel_lim: f32,
    /// Acceleration changes with probability `1 / (prob_change_acc + 1)`
    pub prob_change_acc: i32,
}

impl MotionParams {
    pub fn sample<R: Rng + ?Sized>(profile: &RaceProfile, rng: &mut R) -> Self {
        Self {
            acc_step: randn_range(rng, profile.acc_step.0, profile.acc_step.1),
            acc_lim: randn_range(rng, profile.acc_lim.0, profile.acc_lim.1),
            vel_lim: randn_range(rng, profile.vel_lim.0, profile.vel_lim.1),
            prob_change_acc: randn_range_int(rng, profile.prob_change_acc.0, profile.prob_change_acc.1)
                .max(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    pub health: i32,
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub thac0: i32,
    pub armor_class: i32,
}

impl Default for CombatStats {
    fn default() -> Self {
        Self {
            health: 100,
            strength: 10,
            dexterity: 10,
            constitution: 10,
            thac0: 1,
            armor_class: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    /// Last committed cell
    pub pos: Position,
    pub pos_r: f32,
    pub pos_c: f32,
    pub vel_r: f32,
    pub vel_c: f32,
    pub acc_r: f32,
    pub acc_c: f32,
    pub motion: MotionParams,
    pub wall_coll_resolve: bool,
    pub wall_coll_resolve_ctr: u32,
    pub glyph: char,
    pub style: Style,
    /// True until the player has come close enough to see it
    pub fog_of_war: bool,
    pub containment: Containment,
    pub enemy: bool,
    pub stats: CombatStats,
    pub race: Race,
    pub class: Class,
}

impl Npc {
    /// Creates an NPC at rest on `pos` with motion parameters drawn from the
    /// race profile.
    pub fn new<R: Rng + ?Sized>(pos: Position, race: Race, class: Class, rng: &mut R) -> Self {
        let profile = race.profile();
        Self {
            pos,
            pos_r: pos.r as f32,
            pos_c: pos.c as f32,
            vel_r: 0.0,
            vel_c: 0.0,
            acc_r: 0.0,
            acc_c: 0.0,
            motion: MotionParams::sample(profile, rng),
            wall_coll_resolve: false,
            wall_coll_resolve_ctr: 0,
            glyph: profile.glyph,
            style: profile.style,
            fog_of_war: true,
            containment: Containment::default(),
            enemy: true,
            stats: CombatStats::default(),
            race,
            class,
        }
    }

    /// Creates an NPC of random race and class.
    pub fn random<R: Rng + ?Sized>(pos: Position, rng: &mut R) -> Self {
        let race = Race::random(rng);
        let class = Class::random(rng);
        Self::new(pos, race, class, rng)
    }

    pub fn is_dead(&self) -> bool {
        self.stats.health <= 0
    }

    /// Applies damage from external combat logic. Health stops at zero.
    pub fn take_damage(&mut self, amount: i32) {
        if self.is_dead() {
            return;
        }
        self.stats.health = (self.stats.health - amount.max(0)).max(0);
        if self.is_dead() {
            log::info!("{:?} {:?} at {:?} died", self.race, self.class, self.pos);
        }
    }

    /// Glyph and style to draw: the corpse when dead, a tinted background
    /// while resolving a wall collision.
    pub fn appearance(&self) -> (char, Style) {
        if self.is_dead() {
            return (CORPSE_GLYPH, CORPSE_STYLE);
        }
        let mut style = self.style;
        if self.wall_coll_resolve {
            style.bg = RESOLVING_BG;
        }
        (self.glyph, style)
    }

    /// Advances the physics by `dt` seconds.
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, topology: &Topology, rng: &mut R) {
        if self.is_dead() {
            return;
        }

        let aspect = config::PIXEL_ASPECT;
        if self.wall_coll_resolve {
            self.wall_coll_resolve_ctr += 1;
            if self.wall_coll_resolve_ctr >= RECOVERY_TICKS {
                self.end_wall_collision();
            }
        } else if rng.gen_range(0..=self.motion.prob_change_acc) == 0 {
            let step = self.motion.acc_step;
            let lim = self.motion.acc_lim;
            self.acc_r += randn_range(rng, -step, step);
            self.acc_c += randn_range(rng, -step * aspect, step * aspect);
            self.acc_r = self.acc_r.clamp(-lim, lim);
            self.acc_c = self.acc_c.clamp(-lim * aspect, lim * aspect);
        }

        let vel_lim = self.motion.vel_lim;
        self.vel_r = (self.vel_r + self.acc_r * dt).clamp(-vel_lim, vel_lim);
        self.vel_c = (self.vel_c + self.acc_c * dt).clamp(-vel_lim * aspect, vel_lim * aspect);
        self.pos_r += self.vel_r * dt;
        self.pos_c += self.vel_c * dt;

        let cell = Position::new(self.pos_r.round() as i32, self.pos_c.round() as i32);
        let (location_corr, location_room) = self.containment.locate(topology, cell);
        if location_corr == BBLocation::Inside || location_room == BBLocation::Inside {
            self.pos = cell;
            self.end_wall_collision();
        } else if !self.wall_coll_resolve && rng.gen_range(0..=RESOLVE_CHANCE) == 0 {
            self.begin_wall_collision(location_corr, location_room);
        }

        self.containment.update(topology, self.pos);
    }

    /// Snaps back to the committed cell and forces a small velocity pushing
    /// back into the box the NPC left.
    fn begin_wall_collision(&mut self, location_corr: BBLocation, location_room: BBLocation) {
        self.pos_r = self.pos.r as f32;
        self.pos_c = self.pos.c as f32;

        if location_corr.is_outside() && location_room.is_outside() {
            // Outside both boxes at once: stop vertical motion only.
            self.acc_r = 0.0;
            self.vel_r = 0.0;
        } else {
            let location = if location_room.is_outside() {
                location_room
            } else {
                location_corr
            };
            match push_back_direction(location) {
                Some((dr, dc)) => {
                    if dr != 0 {
                        self.acc_r = 0.0;
                        self.vel_r = dr as f32 * RESOLVE_VEL;
                    }
                    if dc != 0 {
                        self.acc_c = 0.0;
                        self.vel_c = dc as f32 * RESOLVE_VEL;
                    }
                }
                None => {
                    self.acc_r = 0.0;
                    self.acc_c = 0.0;
                    self.vel_r = 0.0;
                    self.vel_c = 0.0;
                }
            }
        }

        self.wall_coll_resolve = true;
        self.wall_coll_resolve_ctr = 0;
    }

    fn end_wall_collision(&mut self) {
        self.wall_coll_resolve = false;
        self.wall_coll_resolve_ctr = 0;
    }
}

/// Row/column signs pointing from an outside zone back into the box.
fn push_back_direction(location: BBLocation) -> Option<(i32, i32)> {
    match location {
        BBLocation::OutsideTop => Some((1, 0)),
        BBLocation::OutsideTopLeft => Some((1, 1)),
        BBLocation::OutsideLeft => Some((0, 1)),
        BBLocation::OutsideBottomLeft => Some((-1, 1)),
        BBLocation::OutsideBottom => Some((-1, 0)),
        BBLocation::OutsideBottomRight => Some((-1, -1)),
        BBLocation::OutsideRight => Some((0, -1)),
        BBLocation::OutsideTopRight => Some((1, -1)),
        BBLocation::Inside | BBLocation::None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{RoomId, TopologyBuilder};
    use crate::utils::BoundingBox;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn arena() -> Topology {
        let mut builder = TopologyBuilder::new(Position::new(60, 60));
        builder.add_room(BoundingBox::new(10, 10, 10, 10));
        builder.build().unwrap()
    }

    fn npc_in_room(rng: &mut StdRng) -> Npc {
        let mut npc = Npc::new(Position::new(15, 15), Race::Wolf, Class::RogueThief, rng);
        npc.containment = Containment::in_room(RoomId(0));
        npc
    }

    #[test]
    fn test_race_table_covers_every_race() {
        for race in Race::ALL {
            let p = race.profile();
            assert!(p.acc_step.0 <= p.acc_step.1);
            assert!(p.acc_lim.0 <= p.acc_lim.1);
            assert!(p.vel_lim.0 <= p.vel_lim.1);
            assert!(p.prob_change_acc.0 >= 1);
        }
        assert_eq!(Race::Ogre.profile().glyph, 'O');
        assert_eq!(Race::Dragon.profile().glyph, 'R');
    }

    #[test]
    fn test_sampled_motion_stays_in_profile_ranges() {
        let mut rng = StdRng::seed_from_u64(3);
        for race in Race::ALL {
            let p = race.profile();
            let m = MotionParams::sample(p, &mut rng);
            assert!((p.acc_lim.0..=p.acc_lim.1).contains(&m.acc_lim));
            assert!((p.vel_lim.0..=p.vel_lim.1).contains(&m.vel_lim));
            assert!((p.prob_change_acc.0..=p.prob_change_acc.1).contains(&m.prob_change_acc));
        }
    }

    #[test]
    fn test_npc_stays_within_its_room() {
        let topology = arena();
        let mut rng = StdRng::seed_from_u64(11);
        let mut npc = npc_in_room(&mut rng);
        let bb = topology.rooms[0].bb;
        for _ in 0..2000 {
            npc.update(0.05, &topology, &mut rng);
            assert!(bb.is_inside(npc.pos), "escaped to {:?}", npc.pos);
            assert!(npc.vel_r.abs() <= npc.motion.vel_lim.max(RESOLVE_VEL) + 1e-3);
        }
    }

    #[test]
    fn test_dead_npc_is_frozen() {
        let topology = arena();
        let mut rng = StdRng::seed_from_u64(5);
        let mut npc = npc_in_room(&mut rng);
        npc.vel_r = 3.0;
        npc.vel_c = -2.0;
        npc.take_damage(500);
        assert_eq!(npc.stats.health, 0);

        for _ in 0..100 {
            npc.update(0.1, &topology, &mut rng);
        }
        assert_eq!(npc.pos, Position::new(15, 15));
        assert_eq!(npc.vel_r, 3.0);
        assert_eq!(npc.vel_c, -2.0);
        assert_eq!(npc.appearance(), ('&', Style::new(Color::Red, Color::DarkGray)));
    }

    #[test]
    fn test_wall_collision_pushes_back_inside() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut npc = npc_in_room(&mut rng);
        npc.pos = Position::new(10, 15);
        npc.pos_r = 9.0;
        npc.begin_wall_collision(BBLocation::None, BBLocation::OutsideTop);

        assert!(npc.wall_coll_resolve);
        assert_eq!(npc.pos_r, 10.0);
        assert_eq!(npc.vel_r, RESOLVE_VEL);
        assert_eq!(npc.acc_r, 0.0);
        assert_eq!(npc.appearance().1.bg, Color::DarkBlue);
    }

    #[test]
    fn test_corner_collision_pushes_on_both_axes() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut npc = npc_in_room(&mut rng);
        npc.begin_wall_collision(BBLocation::None, BBLocation::OutsideBottomRight);
        assert_eq!(npc.vel_r, -RESOLVE_VEL);
        assert_eq!(npc.vel_c, -RESOLVE_VEL);
    }

    #[test]
    fn test_straddling_both_boxes_neutralizes_rows() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut npc = npc_in_room(&mut rng);
        npc.vel_r = 4.0;
        npc.acc_r = 2.0;
        npc.vel_c = 1.5;
        npc.begin_wall_collision(BBLocation::OutsideLeft, BBLocation::OutsideTop);
        assert_eq!(npc.vel_r, 0.0);
        assert_eq!(npc.acc_r, 0.0);
        assert_eq!(npc.vel_c, 1.5);
    }

    #[test]
    fn test_resolution_expires_after_recovery_ticks() {
        // No boxes at all: the NPC is never inside, so only the counter ends
        // the resolution.
        let topology = Topology::default();
        let mut rng = StdRng::seed_from_u64(2);
        let mut npc = Npc::new(Position::new(5, 5), Race::Giant, Class::WizardMage, &mut rng);
        npc.begin_wall_collision(BBLocation::None, BBLocation::None);

        for tick in 1..RECOVERY_TICKS {
            npc.update(0.1, &topology, &mut rng);
            assert!(npc.wall_coll_resolve, "ended early at tick {}", tick);
            assert_eq!(npc.wall_coll_resolve_ctr, tick);
        }
        // Tick RECOVERY_TICKS ends it; a fresh collision restarts at zero.
        npc.update(0.1, &topology, &mut rng);
        assert!(!npc.wall_coll_resolve || npc.wall_coll_resolve_ctr == 0);
    }

    #[test]
    fn test_reaching_inside_clears_resolution() {
        let topology = arena();
        let mut rng = StdRng::seed_from_u64(21);
        let mut npc = npc_in_room(&mut rng);
        npc.begin_wall_collision(BBLocation::None, BBLocation::OutsideTop);
        npc.update(0.01, &topology, &mut rng);
        assert!(!npc.wall_coll_resolve);
    }
}
