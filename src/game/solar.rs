//! # Solar Cycle
//!
//! Moves the sun through eight compass sectors over a configurable day
//! length. The shadow always points away from the sun.

use crate::game::Direction;
use crate::{config, LanternError, LanternResult};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Order in which the sun visits the sectors, starting at sunrise.
pub const SUN_PATH: [Direction; 8] = [
    Direction::East,
    Direction::Northeast,
    Direction::North,
    Direction::Northwest,
    Direction::West,
    Direction::Southwest,
    Direction::South,
    Direction::Southeast,
];

/// Current sun and shadow direction plus the day-length configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarCycle {
    sun_dir: Direction,
    shadow_dir: Direction,
    minutes_per_day: f32,
    /// Fraction of a day added to the elapsed time
    t_offset: f64,
}

impl Default for SolarCycle {
    fn default() -> Self {
        Self {
            sun_dir: Direction::East,
            shadow_dir: Direction::West,
            minutes_per_day: config::DEFAULT_MINUTES_PER_DAY,
            t_offset: 0.0,
        }
    }
}

impl SolarCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sun_dir(&self) -> Direction {
        self.sun_dir
    }

    pub fn shadow_dir(&self) -> Direction {
        self.shadow_dir
    }

    pub fn minutes_per_day(&self) -> f32 {
        self.minutes_per_day
    }

    /// Position of a direction along [`SUN_PATH`].
    pub fn sector_of(dir: Direction) -> Option<usize> {
        SUN_PATH.iter().position(|d| *d == dir)
    }

    /// Sets the start direction and day length.
    ///
    /// The time offset is chosen so that `sun_dir` is the sector at elapsed
    /// time zero. The `None` sentinel and non-positive day lengths are
    /// rejected and leave the previous configuration untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use lantern::{Direction, SolarCycle};
    ///
    /// let mut sun = SolarCycle::new();
    /// sun.configure(Direction::North, 10.0).unwrap();
    /// sun.update(0.0);
    /// assert_eq!(sun.sun_dir(), Direction::North);
    /// assert_eq!(sun.shadow_dir(), Direction::South);
    /// assert!(sun.configure(Direction::None, 10.0).is_err());
    /// assert_eq!(sun.sun_dir(), Direction::North);
    /// ```
    pub fn configure(&mut self, sun_dir: Direction, minutes_per_day: f32) -> LanternResult<()> {
        let Some(sector) = Self::sector_of(sun_dir) else {
            log::error!("Rejected sun direction {:?}; keeping {:?}", sun_dir, self.sun_dir);
            return Err(LanternError::InvalidConfiguration(format!(
                "invalid sun direction {:?}",
                sun_dir
            )));
        };
        if !minutes_per_day.is_finite() || minutes_per_day <= 0.0 {
            log::error!("Rejected day length {} minutes", minutes_per_day);
            return Err(LanternError::InvalidConfiguration(format!(
                "day length must be positive, got {}",
                minutes_per_day
            )));
        }

        self.sun_dir = sun_dir;
        self.shadow_dir = sun_dir.opposite();
        self.minutes_per_day = minutes_per_day;
        self.t_offset = sector as f64 / SUN_PATH.len() as f64;
        log::debug!("Sun configured at {:?}, {} minutes per day", sun_dir, minutes_per_day);
        Ok(())
    }

    /// Picks a random start direction.
    pub fn configure_random<R: Rng + ?Sized>(
        &mut self,
        minutes_per_day: f32,
        rng: &mut R,
    ) -> LanternResult<()> {
        let sun_dir = SUN_PATH[rng.gen_range(0..SUN_PATH.len())];
        self.configure(sun_dir, minutes_per_day)
    }

    /// Normalized time of day in `[0, 1)`.
    pub fn time_of_day(&self, sim_time_s: f64) -> f64 {
        let t = self.t_offset + (sim_time_s / 60.0) / self.minutes_per_day as f64;
        t.rem_euclid(1.0)
    }

    /// Advances the sun to the sector for `sim_time_s` seconds of
    /// simulated time.
    pub fn update(&mut self, sim_time_s: f64) {
        let t = self.time_of_day(sim_time_s);
        let sector = ((t * SUN_PATH.len() as f64) as usize).min(SUN_PATH.len() - 1);
        let next = SUN_PATH[sector];
        if next != self.sun_dir {
            self.sun_dir = next;
            self.shadow_dir = next.opposite();
        }
    }
}
