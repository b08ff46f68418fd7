//! # Message Log
//!
//! Timestamped notifications shown at the bottom of the frame for a short
//! while after they are posted.

use crate::game::Position;
use crate::rendering::{Color, DrawSurface, Style};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Seconds of simulated time a message stays on screen.
pub const MESSAGE_DISPLAY_SECONDS: f64 = 3.0;

/// Messages kept in the history.
pub const MAX_MESSAGES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageLevel {
    Info,
    Guide,
    Warning,
}

impl MessageLevel {
    pub fn style(self) -> Style {
        match self {
            MessageLevel::Info => Style::new(Color::White, Color::DarkGray),
            MessageLevel::Guide => Style::new(Color::Black, Color::Cyan),
            MessageLevel::Warning => Style::new(Color::Yellow, Color::DarkRed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub level: MessageLevel,
    /// Simulated time at which the message was posted
    pub posted_at: f64,
}

/// Bounded message history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageLog {
    messages: VecDeque<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, text: impl Into<String>, level: MessageLevel, sim_time_s: f64) {
        self.messages.push_back(Message {
            text: text.into(),
            level,
            posted_at: sim_time_s,
        });
        while self.messages.len() > MAX_MESSAGES {
            self.messages.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    /// Messages still on screen at `sim_time_s`, oldest first.
    pub fn active(&self, sim_time_s: f64) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(move |msg| {
            let age = sim_time_s - msg.posted_at;
            (0.0..MESSAGE_DISPLAY_SECONDS).contains(&age)
        })
    }

    /// Draws the active messages centered on the bottom rows, newest last.
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S, sim_time_s: f64) {
        let active: Vec<&Message> = self.active(sim_time_s).collect();
        let rows = surface.rows();
        let cols = surface.cols();
        let first_row = rows - active.len() as i32;
        for (idx, msg) in active.iter().enumerate() {
            let text = format!(" {} ", msg.text);
            let c = ((cols - text.chars().count() as i32) / 2).max(0);
            surface.put_str(Position::new(first_row + idx as i32, c), &text, msg.level.style());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::TextSurface;

    #[test]
    fn test_messages_expire() {
        let mut log = MessageLog::new();
        log.add("You picked up a key!", MessageLevel::Guide, 10.0);
        assert_eq!(log.active(10.5).count(), 1);
        assert_eq!(log.active(9.0).count(), 0);
        assert_eq!(log.active(10.0 + MESSAGE_DISPLAY_SECONDS).count(), 0);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut log = MessageLog::new();
        for i in 0..(MAX_MESSAGES + 5) {
            log.add(format!("msg {}", i), MessageLevel::Info, i as f64);
        }
        assert_eq!(log.len(), MAX_MESSAGES);
        assert_eq!(log.iter().next().map(|m| m.text.as_str()), Some("msg 5"));
    }

    #[test]
    fn test_draw_places_newest_on_last_row() {
        let mut log = MessageLog::new();
        log.add("first", MessageLevel::Info, 0.0);
        log.add("second", MessageLevel::Warning, 0.5);
        let mut surface = TextSurface::new(5, 20);
        log.draw(&mut surface, 1.0);
        let lines = surface.lines();
        assert!(lines[3].contains("first"));
        assert!(lines[4].contains("second"));
    }
}
