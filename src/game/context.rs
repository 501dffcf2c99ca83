//! # Simulation Context
//!
//! The per-session clock and the session-wide battle cooldown slot, passed
//! explicitly into every entity update instead of living in ambient global
//! state.

use crate::config;

/// Shared per-tick simulation state.
///
/// `now` is seconds since the session started, advanced once per tick by the
/// driver. The battle cooldown is a single last-writer-wins slot: the
/// resolver stamps it when an interaction concludes, and expiry is checked
/// lazily on the next query, never via a timer.
///
/// # Examples
///
/// ```
/// use verdant::SimContext;
///
/// let mut ctx = SimContext::new();
/// ctx.advance(1.5);
/// assert_eq!(ctx.now, 1.5);
/// assert!(!ctx.global_cooldown_active());
///
/// ctx.note_battle_end(3.0);
/// assert!(ctx.global_cooldown_active());
/// ctx.advance(3.0);
/// assert!(!ctx.global_cooldown_active());
/// ```
#[derive(Debug, Clone)]
pub struct SimContext {
    /// Seconds since the session started
    pub now: f64,
    /// When the last battle or shop interaction concluded, if any
    pub last_battle_end: Option<f64>,
    /// Length of the session-wide suppression window, in seconds
    pub last_battle_cooldown: f64,
}

impl SimContext {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            last_battle_end: None,
            last_battle_cooldown: config::DEFAULT_BATTLE_COOLDOWN,
        }
    }

    /// Advances the session clock by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.now += dt;
    }

    /// Stamps the end of an interaction and arms the session-wide cooldown.
    pub fn note_battle_end(&mut self, cooldown: f64) {
        self.last_battle_end = Some(self.now);
        self.last_battle_cooldown = cooldown;
    }

    /// True while the session-wide cooldown suppresses detection triggers.
    pub fn global_cooldown_active(&self) -> bool {
        match self.last_battle_end {
            Some(end) => self.now - end < self.last_battle_cooldown,
            None => false,
        }
    }
}

impl Default for SimContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_context_has_no_cooldown() {
        let ctx = SimContext::new();
        assert!(!ctx.global_cooldown_active());
    }

    #[test]
    fn test_cooldown_expires_lazily() {
        let mut ctx = SimContext::new();
        ctx.advance(10.0);
        ctx.note_battle_end(2.0);
        assert!(ctx.global_cooldown_active());

        ctx.advance(1.9);
        assert!(ctx.global_cooldown_active());

        ctx.advance(0.1);
        // now - end == cooldown: window is over
        assert!(!ctx.global_cooldown_active());
    }

    #[test]
    fn test_note_battle_end_is_last_writer_wins() {
        let mut ctx = SimContext::new();
        ctx.note_battle_end(100.0);
        ctx.advance(1.0);
        ctx.note_battle_end(0.5);
        ctx.advance(0.6);
        assert!(!ctx.global_cooldown_active());
    }
}
