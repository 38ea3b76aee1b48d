//! Running score state tracked by the engine.

/// Kill rewards and counters for the current match.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub kills: u32,
    pub earned: f64,
    /// Player projectiles launched (every pellet and burst round counts).
    pub shots_fired: u32,
}

impl ScoreState {
    /// Credit one kill. Returns the new running total.
    pub fn record_kill(&mut self, reward: f64) -> f64 {
        self.kills += 1;
        self.earned += reward;
        self.earned
    }
}
