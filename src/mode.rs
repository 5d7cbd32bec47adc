//! Game modes: Single player, Two players, Player vs COM

/// Available game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    #[default]
    Single, // Empty the pool without topping out
    TwoPlayer, // Hot seat, alternating turns
    VersusCom, // Player two is driven by the computer
}

impl GameMode {
    pub fn name(&self) -> &'static str {
        match self {
            GameMode::Single => "Single Player",
            GameMode::TwoPlayer => "Two Players",
            GameMode::VersusCom => "Player vs COM",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GameMode::Single => "Place every piece of the pool without reaching the top",
            GameMode::TwoPlayer => "Share one pool, take turns, outscore your rival",
            GameMode::VersusCom => "Share one pool with a computer opponent",
        }
    }

    /// Two fields sharing a doubled pool
    pub fn is_multiplayer(&self) -> bool {
        !matches!(self, GameMode::Single)
    }

    /// Player two moves on its own
    pub fn has_computer(&self) -> bool {
        matches!(self, GameMode::VersusCom)
    }

    pub fn player_count(&self) -> usize {
        if self.is_multiplayer() { 2 } else { 1 }
    }

    pub fn all() -> &'static [GameMode] {
        &[GameMode::Single, GameMode::TwoPlayer, GameMode::VersusCom]
    }
}
