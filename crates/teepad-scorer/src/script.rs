use std::fmt;
use std::path::Path;

use serde::Deserialize;

use teepad_core::player::{Player, PlayerId, Strokes};
use teepad_core::round::RoundConfig;

/// A round to replay: the host's setup plus every player's strokes.
#[derive(Debug, Clone, Deserialize)]
pub struct RoundScript {
    #[serde(default)]
    pub round: RoundConfig,
    pub players: Vec<ScriptPlayer>,
}

/// One card entry. `strokes` runs in play order; 0 leaves a hole unscored.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptPlayer {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub handicap: i32,
    #[serde(default)]
    pub pays_entry: bool,
    #[serde(default)]
    pub pays_ace: bool,
    #[serde(default)]
    pub is_current_user: bool,
    #[serde(default)]
    pub strokes: Vec<Strokes>,
}

impl ScriptPlayer {
    pub fn to_player(&self) -> Player {
        Player {
            handicap: self.handicap,
            pays_entry: self.pays_entry,
            pays_ace: self.pays_ace,
            is_current_user: self.is_current_user,
            ..Player::new(self.id, self.name.clone())
        }
    }

    /// Strokes for the `index`-th hole played, if scored.
    pub fn strokes_at(&self, index: usize) -> Option<Strokes> {
        self.strokes.get(index).copied().filter(|&s| s > 0)
    }
}

impl RoundScript {
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ScriptError::Read(e.to_string()))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ScriptError> {
        let script: Self = toml::from_str(contents).map_err(|e| ScriptError::Parse(e.to_string()))?;
        script.validate()?;
        Ok(script)
    }

    fn validate(&self) -> Result<(), ScriptError> {
        if self.players.is_empty() {
            return Err(ScriptError::NoPlayers);
        }
        let holes = self.round.total_holes as usize;
        if let Some(p) = self.players.iter().find(|p| p.strokes.len() > holes) {
            return Err(ScriptError::TooManyStrokes {
                player: p.name.clone(),
                given: p.strokes.len(),
                holes,
            });
        }
        Ok(())
    }

    pub fn players(&self) -> Vec<Player> {
        self.players.iter().map(ScriptPlayer::to_player).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    Read(String),
    Parse(String),
    NoPlayers,
    TooManyStrokes {
        player: String,
        given: usize,
        holes: usize,
    },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(e) => write!(f, "cannot read round script: {e}"),
            Self::Parse(e) => write!(f, "invalid round script: {e}"),
            Self::NoPlayers => write!(f, "round script has no players"),
            Self::TooManyStrokes {
                player,
                given,
                holes,
            } => write!(f, "{player} has {given} strokes for a {holes}-hole round"),
        }
    }
}

impl std::error::Error for ScriptError {}
