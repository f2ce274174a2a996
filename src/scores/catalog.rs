use strum_macros::{Display, EnumString};

/// Cap applied to games the catalog does not list
pub const DEFAULT_MAX_DURATION_SECS: i32 = 300;

/// Games shipped with the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum KnownGame {
    CherryBellyTap,
}

impl KnownGame {
    pub fn max_duration_secs(self) -> i32 {
        match self {
            KnownGame::CherryBellyTap => 300,
        }
    }
}

/// Per-game duration limits used when validating submissions
#[derive(Debug, Clone)]
pub struct GameCatalog {
    default_max_duration: i32,
}

impl GameCatalog {
    pub fn new(default_max_duration: i32) -> Self {
        Self {
            default_max_duration,
        }
    }

    pub fn max_duration(&self, game_id: &str) -> i32 {
        game_id
            .parse::<KnownGame>()
            .map(KnownGame::max_duration_secs)
            .unwrap_or(self.default_max_duration)
    }
}

impl Default for GameCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DURATION_SECS)
    }
}
