//! XP and Level system
//!
//! Levels are a flat band of XP each. Titles are earned in bands of five levels.

/// XP needed to advance one level
pub const XP_PER_LEVEL: u64 = 500;

/// Title every progress record starts with
pub const STARTING_TITLE: &str = "Novice";

/// Title band definition
#[derive(Debug, Clone)]
pub struct TitleBand {
    /// First level that carries this title
    pub min_level: u32,
    pub title: &'static str,
}

/// All title bands (must be sorted by min_level)
pub static TITLE_BANDS: &[TitleBand] = &[
    TitleBand {
        min_level: 1,
        title: STARTING_TITLE,
    },
    TitleBand {
        min_level: 6,
        title: "Apprentice",
    },
    TitleBand {
        min_level: 11,
        title: "Practitioner",
    },
    TitleBand {
        min_level: 16,
        title: "Expert",
    },
    TitleBand {
        min_level: 21,
        title: "Master",
    },
];

/// Level for a cumulative XP total
pub fn derive_level(xp: u64) -> u32 {
    let level = xp / XP_PER_LEVEL + 1;
    u32::try_from(level).unwrap_or(u32::MAX)
}

/// Title worn at the given level
pub fn title_for_level(level: u32) -> &'static str {
    TITLE_BANDS
        .iter()
        .rev()
        .find(|b| level >= b.min_level)
        .map(|b| b.title)
        .unwrap_or(STARTING_TITLE)
}

/// Progress through the current level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelProgress {
    pub current_in_level: u64,
    pub needed: u64,
    /// 0.0 - 100.0
    pub percentage: f64,
}

impl LevelProgress {
    /// XP still missing before the next level
    pub fn remaining(&self) -> u64 {
        self.needed - self.current_in_level
    }
}

/// Progress within the level that `xp` falls in
pub fn progress_within_level(xp: u64) -> LevelProgress {
    let current_in_level = xp % XP_PER_LEVEL;
    LevelProgress {
        current_in_level,
        needed: XP_PER_LEVEL,
        percentage: 100.0 * current_in_level as f64 / XP_PER_LEVEL as f64,
    }
}

/// Cumulative XP at which `level` begins
pub fn xp_for_level(level: u32) -> u64 {
    u64::from(level.saturating_sub(1)) * XP_PER_LEVEL
}
