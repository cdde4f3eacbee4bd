//! Achievement definitions and metadata
//!
//! The engine never evaluates requirements. They are descriptive data for the
//! collaborator that watches counts, scores and streaks and decides when to
//! call `unlock_achievement`.

use serde::Serialize;

/// Achievement category for grouping in UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Learning,
    Practice,
    Streak,
    Mastery,
    Milestone,
}

impl AchievementCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Learning => "Learning",
            Self::Practice => "Practice",
            Self::Streak => "Streaks",
            Self::Mastery => "Mastery",
            Self::Milestone => "Milestones",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
        }
    }
}

/// Condition the collaborator checks before unlocking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "camelCase")]
pub enum Requirement {
    LessonsCompleted(u32),
    ProblemsSolved(u32),
    PracticeSessions(u32),
    StreakDays(u32),
    /// Percentage score on a single quiz
    QuizScore(u32),
    LevelReached(u32),
}

impl Requirement {
    pub fn describe(&self) -> String {
        match self {
            Self::LessonsCompleted(n) => format!("Complete {n} lesson(s)"),
            Self::ProblemsSolved(n) => format!("Solve {n} problem(s)"),
            Self::PracticeSessions(n) => format!("Finish {n} practice session(s)"),
            Self::StreakDays(n) => format!("Keep a {n}-day streak"),
            Self::QuizScore(n) => format!("Score {n}% on a quiz"),
            Self::LevelReached(n) => format!("Reach level {n}"),
        }
    }
}

/// Achievement definition with all metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
    pub rarity: Rarity,
    pub xp_reward: u64,
    pub requirement: Requirement,
}

/// Built-in achievement table
pub static ACHIEVEMENTS: &[AchievementDefinition] = &[
    // === LEARNING ===
    AchievementDefinition {
        id: "first_lesson",
        name: "First Steps",
        description: "Complete your first lesson",
        category: AchievementCategory::Learning,
        rarity: Rarity::Common,
        xp_reward: 50,
        requirement: Requirement::LessonsCompleted(1),
    },
    AchievementDefinition {
        id: "ten_lessons",
        name: "Bookworm",
        description: "Complete 10 lessons",
        category: AchievementCategory::Learning,
        rarity: Rarity::Rare,
        xp_reward: 150,
        requirement: Requirement::LessonsCompleted(10),
    },
    AchievementDefinition {
        id: "fifty_lessons",
        name: "Scholar",
        description: "Complete 50 lessons",
        category: AchievementCategory::Learning,
        rarity: Rarity::Epic,
        xp_reward: 500,
        requirement: Requirement::LessonsCompleted(50),
    },
    // === PRACTICE ===
    AchievementDefinition {
        id: "first_problem",
        name: "Problem Solver",
        description: "Solve your first problem",
        category: AchievementCategory::Practice,
        rarity: Rarity::Common,
        xp_reward: 50,
        requirement: Requirement::ProblemsSolved(1),
    },
    AchievementDefinition {
        id: "twenty_five_problems",
        name: "Grinder",
        description: "Solve 25 problems",
        category: AchievementCategory::Practice,
        rarity: Rarity::Rare,
        xp_reward: 200,
        requirement: Requirement::ProblemsSolved(25),
    },
    AchievementDefinition {
        id: "hundred_problems",
        name: "Centurion",
        description: "Solve 100 problems",
        category: AchievementCategory::Practice,
        rarity: Rarity::Legendary,
        xp_reward: 1000,
        requirement: Requirement::ProblemsSolved(100),
    },
    AchievementDefinition {
        id: "first_practice",
        name: "Warm Up",
        description: "Finish a practice session",
        category: AchievementCategory::Practice,
        rarity: Rarity::Common,
        xp_reward: 25,
        requirement: Requirement::PracticeSessions(1),
    },
    // === STREAK ===
    AchievementDefinition {
        id: "streak_3",
        name: "On Fire",
        description: "Study 3 days in a row",
        category: AchievementCategory::Streak,
        rarity: Rarity::Common,
        xp_reward: 75,
        requirement: Requirement::StreakDays(3),
    },
    AchievementDefinition {
        id: "streak_7",
        name: "Week Warrior",
        description: "Study 7 days in a row",
        category: AchievementCategory::Streak,
        rarity: Rarity::Rare,
        xp_reward: 200,
        requirement: Requirement::StreakDays(7),
    },
    AchievementDefinition {
        id: "streak_30",
        name: "Unstoppable",
        description: "Study 30 days in a row",
        category: AchievementCategory::Streak,
        rarity: Rarity::Legendary,
        xp_reward: 1000,
        requirement: Requirement::StreakDays(30),
    },
    // === MASTERY ===
    AchievementDefinition {
        id: "perfect_quiz",
        name: "Flawless",
        description: "Score 100% on a quiz",
        category: AchievementCategory::Mastery,
        rarity: Rarity::Rare,
        xp_reward: 150,
        requirement: Requirement::QuizScore(100),
    },
    // === MILESTONE ===
    AchievementDefinition {
        id: "level_5",
        name: "Rising Star",
        description: "Reach level 5",
        category: AchievementCategory::Milestone,
        rarity: Rarity::Rare,
        xp_reward: 100,
        requirement: Requirement::LevelReached(5),
    },
    AchievementDefinition {
        id: "level_10",
        name: "Dedicated",
        description: "Reach level 10",
        category: AchievementCategory::Milestone,
        rarity: Rarity::Epic,
        xp_reward: 250,
        requirement: Requirement::LevelReached(10),
    },
    AchievementDefinition {
        id: "level_20",
        name: "Sage",
        description: "Reach level 20",
        category: AchievementCategory::Milestone,
        rarity: Rarity::Legendary,
        xp_reward: 500,
        requirement: Requirement::LevelReached(20),
    },
];

/// Read-only lookup over a definition table
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    definitions: &'static [AchievementDefinition],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(ACHIEVEMENTS)
    }
}

impl Catalog {
    pub fn new(definitions: &'static [AchievementDefinition]) -> Self {
        Self { definitions }
    }

    /// Get achievement definition by ID
    pub fn get(&self, id: &str) -> Option<&'static AchievementDefinition> {
        self.definitions.iter().find(|a| a.id == id)
    }

    pub fn all(&self) -> &'static [AchievementDefinition] {
        self.definitions
    }

    pub fn by_category(
        &self,
        category: AchievementCategory,
    ) -> impl Iterator<Item = &'static AchievementDefinition> {
        self.definitions.iter().filter(move |a| a.category == category)
    }

    /// Get total number of achievements
    pub fn total_count(&self) -> usize {
        self.definitions.len()
    }

    /// Get total possible XP from all achievements
    pub fn total_xp(&self) -> u64 {
        self.definitions.iter().map(|a| a.xp_reward).sum()
    }
}
