//! Preferences command implementation

use clap::ValueEnum;

use studyxp::ProgressStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    fn enabled(self) -> bool {
        self == Self::On
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

/// Show preferences, applying any changes first
pub fn prefs_command(
    store: &mut ProgressStore,
    goal: Option<u64>,
    celebrations: Option<Toggle>,
    sound: Option<Toggle>,
) {
    if goal.is_some() || celebrations.is_some() || sound.is_some() {
        store.update_preferences(|p| {
            if let Some(goal) = goal {
                p.daily_xp_goal = goal;
            }
            if let Some(t) = celebrations {
                p.celebrations_enabled = t.enabled();
            }
            if let Some(t) = sound {
                p.sound_enabled = t.enabled();
            }
        });
    }

    let prefs = store.preferences();
    println!("Daily XP goal: {}", prefs.daily_xp_goal);
    println!("Celebrations:  {}", on_off(prefs.celebrations_enabled));
    println!("Sound:         {}", on_off(prefs.sound_enabled));
}
