//! Difficulty profiles
//!
//! Immutable parameter sets picked before a run starts.

use serde::Serialize;

/// Scroll speed, spawn cadence and gap size for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DifficultyProfile {
    pub id: &'static str,
    pub name: &'static str,
    /// Horizontal scroll per tick (px)
    pub speed: f32,
    /// Time between obstacle spawns (ms)
    pub interval_ms: f32,
    /// Gap height as a fraction of viewport height
    pub gap_fraction: f32,
}

impl DifficultyProfile {
    pub const EASY: Self = Self {
        id: "easy",
        name: "Easy",
        speed: 1.8,
        interval_ms: 1800.0,
        gap_fraction: 0.28,
    };

    pub const MEDIUM: Self = Self {
        id: "medium",
        name: "Medium",
        speed: 2.6,
        interval_ms: 1500.0,
        gap_fraction: 0.22,
    };

    pub const HARD: Self = Self {
        id: "hard",
        name: "Hard",
        speed: 3.4,
        interval_ms: 1200.0,
        gap_fraction: 0.18,
    };

    pub const VERY_HARD: Self = Self {
        id: "veryhard",
        name: "Very Hard",
        speed: 4.2,
        interval_ms: 1000.0,
        gap_fraction: 0.16,
    };

    /// All presets, easiest first
    pub const ALL: [Self; 4] = [Self::EASY, Self::MEDIUM, Self::HARD, Self::VERY_HARD];

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.to_lowercase();
        Self::ALL.iter().copied().find(|p| p.id == id)
    }

    /// Look up a preset, falling back to Medium for unknown ids
    pub fn by_id_or_default(id: &str) -> Self {
        Self::from_id(id).unwrap_or_else(|| {
            log::warn!("Unknown difficulty '{}', using {}", id, Self::MEDIUM.name);
            Self::MEDIUM
        })
    }

    /// `speed > 0`, `interval_ms > 0`, `0 < gap_fraction < 1`
    pub fn is_valid(&self) -> bool {
        self.speed.is_finite()
            && self.speed > 0.0
            && self.interval_ms.is_finite()
            && self.interval_ms > 0.0
            && self.gap_fraction > 0.0
            && self.gap_fraction < 1.0
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self::MEDIUM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_valid_and_ordered() {
        for profile in DifficultyProfile::ALL {
            assert!(profile.is_valid(), "{} should be valid", profile.id);
        }
        for pair in DifficultyProfile::ALL.windows(2) {
            assert!(pair[1].speed > pair[0].speed);
            assert!(pair[1].interval_ms < pair[0].interval_ms);
            assert!(pair[1].gap_fraction < pair[0].gap_fraction);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(DifficultyProfile::from_id("hard"), Some(DifficultyProfile::HARD));
        assert_eq!(DifficultyProfile::from_id("VeryHard"), Some(DifficultyProfile::VERY_HARD));
        assert_eq!(DifficultyProfile::from_id("nightmare"), None);
        assert_eq!(DifficultyProfile::by_id_or_default("nightmare"), DifficultyProfile::MEDIUM);
    }

    #[test]
    fn test_invalid_profiles() {
        let mut profile = DifficultyProfile::MEDIUM;
        profile.gap_fraction = 1.0;
        assert!(!profile.is_valid());

        let mut profile = DifficultyProfile::MEDIUM;
        profile.speed = 0.0;
        assert!(!profile.is_valid());

        let mut profile = DifficultyProfile::MEDIUM;
        profile.interval_ms = f32::INFINITY;
        assert!(!profile.is_valid());
    }
}
