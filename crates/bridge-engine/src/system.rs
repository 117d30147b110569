//! Bidding thresholds, loaded from YAML.
//!
//! [`SystemConfig::default`] is the built-in Acol card, identical to
//! `system/acol.yaml`; other files with the same layout can be loaded with
//! [`SystemConfig::from_yaml`] or [`SystemConfig::from_path`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const ACOL_YAML: &str = include_str!("system/acol.yaml");

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("cannot read system file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid system file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid range {min}-{max} for {field}")]
    Range { field: &'static str, min: u8, max: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointRange {
    pub min: u8,
    pub max: u8,
}

impl PointRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, points: u8) -> bool {
        (self.min..=self.max).contains(&points)
    }
}

/// A threshold that differs between direct and balancing seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BySeat<T> {
    pub direct: T,
    pub balancing: T,
}

impl<T: Copy> BySeat<T> {
    pub fn get(&self, balancing: bool) -> T {
        if balancing {
            self.balancing
        } else {
            self.direct
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpeningConfig {
    pub min_hcp: u8,
    pub rule_of_twenty: u8,
    pub fourth_seat: u8,
    pub one_notrump: PointRange,
    pub two_notrump: PointRange,
    pub strong_two_clubs: u8,
    pub weak_two: PointRange,
    pub preempt: PointRange,
    pub vulnerable_preempt_min: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseConfig {
    pub forcing_min: u8,
    pub one_level_new_suit: u8,
    pub two_level_new_suit: u8,
    pub jump_shift: u8,
    pub game_raise: PointRange,
    pub limit_raise: PointRange,
    pub single_raise: PointRange,
    pub two_notrump: PointRange,
    pub one_notrump: PointRange,
    pub three_notrump: PointRange,
    pub stayman_min: u8,
    pub strong_two_positive: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RebidConfig {
    pub jump_notrump: PointRange,
    pub notrump_after_two_level: PointRange,
    pub reverse_min: u8,
    pub major_game_raise: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompetitionConfig {
    pub takeout_double: BySeat<u8>,
    pub one_notrump_overcall: BySeat<PointRange>,
    pub overcall: BySeat<PointRange>,
    pub weak_jump_overcall: PointRange,
    pub penalty_double_of_notrump: u8,
    pub negative_double_min: u8,
    pub negative_double_max_level: u8,
    pub cue_bid_min: u8,
    pub redouble_min: u8,
}

/// Combined partnership points needed for each target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Targets {
    pub game: u8,
    pub small_slam: u8,
    pub grand_slam: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemConfig {
    pub name: String,
    pub opening: OpeningConfig,
    pub responses: ResponseConfig,
    pub rebids: RebidConfig,
    pub competition: CompetitionConfig,
    pub targets: Targets,
}

impl SystemConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, SystemError> {
        let system: SystemConfig = serde_yaml::from_str(yaml)?;
        system.validate()?;
        Ok(system)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SystemError> {
        let text = std::fs::read_to_string(path)?;
        SystemConfig::from_yaml(&text)
    }

    fn validate(&self) -> Result<(), SystemError> {
        let ranges = [
            ("opening.one_notrump", self.opening.one_notrump),
            ("opening.two_notrump", self.opening.two_notrump),
            ("opening.weak_two", self.opening.weak_two),
            ("opening.preempt", self.opening.preempt),
            ("responses.game_raise", self.responses.game_raise),
            ("responses.limit_raise", self.responses.limit_raise),
            ("responses.single_raise", self.responses.single_raise),
            ("responses.two_notrump", self.responses.two_notrump),
            ("responses.one_notrump", self.responses.one_notrump),
            ("responses.three_notrump", self.responses.three_notrump),
            ("rebids.jump_notrump", self.rebids.jump_notrump),
            ("rebids.notrump_after_two_level", self.rebids.notrump_after_two_level),
            ("competition.weak_jump_overcall", self.competition.weak_jump_overcall),
        ];
        for (field, range) in ranges {
            if range.min > range.max {
                return Err(SystemError::Range {
                    field,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        SystemConfig {
            name: "Acol".to_string(),
            opening: OpeningConfig {
                min_hcp: 12,
                rule_of_twenty: 20,
                fourth_seat: 15,
                one_notrump: PointRange::new(12, 14),
                two_notrump: PointRange::new(20, 22),
                strong_two_clubs: 23,
                weak_two: PointRange::new(6, 10),
                preempt: PointRange::new(6, 10),
                vulnerable_preempt_min: 8,
            },
            responses: ResponseConfig {
                forcing_min: 6,
                one_level_new_suit: 6,
                two_level_new_suit: 10,
                jump_shift: 16,
                game_raise: PointRange::new(13, 15),
                limit_raise: PointRange::new(10, 12),
                single_raise: PointRange::new(6, 9),
                two_notrump: PointRange::new(10, 12),
                one_notrump: PointRange::new(6, 9),
                three_notrump: PointRange::new(13, 15),
                stayman_min: 11,
                strong_two_positive: 8,
            },
            rebids: RebidConfig {
                jump_notrump: PointRange::new(18, 19),
                notrump_after_two_level: PointRange::new(15, 17),
                reverse_min: 16,
                major_game_raise: 16,
            },
            competition: CompetitionConfig {
                takeout_double: BySeat {
                    direct: 12,
                    balancing: 10,
                },
                one_notrump_overcall: BySeat {
                    direct: PointRange::new(15, 18),
                    balancing: PointRange::new(11, 14),
                },
                overcall: BySeat {
                    direct: PointRange::new(8, 16),
                    balancing: PointRange::new(6, 16),
                },
                weak_jump_overcall: PointRange::new(6, 10),
                penalty_double_of_notrump: 15,
                negative_double_min: 8,
                negative_double_max_level: 3,
                cue_bid_min: 11,
                redouble_min: 10,
            },
            targets: Targets {
                game: 25,
                small_slam: 33,
                grand_slam: 37,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_card_matches_default() {
        let system = SystemConfig::from_yaml(ACOL_YAML).unwrap();
        assert_eq!(system, SystemConfig::default());
    }

    #[test]
    fn test_strong_notrump_variant() {
        let yaml = ACOL_YAML.replace(
            "one_notrump: { min: 12, max: 14 }",
            "one_notrump: { min: 15, max: 17 }",
        );
        let system = SystemConfig::from_yaml(&yaml).unwrap();
        assert_eq!(system.opening.one_notrump, PointRange::new(15, 17));
        assert!(system.opening.one_notrump.contains(16));
        assert!(!system.opening.one_notrump.contains(14));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let yaml = ACOL_YAML.replace(
            "two_notrump: { min: 20, max: 22 }",
            "two_notrump: { min: 22, max: 20 }",
        );
        assert!(matches!(
            SystemConfig::from_yaml(&yaml),
            Err(SystemError::Range { field: "opening.two_notrump", .. })
        ));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let yaml = ACOL_YAML.replace("name: Acol", "name: Acol\nflavour: x");
        assert!(matches!(SystemConfig::from_yaml(&yaml), Err(SystemError::Yaml(_))));
    }

    #[test]
    fn test_by_seat() {
        let system = SystemConfig::default();
        assert_eq!(system.competition.takeout_double.get(false), 12);
        assert_eq!(system.competition.takeout_double.get(true), 10);
    }
}
