//! Waypoint configuration: per-mini-game constants
//!
//! Each waypoint is one stop on the quest map with its own question kind,
//! round quota and scoring constants. An optional JSON file overrides the
//! built-in set; a missing file silently falls back to the defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::question::QuestionKind;
use crate::session::ScoreRules;

/// One mini-game stop on the quest map
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaypointConfig {
    pub id: String,
    pub title: String,
    pub kind: QuestionKind,
    pub rules: ScoreRules,
}

/// The set of playable waypoints
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WaypointSet {
    waypoints: Vec<WaypointConfig>,
}

impl WaypointSet {
    /// The shipped quest map
    pub fn builtin() -> Self {
        let waypoint = |id: &str, title: &str, kind, rules| WaypointConfig {
            id: id.to_string(),
            title: title.to_string(),
            kind,
            rules,
        };

        WaypointSet {
            waypoints: vec![
                waypoint(
                    "sunny-meadow",
                    "Sunny Meadow",
                    QuestionKind::Addition,
                    ScoreRules {
                        starting_score: 0,
                        correct_award: 4,
                        wrong_penalty: 2,
                        score_cap: 20,
                        rounds: 5,
                    },
                ),
                waypoint(
                    "berry-bridge",
                    "Berry Bridge",
                    QuestionKind::Subtraction,
                    ScoreRules {
                        starting_score: 0,
                        correct_award: 4,
                        wrong_penalty: 2,
                        score_cap: 20,
                        rounds: 5,
                    },
                ),
                waypoint(
                    "crystal-cavern",
                    "Crystal Cavern",
                    QuestionKind::Comparison,
                    ScoreRules {
                        starting_score: 0,
                        correct_award: 4,
                        wrong_penalty: 2,
                        score_cap: 24,
                        rounds: 6,
                    },
                ),
                // Starts at full score; mistakes chip it away
                waypoint(
                    "lighthouse-point",
                    "Lighthouse Point",
                    QuestionKind::Comparison,
                    ScoreRules {
                        starting_score: 20,
                        correct_award: 0,
                        wrong_penalty: 2,
                        score_cap: 20,
                        rounds: 5,
                    },
                ),
                waypoint(
                    "starfall-summit",
                    "Starfall Summit",
                    QuestionKind::Addition,
                    ScoreRules {
                        starting_score: 0,
                        correct_award: 10,
                        wrong_penalty: 2,
                        score_cap: 100,
                        rounds: 10,
                    },
                ),
            ],
        }
    }

    /// Load a waypoint set from JSON, falling back to the built-in map when
    /// the file does not exist. A present-but-malformed file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, serde_json::Error> {
        if let Ok(content) = fs::read_to_string(path) {
            serde_json::from_str(&content)
        } else {
            Ok(Self::builtin())
        }
    }

    pub fn get(&self, id: &str) -> Option<&WaypointConfig> {
        self.waypoints.iter().find(|w| w.id == id)
    }

    /// First waypoint on the map, the default when none is requested
    pub fn first(&self) -> Option<&WaypointConfig> {
        self.waypoints.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WaypointConfig> {
        self.waypoints.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_are_unique() {
        let set = WaypointSet::builtin();
        let ids: Vec<&str> = set.iter().map(|w| w.id.as_str()).collect();
        for (i, id) in ids.iter().enumerate() {
            assert!(!ids[i + 1..].contains(id), "duplicate waypoint id {}", id);
        }
        assert!(ids.len() >= 3);
    }

    #[test]
    fn test_lookup() {
        let set = WaypointSet::builtin();
        let cavern = set.get("crystal-cavern").unwrap();
        assert_eq!(cavern.kind, QuestionKind::Comparison);
        assert!(set.get("no-such-place").is_none());
        assert_eq!(set.first().unwrap().id, "sunny-meadow");
    }

    #[test]
    fn test_load_falls_back_when_missing() {
        let set = WaypointSet::load("definitely/not/a/real/path.json").unwrap();
        assert!(set.get("sunny-meadow").is_some());
    }

    #[test]
    fn test_load_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waypoints.json");
        let original = WaypointSet::builtin();
        fs::write(&path, serde_json::to_string_pretty(&original).unwrap()).unwrap();

        let loaded = WaypointSet::load(&path).unwrap();
        assert_eq!(
            loaded.iter().collect::<Vec<_>>(),
            original.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waypoints.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(WaypointSet::load(&path).is_err());
    }
}
