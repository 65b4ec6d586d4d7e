use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{ConfigError, ValidationError};

/// Road grid geometry and warp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadConfig {
    pub main_spacing: f32,
    pub main_half_width: f32,
    pub street_spacing: f32,
    pub street_half_width: f32,
    pub warp_k1: f32,
    pub warp_a1: f32,
    pub warp_k2: f32,
    pub warp_a2: f32,
}

impl Default for RoadConfig {
    fn default() -> Self {
        Self {
            main_spacing: MAIN_SPACING,
            main_half_width: MAIN_HALF_WIDTH,
            street_spacing: STREET_SPACING,
            street_half_width: STREET_HALF_WIDTH,
            warp_k1: WARP_K1,
            warp_a1: WARP_A1,
            warp_k2: WARP_K2,
            warp_a2: WARP_A2,
        }
    }
}

/// Per-chunk population counts and placement limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub road_sample_step: f32,
    pub buildings_min: u32,
    pub buildings_max: u32,
    /// Attempt cap for building rejection sampling.
    pub placement_attempts: u32,
    pub building_width: (f32, f32),
    pub building_height: (f32, f32),
    pub npcs_min: u32,
    pub npcs_max: u32,
    pub sidewalk_margin: f32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            road_sample_step: ROAD_SAMPLE_STEP,
            buildings_min: BUILDINGS_MIN,
            buildings_max: BUILDINGS_MAX,
            placement_attempts: PLACEMENT_ATTEMPTS,
            building_width: (3.0, 7.0),
            building_height: (4.0, 16.0),
            npcs_min: NPCS_MIN,
            npcs_max: NPCS_MAX,
            sidewalk_margin: SIDEWALK_MARGIN,
        }
    }
}

/// Vehicle spawning and driving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficConfig {
    pub vehicle_candidates: u32,
    pub speed: (f32, f32),
    pub lane_offset: f32,
    pub turn_chance: f32,
    pub variants: u32,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            vehicle_candidates: VEHICLE_CANDIDATES,
            speed: (6.0, 12.0),
            lane_offset: LANE_OFFSET,
            turn_chance: TURN_CHANCE,
            variants: 4,
        }
    }
}

/// NPC wandering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NpcConfig {
    pub wander_radius: f32,
    /// Exponential smoothing rate toward the wander target (1/s).
    pub follow_rate: f32,
    pub arrive_distance: f32,
}

impl Default for NpcConfig {
    fn default() -> Self {
        Self {
            wander_radius: 3.0,
            follow_rate: 1.5,
            arrive_distance: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub move_speed: f32,
    pub radius: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: PLAYER_SPEED,
            radius: PLAYER_RADIUS,
        }
    }
}

/// Complete world configuration, loadable from RON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub chunk_size: f32,
    pub view_radius: i32,
    pub world_seed: u64,
    pub roads: RoadConfig,
    pub population: PopulationConfig,
    pub traffic: TrafficConfig,
    pub npcs: NpcConfig,
    pub player: PlayerConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            view_radius: VIEW_RADIUS,
            world_seed: 0,
            roads: RoadConfig::default(),
            population: PopulationConfig::default(),
            traffic: TrafficConfig::default(),
            npcs: NpcConfig::default(),
            player: PlayerConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Parse and validate a config from a RON string.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, ConfigError> {
        let options = ron::Options::default();
        let config: WorldConfig = options
            .from_str(ron_str)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        validate_config(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Read, parse and validate a RON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Serialize to pretty RON.
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Check every constraint the generator and lane solver rely on.
pub fn validate_config(config: &WorldConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.chunk_size <= 0.0 {
        errors.push(ValidationError::NonPositiveChunkSize(config.chunk_size));
    }
    if config.view_radius < 0 {
        errors.push(ValidationError::NegativeViewRadius(config.view_radius));
    }

    let roads = &config.roads;
    for (name, spacing, half_width) in [
        ("main", roads.main_spacing, roads.main_half_width),
        ("street", roads.street_spacing, roads.street_half_width),
    ] {
        if spacing <= 0.0 {
            errors.push(ValidationError::NonPositiveSpacing { name, spacing });
        } else if half_width * 2.0 >= spacing {
            errors.push(ValidationError::RoadTooWide {
                name,
                half_width,
                spacing,
            });
        }
    }
    let contraction = (roads.warp_k1 * roads.warp_a1).abs();
    if contraction >= 1.0 {
        errors.push(ValidationError::WarpNotContracting(contraction));
    }

    let pop = &config.population;
    if pop.road_sample_step <= 0.0 {
        errors.push(ValidationError::NonPositive {
            name: "road_sample_step",
            value: pop.road_sample_step,
        });
    }
    for (name, min, max) in [
        ("buildings", pop.buildings_min, pop.buildings_max),
        ("npcs", pop.npcs_min, pop.npcs_max),
    ] {
        if min > max {
            errors.push(ValidationError::InvertedRange { name, min, max });
        }
    }
    if pop.building_width.0 <= 0.0 {
        errors.push(ValidationError::NonPositive {
            name: "building_width",
            value: pop.building_width.0,
        });
    }

    let traffic = &config.traffic;
    if !(0.0..=1.0).contains(&traffic.turn_chance) {
        errors.push(ValidationError::OutOfUnitRange {
            name: "turn_chance",
            value: traffic.turn_chance,
        });
    }
    if traffic.lane_offset >= roads.main_half_width {
        errors.push(ValidationError::RoadTooWide {
            name: "lane",
            half_width: traffic.lane_offset,
            spacing: roads.main_half_width,
        });
    }

    if config.player.move_speed <= 0.0 {
        errors.push(ValidationError::NonPositive {
            name: "player.move_speed",
            value: config.player.move_speed,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&WorldConfig::default()).is_ok());
    }

    #[test]
    fn test_defaults_match_constants() {
        let config = WorldConfig::default();
        assert_eq!(config.chunk_size, CHUNK_SIZE);
        assert_eq!(config.roads.main_spacing, MAIN_SPACING);
        assert_eq!(config.roads.street_spacing, STREET_SPACING);
        assert_eq!(config.population.placement_attempts, PLACEMENT_ATTEMPTS);
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let text = include_str!("../../../data/town.ron");
        let config = WorldConfig::from_ron_str(text).expect("data/town.ron should parse");
        assert_eq!(config, WorldConfig::default());
    }

    #[test]
    fn test_partial_ron_fills_defaults() {
        let config = WorldConfig::from_ron_str(
            "(view_radius: 3, world_seed: 7, roads: (main_spacing: 80.0))",
        )
        .expect("partial config should parse");
        assert_eq!(config.view_radius, 3);
        assert_eq!(config.world_seed, 7);
        assert_eq!(config.roads.main_spacing, 80.0);
        assert_eq!(config.roads.street_spacing, STREET_SPACING);
        assert_eq!(config.traffic, TrafficConfig::default());
    }

    #[test]
    fn test_ron_round_trip() {
        let mut config = WorldConfig::default();
        config.world_seed = 99;
        config.traffic.turn_chance = 0.5;
        let text = config.to_ron_string().expect("serialize");
        let back = WorldConfig::from_ron_str(&text).expect("parse back");
        assert_eq!(config, back);
    }

    #[test]
    fn test_malformed_ron_is_parse_error() {
        let err = WorldConfig::from_ron_str("(chunk_size: )").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_validation_collects_all_violations() {
        let mut config = WorldConfig::default();
        config.chunk_size = 0.0;
        config.roads.street_half_width = 10.0;
        config.population.buildings_min = 9;
        config.roads.warp_k1 = 1.0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::NonPositiveChunkSize(0.0)));
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::RoadTooWide { name: "street", .. }
        )));
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::InvertedRange {
                name: "buildings",
                ..
            }
        )));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::WarpNotContracting(_))));
    }

    #[test]
    fn test_invalid_ron_is_rejected() {
        let err = WorldConfig::from_ron_str("(roads: (main_half_width: 40.0))").unwrap_err();
        match err {
            ConfigError::Invalid(errors) => assert_eq!(errors.len(), 1),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }
}
