use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::core::inventory::{GearInventory, InventoryError};
use crate::core::pitch::{Leadscrew, LeadscrewSpec, Pitch, TargetSpec};
use crate::core::types::{Ratio, Teeth, ThreadSystem};
use crate::utils::validation::{decimal_from_f64, DecimalError};

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Failed to read profile: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse profile: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid gear inventory: {0}")]
    Inventory(#[from] InventoryError),

    #[error("Invalid leadscrew: {0}")]
    Leadscrew(DecimalError),

    #[error("Invalid tolerance: {0}")]
    Tolerance(String),

    #[error("Invalid {system} pitch: {reason}")]
    Pitch { system: ThreadSystem, reason: String },
}

/// Profile version for compatibility checking
pub const PROFILE_VERSION: &str = "1.0.0";

/// Default relative tolerance: 0.1%
pub const DEFAULT_TOLERANCE: f64 = 0.001;

fn default_train_lengths() -> Vec<usize> {
    vec![2, 4, 6]
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

/// Serializable profile format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileData {
    pub version: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// One entry per physical gear
    pub gears: Vec<Teeth>,
    #[serde(default = "default_train_lengths")]
    pub train_lengths: Vec<usize>,
    pub leadscrew: LeadscrewSpec,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_driver: Option<Teeth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_driven: Option<Teeth>,
    /// Millimetres per thread
    #[serde(default)]
    pub metric_pitches: Vec<f64>,
    /// Threads per inch
    #[serde(default)]
    pub imperial_pitches: Vec<f64>,
}

/// A validated lathe profile: gears, leadscrew, and the pitches to solve for
#[derive(Debug, Clone)]
pub struct LatheProfile {
    pub name: String,
    pub inventory: GearInventory,
    pub train_lengths: Vec<usize>,
    pub leadscrew: Leadscrew,
    pub tolerance: Ratio,
    pub preferred_driver: Option<Teeth>,
    pub preferred_driven: Option<Teeth>,
    pub metric_pitches: Vec<Pitch>,
    pub imperial_pitches: Vec<Pitch>,

    /// The profile as it was loaded, for export
    data: ProfileData,
}

impl LatheProfile {
    /// Load the embedded default profile
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` if the embedded profile fails validation.
    pub fn load_embedded() -> Result<Self, ProfileError> {
        // Validated at compile time by build.rs
        const EMBEDDED_PROFILE: &str = include_str!("../../profiles/default_lathe.json");
        Self::from_json(EMBEDDED_PROFILE)
    }

    /// Load a profile from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` if the file cannot be read, parsed or validated.
    pub fn load_from_file(path: &Path) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a profile from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` if the JSON is malformed or any value is invalid.
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        let data: ProfileData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != PROFILE_VERSION {
            warn!(
                expected = PROFILE_VERSION,
                found = %data.version,
                "Profile version mismatch"
            );
        }

        Self::from_data(data)
    }

    /// Validate deserialized profile data
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` for an invalid inventory, leadscrew, tolerance
    /// or pitch.
    pub fn from_data(data: ProfileData) -> Result<Self, ProfileError> {
        let inventory = GearInventory::new(&data.gears)?;
        let leadscrew = data.leadscrew.to_leadscrew().map_err(ProfileError::Leadscrew)?;

        let tolerance = decimal_from_f64(data.tolerance)
            .map_err(|e| ProfileError::Tolerance(e.to_string()))?;
        if tolerance >= Ratio::from_integer(1) {
            return Err(ProfileError::Tolerance(format!(
                "{} must be below 1",
                data.tolerance
            )));
        }

        let metric_pitches = parse_pitches(&data.metric_pitches, ThreadSystem::Metric)?;
        let imperial_pitches = parse_pitches(&data.imperial_pitches, ThreadSystem::Imperial)?;

        Ok(Self {
            name: data.name.clone(),
            inventory,
            train_lengths: data.train_lengths.clone(),
            leadscrew,
            tolerance,
            preferred_driver: data.preferred_driver,
            preferred_driven: data.preferred_driven,
            metric_pitches,
            imperial_pitches,
            data,
        })
    }

    /// Every target in the profile: metric pitches first, then imperial
    pub fn targets(&self) -> Vec<TargetSpec> {
        self.metric_pitches
            .iter()
            .chain(self.imperial_pitches.iter())
            .map(|pitch| TargetSpec::new(*pitch, &self.leadscrew))
            .collect()
    }

    /// Access the profile data as loaded
    pub fn data(&self) -> &ProfileData {
        &self.data
    }

    /// Export profile to JSON
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::ParseError` if serialization fails.
    pub fn to_json(&self) -> Result<String, ProfileError> {
        let data = ProfileData {
            version: PROFILE_VERSION.to_string(),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
            ..self.data.clone()
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }
}

fn parse_pitches(values: &[f64], system: ThreadSystem) -> Result<Vec<Pitch>, ProfileError> {
    values
        .iter()
        .map(|&value| {
            let exact = decimal_from_f64(value).map_err(|e| ProfileError::Pitch {
                system,
                reason: e.to_string(),
            })?;
            if exact == Ratio::from_integer(0) {
                return Err(ProfileError::Pitch {
                    system,
                    reason: "pitch must be positive".to_string(),
                });
            }
            Ok(match system {
                ThreadSystem::Metric => Pitch::Metric(exact),
                ThreadSystem::Imperial => Pitch::Imperial(exact),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_PROFILE: &str = r#"{
        "version": "1.0.0",
        "name": "test",
        "gears": [20, 40],
        "leadscrew": { "mm": 2 },
        "metric_pitches": [1.0]
    }"#;

    #[test]
    fn test_load_embedded_profile() {
        let profile = LatheProfile::load_embedded().unwrap();
        assert_eq!(profile.inventory.len(), 13);
        assert_eq!(profile.inventory.count(38), 2);
        assert_eq!(profile.train_lengths, vec![2, 4, 6]);
        assert_eq!(profile.tolerance, Ratio::new(1, 1000));
        assert_eq!(profile.metric_pitches.len(), 25);
        assert_eq!(profile.imperial_pitches.len(), 39);
        assert_eq!(profile.targets().len(), 64);
    }

    #[test]
    fn test_defaults_applied() {
        let profile = LatheProfile::from_json(SMALL_PROFILE).unwrap();
        assert_eq!(profile.train_lengths, vec![2, 4, 6]);
        assert_eq!(profile.tolerance, Ratio::new(1, 1000));
        assert!(profile.preferred_driver.is_none());
        assert!(profile.imperial_pitches.is_empty());

        let targets = profile.targets();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].ratio, Ratio::from_integer(2));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let bad_gear = SMALL_PROFILE.replace("[20, 40]", "[20, 0]");
        assert!(matches!(
            LatheProfile::from_json(&bad_gear),
            Err(ProfileError::Inventory(InventoryError::InvalidTeeth(0)))
        ));

        let bad_pitch = SMALL_PROFILE.replace("[1.0]", "[0]");
        assert!(matches!(
            LatheProfile::from_json(&bad_pitch),
            Err(ProfileError::Pitch { .. })
        ));

        let bad_leadscrew = SMALL_PROFILE.replace("{ \"mm\": 2 }", "{ \"mm\": 0 }");
        assert!(matches!(
            LatheProfile::from_json(&bad_leadscrew),
            Err(ProfileError::Leadscrew(_))
        ));

        let bad_tolerance = SMALL_PROFILE.replace("\"name\"", "\"tolerance\": 1.5, \"name\"");
        assert!(matches!(
            LatheProfile::from_json(&bad_tolerance),
            Err(ProfileError::Tolerance(_))
        ));

        assert!(matches!(
            LatheProfile::from_json("{"),
            Err(ProfileError::ParseError(_))
        ));
    }

    #[test]
    fn test_to_json_round_trip() {
        let profile = LatheProfile::load_embedded().unwrap();
        let json = profile.to_json().unwrap();
        assert!(json.contains("\"created_at\""));

        let reloaded = LatheProfile::from_json(&json).unwrap();
        assert_eq!(reloaded.inventory, profile.inventory);
        assert_eq!(reloaded.targets(), profile.targets());
    }
}
