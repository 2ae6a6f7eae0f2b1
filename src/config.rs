//! TOML-based federate configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Top-level federate configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from TOML
/// with [`FederateConfig::from_toml_file`] or use
/// [`FederateConfig::baseline`] for the built-in default.
///
/// # Examples
///
/// ```
/// use windfarm_federate::config::FederateConfig;
///
/// let config = FederateConfig::baseline();
/// assert_eq!(config.federation.horizon_s, 10.0);
/// assert!(config.validate().is_empty());
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FederateConfig {
    /// Federation identity and timing parameters.
    #[serde(default)]
    pub federation: FederationConfig,
    /// Wind-farm initial conditions.
    #[serde(default)]
    pub farm: FarmConfig,
    /// Control-center standin wind profile.
    #[serde(default)]
    pub control_center: ControlCenterConfig,
}

/// Federation identity and timing parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FederationConfig {
    /// Name this federate registers under.
    pub federate_name: String,
    /// Federation core type identifier (e.g. `"zmq"`).
    pub core_type: String,
    /// Core init string (e.g. `"--federates=1"`).
    pub core_init: String,
    /// Minimum time granted per step, in seconds (must be > 0).
    pub time_delta_s: f64,
    /// Simulation horizon in seconds (must be > 0); the step loop ends once
    /// the granted time reaches it.
    pub horizon_s: f64,
}

impl Default for FederationConfig {
    fn default() -> Self {
        Self {
            federate_name: "windfarm_standin".to_string(),
            core_type: "zmq".to_string(),
            core_init: "--federates=1".to_string(),
            time_delta_s: 1.0,
            horizon_s: 10.0,
        }
    }
}

/// Wind-farm initial conditions, used until the first control record is
/// decoded.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FarmConfig {
    /// Wind speed assumed at the bootstrap step (m/s).
    pub initial_wind_speed_m_s: f64,
    /// Wind direction assumed at the bootstrap step (degrees).
    pub initial_wind_direction_deg: f64,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            initial_wind_speed_m_s: 6.0,
            initial_wind_direction_deg: 290.0,
        }
    }
}

/// Wind profile the in-process control-center standin feeds back.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlCenterConfig {
    /// Wind speed at step 0 (m/s).
    pub wind_speed_m_s: f64,
    /// Wind direction at step 0 (degrees).
    pub wind_direction_deg: f64,
    /// Speed change per step (m/s); 0 holds the speed constant.
    pub speed_ramp_m_s_per_step: f64,
    /// Direction change per step (degrees); 0 holds the direction constant.
    pub direction_ramp_deg_per_step: f64,
}

impl Default for ControlCenterConfig {
    fn default() -> Self {
        Self {
            wind_speed_m_s: 8.0,
            wind_direction_deg: 240.0,
            speed_ramp_m_s_per_step: 0.0,
            direction_ramp_deg_per_step: 0.0,
        }
    }
}

/// A single configuration validation failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    /// Dotted field path (e.g. `"federation.horizon_s"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl FederateConfig {
    /// Names of the built-in presets.
    pub const PRESETS: [&'static str; 2] = ["baseline", "gusty"];

    /// Returns the baseline scenario: constant 8 m/s at 240 degrees from the
    /// control center, 10 s horizon.
    pub fn baseline() -> Self {
        Self {
            federation: FederationConfig::default(),
            farm: FarmConfig::default(),
            control_center: ControlCenterConfig::default(),
        }
    }

    /// Returns the gusty preset: the control-center wind ramps up and veers
    /// over a longer run.
    pub fn gusty() -> Self {
        Self {
            federation: FederationConfig {
                horizon_s: 60.0,
                ..FederationConfig::default()
            },
            farm: FarmConfig::default(),
            control_center: ControlCenterConfig {
                wind_speed_m_s: 5.0,
                wind_direction_deg: 250.0,
                speed_ramp_m_s_per_step: 0.25,
                direction_ramp_deg_per_step: -0.5,
            },
        }
    }

    /// Looks up a built-in preset by name.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "gusty" => Ok(Self::gusty()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is
    /// invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown
    /// fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let fed = &self.federation;
        if fed.federate_name.is_empty() {
            errors.push(ConfigError {
                field: "federation.federate_name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if fed.core_type.is_empty() {
            errors.push(ConfigError {
                field: "federation.core_type".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if !(fed.time_delta_s > 0.0) {
            errors.push(ConfigError {
                field: "federation.time_delta_s".to_string(),
                message: "must be > 0".to_string(),
            });
        }
        if !(fed.horizon_s > 0.0) {
            errors.push(ConfigError {
                field: "federation.horizon_s".to_string(),
                message: "must be > 0".to_string(),
            });
        }

        let farm = &self.farm;
        if !farm.initial_wind_speed_m_s.is_finite() {
            errors.push(ConfigError {
                field: "farm.initial_wind_speed_m_s".to_string(),
                message: "must be finite".to_string(),
            });
        }
        if !farm.initial_wind_direction_deg.is_finite() {
            errors.push(ConfigError {
                field: "farm.initial_wind_direction_deg".to_string(),
                message: "must be finite".to_string(),
            });
        }

        let cc = &self.control_center;
        for (field, value) in [
            ("control_center.wind_speed_m_s", cc.wind_speed_m_s),
            ("control_center.wind_direction_deg", cc.wind_direction_deg),
            (
                "control_center.speed_ramp_m_s_per_step",
                cc.speed_ramp_m_s_per_step,
            ),
            (
                "control_center.direction_ramp_deg_per_step",
                cc.direction_ramp_deg_per_step,
            ),
        ] {
            if !value.is_finite() {
                errors.push(ConfigError {
                    field: field.to_string(),
                    message: "must be finite".to_string(),
                });
            }
        }

        errors
    }
}
