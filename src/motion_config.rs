// src/motion_config.rs
use crate::error::SiteError;
use crate::reveal::RevealTuning;
use serde::{Deserialize, Serialize};

const EMBEDDED_CONFIG: &str = include_str!("../assets/motion.json");

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub intro: IntroTiming,
    pub reveal: RevealTuning,
}

/// How long each page keeps scrolling locked behind its intro animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroTiming {
    pub home_ms: u32,
    pub listing_ms: u32,
}

impl Default for IntroTiming {
    fn default() -> Self {
        Self {
            home_ms: 4000,
            listing_ms: 3000,
        }
    }
}

impl MotionConfig {
    pub fn from_json(json: &str) -> Result<Self, SiteError> {
        serde_json::from_str(json).map_err(SiteError::Config)
    }

    /// Embedded tuning, or the built-in defaults if it does not parse.
    pub fn load_or_default() -> Self {
        match Self::from_json(EMBEDDED_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}; using default motion tuning", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config() {
        let config = MotionConfig::from_json(EMBEDDED_CONFIG).unwrap();
        assert_eq!(config.intro.home_ms, 4000);
        assert_eq!(config.intro.listing_ms, 3000);
        assert_eq!(config.reveal.initial_delay_ms, 200);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = MotionConfig::from_json(r#"{ "reveal": { "tail_units": 3 } }"#).unwrap();
        assert_eq!(config.reveal.tail_units, 3);
        assert_eq!(config.reveal.desktop, RevealTuning::default().desktop);
        assert_eq!(config.intro, IntroTiming::default());
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(matches!(
            MotionConfig::from_json("{ \"intro\": \"soon\" }"),
            Err(SiteError::Config(_))
        ));
    }
}
