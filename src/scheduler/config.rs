//! Planner configuration.
//!
//! Request-level knobs of the semester assigner. Loadable from TOML or JSON;
//! every field has a default, so an empty document is a valid configuration.
//!
//! Slot references (pins, reserved slot) are kept as raw strings and
//! resolved at assignment time: a bad slot key drops that one setting with
//! a diagnostic instead of failing the whole request.
//!
//! ```toml
//! max_credits_per_slot = 24
//! reserved_slot = "y3s2"
//! exempted_codes = ["CS1010"]
//!
//! [fixed_pins]
//! CS1101S = "y1s1"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{PlanError, PlanResult};

/// Exemptions merged into every request unless disabled.
pub const DEFAULT_EXEMPTIONS: [&str; 3] = ["MA1301", "ES1103", "ES1000"];

/// Configuration of a planning request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Credit cap per regular slot.
    #[serde(default = "default_max_credits")]
    pub max_credits_per_slot: u32,
    /// Maximum number of hard courses per slot.
    #[serde(default = "default_max_hard")]
    pub max_hard_per_slot: u32,
    /// Maximum number of flexible-timing courses per slot before the final year.
    #[serde(default = "default_max_flexible")]
    pub max_flexible_per_slot: u32,
    /// Courses treated as already completed.
    #[serde(default)]
    pub exempted_codes: Vec<String>,
    /// Whether [`DEFAULT_EXEMPTIONS`] are merged into `exempted_codes`.
    #[serde(default = "default_true")]
    pub include_default_exemptions: bool,
    /// Course code → slot key (`"y1s1"`) pins.
    #[serde(default)]
    pub fixed_pins: BTreeMap<String, String>,
    /// Slot key occupied by an exchange term.
    #[serde(default)]
    pub reserved_slot: Option<String>,
}

fn default_max_credits() -> u32 {
    20
}

fn default_max_hard() -> u32 {
    4
}

fn default_max_flexible() -> u32 {
    2
}

fn default_true() -> bool {
    true
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_credits_per_slot: default_max_credits(),
            max_hard_per_slot: default_max_hard(),
            max_flexible_per_slot: default_max_flexible(),
            exempted_codes: Vec::new(),
            include_default_exemptions: true,
            fixed_pins: BTreeMap::new(),
            reserved_slot: None,
        }
    }
}

impl PlannerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-slot credit cap.
    pub fn with_max_credits(mut self, max: u32) -> Self {
        self.max_credits_per_slot = max;
        self
    }

    /// Sets the per-slot hard-course cap.
    pub fn with_max_hard(mut self, max: u32) -> Self {
        self.max_hard_per_slot = max;
        self
    }

    /// Sets the per-slot flexible-course throttle.
    pub fn with_max_flexible(mut self, max: u32) -> Self {
        self.max_flexible_per_slot = max;
        self
    }

    /// Adds an exempted course.
    pub fn with_exemption(mut self, code: impl Into<String>) -> Self {
        self.exempted_codes.push(code.into());
        self
    }

    /// Disables the built-in default exemptions.
    pub fn without_default_exemptions(mut self) -> Self {
        self.include_default_exemptions = false;
        self
    }

    /// Pins a course to a slot key.
    pub fn with_pin(mut self, code: impl Into<String>, slot: impl Into<String>) -> Self {
        self.fixed_pins.insert(code.into(), slot.into());
        self
    }

    /// Reserves a slot (e.g., an exchange term).
    pub fn with_reserved_slot(mut self, slot: impl Into<String>) -> Self {
        self.reserved_slot = Some(slot.into());
        self
    }

    /// Exempted codes with the defaults merged in, without duplicates.
    ///
    /// Caller-supplied codes keep their order; defaults are appended.
    pub fn resolved_exemptions(&self) -> Vec<String> {
        let mut codes: Vec<String> = Vec::new();
        let defaults = self
            .include_default_exemptions
            .then_some(DEFAULT_EXEMPTIONS.iter().map(|c| c.to_string()))
            .into_iter()
            .flatten();
        for code in self.exempted_codes.iter().cloned().chain(defaults) {
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
        codes
    }

    /// Parses a TOML document.
    pub fn from_toml_str(toml_str: &str) -> PlanResult<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Parses a JSON document.
    pub fn from_json_str(json: &str) -> PlanResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration file; `.json` files are parsed as JSON, anything else as TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> PlanResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PlanError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }
}
