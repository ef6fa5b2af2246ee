// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! World configuration and its JSON encoding.
//!
//! `f32` is only the at-rest format. Values enter the simulation through
//! [`Fx::from_f32`], which rounds the same way on every platform.

use kowtow_geom::{Aabb, Octree};
use kowtow_math::{Fx, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Deepest subdivision accepted for the spatial index.
pub const MAX_INDEX_DEPTH: u8 = 16;

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Value out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Bounds and depth of the octree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Center of the root region.
    pub center: [f32; 3],
    /// Half edge length of the cubic root region.
    pub half_size: f32,
    /// Levels of subdivision below the root.
    pub max_depth: u8,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            center: [0.0; 3],
            half_size: 1024.0,
            max_depth: 8,
        }
    }
}

impl IndexConfig {
    /// Root region in simulation units.
    pub fn region(&self) -> Aabb {
        let edge = Fx::from_f32(self.half_size) * Fx::TWO;
        Aabb::new(Vec3::from_f32(self.center), Vec3::new(edge, edge, edge))
    }

    /// Empty index built from this configuration.
    pub fn build(&self) -> Octree {
        Octree::new(self.region(), self.max_depth)
    }
}

/// Settings a [`crate::World`] is created from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Gravity acceleration.
    pub gravity: [f32; 3],
    /// Threads used by the parallel phases.
    pub workers: usize,
    /// Spatial index layout.
    pub index: IndexConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0; 3],
            workers: 1,
            index: IndexConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Parses and validates a JSON document; missing fields take defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty JSON encoding.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::Invalid("workers must be at least 1".into()));
        }
        let half = self.index.half_size;
        if !half.is_finite() || half <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "index.half_size must be positive and finite, got {half}"
            )));
        }
        if self.index.max_depth > MAX_INDEX_DEPTH {
            return Err(ConfigError::Invalid(format!(
                "index.max_depth must be at most {MAX_INDEX_DEPTH}, got {}",
                self.index.max_depth
            )));
        }
        Ok(())
    }

    /// Gravity in simulation units.
    pub fn gravity(&self) -> Vec3 {
        Vec3::from_f32(self.gravity)
    }
}
