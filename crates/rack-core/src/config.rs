//! rackplan.toml parser.
//!
//! The plan file is the boundary where caller input is validated before the
//! optimization core sees it: weights must sum to 1.0, device ids must be
//! unique, and locked/current-layout entries must reference known devices.
//! Connection endpoints are deliberately not checked — a connection whose
//! endpoint is outside the device set is simply not "in-rack".

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};
use crate::types::{
    Connection, DeviceAttributes, ObjectiveWeights, PlacementPosition, Rack,
};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// A complete optimization request, as loaded from a plan file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RackPlan {
    pub rack: Rack,
    #[serde(default)]
    pub devices: Vec<DeviceAttributes>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default)]
    pub weights: ObjectiveWeights,
    /// Device ids whose presence in any solution is mandatory.
    #[serde(default)]
    pub locked: Vec<String>,
    /// Optional existing layout, used as the optimization baseline and as
    /// the input to standalone thermal analysis.
    #[serde(default)]
    pub current_layout: Vec<PlacementPosition>,
}

impl RackPlan {
    pub fn from_file(path: &Path) -> PlanResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| PlanError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> PlanResult<Self> {
        let plan: RackPlan = toml::from_str(content)?;
        plan.validate()?;
        Ok(plan)
    }

    /// Boundary validation. The core assumes all of this holds.
    pub fn validate(&self) -> PlanResult<()> {
        if self.rack.total_height_u == 0 {
            return Err(PlanError::InvalidRackHeight);
        }

        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(PlanError::InvalidWeights { sum });
        }

        let mut seen = HashSet::new();
        for device in &self.devices {
            if !seen.insert(device.device_id.as_str()) {
                return Err(PlanError::DuplicateDevice(device.device_id.clone()));
            }
        }

        for id in &self.locked {
            if !seen.contains(id.as_str()) {
                return Err(PlanError::UnknownDevice {
                    context: "locked list",
                    device_id: id.clone(),
                });
            }
        }

        for pos in &self.current_layout {
            if !seen.contains(pos.device_id.as_str()) {
                return Err(PlanError::UnknownDevice {
                    context: "current layout",
                    device_id: pos.device_id.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
