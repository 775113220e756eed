//! Expressions: named parameter sets applied on top of the animation.
//!
//! Documents follow the `.exp3.json` shape rigs ship with:
//! `{"Parameters": [{"Id": "ParamMouthForm", "Value": 1.0}]}`. Unknown
//! ids are skipped per parameter, so one expression file can serve
//! several rigs.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{KuchipakuError, Result};
use crate::model::Model;

/// A named set of parameter values
#[derive(Debug, Clone, Deserialize)]
pub struct Expression {
    #[serde(rename = "Name", default)]
    pub name: Option<String>,

    #[serde(rename = "Parameters", default)]
    pub parameters: Vec<ExpressionParameter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpressionParameter {
    #[serde(rename = "Id")]
    pub id: String,

    #[serde(rename = "Value")]
    pub value: f32,
}

impl Expression {
    /// Parse an expression document from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| KuchipakuError::Expression {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })
    }

    /// Load an expression document from disk
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| KuchipakuError::Expression {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| KuchipakuError::Expression {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Apply every parameter the rig defines; returns how many applied
    pub fn apply(&self, model: &mut dyn Model) -> usize {
        let mut applied = 0;
        for param in &self.parameters {
            if model.has_parameter(&param.id) {
                model.set_parameter(&param.id, param.value);
                applied += 1;
            } else {
                log::debug!(
                    "expression {:?}: rig lacks parameter {}",
                    self.name.as_deref().unwrap_or("unnamed"),
                    param.id
                );
            }
        }
        applied
    }
}
