//! Guide-data persistence.
//!
//! A guide-data document captures posed placeholder transforms so a rig can
//! be rebuilt from scratch with the operator's placements intact. The layout
//! is a two-level mapping: module full name to guide name to transform.
//! `BTreeMap` keeps key order stable so saved documents diff cleanly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{RigError, RigResult};
use crate::scene::Vec3;

/// A single persisted guide transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuideTransform {
    /// World position.
    pub position: Vec3,
    /// World rotation, Euler degrees.
    pub rotation: Vec3,
}

/// A persisted guide-data document.
///
/// Reading tolerates missing module entries (the affected module falls back
/// to authored defaults) but not malformed numeric fields, which fail the
/// whole load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuideData(pub BTreeMap<String, BTreeMap<String, GuideTransform>>);

impl GuideData {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the guide entries for a module, if the document has any.
    pub fn module(&self, full_name: &str) -> Option<&BTreeMap<String, GuideTransform>> {
        self.0.get(full_name)
    }

    /// Returns one guide's persisted transform.
    pub fn guide(&self, full_name: &str, guide: &str) -> Option<&GuideTransform> {
        self.0.get(full_name).and_then(|m| m.get(guide))
    }

    /// Records a guide transform.
    pub fn set(
        &mut self,
        full_name: impl Into<String>,
        guide: impl Into<String>,
        position: Vec3,
        rotation: Vec3,
    ) {
        self.0
            .entry(full_name.into())
            .or_default()
            .insert(guide.into(), GuideTransform { position, rotation });
    }

    /// Parses a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the document to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Loads a document from a file. A missing file is a configuration
    /// error; the caller asked for saved data that does not exist.
    pub fn load(path: &Path) -> RigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| RigError::GuideDataIo {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_json(&content)?)
    }

    /// Writes the document to a file.
    pub fn save(&self, path: &Path) -> RigResult<()> {
        let json = self.to_json_pretty()?;
        std::fs::write(path, json + "\n").map_err(|source| RigError::GuideDataIo {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut data = GuideData::new();
        data.set("L_Arm", "Shoulder", [1.0, 2.0, 3.0], [0.0, 0.0, 0.0]);

        let entry = data.guide("L_Arm", "Shoulder").unwrap();
        assert_eq!(entry.position, [1.0, 2.0, 3.0]);
        assert!(data.module("R_Arm").is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let mut data = GuideData::new();
        data.set("M_Root", "Root", [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]);
        data.set("L_Arm", "Elbow", [3.0, 10.0, -1.0], [0.0, 45.0, 0.0]);

        let json = data.to_json_pretty().unwrap();
        let parsed = GuideData::from_json(&json).unwrap();
        assert_eq!(parsed, data);
    }

    #[test]
    fn test_stable_key_order() {
        let mut data = GuideData::new();
        data.set("M_Spine", "Chest", [0.0; 3], [0.0; 3]);
        data.set("L_Arm", "Shoulder", [0.0; 3], [0.0; 3]);

        let json = data.to_json_pretty().unwrap();
        let l_arm = json.find("L_Arm").unwrap();
        let m_spine = json.find("M_Spine").unwrap();
        assert!(l_arm < m_spine);
    }

    #[test]
    fn test_malformed_numbers_fail_load() {
        let json = r#"{"L_Arm": {"Shoulder": {"position": [1, "oops", 3], "rotation": [0, 0, 0]}}}"#;
        assert!(GuideData::from_json(json).is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guides.json");

        let mut data = GuideData::new();
        data.set("M_Root", "Root", [0.0, 5.0, 0.0], [0.0, 0.0, 0.0]);
        data.save(&path).unwrap();

        let loaded = GuideData::load(&path).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            GuideData::load(&missing),
            Err(RigError::GuideDataIo { .. })
        ));
    }
}
