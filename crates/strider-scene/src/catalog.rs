//! Scene descriptors for the preset scene list

use serde::{Deserialize, Serialize};

/// One entry of the ordered scene list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    pub name: String,
    pub asset_path: String,
    /// Constant Y correction for assets whose origin sits off the floor
    #[serde(default)]
    pub ground_y_offset: f32,
}

impl SceneDescriptor {
    pub fn new(name: impl Into<String>, asset_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            asset_path: asset_path.into(),
            ground_y_offset: 0.0,
        }
    }

    pub fn with_ground_y_offset(mut self, offset: f32) -> Self {
        self.ground_y_offset = offset;
        self
    }
}
