use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::math::CameraPose;

/// Messages sent from the viewer to the remote peer, tagged by `type`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum ClientMessage {
    ViewerCameraMessage(ViewerCameraMessage),
    GuiUpdateMessage(GuiUpdateMessage),
}

/// Camera pose in the world frame, as sent over the wire
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ViewerCameraMessage {
    pub wxyz: [f32; 4],
    pub position: [f32; 3],
    pub aspect: f32,
    /// Vertical field of view in radians
    pub fov: f32,
    pub look_at: [f32; 3],
    pub up_direction: [f32; 3],
}

impl From<&CameraPose> for ViewerCameraMessage {
    fn from(pose: &CameraPose) -> Self {
        let q = pose.orientation;
        Self {
            wxyz: [q.w, q.x, q.y, q.z],
            position: pose.position.to_array(),
            aspect: pose.aspect,
            fov: pose.fov,
            look_at: pose.look_at.to_array(),
            up_direction: pose.up_direction.to_array(),
        }
    }
}

/// Property updates for a GUI component, keyed by property name
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GuiUpdateMessage {
    pub uuid: String,
    pub updates: BTreeMap<String, Value>,
}

impl GuiUpdateMessage {
    pub fn value(uuid: impl Into<String>, value: f64) -> Self {
        let mut updates = BTreeMap::new();
        updates.insert("value".to_string(), Value::from(value));
        Self {
            uuid: uuid.into(),
            updates,
        }
    }
}
