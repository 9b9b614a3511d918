use serde::{Deserialize, Serialize};

/// Which projection a render uses.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    Equirectangular,
    Orthographic,
}

/// A saved render configuration, loaded from JSON by the command line
/// tool. Optional fields fall back to the tool defaults; `center` is
/// `[lat, lon]` in degrees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewPreset {
    pub projection: ProjectionKind,
    pub width: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
}

impl Default for ViewPreset {
    fn default() -> Self {
        Self {
            projection: ProjectionKind::Orthographic,
            width: 800,
            center: None,
            map: None,
            zoom: None,
        }
    }
}
