use glam::Vec3;
use log::warn;
use thiserror::Error;

pub const INITIAL_POSITION_PARAM: &str = "initialCameraPosition";
pub const INITIAL_LOOK_AT_PARAM: &str = "initialCameraLookAt";
pub const LOG_CAMERA_PARAM: &str = "logCamera";

pub const DEFAULT_INITIAL_POSITION: Vec3 = Vec3::new(3.0, 3.0, 3.0);
pub const DEFAULT_INITIAL_LOOK_AT: Vec3 = Vec3::ZERO;

#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("expected 3 comma-separated components, got {0}")]
    WrongArity(usize),
    #[error("component {index} is not a number: {value:?}")]
    InvalidNumber { index: usize, value: String },
    #[error("component {index} is not finite")]
    NonFinite { index: usize },
}

/// Viewer options read once from the page query string
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerQuery {
    /// World-frame camera position
    pub initial_camera_position: Vec3,
    /// World-frame look-at point
    pub initial_camera_look_at: Vec3,
    pub log_camera: bool,
}

impl Default for ViewerQuery {
    fn default() -> Self {
        Self {
            initial_camera_position: DEFAULT_INITIAL_POSITION,
            initial_camera_look_at: DEFAULT_INITIAL_LOOK_AT,
            log_camera: false,
        }
    }
}

impl ViewerQuery {
    /// Parse a query string such as `?initialCameraPosition=1,2,3&logCamera`.
    ///
    /// Malformed coordinates are logged and replaced by their defaults.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut parsed = Self::default();

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                INITIAL_POSITION_PARAM => match parse_vec3(&value) {
                    Ok(position) => parsed.initial_camera_position = position,
                    Err(err) => warn!("Ignoring {INITIAL_POSITION_PARAM}={value:?}: {err}"),
                },
                INITIAL_LOOK_AT_PARAM => match parse_vec3(&value) {
                    Ok(look_at) => parsed.initial_camera_look_at = look_at,
                    Err(err) => warn!("Ignoring {INITIAL_LOOK_AT_PARAM}={value:?}: {err}"),
                },
                LOG_CAMERA_PARAM => parsed.log_camera = true,
                _ => {}
            }
        }

        parsed
    }
}

/// Parse `"x,y,z"` into a vector
pub fn parse_vec3(text: &str) -> Result<Vec3, QueryError> {
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != 3 {
        return Err(QueryError::WrongArity(parts.len()));
    }

    let mut components = [0.0f32; 3];
    for (index, part) in parts.iter().enumerate() {
        let value: f32 = part
            .trim()
            .parse()
            .map_err(|_| QueryError::InvalidNumber {
                index,
                value: part.to_string(),
            })?;
        if !value.is_finite() {
            return Err(QueryError::NonFinite { index });
        }
        components[index] = value;
    }

    Ok(Vec3::from_array(components))
}
