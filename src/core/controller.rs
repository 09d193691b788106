/// Pointer button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Primary,
    Secondary,
    Middle,
}

/// Camera gesture decoded from pointer input, in physical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlGesture {
    /// Rotate around the target
    Orbit { dx: f32, dy: f32 },
    /// Pan camera and target together
    Truck { dx: f32, dy: f32 },
    /// Move toward (positive) or away from the target, in wheel lines
    Dolly { delta: f32 },
}

impl ControlGesture {
    /// Gesture a pointer drag produces while `button` is held
    pub fn drag(button: Button, dx: f32, dy: f32) -> Self {
        match button {
            Button::Primary => ControlGesture::Orbit { dx, dy },
            Button::Secondary | Button::Middle => ControlGesture::Truck { dx, dy },
        }
    }
}
