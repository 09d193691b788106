use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use super::controller::{Button, ControlGesture};

/// Pixels of trackpad scroll treated as one wheel line
const PIXELS_PER_LINE: f32 = 40.0;

/// Viewport change decoded from a window event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    Resized { width: u32, height: u32 },
    Gesture(ControlGesture),
}

/// Adapter that turns Winit window events into viewport resizes and camera gestures
#[derive(Debug, Clone, Default)]
pub struct WinitViewportInput {
    /// Pressed pointer buttons in press order
    pressed: Vec<Button>,
    /// Last cursor position (relative to window)
    cursor: Option<(f32, f32)>,
}

impl WinitViewportInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a Winit WindowEvent
    pub fn process_event(&mut self, event: &WindowEvent) -> Option<ViewportEvent> {
        match event {
            WindowEvent::Resized(size) => Some(self.resized(size.width, size.height)),
            WindowEvent::MouseInput { state, button, .. } => {
                let button = Self::mouse_button_to_button(*button)?;
                self.button_changed(button, *state == ElementState::Pressed);
                None
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(position.x as f32, position.y as f32)
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                None
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32 / PIXELS_PER_LINE,
                };
                self.scrolled(lines)
            }
            _ => None,
        }
    }

    pub fn resized(&mut self, width: u32, height: u32) -> ViewportEvent {
        ViewportEvent::Resized { width, height }
    }

    pub fn button_changed(&mut self, button: Button, pressed: bool) {
        if pressed {
            if !self.pressed.contains(&button) {
                self.pressed.push(button);
            }
        } else {
            self.pressed.retain(|&b| b != button);
        }
    }

    /// Track the cursor; yields a drag gesture while a button is held.
    /// The earliest held button decides the gesture.
    pub fn cursor_moved(&mut self, x: f32, y: f32) -> Option<ViewportEvent> {
        let previous = self.cursor.replace((x, y))?;
        let button = *self.pressed.first()?;
        let (dx, dy) = (x - previous.0, y - previous.1);
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        Some(ViewportEvent::Gesture(ControlGesture::drag(button, dx, dy)))
    }

    pub fn scrolled(&mut self, lines: f32) -> Option<ViewportEvent> {
        (lines != 0.0).then_some(ViewportEvent::Gesture(ControlGesture::Dolly { delta: lines }))
    }

    pub fn cursor(&self) -> Option<(f32, f32)> {
        self.cursor
    }

    pub fn is_down(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }

    /// Held buttons, in press order
    pub fn pressed_buttons(&self) -> &[Button] {
        &self.pressed
    }

    fn mouse_button_to_button(button: MouseButton) -> Option<Button> {
        match button {
            MouseButton::Left => Some(Button::Primary),
            MouseButton::Right => Some(Button::Secondary),
            MouseButton::Middle => Some(Button::Middle),
            _ => None,
        }
    }
}
