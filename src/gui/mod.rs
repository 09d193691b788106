pub mod slider;
pub mod state;

pub use slider::{format_mark_label, parse_entry, SetValue, SliderComponent, SliderMark, SliderProps};
pub use state::GuiState;
