use egui::{vec2, Align2, DragValue, FontId, Response, Sense, Slider, Ui};
use serde::{Deserialize, Serialize};

/// Decimals used when synthesizing min/max mark labels
const MARK_LABEL_DECIMALS: usize = 6;
const MARK_LABEL_SIZE: f32 = 9.6;
const ENTRY_WIDTH: f32 = 64.0;

/// Labeled position on the slider track
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SliderMark {
    pub value: f64,
    #[serde(default)]
    pub label: Option<String>,
}

impl SliderMark {
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: Some(label.into()),
        }
    }
}

/// Properties of a bounded numeric input, as sent by the server
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SliderProps {
    pub label: String,
    #[serde(default)]
    pub hint: Option<String>,
    pub visible: bool,
    pub disabled: bool,
    pub min: f64,
    pub max: f64,
    /// Decimal places shown by both views
    pub precision: u32,
    #[serde(default)]
    pub step: Option<f64>,
    #[serde(default)]
    pub hide_controls: Option<bool>,
    /// `None` synthesizes marks at `min` and `max`
    #[serde(rename = "_marks", default)]
    pub marks: Option<Vec<SliderMark>>,
}

impl SliderProps {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            label: label.into(),
            hint: None,
            visible: true,
            disabled: false,
            min,
            max,
            precision: 2,
            step: None,
            hide_controls: None,
            marks: None,
        }
    }

    /// Increment/decrement buttons are hidden unless explicitly requested
    pub fn hide_controls(&self) -> bool {
        self.hide_controls.unwrap_or(true)
    }

    /// Step size, falling back to 1 like a plain numeric input
    pub fn step_or_default(&self) -> f64 {
        self.step.filter(|step| *step > 0.0).unwrap_or(1.0)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min.min(self.max), self.max.max(self.min))
    }

    /// Marks to draw: caller marks verbatim, or labeled `min` and `max`
    pub fn resolved_marks(&self) -> Vec<SliderMark> {
        match &self.marks {
            Some(marks) => marks.clone(),
            None => vec![
                SliderMark::new(self.min, format_mark_label(self.min)),
                SliderMark::new(self.max, format_mark_label(self.max)),
            ],
        }
    }
}

/// Write path into the shared GUI value store
pub trait SetValue {
    fn set_value(&mut self, id: &str, value: f64);
}

impl<F: FnMut(&str, f64)> SetValue for F {
    fn set_value(&mut self, id: &str, value: f64) {
        self(id, value)
    }
}

/// Format with six decimals, then drop trailing zeros and a dangling point
pub fn format_mark_label(value: f64) -> String {
    let fixed = format!("{:.*}", MARK_LABEL_DECIMALS, value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        _ => trimmed.to_string(),
    }
}

/// Parse numeric entry text. Empty and non-numeric input yields nothing.
pub fn parse_entry(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Slider and numeric entry bound to one value held elsewhere.
///
/// Holds no state of its own: every edit goes through [`SetValue`].
#[derive(Debug, Clone, Copy)]
pub struct SliderComponent<'a> {
    pub id: &'a str,
    pub value: f64,
    pub props: &'a SliderProps,
}

impl<'a> SliderComponent<'a> {
    pub fn new(id: &'a str, value: f64, props: &'a SliderProps) -> Self {
        Self { id, value, props }
    }

    /// Request a new value, clamped to the range. Unchanged values are not sent.
    /// Returns the clamped value.
    pub fn update(&self, value: f64, store: &mut dyn SetValue) -> f64 {
        let value = self.props.clamp(value);
        if value != self.value {
            store.set_value(self.id, value);
        }
        value
    }

    /// Apply text typed into the numeric entry. Returns false if it was ignored.
    pub fn submit_entry(&self, text: &str, store: &mut dyn SetValue) -> bool {
        match parse_entry(text) {
            Some(value) => {
                self.update(value, store);
                true
            }
            None => false,
        }
    }

    /// Draw both views. Returns `None` without drawing when not visible.
    pub fn show(&self, ui: &mut Ui, store: &mut dyn SetValue) -> Option<Response> {
        let props = self.props;
        if !props.visible {
            return None;
        }

        let decimals = props.precision as usize;
        let step = props.step_or_default();
        let marks = props.resolved_marks();

        let response = ui
            .horizontal(|ui| {
                let label = ui.label(&props.label);
                if let Some(hint) = &props.hint {
                    label.on_hover_text(hint);
                }

                ui.add_enabled_ui(!props.disabled, |ui| {
                    ui.vertical(|ui| {
                        let mut slider = Slider::from_get_set(props.min..=props.max, |new| {
                            match new {
                                Some(new) => self.update(new, &mut *store),
                                None => self.value,
                            }
                        })
                        .show_value(false)
                        .fixed_decimals(decimals);
                        if let Some(step) = props.step {
                            slider = slider.step_by(step);
                        }
                        ui.add(slider);
                        self.paint_marks(ui, &marks);
                    });

                    if !props.hide_controls() && ui.small_button("-").clicked() {
                        self.update(self.value - step, &mut *store);
                    }
                    ui.add_sized(
                        vec2(ENTRY_WIDTH, ui.spacing().interact_size.y),
                        DragValue::from_get_set(|new| {
                            match new {
                                Some(new) => self.update(new, &mut *store),
                                None => self.value,
                            }
                        })
                        .range(props.min..=props.max)
                        .speed(step)
                        .fixed_decimals(decimals)
                        .custom_parser(parse_entry),
                    );
                    if !props.hide_controls() && ui.small_button("+").clicked() {
                        self.update(self.value + step, &mut *store);
                    }
                });
            })
            .response;

        Some(response)
    }

    fn paint_marks(&self, ui: &mut Ui, marks: &[SliderMark]) {
        let width = ui.spacing().slider_width;
        let (rect, _) = ui.allocate_exact_size(vec2(width, MARK_LABEL_SIZE + 2.0), Sense::hover());
        let span = self.props.max - self.props.min;
        let color = ui.visuals().weak_text_color();

        for mark in marks {
            let Some(label) = &mark.label else {
                continue;
            };
            let t = if span == 0.0 {
                0.0
            } else {
                ((mark.value - self.props.min) / span).clamp(0.0, 1.0) as f32
            };
            ui.painter().text(
                rect.left_top() + vec2(rect.width() * t, 0.0),
                Align2::CENTER_TOP,
                label,
                FontId::proportional(MARK_LABEL_SIZE),
                color,
            );
        }
    }
}
