use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::QuizError;

/// RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// `None` selects the platform system font.
    pub family: Option<String>,
    pub size: f64,
}

impl Font {
    pub fn system(size: f64) -> Self {
        Self { family: None, size }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
    Justified,
    Natural,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub width: f64,
    pub height: f64,
}

/// Visual and interactive properties of a quiz.
///
/// The state machine never reads these; they are carried for whatever
/// renderer the host binds to the quiz. Every field is optional when
/// deserialized and falls back to [`QuizConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub background: Color,
    pub font: Font,
    pub text_alignment: TextAlignment,
    pub label_text_color: Color,
    pub options_text_color: Color,
    pub options_border_color: Color,
    pub options_border_width: f64,
    /// Gap between two option buttons.
    pub options_spacing: f64,
    pub options_background_color: Color,
    pub options_corner_radius: f64,
    /// Gap between the major elements (progress bar, label, options).
    pub spacing: f64,
    #[serde(with = "duration_secs")]
    pub animation_duration: Duration,
    pub quiz_corner_radius: f64,
    pub quiz_shadow_color: Color,
    pub quiz_shadow_opacity: f32,
    pub quiz_shadow_radius: f64,
    pub quiz_shadow_offset: Offset,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            background: Color::BLUE,
            font: Font::system(21.0),
            text_alignment: TextAlignment::Left,
            label_text_color: Color::WHITE,
            options_text_color: Color::BLUE,
            options_border_color: Color::WHITE,
            options_border_width: 1.0,
            options_spacing: 10.0,
            options_background_color: Color::WHITE,
            options_corner_radius: 8.0,
            spacing: 20.0,
            animation_duration: Duration::from_millis(700),
            quiz_corner_radius: 10.0,
            quiz_shadow_color: Color::BLACK,
            quiz_shadow_opacity: 0.2,
            quiz_shadow_radius: 10.0,
            quiz_shadow_offset: Offset {
                width: 0.0,
                height: 2.0,
            },
        }
    }
}

impl QuizConfig {
    /// Checks that lengths are finite and non-negative and that the opacity is a fraction.
    pub fn validate(&self) -> Result<(), QuizError> {
        let lengths = [
            ("font.size", self.font.size),
            ("options_border_width", self.options_border_width),
            ("options_spacing", self.options_spacing),
            ("options_corner_radius", self.options_corner_radius),
            ("spacing", self.spacing),
            ("quiz_corner_radius", self.quiz_corner_radius),
            ("quiz_shadow_radius", self.quiz_shadow_radius),
        ];
        for (field, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(QuizError::InvalidConfig {
                    field,
                    reason: format!("expected a non-negative length, got {value}"),
                });
            }
        }

        if !(0.0..=1.0).contains(&self.quiz_shadow_opacity) {
            return Err(QuizError::InvalidConfig {
                field: "quiz_shadow_opacity",
                reason: format!("expected 0..=1, got {}", self.quiz_shadow_opacity),
            });
        }

        Ok(())
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{de, Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            de::Error::invalid_value(de::Unexpected::Float(secs), &"a non-negative number of seconds")
        })
    }
}
