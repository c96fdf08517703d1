//! Pixel geometry of the stock quiz card.
//!
//! Hosts that draw onto a canvas can use these metrics to place the progress
//! bar, the question label, one button per option and the reset button the way
//! the stock widget does. All lengths are in the host's points.

use crate::quiz::QuizConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub progress_bar: Rect,
    pub question_label: Rect,
    pub options: Vec<Rect>,
    /// Only the width is fixed; the reset button is centered under the score.
    pub reset_button_width: f64,
}

impl Layout {
    pub fn compute(config: &QuizConfig, size: Size, option_count: usize) -> Self {
        let spacing = config.spacing;
        let content_height = (size.height - spacing * 3.0).max(0.0);

        let progress_bar = Rect {
            x: spacing,
            y: spacing / 4.0,
            width: (size.width - spacing * 2.0).max(0.0),
            height: spacing / 2.0,
        };

        let question_label = Rect {
            x: spacing,
            y: progress_bar.bottom() + spacing / 4.0,
            width: progress_bar.width,
            height: content_height / 3.0,
        };

        let mut options = Vec::with_capacity(option_count);
        if option_count > 0 {
            let count = option_count as f64;
            let button_height =
                ((content_height * 2.0 / 3.0 - config.options_spacing * count) / count).max(0.0);
            let mut y = question_label.bottom() + spacing;
            for _ in 0..option_count {
                options.push(Rect {
                    x: config.options_spacing,
                    y,
                    width: (size.width - config.options_spacing * 2.0).max(0.0),
                    height: button_height,
                });
                y += button_height + config.options_spacing;
            }
        }

        Self {
            progress_bar,
            question_label,
            options,
            reset_button_width: size.width / 3.0,
        }
    }
}
