use std::time::Duration;

use crate::animation::{SpringConfig, Tolerance};
use crate::error::ConfigError;
use crate::widgets::Color;

/// Configuration for a [`SpringNumber`](super::SpringNumber)
#[derive(Clone, Debug, PartialEq)]
pub struct SpringNumberConfig {
    /// Value shown when the widget is created
    pub value: u64,
    /// Stiffness of the offset spring
    pub stiffness: f32,
    /// Damping of the offset spring
    pub damping: f32,
    /// Height of one glyph cell in logical pixels
    pub digit_height: f32,
    /// Width of one digit slot in logical pixels
    pub digit_width: f32,
    pub font_size: f32,
    pub font_weight: u16,
    pub color: Color,
    /// Simulated time per integrator tick
    pub step: Duration,
    /// Real time between dimming a digit and moving it
    pub commit_delay: Duration,
    /// Opacity a digit fades towards while a change is pending
    pub dim_opacity: f32,
    pub tolerance: Tolerance,
    pub opacity_spring: SpringConfig,
}

impl Default for SpringNumberConfig {
    fn default() -> Self {
        Self {
            value: 0,
            stiffness: SpringConfig::OFFSET.stiffness,
            damping: SpringConfig::OFFSET.damping,
            digit_height: 72.0,
            digit_width: 36.0,
            font_size: 56.0,
            font_weight: 300,
            color: Color::WHITE,
            step: Duration::from_millis(4),
            commit_delay: Duration::from_millis(80),
            dim_opacity: 0.3,
            tolerance: Tolerance::DEFAULT,
            opacity_spring: SpringConfig::OPACITY,
        }
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl SpringNumberConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(mut self, value: u64) -> Self {
        self.value = value;
        self
    }

    /// Set stiffness and damping of the offset spring
    pub fn spring(mut self, stiffness: f32, damping: f32) -> Self {
        self.stiffness = stiffness;
        self.damping = damping;
        self
    }

    pub fn digit_size(mut self, width: f32, height: f32) -> Self {
        self.digit_width = width;
        self.digit_height = height;
        self
    }

    pub fn font(mut self, size: f32, weight: u16) -> Self {
        self.font_size = size;
        self.font_weight = weight;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn step(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }

    pub fn commit_delay(mut self, delay: Duration) -> Self {
        self.commit_delay = delay;
        self
    }

    pub fn dim_opacity(mut self, opacity: f32) -> Self {
        self.dim_opacity = opacity;
        self
    }

    pub fn tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn opacity_spring(mut self, spring: SpringConfig) -> Self {
        self.opacity_spring = spring;
        self
    }

    /// Spring parameters of the offset channel
    pub fn offset_spring(&self) -> SpringConfig {
        SpringConfig::new(self.stiffness, self.damping)
    }

    /// Check every field, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.problems().into_iter().next().map_or(Ok(()), Err)
    }

    /// Replace every invalid field by its default, logging what was replaced
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        for problem in self.problems() {
            log::warn!("{}; using the default", problem);
            match problem {
                ConfigError::InvalidStiffness(_) => self.stiffness = defaults.stiffness,
                ConfigError::InvalidDamping(_) => self.damping = defaults.damping,
                ConfigError::InvalidSize { name, .. } => match name {
                    "digit_height" => self.digit_height = defaults.digit_height,
                    "digit_width" => self.digit_width = defaults.digit_width,
                    "font_size" => self.font_size = defaults.font_size,
                    "opacity stiffness" => {
                        self.opacity_spring.stiffness = defaults.opacity_spring.stiffness
                    }
                    "opacity damping" => {
                        self.opacity_spring.damping = defaults.opacity_spring.damping
                    }
                    _ => self.tolerance = defaults.tolerance,
                },
                ConfigError::InvalidDimOpacity(_) => self.dim_opacity = defaults.dim_opacity,
                ConfigError::ZeroStep => self.step = defaults.step,
                ConfigError::InvalidColor(_) => self.color = defaults.color,
            }
        }
        self
    }

    fn problems(&self) -> Vec<ConfigError> {
        let mut problems = Vec::new();

        if !positive(self.stiffness) {
            problems.push(ConfigError::InvalidStiffness(self.stiffness));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            problems.push(ConfigError::InvalidDamping(self.damping));
        }

        let sizes = [
            ("digit_height", self.digit_height),
            ("digit_width", self.digit_width),
            ("font_size", self.font_size),
            ("opacity stiffness", self.opacity_spring.stiffness),
            ("opacity damping", self.opacity_spring.damping),
            ("position tolerance", self.tolerance.position),
            ("velocity tolerance", self.tolerance.velocity),
        ];
        for (name, value) in sizes {
            if !positive(value) {
                problems.push(ConfigError::InvalidSize { name, value });
            }
        }

        if !(0.0..=1.0).contains(&self.dim_opacity) {
            problems.push(ConfigError::InvalidDimOpacity(self.dim_opacity));
        }
        if self.step.is_zero() {
            problems.push(ConfigError::ZeroStep);
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SpringNumberConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.offset_spring(), SpringConfig::OFFSET);
        assert_eq!(config.step, Duration::from_millis(4));
        assert_eq!(config.commit_delay, Duration::from_millis(80));
    }

    #[test]
    fn test_validate_reports_first_problem() {
        let config = SpringNumberConfig::new().spring(-1.0, f32::NAN);
        assert_eq!(config.validate(), Err(ConfigError::InvalidStiffness(-1.0)));
    }

    #[test]
    fn test_zero_damping_is_allowed() {
        let config = SpringNumberConfig::new().spring(120.0, 0.0);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_sanitized_falls_back_per_field() {
        let config = SpringNumberConfig::new()
            .value(42)
            .spring(f32::INFINITY, -3.0)
            .digit_size(0.0, 48.0)
            .dim_opacity(1.5)
            .step(Duration::ZERO)
            .sanitized();

        let defaults = SpringNumberConfig::default();
        assert_eq!(config.value, 42);
        assert_eq!(config.stiffness, defaults.stiffness);
        assert_eq!(config.damping, defaults.damping);
        assert_eq!(config.digit_width, defaults.digit_width);
        assert_eq!(config.digit_height, 48.0);
        assert_eq!(config.dim_opacity, defaults.dim_opacity);
        assert_eq!(config.step, defaults.step);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_invalid_tolerance_is_replaced() {
        let config = SpringNumberConfig::new()
            .tolerance(Tolerance {
                position: 0.0,
                velocity: 0.3,
            })
            .sanitized();
        assert_eq!(config.tolerance, Tolerance::DEFAULT);
    }
}
