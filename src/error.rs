use thiserror::Error;

/// Invalid widget configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("stiffness must be finite and positive, got {0}")]
    InvalidStiffness(f32),
    #[error("damping must be finite and non-negative, got {0}")]
    InvalidDamping(f32),
    #[error("{name} must be finite and positive, got {value}")]
    InvalidSize { name: &'static str, value: f32 },
    #[error("dim opacity must be within [0, 1], got {0}")]
    InvalidDimOpacity(f32),
    #[error("simulation step must be non-zero")]
    ZeroStep,
    #[error("invalid color {0:?}, expected #rgb, #rrggbb or #rrggbbaa")]
    InvalidColor(String),
}

/// Failure reported by a [`FrameHost`](crate::host::FrameHost)
#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to register event source: {0}")]
    Register(#[from] calloop::Error),
    #[error("host is shut down")]
    Closed,
}
