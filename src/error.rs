use thiserror::Error;

use crate::Padding;

/// Configuration mistakes detected before the engine touches any state.
///
/// These are reported once through the log and returned to the caller; the failed operation is
/// a no-op.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("item template is missing")]
    MissingTemplate,
    #[error("item template size must be finite and non-negative (got {width}x{height})")]
    InvalidItemSize { width: f32, height: f32 },
    #[error("spacing must be finite and non-negative (got {0})")]
    InvalidSpacing(f32),
    #[error("padding insets must be finite and non-negative (got {0:?})")]
    InvalidPadding(Padding),
    #[error("grid constraint count must be greater than zero")]
    InvalidConstraintCount,
}
