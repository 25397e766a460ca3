use super::*;

/// Square root.
mod sqrt;

/// Cube root, exponential, trigonometric functions, and powers.
mod elementary;

/// Fused multiply-add.
mod fma;
