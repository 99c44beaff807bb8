/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point payloads without silently saturating or losing precision.
/// Casts between `int` and `float` go through these helpers.
pub mod num;
