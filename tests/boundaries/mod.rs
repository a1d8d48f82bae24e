//! Boundary and edge case tests
//!
//! Tests extreme sizes and degenerate shapes that normal usage rarely reaches.

mod large_scale;
