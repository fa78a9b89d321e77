//! Chartline Core Types and Definitions
//!
//! This crate provides the foundational types for drawing static workflow
//! figures as SVG. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Drawing primitives, arrow renderers, boxes and layered SVG
//!   output ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
