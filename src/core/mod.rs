//! # Core Wire Primitives
//!
//! Low-level byte handling that every recipe codec builds on.
//!
//! ## Components
//! - **Varint**: LEB128 unsigned and zig-zag signed integers
//! - **Buffer**: [`buffer::PacketWriter`] and [`buffer::PacketReader`] with
//!   strings, fixed-width integers and 128-bit identifiers
//!
//! ## Security
//! - Every read is bounds checked and reports truncation instead of panicking
//! - Length prefixes are validated against configured limits before allocation

pub mod buffer;
pub mod varint;
