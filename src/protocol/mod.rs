//! # Recipe Protocol
//!
//! The recipe catalogue as it travels inside the crafting data broadcast.
//!
//! ## Components
//! - **Item / Ingredient**: the leaf values recipes are built from
//! - **Recipe**: the seven record layouts and their shared header
//! - **Recipe Type**: separate decode and encode tag tables
//! - **Codec**: per-layout encode/decode and collection framing
//! - **Crafting Data**: the collection plus brewing and reducer tables

pub mod codec;
pub mod collection;
pub mod crafting_data;
pub mod ingredient;
pub mod item;
pub mod recipe;
pub mod recipe_type;
