//! # recipe-protocol
//!
//! Bit-exact encoder and decoder for the recipe catalogue a game server sends
//! to its clients in the crafting data broadcast.
//!
//! ## Layout
//! - [`core`]: varints, strings, identifiers and the packet reader/writer
//! - [`protocol`]: items, ingredients, the seven recipe layouts, tag tables,
//!   collection framing and the crafting data body
//! - [`config`]: decoder limits and logging settings
//! - [`error`]: the [`ProtocolError`] taxonomy
//! - [`utils`]: id generators, logging setup and metrics
//!
//! ## Example
//! ```rust
//! use recipe_protocol::{Recipe, RecipeCodec, RecipeCollection};
//! use recipe_protocol::protocol::recipe::{MultiRecipe, RecipeHeader};
//! use uuid::Uuid;
//!
//! let mut recipes = RecipeCollection::new();
//! recipes.push(Recipe::Multi(MultiRecipe {
//!     header: RecipeHeader::new(Uuid::from_u64_pair(0, 1)),
//!     unique_id: 1,
//! }));
//!
//! let codec = RecipeCodec::default();
//! let bytes = codec.encode_collection(&recipes)?;
//! let decoded = codec.decode_collection(&bytes)?;
//! assert_eq!(decoded, recipes);
//! # Ok::<(), recipe_protocol::ProtocolError>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod utils;

pub use config::{CodecConfig, ProtocolConfig};
pub use error::{ProtocolError, Result};
pub use protocol::codec::RecipeCodec;
pub use protocol::collection::RecipeCollection;
pub use protocol::crafting_data::CraftingData;
pub use protocol::ingredient::{Ingredient, ItemDescriptor};
pub use protocol::item::{Item, ItemRegistry};
pub use protocol::recipe::{Recipe, RecipeHeader};
pub use protocol::recipe_type::RecipeKind;
