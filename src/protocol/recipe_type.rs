//! Recipe type tags.
//!
//! The wire identifies each record's layout with a signed varint tag. Decoding
//! and encoding use two separate tables because they are not inverses: the
//! shulker box and chemistry tags are read with the shapeless or shaped
//! layout, but a recipe always writes back its kind's canonical tag.
//!
//! | Tag | Name                 | Decoded as        |
//! |-----|----------------------|-------------------|
//! | 0   | shapeless            | Shapeless         |
//! | 1   | shaped               | Shaped            |
//! | 2   | furnace              | Smelting          |
//! | 3   | furnace data         | SmeltingData      |
//! | 4   | multi                | Multi             |
//! | 5   | shulker box          | Shapeless         |
//! | 6   | shapeless chemistry  | Shapeless         |
//! | 7   | shaped chemistry     | Shaped            |
//! | 8   | smithing transform   | SmithingTransform |
//! | 9   | smithing trim        | SmithingTrim      |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire tag values.
pub mod tag {
    pub const SHAPELESS: i32 = 0;
    pub const SHAPED: i32 = 1;
    pub const FURNACE: i32 = 2;
    pub const FURNACE_DATA: i32 = 3;
    pub const MULTI: i32 = 4;
    pub const SHULKER_BOX: i32 = 5;
    pub const SHAPELESS_CHEMISTRY: i32 = 6;
    pub const SHAPED_CHEMISTRY: i32 = 7;
    pub const SMITHING_TRANSFORM: i32 = 8;
    pub const SMITHING_TRIM: i32 = 9;
}

/// The closed set of record layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecipeKind {
    Shapeless,
    Shaped,
    Smelting,
    SmeltingData,
    Multi,
    SmithingTransform,
    SmithingTrim,
}

/// Tag to layout, consulted when reading.
pub const DECODE_TABLE: [(i32, RecipeKind); 10] = [
    (tag::SHAPELESS, RecipeKind::Shapeless),
    (tag::SHAPED, RecipeKind::Shaped),
    (tag::FURNACE, RecipeKind::Smelting),
    (tag::FURNACE_DATA, RecipeKind::SmeltingData),
    (tag::MULTI, RecipeKind::Multi),
    (tag::SHULKER_BOX, RecipeKind::Shapeless),
    (tag::SHAPELESS_CHEMISTRY, RecipeKind::Shapeless),
    (tag::SHAPED_CHEMISTRY, RecipeKind::Shaped),
    (tag::SMITHING_TRANSFORM, RecipeKind::SmithingTransform),
    (tag::SMITHING_TRIM, RecipeKind::SmithingTrim),
];

/// Look up the layout for a tag read from the wire.
pub fn kind_for_tag(wire_tag: i64) -> Option<RecipeKind> {
    DECODE_TABLE
        .iter()
        .find(|(tag, _)| i64::from(*tag) == wire_tag)
        .map(|(_, kind)| *kind)
}

impl RecipeKind {
    pub const ALL: [RecipeKind; 7] = [
        RecipeKind::Shapeless,
        RecipeKind::Shaped,
        RecipeKind::Smelting,
        RecipeKind::SmeltingData,
        RecipeKind::Multi,
        RecipeKind::SmithingTransform,
        RecipeKind::SmithingTrim,
    ];

    /// The tag this kind writes. This is the encode table.
    pub fn canonical_tag(self) -> i32 {
        match self {
            RecipeKind::Shapeless => tag::SHAPELESS,
            RecipeKind::Shaped => tag::SHAPED,
            RecipeKind::Smelting => tag::FURNACE,
            RecipeKind::SmeltingData => tag::FURNACE_DATA,
            RecipeKind::Multi => tag::MULTI,
            RecipeKind::SmithingTransform => tag::SMITHING_TRANSFORM,
            RecipeKind::SmithingTrim => tag::SMITHING_TRIM,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RecipeKind::Shapeless => "shapeless",
            RecipeKind::Shaped => "shaped",
            RecipeKind::Smelting => "smelting",
            RecipeKind::SmeltingData => "smelting_data",
            RecipeKind::Multi => "multi",
            RecipeKind::SmithingTransform => "smithing_transform",
            RecipeKind::SmithingTrim => "smithing_trim",
        }
    }
}

impl fmt::Display for RecipeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
