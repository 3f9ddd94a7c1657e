//! Recipe ingredients: predicates describing what a recipe slot accepts.
//!
//! ```text
//! descriptor type   u8
//! descriptor body   depends on type (see ItemDescriptor)
//! count             signed varint
//! ```

use crate::core::buffer::{PacketReader, PacketWriter};
use crate::error::{ProtocolError, Result};
use serde::{Deserialize, Serialize};

/// How an ingredient names the items it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemDescriptor {
    /// Accepts anything, including an empty slot.
    Any,
    /// A concrete item id. Metadata is only on the wire when `id` is non-zero.
    Default { id: i16, metadata: i16 },
    Molang { expression: String, version: u8 },
    /// Any item carrying the named tag, e.g. `minecraft:planks`.
    Tag(String),
    Deferred { name: String, metadata: i16 },
    ComplexAlias(String),
}

impl ItemDescriptor {
    pub const TYPE_ANY: u8 = 0;
    pub const TYPE_DEFAULT: u8 = 1;
    pub const TYPE_MOLANG: u8 = 2;
    pub const TYPE_TAG: u8 = 3;
    pub const TYPE_DEFERRED: u8 = 4;
    pub const TYPE_COMPLEX_ALIAS: u8 = 5;

    pub fn type_id(&self) -> u8 {
        match self {
            ItemDescriptor::Any => Self::TYPE_ANY,
            ItemDescriptor::Default { .. } => Self::TYPE_DEFAULT,
            ItemDescriptor::Molang { .. } => Self::TYPE_MOLANG,
            ItemDescriptor::Tag(_) => Self::TYPE_TAG,
            ItemDescriptor::Deferred { .. } => Self::TYPE_DEFERRED,
            ItemDescriptor::ComplexAlias(_) => Self::TYPE_COMPLEX_ALIAS,
        }
    }
}

/// An acceptable input for one recipe slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub descriptor: ItemDescriptor,
    pub count: i32,
}

impl Ingredient {
    /// Wildcard slot.
    pub fn any() -> Self {
        Self {
            descriptor: ItemDescriptor::Any,
            count: 0,
        }
    }

    pub fn item(id: i16, metadata: i16, count: i32) -> Self {
        Self {
            descriptor: ItemDescriptor::Default { id, metadata },
            count,
        }
    }

    pub fn tag(tag: impl Into<String>, count: i32) -> Self {
        Self {
            descriptor: ItemDescriptor::Tag(tag.into()),
            count,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self.descriptor, ItemDescriptor::Any)
    }
}

impl PacketWriter {
    pub fn write_ingredient(&mut self, ingredient: &Ingredient) {
        self.write_u8(ingredient.descriptor.type_id());
        match &ingredient.descriptor {
            ItemDescriptor::Any => {}
            ItemDescriptor::Default { id, metadata } => {
                self.write_i16_le(*id);
                if *id != 0 {
                    self.write_i16_le(*metadata);
                }
            }
            ItemDescriptor::Molang {
                expression,
                version,
            } => {
                self.write_string(expression);
                self.write_u8(*version);
            }
            ItemDescriptor::Tag(tag) => self.write_string(tag),
            ItemDescriptor::Deferred { name, metadata } => {
                self.write_string(name);
                self.write_i16_le(*metadata);
            }
            ItemDescriptor::ComplexAlias(name) => self.write_string(name),
        }
        self.write_var_i32(ingredient.count);
    }
}

impl PacketReader<'_> {
    pub fn read_ingredient(&mut self) -> Result<Ingredient> {
        let descriptor = match self.read_u8()? {
            ItemDescriptor::TYPE_ANY => ItemDescriptor::Any,
            ItemDescriptor::TYPE_DEFAULT => {
                let id = self.read_i16_le()?;
                let metadata = if id != 0 { self.read_i16_le()? } else { 0 };
                ItemDescriptor::Default { id, metadata }
            }
            ItemDescriptor::TYPE_MOLANG => ItemDescriptor::Molang {
                expression: self.read_string()?,
                version: self.read_u8()?,
            },
            ItemDescriptor::TYPE_TAG => ItemDescriptor::Tag(self.read_string()?),
            ItemDescriptor::TYPE_DEFERRED => ItemDescriptor::Deferred {
                name: self.read_string()?,
                metadata: self.read_i16_le()?,
            },
            ItemDescriptor::TYPE_COMPLEX_ALIAS => ItemDescriptor::ComplexAlias(self.read_string()?),
            other => return Err(ProtocolError::UnknownDescriptor(other)),
        };
        let count = self.read_var_i32()?;

        Ok(Ingredient { descriptor, count })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn round_trip(ingredient: &Ingredient) -> Ingredient {
        let mut writer = PacketWriter::new();
        writer.write_ingredient(ingredient);
        let bytes = writer.freeze();
        let mut reader = PacketReader::new(&bytes);
        let decoded = reader.read_ingredient().unwrap();
        assert!(reader.is_empty());
        decoded
    }

    #[test]
    fn test_wildcard_layout() {
        let mut writer = PacketWriter::new();
        writer.write_ingredient(&Ingredient::any());
        assert_eq!(writer.as_slice(), &[0x00, 0x00]);
    }

    #[test]
    fn test_descriptor_kinds() {
        let cases = [
            Ingredient::item(5, 2, 1),
            Ingredient::tag("minecraft:planks", 4),
            Ingredient {
                descriptor: ItemDescriptor::Molang {
                    expression: "query.any_tag('logs')".to_string(),
                    version: 10,
                },
                count: 1,
            },
            Ingredient {
                descriptor: ItemDescriptor::Deferred {
                    name: "minecraft:stick".to_string(),
                    metadata: -1,
                },
                count: 2,
            },
            Ingredient {
                descriptor: ItemDescriptor::ComplexAlias("minecraft:coals".to_string()),
                count: 1,
            },
        ];
        for ingredient in &cases {
            assert_eq!(&round_trip(ingredient), ingredient);
        }
    }

    #[test]
    fn test_zero_id_skips_metadata() {
        let ingredient = Ingredient::item(0, 0, 1);
        let mut writer = PacketWriter::new();
        writer.write_ingredient(&ingredient);
        assert_eq!(writer.len(), 1 + 2 + 1);
        assert_eq!(round_trip(&ingredient), ingredient);
    }

    #[test]
    fn test_unknown_descriptor() {
        let mut reader = PacketReader::new(&[0x09, 0x00]);
        assert!(matches!(
            reader.read_ingredient(),
            Err(ProtocolError::UnknownDescriptor(9))
        ));
    }
}
