//! # Crafting Data
//!
//! Body of the crafting data broadcast: the recipe collection followed by the
//! brewing and material reducer tables that ride along with it.
//!
//! ## Wire Format
//! ```text
//! recipes                    recipe collection
//! potion type recipes        uvar count | (input, input_meta, ingredient,
//!                            ingredient_meta, output, output_meta) as svar
//! potion container recipes   uvar count | (input, ingredient, output) as svar
//! material reducers          uvar count | svar (input << 16 | input_meta as u16)
//!                            | uvar count | (item_id, item_count) as svar
//! clear_recipes              bool
//! ```

use crate::core::buffer::{PacketReader, PacketWriter};
use crate::error::Result;
use crate::protocol::codec::{ensure_consumed, RecipeCodec};
use crate::protocol::collection::RecipeCollection;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Brewing recipe that changes the potion type, e.g. awkward + nether wart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PotionTypeRecipe {
    pub input: i32,
    pub input_meta: i32,
    pub ingredient: i32,
    pub ingredient_meta: i32,
    pub output: i32,
    pub output_meta: i32,
}

/// Brewing recipe that changes the container, e.g. potion + gunpowder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PotionContainerChangeRecipe {
    pub input: i32,
    pub ingredient: i32,
    pub output: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialReducerOutput {
    pub item_id: i32,
    pub item_count: i32,
}

/// Breaks one input item down into its component materials.
///
/// Id and metadata share one 32-bit integer on the wire, so both are 16 bits.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MaterialReducerRecipe {
    pub input: i16,
    pub input_meta: i16,
    pub outputs: Vec<MaterialReducerOutput>,
}

impl MaterialReducerRecipe {
    pub fn new(input: i16, input_meta: i16, outputs: Vec<MaterialReducerOutput>) -> Self {
        Self {
            input,
            input_meta,
            outputs,
        }
    }

    /// Id and metadata packed into one integer, id in the high half.
    fn packed_input(&self) -> i32 {
        (i32::from(self.input) << 16) | i32::from(self.input_meta as u16)
    }

    fn unpack_input(packed: i32) -> (i16, i16) {
        ((packed >> 16) as i16, packed as u16 as i16)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CraftingData {
    pub recipes: RecipeCollection,
    pub potion_type_recipes: Vec<PotionTypeRecipe>,
    pub potion_container_recipes: Vec<PotionContainerChangeRecipe>,
    pub material_reducers: Vec<MaterialReducerRecipe>,
    /// Tell the client to drop the recipes it already knows first.
    pub clear_recipes: bool,
}

impl CraftingData {
    pub fn new(recipes: RecipeCollection) -> Self {
        Self {
            recipes,
            ..Self::default()
        }
    }
}

impl RecipeCodec {
    pub fn write_crafting_data(&self, w: &mut PacketWriter, data: &CraftingData) -> Result<()> {
        self.write_collection(w, &data.recipes)?;

        w.write_count(data.potion_type_recipes.len());
        for recipe in &data.potion_type_recipes {
            w.write_var_i32(recipe.input);
            w.write_var_i32(recipe.input_meta);
            w.write_var_i32(recipe.ingredient);
            w.write_var_i32(recipe.ingredient_meta);
            w.write_var_i32(recipe.output);
            w.write_var_i32(recipe.output_meta);
        }

        w.write_count(data.potion_container_recipes.len());
        for recipe in &data.potion_container_recipes {
            w.write_var_i32(recipe.input);
            w.write_var_i32(recipe.ingredient);
            w.write_var_i32(recipe.output);
        }

        w.write_count(data.material_reducers.len());
        for reducer in &data.material_reducers {
            w.write_var_i32(reducer.packed_input());
            w.write_count(reducer.outputs.len());
            for output in &reducer.outputs {
                w.write_var_i32(output.item_id);
                w.write_var_i32(output.item_count);
            }
        }

        w.write_bool(data.clear_recipes);
        Ok(())
    }

    /// Read one crafting data body from the reader's current position.
    #[instrument(skip_all, level = "debug", fields(offset = r.position()))]
    pub fn read_crafting_data(&self, r: &mut PacketReader<'_>) -> Result<CraftingData> {
        let start = r.position();
        let result = self.read_crafting_data_inner(r);
        let consumed = r.position() - start;
        self.finish_decode(result, |data: &CraftingData| data.recipes.len(), consumed, r.position())
    }

    fn read_crafting_data_inner(&self, r: &mut PacketReader<'_>) -> Result<CraftingData> {
        let recipes = self.read_collection_inner(r)?;
        let max = self.config().max_list_len;

        let count = r.read_count(max)?;
        let mut potion_type_recipes = Vec::with_capacity(count);
        for _ in 0..count {
            potion_type_recipes.push(PotionTypeRecipe {
                input: r.read_var_i32()?,
                input_meta: r.read_var_i32()?,
                ingredient: r.read_var_i32()?,
                ingredient_meta: r.read_var_i32()?,
                output: r.read_var_i32()?,
                output_meta: r.read_var_i32()?,
            });
        }

        let count = r.read_count(max)?;
        let mut potion_container_recipes = Vec::with_capacity(count);
        for _ in 0..count {
            potion_container_recipes.push(PotionContainerChangeRecipe {
                input: r.read_var_i32()?,
                ingredient: r.read_var_i32()?,
                output: r.read_var_i32()?,
            });
        }

        let count = r.read_count(max)?;
        let mut material_reducers = Vec::with_capacity(count);
        for _ in 0..count {
            let (input, input_meta) = MaterialReducerRecipe::unpack_input(r.read_var_i32()?);
            let output_count = r.read_count(max)?;
            let mut outputs = Vec::with_capacity(output_count);
            for _ in 0..output_count {
                outputs.push(MaterialReducerOutput {
                    item_id: r.read_var_i32()?,
                    item_count: r.read_var_i32()?,
                });
            }
            material_reducers.push(MaterialReducerRecipe::new(input, input_meta, outputs));
        }

        let clear_recipes = r.read_bool()?;

        debug!(
            recipes = recipes.len(),
            potion_types = potion_type_recipes.len(),
            potion_containers = potion_container_recipes.len(),
            material_reducers = material_reducers.len(),
            clear_recipes,
            "Decoded crafting data"
        );

        Ok(CraftingData {
            recipes,
            potion_type_recipes,
            potion_container_recipes,
            material_reducers,
            clear_recipes,
        })
    }

    pub fn encode_crafting_data(&self, data: &CraftingData) -> Result<Bytes> {
        let mut w = PacketWriter::new();
        self.write_crafting_data(&mut w, data)?;
        Ok(w.freeze())
    }

    /// Decode a buffer holding exactly one crafting data body.
    pub fn decode_crafting_data(&self, data: &[u8]) -> Result<CraftingData> {
        let mut r = self.reader(data);
        let result = self
            .read_crafting_data_inner(&mut r)
            .and_then(|decoded| ensure_consumed(&r).map(|()| decoded));
        let consumed = r.position();
        self.finish_decode(result, |data: &CraftingData| data.recipes.len(), consumed, consumed)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::error::ProtocolError;
    use crate::protocol::recipe::{MultiRecipe, Recipe, RecipeHeader};
    use uuid::Uuid;

    fn sample() -> CraftingData {
        let mut recipes = RecipeCollection::new();
        recipes.push(Recipe::Multi(MultiRecipe {
            header: RecipeHeader::new(Uuid::from_u64_pair(0, 1)),
            unique_id: 1,
        }));

        CraftingData {
            recipes,
            potion_type_recipes: vec![PotionTypeRecipe {
                input: 373,
                input_meta: 4,
                ingredient: 372,
                ingredient_meta: 0,
                output: 373,
                output_meta: 5,
            }],
            potion_container_recipes: vec![PotionContainerChangeRecipe {
                input: 373,
                ingredient: 289,
                output: 438,
            }],
            material_reducers: vec![MaterialReducerRecipe::new(
                238,
                -1,
                vec![
                    MaterialReducerOutput {
                        item_id: 766,
                        item_count: 4,
                    },
                    MaterialReducerOutput {
                        item_id: 767,
                        item_count: 2,
                    },
                ],
            )],
            clear_recipes: true,
        }
    }

    #[test]
    fn test_crafting_data_round_trip() {
        let codec = RecipeCodec::default();
        let data = sample();
        let bytes = codec.encode_crafting_data(&data).unwrap();
        assert_eq!(bytes.last(), Some(&1));

        let decoded = codec.decode_crafting_data(&bytes).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_material_reducer_packing() {
        let reducer = MaterialReducerRecipe::new(238, 3, vec![]);
        assert_eq!(reducer.packed_input(), (238 << 16) | 3);
        assert_eq!(MaterialReducerRecipe::unpack_input(reducer.packed_input()), (238, 3));

        let reducer = MaterialReducerRecipe::new(-5, -1, vec![]);
        assert_eq!(MaterialReducerRecipe::unpack_input(reducer.packed_input()), (-5, -1));

        for input in [i16::MIN, i16::MAX] {
            let reducer = MaterialReducerRecipe::new(input, i16::MIN, vec![]);
            assert_eq!(
                MaterialReducerRecipe::unpack_input(reducer.packed_input()),
                (input, i16::MIN)
            );
        }
    }

    #[test]
    fn test_material_reducer_extreme_ids_round_trip() {
        let codec = RecipeCodec::default();
        let data = CraftingData {
            material_reducers: vec![
                MaterialReducerRecipe::new(i16::MAX, 0, vec![]),
                MaterialReducerRecipe::new(i16::MIN, -1, vec![]),
            ],
            ..CraftingData::default()
        };

        let decoded = codec
            .decode_crafting_data(&codec.encode_crafting_data(&data).unwrap())
            .unwrap();
        assert_eq!(decoded.material_reducers, data.material_reducers);
    }

    #[test]
    fn test_trailing_bytes_counted_once() {
        let codec = RecipeCodec::default();
        let mut bytes = codec.encode_crafting_data(&sample()).unwrap().to_vec();
        bytes.push(0x00);

        assert!(matches!(
            codec.decode_crafting_data(&bytes),
            Err(ProtocolError::TrailingBytes(1))
        ));
        let snapshot = codec.metrics().snapshot();
        assert_eq!(snapshot.collections_decoded, 0);
        assert_eq!(snapshot.recipes_decoded, 0);
        assert_eq!(snapshot.decode_errors, 1);
    }

    #[test]
    fn test_empty_tables() {
        let codec = RecipeCodec::default();
        let bytes = codec.encode_crafting_data(&CraftingData::default()).unwrap();
        assert_eq!(&bytes[..], &[0x00, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_truncated_flag() {
        let codec = RecipeCodec::default();
        let bytes = codec.encode_crafting_data(&sample()).unwrap();
        let err = codec.decode_crafting_data(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(err, ProtocolError::TruncatedInput { .. }));
    }
}
