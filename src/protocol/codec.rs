//! # Recipe Codec
//!
//! Encode and decode of individual recipe records and of the recipe
//! collection that carries them.
//!
//! ## Record Layouts
//! Every record starts with its kind's canonical tag as a signed varint.
//! Items are always written without auxiliary metadata.
//! ```text
//! Multi              id (text) | unique_id (svar)
//! Shapeless          id (text) | inputs | results | id | block | priority (svar) | unique_id (uvar)
//! Shaped             id (text) | width (svar) | height (svar) | grid | results | id | block
//!                    | priority (svar) | unique_id (uvar)
//! Smelting           input id (svar) | result | block
//! SmeltingData       input id (svar) | input metadata (svar) | result | block
//! SmithingTransform  id (text) | template | input | addition | output | block | unique_id (uvar)
//! SmithingTrim       id (text) | template | input | addition | block | unique_id (svar)
//! ```
//! Lists are prefixed with an unsigned varint count. The text id in front of
//! the crafting layouts duplicates the structured id; it is written for the
//! client and skipped on read. The mix of signed and unsigned `unique_id`
//! encodings is what the client expects and must not be unified.
//!
//! ## Collection Framing
//! ```text
//! count (uvar) | record * count
//! ```
//! The count is checked against [`CodecConfig::max_recipes`] before anything
//! is allocated. A decode either returns every record or an error.

use crate::config::CodecConfig;
use crate::core::buffer::{PacketReader, PacketWriter};
use crate::core::varint::zigzag_encode;
use crate::error::{ProtocolError, Result};
use crate::protocol::collection::RecipeCollection;
use crate::protocol::item::{DefaultItemRegistry, Item, ItemRegistry};
use crate::protocol::recipe::{
    MultiRecipe, Recipe, RecipeHeader, ShapedRecipe, ShapelessRecipe, SmeltingRecipe,
    SmithingTransformRecipe, SmithingTrimRecipe,
};
use crate::protocol::recipe_type::{kind_for_tag, RecipeKind};
use crate::utils::id::{IdGenerator, RandomIds};
use crate::utils::metrics::{Metrics, Timer};
use bytes::Bytes;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, trace};
use uuid::Uuid;

/// Records are allocated up front only up to this many; larger collections
/// grow as records actually decode.
const INITIAL_CAPACITY_LIMIT: usize = 1024;

/// Rough per-record size used to pre-size encode buffers.
const ESTIMATED_RECORD_SIZE: usize = 96;

/// Fail with [`ProtocolError::TrailingBytes`] unless `r` is exhausted.
pub(crate) fn ensure_consumed(r: &PacketReader<'_>) -> Result<()> {
    if r.is_empty() {
        Ok(())
    } else {
        Err(ProtocolError::TrailingBytes(r.remaining()))
    }
}

/// Stateless recipe codec plus the collaborators decoding needs.
///
/// Cheap to share: wrap it in an [`Arc`] and encode or decode from any
/// number of threads.
#[derive(Clone)]
pub struct RecipeCodec {
    config: CodecConfig,
    items: Arc<dyn ItemRegistry>,
    ids: Arc<dyn IdGenerator>,
    metrics: Arc<Metrics>,
}

impl Default for RecipeCodec {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl fmt::Debug for RecipeCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeCodec")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RecipeCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self {
            config,
            items: Arc::new(DefaultItemRegistry),
            ids: Arc::new(RandomIds),
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Registry used to rebuild smelting inputs from their bare ids.
    pub fn with_item_registry<R: ItemRegistry + 'static>(mut self, registry: R) -> Self {
        self.items = Arc::new(registry);
        self
    }

    /// Source of ids for records whose layout carries none.
    pub fn with_id_generator<G: IdGenerator + 'static>(mut self, ids: G) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// A reader over `data` that applies this codec's limits.
    pub fn reader<'a>(&self, data: &'a [u8]) -> PacketReader<'a> {
        PacketReader::with_config(data, &self.config)
    }

    // ---------------------------------------------------------------------
    // Collection framing
    // ---------------------------------------------------------------------

    /// Write a count-prefixed collection.
    pub fn write_collection(&self, w: &mut PacketWriter, recipes: &RecipeCollection) -> Result<()> {
        w.write_count(recipes.len());
        for recipe in recipes {
            self.write_recipe(w, recipe)?;
        }
        Ok(())
    }

    /// Read a count-prefixed collection from the reader's current position.
    #[instrument(skip_all, level = "debug", fields(offset = r.position()))]
    pub fn read_collection(&self, r: &mut PacketReader<'_>) -> Result<RecipeCollection> {
        let start = r.position();
        let result = self.read_collection_inner(r);
        let consumed = r.position() - start;
        self.finish_decode(result, RecipeCollection::len, consumed, r.position())
    }

    pub(crate) fn read_collection_inner(&self, r: &mut PacketReader<'_>) -> Result<RecipeCollection> {
        let count = r.read_count(self.config.max_recipes)?;
        let mut recipes = Vec::with_capacity(count.min(INITIAL_CAPACITY_LIMIT));
        for _ in 0..count {
            recipes.push(self.read_recipe(r)?);
        }
        Ok(RecipeCollection::from(recipes))
    }

    /// Encode a collection into a standalone buffer.
    #[instrument(skip_all, level = "debug", fields(recipes = recipes.len()))]
    pub fn encode_collection(&self, recipes: &RecipeCollection) -> Result<Bytes> {
        let _timer = Timer::start("encode_collection");
        let mut w = PacketWriter::with_capacity(recipes.len().saturating_mul(ESTIMATED_RECORD_SIZE) + 5);
        self.write_collection(&mut w, recipes)?;

        self.metrics
            .collection_encoded(recipes.len() as u64, w.len() as u64);
        debug!(bytes = w.len(), "Encoded recipe collection");
        Ok(w.freeze())
    }

    /// Decode a buffer that holds exactly one collection and nothing else.
    pub fn decode_collection(&self, data: &[u8]) -> Result<RecipeCollection> {
        let _timer = Timer::start("decode_collection");
        let mut r = self.reader(data);
        let result = self
            .read_collection_inner(&mut r)
            .and_then(|recipes| ensure_consumed(&r).map(|()| recipes));
        let consumed = r.position();
        self.finish_decode(result, RecipeCollection::len, consumed, consumed)
    }

    /// Count and log a finished top-level decode. Only a decode that
    /// returns `Ok` to the caller counts as decoded.
    pub(crate) fn finish_decode<T>(
        &self,
        result: Result<T>,
        recipe_count: impl FnOnce(&T) -> usize,
        consumed: usize,
        offset: usize,
    ) -> Result<T> {
        match &result {
            Ok(value) => {
                let recipes = recipe_count(value);
                self.metrics.collection_decoded(recipes as u64, consumed as u64);
                debug!(recipes, bytes = consumed, "Decoded recipe collection");
            }
            Err(e) => {
                self.metrics.decode_error();
                if matches!(e, ProtocolError::UnknownTag(_)) {
                    self.metrics.unknown_tag();
                }
                debug!(error = %e, kind = e.kind(), offset, "Recipe collection decode failed");
            }
        }
        result
    }

    // ---------------------------------------------------------------------
    // Tag dispatch
    // ---------------------------------------------------------------------

    /// Write one record: canonical tag, then the layout for its kind.
    ///
    /// A shaped recipe whose grid disagrees with its dimensions, or whose
    /// dimensions exceed [`CodecConfig::max_grid_dimension`], is rejected
    /// before anything is written.
    pub fn write_recipe(&self, w: &mut PacketWriter, recipe: &Recipe) -> Result<()> {
        if let Recipe::Shaped(shaped) = recipe {
            shaped.validate_shape_with(self.config.max_grid_dimension)?;
        }

        let kind = recipe.kind();
        w.write_var_i32(kind.canonical_tag());
        trace!(%kind, id = %recipe.id(), "Writing recipe");

        match recipe {
            Recipe::Shapeless(r) => self.write_shapeless(w, r),
            Recipe::Shaped(r) => self.write_shaped(w, r),
            Recipe::Multi(r) => self.write_multi(w, r),
            Recipe::Smelting(r) => self.write_smelting(w, r, false),
            Recipe::SmeltingData(r) => self.write_smelting(w, r, true),
            Recipe::SmithingTransform(r) => self.write_smithing_transform(w, r),
            Recipe::SmithingTrim(r) => self.write_smithing_trim(w, r),
        }
        Ok(())
    }

    /// Read one record. An unassigned tag fails before anything past it is read.
    pub fn read_recipe(&self, r: &mut PacketReader<'_>) -> Result<Recipe> {
        let wire_tag = r.read_signed_varint()?;
        let kind = kind_for_tag(wire_tag).ok_or(ProtocolError::UnknownTag(wire_tag))?;
        trace!(tag = wire_tag, %kind, offset = r.position(), "Reading recipe");

        let recipe = match kind {
            RecipeKind::Shapeless => Recipe::Shapeless(self.read_shapeless(r)?),
            RecipeKind::Shaped => Recipe::Shaped(self.read_shaped(r)?),
            RecipeKind::Multi => Recipe::Multi(self.read_multi(r)?),
            RecipeKind::Smelting => Recipe::Smelting(self.read_smelting(r, false)?),
            RecipeKind::SmeltingData => Recipe::SmeltingData(self.read_smelting(r, true)?),
            RecipeKind::SmithingTransform => {
                Recipe::SmithingTransform(self.read_smithing_transform(r)?)
            }
            RecipeKind::SmithingTrim => Recipe::SmithingTrim(self.read_smithing_trim(r)?),
        };
        Ok(recipe)
    }

    // ---------------------------------------------------------------------
    // Shared fields
    // ---------------------------------------------------------------------

    fn write_text_id(&self, w: &mut PacketWriter, id: &Uuid) {
        w.write_string(&id.hyphenated().to_string());
    }

    fn skip_text_id(&self, r: &mut PacketReader<'_>) -> Result<()> {
        r.read_string()?;
        Ok(())
    }

    fn read_list<'a, T>(
        &self,
        r: &mut PacketReader<'a>,
        mut read: impl FnMut(&mut PacketReader<'a>) -> Result<T>,
    ) -> Result<Vec<T>> {
        let count = r.read_count(self.config.max_list_len)?;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(read(&mut *r)?);
        }
        Ok(items)
    }

    /// Trailing `id | block | priority` block of the crafting layouts.
    fn write_crafting_tail(&self, w: &mut PacketWriter, header: &RecipeHeader) {
        w.write_uuid(&header.id);
        w.write_string(&header.block);
        w.write_var_i32(header.priority);
    }

    fn read_crafting_tail(&self, r: &mut PacketReader<'_>) -> Result<RecipeHeader> {
        Ok(RecipeHeader {
            id: r.read_uuid()?,
            block: r.read_string()?,
            priority: r.read_var_i32()?,
        })
    }

    /// Header for a layout without a structured id on the wire.
    fn generated_header(&self, block: String) -> RecipeHeader {
        RecipeHeader::generated(self.ids.as_ref()).with_block(block)
    }

    fn write_results(&self, w: &mut PacketWriter, results: &[Item]) {
        w.write_count(results.len());
        for item in results {
            w.write_item(item, false);
        }
    }

    // ---------------------------------------------------------------------
    // Variant layouts
    // ---------------------------------------------------------------------

    fn write_multi(&self, w: &mut PacketWriter, recipe: &MultiRecipe) {
        self.write_text_id(w, &recipe.header.id);
        w.write_var_i32(recipe.unique_id);
    }

    fn read_multi(&self, r: &mut PacketReader<'_>) -> Result<MultiRecipe> {
        let text = r.read_string()?;
        let id = Uuid::parse_str(&text).map_err(|_| ProtocolError::InvalidIdentifier(text))?;
        let unique_id = r.read_var_i32()?;

        Ok(MultiRecipe {
            header: RecipeHeader::new(id),
            unique_id,
        })
    }

    fn write_shapeless(&self, w: &mut PacketWriter, recipe: &ShapelessRecipe) {
        self.write_text_id(w, &recipe.header.id);

        w.write_count(recipe.inputs.len());
        for ingredient in &recipe.inputs {
            w.write_ingredient(ingredient);
        }
        self.write_results(w, &recipe.results);

        self.write_crafting_tail(w, &recipe.header);
        w.write_var_u32(recipe.unique_id as u32);
    }

    fn read_shapeless(&self, r: &mut PacketReader<'_>) -> Result<ShapelessRecipe> {
        self.skip_text_id(r)?;

        let inputs = self.read_list(r, |r| r.read_ingredient())?;
        let results = self.read_list(r, |r| r.read_item(false))?;
        let header = self.read_crafting_tail(r)?;
        let unique_id = r.read_var_u32()? as i32;

        Ok(ShapelessRecipe {
            header,
            unique_id,
            inputs,
            results,
        })
    }

    fn write_shaped(&self, w: &mut PacketWriter, recipe: &ShapedRecipe) {
        self.write_text_id(w, &recipe.header.id);

        w.write_var_i32(recipe.width);
        w.write_var_i32(recipe.height);
        // row-major storage is already height-outer, width-inner
        for ingredient in &recipe.inputs {
            w.write_ingredient(ingredient);
        }
        self.write_results(w, &recipe.results);

        self.write_crafting_tail(w, &recipe.header);
        w.write_var_u32(recipe.unique_id as u32);
    }

    fn read_shaped(&self, r: &mut PacketReader<'_>) -> Result<ShapedRecipe> {
        self.skip_text_id(r)?;

        let width = r.read_var_i32()?;
        let height = r.read_var_i32()?;
        let max = self.config.max_grid_dimension;
        let slots = match ShapedRecipe::slot_count(width, height) {
            Some(slots) if width <= max && height <= max => slots,
            _ => {
                return Err(ProtocolError::MalformedShape {
                    width,
                    height,
                    slots: ShapedRecipe::reported_slots(width, height),
                })
            }
        };

        let mut inputs = Vec::with_capacity(slots);
        for _ in 0..height {
            for _ in 0..width {
                inputs.push(r.read_ingredient()?);
            }
        }
        let results = self.read_list(r, |r| r.read_item(false))?;
        let header = self.read_crafting_tail(r)?;
        let unique_id = r.read_var_u32()? as i32;

        ShapedRecipe::new(header, unique_id, width, height, inputs, results)
    }

    fn write_smelting(&self, w: &mut PacketWriter, recipe: &SmeltingRecipe, with_metadata: bool) {
        w.write_var_i32(recipe.input.id);
        if with_metadata {
            w.write_var_i32(i32::from(recipe.input.metadata));
        }
        w.write_item(&recipe.result, false);
        w.write_string(&recipe.header.block);
    }

    fn read_smelting(&self, r: &mut PacketReader<'_>, with_metadata: bool) -> Result<SmeltingRecipe> {
        let input_id = r.read_var_i32()?;
        let metadata = if with_metadata {
            let raw = r.read_var_i32()?;
            i16::try_from(raw)
                .map_err(|_| ProtocolError::VarIntOverflow(zigzag_encode(i64::from(raw))))?
        } else {
            0
        };
        let input = self.items.item(input_id, metadata);
        let result = r.read_item(false)?;
        let block = r.read_string()?;

        Ok(SmeltingRecipe {
            header: self.generated_header(block),
            input,
            result,
        })
    }

    fn write_smithing_transform(&self, w: &mut PacketWriter, recipe: &SmithingTransformRecipe) {
        self.write_text_id(w, &recipe.header.id);
        w.write_ingredient(&recipe.template);
        w.write_ingredient(&recipe.input);
        w.write_ingredient(&recipe.addition);
        w.write_item(&recipe.output, false);
        w.write_string(&recipe.header.block);
        w.write_var_u32(recipe.unique_id as u32);
    }

    fn read_smithing_transform(&self, r: &mut PacketReader<'_>) -> Result<SmithingTransformRecipe> {
        self.skip_text_id(r)?;
        let template = r.read_ingredient()?;
        let input = r.read_ingredient()?;
        let addition = r.read_ingredient()?;
        let output = r.read_item(false)?;
        let block = r.read_string()?;
        let unique_id = r.read_var_u32()? as i32;

        Ok(SmithingTransformRecipe {
            header: self.generated_header(block),
            unique_id,
            template,
            input,
            addition,
            output,
        })
    }

    fn write_smithing_trim(&self, w: &mut PacketWriter, recipe: &SmithingTrimRecipe) {
        self.write_text_id(w, &recipe.header.id);
        w.write_ingredient(&recipe.template);
        w.write_ingredient(&recipe.input);
        w.write_ingredient(&recipe.addition);
        w.write_string(&recipe.header.block);
        w.write_var_i32(recipe.unique_id);
    }

    fn read_smithing_trim(&self, r: &mut PacketReader<'_>) -> Result<SmithingTrimRecipe> {
        self.skip_text_id(r)?;
        let template = r.read_ingredient()?;
        let input = r.read_ingredient()?;
        let addition = r.read_ingredient()?;
        let block = r.read_string()?;
        let unique_id = r.read_var_i32()?;

        Ok(SmithingTrimRecipe {
            header: self.generated_header(block),
            unique_id,
            template,
            input,
            addition,
        })
    }
}
