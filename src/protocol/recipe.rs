//! # Recipe Records
//!
//! The data model for one entry of the recipe catalogue.
//!
//! [`Recipe`] is a closed sum over the seven record layouts. Fields every
//! layout shares (`id`, `block`, `priority`) live in an embedded
//! [`RecipeHeader`]; the kind is never stored, it is implied by the variant.
//! Records are plain values: build them once, then encode as often as needed.

use crate::error::{ProtocolError, Result};
use crate::protocol::ingredient::Ingredient;
use crate::protocol::item::Item;
use crate::protocol::recipe_type::RecipeKind;
use crate::utils::id::IdGenerator;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fields common to every recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeHeader {
    pub id: Uuid,
    /// Crafting station tag, e.g. `crafting_table` or `furnace`. May be empty.
    pub block: String,
    /// Ordering hint when several recipes match the same inputs.
    pub priority: i32,
}

impl RecipeHeader {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            block: String::new(),
            priority: 0,
        }
    }

    /// Header with an id drawn from `ids`.
    pub fn generated(ids: &dyn IdGenerator) -> Self {
        Self::new(ids.next_id())
    }

    pub fn with_block(mut self, block: impl Into<String>) -> Self {
        self.block = block.into();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapelessRecipe {
    pub header: RecipeHeader,
    pub unique_id: i32,
    pub inputs: Vec<Ingredient>,
    pub results: Vec<Item>,
}

/// A recipe whose ingredients must be laid out in a fixed grid.
///
/// `inputs` is stored row-major and must hold exactly `width * height`
/// entries. The fields are public, so the invariant is re-checked by the
/// encoder; [`ShapedRecipe::new`] checks it up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapedRecipe {
    pub header: RecipeHeader,
    pub unique_id: i32,
    pub width: i32,
    pub height: i32,
    pub inputs: Vec<Ingredient>,
    pub results: Vec<Item>,
}

impl ShapedRecipe {
    pub fn new(
        header: RecipeHeader,
        unique_id: i32,
        width: i32,
        height: i32,
        inputs: Vec<Ingredient>,
        results: Vec<Item>,
    ) -> Result<Self> {
        let recipe = Self {
            header,
            unique_id,
            width,
            height,
            inputs,
            results,
        };
        recipe.validate_shape()?;
        Ok(recipe)
    }

    /// Number of grid slots implied by the dimensions, or `None` when they
    /// are negative or overflow.
    pub fn slot_count(width: i32, height: i32) -> Option<usize> {
        let width = usize::try_from(width).ok()?;
        let height = usize::try_from(height).ok()?;
        width.checked_mul(height)
    }

    /// Slot count for error reports: 0 for negative dimensions, saturated on
    /// overflow.
    pub(crate) fn reported_slots(width: i32, height: i32) -> usize {
        if width < 0 || height < 0 {
            return 0;
        }
        Self::slot_count(width, height).unwrap_or(usize::MAX)
    }

    /// Fail with [`ProtocolError::MalformedShape`] unless the grid matches
    /// its dimensions.
    pub fn validate_shape(&self) -> Result<()> {
        self.validate_shape_with(i32::MAX)
    }

    /// Like [`ShapedRecipe::validate_shape`], and also reject a width or
    /// height above `max_dimension`.
    pub fn validate_shape_with(&self, max_dimension: i32) -> Result<()> {
        match Self::slot_count(self.width, self.height) {
            Some(slots)
                if slots == self.inputs.len()
                    && self.width <= max_dimension
                    && self.height <= max_dimension =>
            {
                Ok(())
            }
            _ => Err(ProtocolError::MalformedShape {
                width: self.width,
                height: self.height,
                slots: self.inputs.len(),
            }),
        }
    }

    /// Ingredient at `row`, `column`, if inside the grid.
    pub fn slot(&self, row: usize, column: usize) -> Option<&Ingredient> {
        let width = usize::try_from(self.width).ok()?;
        if column >= width {
            return None;
        }
        self.inputs.get(row.checked_mul(width)?.checked_add(column)?)
    }
}

/// Marker for a recipe the client resolves itself (repair, map cloning,
/// banner patterns and the like). Carries no payload beyond its ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiRecipe {
    pub header: RecipeHeader,
    pub unique_id: i32,
}

/// Furnace-style recipe. Shared by the plain and data-carrying layouts; only
/// the latter puts `input.metadata` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmeltingRecipe {
    pub header: RecipeHeader,
    pub input: Item,
    pub result: Item,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmithingTransformRecipe {
    pub header: RecipeHeader,
    pub unique_id: i32,
    pub template: Ingredient,
    pub input: Ingredient,
    pub addition: Ingredient,
    pub output: Item,
}

/// Armor trim. The result is cosmetic and computed by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmithingTrimRecipe {
    pub header: RecipeHeader,
    pub unique_id: i32,
    pub template: Ingredient,
    pub input: Ingredient,
    pub addition: Ingredient,
}

/// One entry of the recipe catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipe {
    Shapeless(ShapelessRecipe),
    Shaped(ShapedRecipe),
    Multi(MultiRecipe),
    Smelting(SmeltingRecipe),
    SmeltingData(SmeltingRecipe),
    SmithingTransform(SmithingTransformRecipe),
    SmithingTrim(SmithingTrimRecipe),
}

impl Recipe {
    pub fn kind(&self) -> RecipeKind {
        match self {
            Recipe::Shapeless(_) => RecipeKind::Shapeless,
            Recipe::Shaped(_) => RecipeKind::Shaped,
            Recipe::Multi(_) => RecipeKind::Multi,
            Recipe::Smelting(_) => RecipeKind::Smelting,
            Recipe::SmeltingData(_) => RecipeKind::SmeltingData,
            Recipe::SmithingTransform(_) => RecipeKind::SmithingTransform,
            Recipe::SmithingTrim(_) => RecipeKind::SmithingTrim,
        }
    }

    pub fn header(&self) -> &RecipeHeader {
        match self {
            Recipe::Shapeless(r) => &r.header,
            Recipe::Shaped(r) => &r.header,
            Recipe::Multi(r) => &r.header,
            Recipe::Smelting(r) | Recipe::SmeltingData(r) => &r.header,
            Recipe::SmithingTransform(r) => &r.header,
            Recipe::SmithingTrim(r) => &r.header,
        }
    }

    pub fn header_mut(&mut self) -> &mut RecipeHeader {
        match self {
            Recipe::Shapeless(r) => &mut r.header,
            Recipe::Shaped(r) => &mut r.header,
            Recipe::Multi(r) => &mut r.header,
            Recipe::Smelting(r) | Recipe::SmeltingData(r) => &mut r.header,
            Recipe::SmithingTransform(r) => &mut r.header,
            Recipe::SmithingTrim(r) => &mut r.header,
        }
    }

    /// Whether the record's wire layout carries its structured id. Records
    /// without one get a fresh id when decoded.
    pub fn has_wire_id(&self) -> bool {
        matches!(
            self,
            Recipe::Shapeless(_) | Recipe::Shaped(_) | Recipe::Multi(_)
        )
    }

    pub fn id(&self) -> Uuid {
        self.header().id
    }

    pub fn block(&self) -> &str {
        &self.header().block
    }

    pub fn priority(&self) -> i32 {
        self.header().priority
    }

    /// Network id used by the client to refer back to this recipe. Smelting
    /// recipes have none.
    pub fn unique_id(&self) -> Option<i32> {
        match self {
            Recipe::Shapeless(r) => Some(r.unique_id),
            Recipe::Shaped(r) => Some(r.unique_id),
            Recipe::Multi(r) => Some(r.unique_id),
            Recipe::Smelting(_) | Recipe::SmeltingData(_) => None,
            Recipe::SmithingTransform(r) => Some(r.unique_id),
            Recipe::SmithingTrim(r) => Some(r.unique_id),
        }
    }
}

impl From<ShapelessRecipe> for Recipe {
    fn from(recipe: ShapelessRecipe) -> Self {
        Recipe::Shapeless(recipe)
    }
}

impl From<ShapedRecipe> for Recipe {
    fn from(recipe: ShapedRecipe) -> Self {
        Recipe::Shaped(recipe)
    }
}

impl From<MultiRecipe> for Recipe {
    fn from(recipe: MultiRecipe) -> Self {
        Recipe::Multi(recipe)
    }
}

impl From<SmithingTransformRecipe> for Recipe {
    fn from(recipe: SmithingTransformRecipe) -> Self {
        Recipe::SmithingTransform(recipe)
    }
}

impl From<SmithingTrimRecipe> for Recipe {
    fn from(recipe: SmithingTrimRecipe) -> Self {
        Recipe::SmithingTrim(recipe)
    }
}
