//! Ordered recipe catalogue.
//!
//! Order matters to the client: it drives recipe book layout and, together
//! with `priority`, which of several matching recipes wins. The collection
//! therefore never reorders or deduplicates what it is given.

use crate::protocol::recipe::Recipe;
use crate::protocol::recipe_type::RecipeKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeCollection {
    recipes: Vec<Recipe>,
}

impl RecipeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            recipes: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, recipe: impl Into<Recipe>) {
        self.recipes.push(recipe.into());
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.recipes.iter()
    }

    pub fn as_slice(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn into_vec(self) -> Vec<Recipe> {
        self.recipes
    }

    /// Recipes of one kind, in catalogue order.
    pub fn of_kind(&self, kind: RecipeKind) -> impl Iterator<Item = &Recipe> + '_ {
        self.recipes.iter().filter(move |r| r.kind() == kind)
    }
}

impl From<Vec<Recipe>> for RecipeCollection {
    fn from(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }
}

impl FromIterator<Recipe> for RecipeCollection {
    fn from_iter<I: IntoIterator<Item = Recipe>>(iter: I) -> Self {
        Self {
            recipes: iter.into_iter().collect(),
        }
    }
}

impl Extend<Recipe> for RecipeCollection {
    fn extend<I: IntoIterator<Item = Recipe>>(&mut self, iter: I) {
        self.recipes.extend(iter);
    }
}

impl IntoIterator for RecipeCollection {
    type Item = Recipe;
    type IntoIter = std::vec::IntoIter<Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipes.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecipeCollection {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipes.iter()
    }
}
