//! Recipe formulation reference data.
//!
//! A formulation describes one base batch of a recipe: the total cooked mass
//! it yields and the per-ingredient masses that go into it. All production
//! scaling is relative to these base batches. Formulations are loaded once at
//! process start from a JSON document and are immutable afterwards - editing
//! one is an operator action (change the file, restart), never user-driven.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Purchasing category for an ingredient.
///
/// Stored explicitly on each formulation entry. Entries without a tag
/// deserialize to `Uncategorized`, which renders as its own clearly-labeled
/// bucket - an untagged ingredient must never be silently filed under
/// supplements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IngredientCategory {
    Protein,
    Vegetable,
    Grain,
    Oil,
    Supplement,
    #[default]
    Uncategorized,
}

impl<'de> Deserialize<'de> for IngredientCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Unknown tags map to Uncategorized rather than failing the load
        let tag = String::deserialize(deserializer)?;
        Ok(match tag.as_str() {
            "protein" => Self::Protein,
            "vegetable" => Self::Vegetable,
            "grain" => Self::Grain,
            "oil" => Self::Oil,
            "supplement" => Self::Supplement,
            _ => Self::Uncategorized,
        })
    }
}

impl IngredientCategory {
    /// Fixed display order for shopping lists: protein, vegetable/fruit,
    /// grain, oil, supplement, then anything untagged.
    #[must_use]
    pub const fn display_order(self) -> u8 {
        match self {
            Self::Protein => 0,
            Self::Vegetable => 1,
            Self::Grain => 2,
            Self::Oil => 3,
            Self::Supplement => 4,
            Self::Uncategorized => 5,
        }
    }

    /// Human-readable label for exports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Protein => "Protein",
            Self::Vegetable => "Vegetable/Fruit",
            Self::Grain => "Grain",
            Self::Oil => "Oil",
            Self::Supplement => "Supplement/Premix",
            Self::Uncategorized => "Uncategorized",
        }
    }
}

/// One ingredient line of a base batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientSpec {
    /// Display name; also the consolidation merge key (exact match).
    pub name: String,
    /// Mass in grams required for one base batch.
    pub base_grams: f64,
    /// Purchasing category.
    #[serde(default)]
    pub category: IngredientCategory,
}

/// A recipe's base batch formulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeFormulation {
    /// Unique recipe name, as sold on subscriptions.
    pub recipe_name: String,
    /// Total cooked mass (grams) produced by one base batch run.
    pub base_batch_mass_grams: f64,
    /// Energy density, informational.
    pub kcal_per_kg: f64,
    /// Marks placeholder formulations that still need kitchen verification.
    #[serde(default)]
    pub estimated: bool,
    /// Per-ingredient masses for one base batch.
    pub ingredients: Vec<IngredientSpec>,
}

impl RecipeFormulation {
    /// Sum of all ingredient masses. Cooked yield may differ slightly from
    /// the raw input sum, so this only approximately equals
    /// `base_batch_mass_grams`.
    #[must_use]
    pub fn ingredient_mass_grams(&self) -> f64 {
        self.ingredients.iter().map(|i| i.base_grams).sum()
    }
}

/// On-disk shape of the formulations document.
#[derive(Debug, Deserialize)]
struct FormulationFile {
    recipes: Vec<RecipeFormulation>,
}

/// Errors loading the formulation table.
#[derive(Debug, thiserror::Error)]
pub enum FormulationError {
    #[error("failed to read formulations file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse formulations file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("duplicate recipe name in formulations file: {0}")]
    DuplicateRecipe(String),

    #[error("formulations file contains no recipes")]
    Empty,
}

/// Keyed lookup of recipe formulations.
///
/// Process-wide state with an init-only lifecycle: loaded once at startup,
/// never mutated at runtime.
#[derive(Debug, Clone)]
pub struct FormulationTable {
    recipes: HashMap<String, RecipeFormulation>,
}

impl FormulationTable {
    /// Load the table from a JSON document.
    ///
    /// Logs a warning for recipes marked `estimated` and for formulations
    /// whose ingredient masses drift noticeably from the stated batch yield.
    ///
    /// # Errors
    ///
    /// Returns `FormulationError` if the file cannot be read or parsed, is
    /// empty, or contains duplicate recipe names.
    pub fn load(path: &Path) -> Result<Self, FormulationError> {
        let display_path = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| FormulationError::Io {
            path: display_path.clone(),
            source,
        })?;
        let file: FormulationFile =
            serde_json::from_str(&raw).map_err(|source| FormulationError::Parse {
                path: display_path,
                source,
            })?;

        Self::from_recipes(file.recipes)
    }

    /// Build a table from in-memory formulations (used by tests and seeds).
    ///
    /// # Errors
    ///
    /// Returns `FormulationError` if the list is empty or contains duplicate
    /// recipe names.
    pub fn from_recipes(recipes: Vec<RecipeFormulation>) -> Result<Self, FormulationError> {
        if recipes.is_empty() {
            return Err(FormulationError::Empty);
        }

        let mut map = HashMap::with_capacity(recipes.len());
        for recipe in recipes {
            if recipe.estimated {
                tracing::warn!(
                    recipe = %recipe.recipe_name,
                    "formulation is marked estimated; verify before production use"
                );
            }
            let drift = (recipe.ingredient_mass_grams() - recipe.base_batch_mass_grams).abs();
            if recipe.base_batch_mass_grams > 0.0 && drift / recipe.base_batch_mass_grams > 0.05 {
                tracing::warn!(
                    recipe = %recipe.recipe_name,
                    ingredient_grams = recipe.ingredient_mass_grams(),
                    batch_grams = recipe.base_batch_mass_grams,
                    "ingredient masses drift more than 5% from stated batch yield"
                );
            }
            let name = recipe.recipe_name.clone();
            if map.insert(name.clone(), recipe).is_some() {
                return Err(FormulationError::DuplicateRecipe(name));
            }
        }

        Ok(Self { recipes: map })
    }

    /// Look up a recipe's formulation by exact name.
    #[must_use]
    pub fn get(&self, recipe_name: &str) -> Option<&RecipeFormulation> {
        self.recipes.get(recipe_name)
    }

    /// Number of recipes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether the table is empty (cannot happen after a successful load).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Recipe names, sorted for stable display.
    #[must_use]
    pub fn recipe_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.recipes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
