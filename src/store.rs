use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::recipe::{Recipe, RecipeId, Step};

/// Key-value persistence for the recipe list. The engine never touches
/// this; only the host does, before and after a run.
pub trait RecipeStore {
    fn load(&self) -> Result<Vec<Recipe>, StoreError>;
    fn save(&self, recipes: &[Recipe]) -> Result<(), StoreError>;
}

/// Recipes kept as one pretty-printed JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: ~/.local/share/recipe-timer/recipes.json
    pub fn default_path() -> PathBuf {
        let mut p = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("recipe-timer");
        p.push("recipes.json");
        p
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl RecipeStore for JsonStore {
    /// A missing file is an empty recipe list.
    fn load(&self) -> Result<Vec<Recipe>, StoreError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_err(e)),
        };
        serde_json::from_str(&data).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, recipes: &[Recipe]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| self.io_err(e))?;
        }
        let data = serde_json::to_string_pretty(recipes).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, data).map_err(|e| self.io_err(e))?;
        log::debug!("Saved {} recipes to {}", recipes.len(), self.path.display());
        Ok(())
    }
}

/// In-memory recipe list with the host's editing operations.
#[derive(Debug, Clone, Default)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    pub fn load(store: &dyn RecipeStore) -> Result<Self, StoreError> {
        Ok(Self {
            recipes: store.load()?,
        })
    }

    pub fn save(&self, store: &dyn RecipeStore) -> Result<(), StoreError> {
        store.save(&self.recipes)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn find(&self, id: RecipeId) -> Result<&Recipe, StoreError> {
        self.recipes
            .iter()
            .find(|r| r.id == id)
            .ok_or(StoreError::UnknownRecipe(id))
    }

    /// Add a new recipe under a fresh id and return that id.
    pub fn add(&mut self, name: &str, steps: Vec<Step>) -> Result<RecipeId, StoreError> {
        let id = RecipeId::generate(self.recipes.iter().map(|r| &r.id));
        let recipe = Self::checked(Recipe::new(id, name, steps))?;
        self.recipes.push(recipe);
        Ok(id)
    }

    /// Replace an existing recipe in place, keeping its position.
    pub fn update(&mut self, recipe: Recipe) -> Result<(), StoreError> {
        let recipe = Self::checked(recipe)?;
        let slot = self
            .recipes
            .iter_mut()
            .find(|r| r.id == recipe.id)
            .ok_or(StoreError::UnknownRecipe(recipe.id))?;
        *slot = recipe;
        Ok(())
    }

    pub fn remove(&mut self, id: RecipeId) -> Result<Recipe, StoreError> {
        let index = self
            .recipes
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::UnknownRecipe(id))?;
        Ok(self.recipes.remove(index))
    }

    fn checked(recipe: Recipe) -> Result<Recipe, StoreError> {
        let recipe = recipe.sanitized();
        if recipe.steps.is_empty() {
            return Err(StoreError::EmptyRecipe(recipe.name));
        }
        Ok(recipe)
    }
}
