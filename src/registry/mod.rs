//! Category registry: name -> example phrases -> centroid.
//!
//! Categories are kept in insertion order; ranking uses that order to break
//! score ties. Centroids are recomputed synchronously whenever a category is
//! added or replaced and dropped with the category on removal, so a stored
//! centroid always reflects the stored examples.

mod error;
mod types;


pub use error::RegistryError;
pub use types::Category;

use tracing::{debug, info};

use crate::constants::validate_embedding_dim;
use crate::corpus::Corpus;
use crate::embedding::Encoder;

/// Ordered set of [`Category`] values sharing one embedding dimension.
#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from seed data, one batched encode per label.
    pub fn from_seed(encoder: &dyn Encoder, seed: &Corpus) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for (name, examples) in seed.iter() {
            registry.add_category(encoder, name, examples.to_vec())?;
        }

        info!(
            categories = registry.len(),
            encoder = encoder.name(),
            "Category registry built from seed"
        );
        Ok(registry)
    }

    /// Encodes `examples` and stores the category, replacing any category of
    /// the same name (the replacement keeps the original position).
    pub fn add_category(
        &mut self,
        encoder: &dyn Encoder,
        name: impl Into<String>,
        examples: Vec<String>,
    ) -> Result<&Category, RegistryError> {
        let category = Category::build(encoder, name, examples)?;
        self.insert(category)
    }

    /// Stores a prebuilt category (see [`Category::build`]).
    pub fn insert(&mut self, category: Category) -> Result<&Category, RegistryError> {
        if let Some(expected) = self.dimension_excluding(category.name()) {
            validate_embedding_dim(category.dimension(), expected).map_err(|source| {
                RegistryError::Dimension {
                    name: category.name().to_string(),
                    source,
                }
            })?;
        }

        let index = match self.position(category.name()) {
            Some(index) => {
                debug!(
                    category = category.name(),
                    examples = category.examples().len(),
                    "Replacing existing category"
                );
                self.categories[index] = category;
                index
            }
            None => {
                debug!(
                    category = category.name(),
                    examples = category.examples().len(),
                    "Adding category"
                );
                self.categories.push(category);
                self.categories.len() - 1
            }
        };

        Ok(&self.categories[index])
    }

    /// Removes a category; returns `false` (and changes nothing) if absent.
    pub fn remove_category(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.categories.remove(index);
                debug!(category = name, "Removed category");
                true
            }
            None => false,
        }
    }

    /// Category names in insertion order.
    pub fn categories(&self) -> Vec<&str> {
        self.categories.iter().map(Category::name).collect()
    }

    /// Example phrases for `name`, or an empty slice if absent.
    pub fn examples(&self, name: &str) -> &[String] {
        self.get(name).map(Category::examples).unwrap_or(&[])
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Iterates categories in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Shared centroid dimension, `None` while empty.
    pub fn dimension(&self) -> Option<usize> {
        self.categories.first().map(Category::dimension)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.name() == name)
    }

    fn dimension_excluding(&self, name: &str) -> Option<usize> {
        self.categories
            .iter()
            .find(|c| c.name() != name)
            .map(Category::dimension)
    }
}
