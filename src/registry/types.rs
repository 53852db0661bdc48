use serde::Serialize;

use crate::constants::validate_embedding_dim;
use crate::embedding::Encoder;

use super::error::RegistryError;

/// A named intent with its example phrases and their mean embedding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    name: String,
    examples: Vec<String>,
    #[serde(skip)]
    centroid: Vec<f32>,
}

impl Category {
    /// Encodes `examples` in one batch and averages them into the centroid.
    pub fn build(
        encoder: &dyn Encoder,
        name: impl Into<String>,
        examples: Vec<String>,
    ) -> Result<Self, RegistryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if examples.is_empty() {
            return Err(RegistryError::EmptyExamples { name });
        }

        let texts: Vec<&str> = examples.iter().map(String::as_str).collect();
        let vectors = encoder.encode(&texts)?;
        if vectors.len() != examples.len() {
            return Err(RegistryError::EmbeddingCount {
                expected: examples.len(),
                actual: vectors.len(),
            });
        }

        let centroid = mean_vector(&name, &vectors, encoder.dimension())?;

        Ok(Self {
            name,
            examples,
            centroid,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    pub fn centroid(&self) -> &[f32] {
        &self.centroid
    }

    pub fn dimension(&self) -> usize {
        self.centroid.len()
    }

    /// Euclidean norm of the centroid.
    pub fn norm(&self) -> f32 {
        self.centroid
            .iter()
            .map(|&x| f64::from(x) * f64::from(x))
            .sum::<f64>()
            .sqrt() as f32
    }
}

/// Elementwise mean; every vector must have length `dimension`.
fn mean_vector(name: &str, vectors: &[Vec<f32>], dimension: usize) -> Result<Vec<f32>, RegistryError> {
    let mut sum = vec![0.0f32; dimension];

    for vector in vectors {
        validate_embedding_dim(vector.len(), dimension).map_err(|source| {
            RegistryError::Dimension {
                name: name.to_string(),
                source,
            }
        })?;
        for (acc, value) in sum.iter_mut().zip(vector) {
            *acc += value;
        }
    }

    let count = vectors.len() as f32;
    for value in sum.iter_mut() {
        *value /= count;
    }
    Ok(sum)
}
