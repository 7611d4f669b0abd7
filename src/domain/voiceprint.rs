#[derive(Debug, Clone, PartialEq)]
pub struct Voiceprint {
    pub values: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VoiceprintError {
    #[error("embedding dimensions differ: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
    #[error("degenerate embedding with zero norm")]
    DegenerateEmbedding,
    #[error("invalid voiceprint encoding: {0}")]
    InvalidEncoding(String),
}

impl Voiceprint {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn dimensions(&self) -> usize {
        self.values.len()
    }

    /// Cosine similarity in [-1, 1]: both vectors are scaled to unit
    /// Euclidean norm, then dotted. A zero-norm vector is an error, never a
    /// silent 0 or NaN.
    pub fn cosine_similarity(&self, other: &Self) -> Result<f32, VoiceprintError> {
        if self.values.len() != other.values.len() {
            return Err(VoiceprintError::DimensionMismatch {
                left: self.values.len(),
                right: other.values.len(),
            });
        }

        let norm_a: f32 = self.values.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = other.values.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return Err(VoiceprintError::DegenerateEmbedding);
        }

        let dot_product: f32 = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| a * b)
            .sum();

        Ok(dot_product / (norm_a * norm_b))
    }

    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, VoiceprintError> {
        if bytes.len() % 4 != 0 {
            return Err(VoiceprintError::InvalidEncoding(format!(
                "byte length {} is not a multiple of 4",
                bytes.len()
            )));
        }

        let values = bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        Ok(Self { values })
    }
}

/// Rescale a cosine similarity to the 0-100 reporting unit, rounded to two
/// decimals. Sign is preserved: a negative similarity reads back negative,
/// which is diagnostic of a wrong-speaker match.
pub fn match_percentage(similarity: f32) -> f32 {
    (similarity * 100.0 * 100.0).round() / 100.0
}
