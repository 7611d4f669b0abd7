use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use ort::session::Session;
use ort::value::Tensor;
use tokio::sync::{Mutex, OnceCell};

use crate::application::ports::{EmbeddingError, VoiceEmbedder};
use crate::domain::{StagedAudio, Voiceprint};
use crate::infrastructure::audio::audio_decoder::{decode_to_mono_pcm, fit_analysis_window};

// The ONNX session is heavyweight, so exactly one is created per process,
// on first use, and lives for the process lifetime.
static MODEL: OnceCell<Arc<LoadedModel>> = OnceCell::const_new();

struct LoadedModel {
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
}

/// Speaker-embedding extraction backed by a local ONNX model. Preprocessing
/// is fixed: decode to mono PCM at the target rate, then frame to exactly
/// the analysis window the model expects (truncate longer input, zero-pad
/// shorter).
pub struct OnnxVoiceEmbedder {
    model_path: PathBuf,
    dimension: usize,
    sample_rate: u32,
    window_len: usize,
}

impl OnnxVoiceEmbedder {
    pub fn new(
        model_path: impl Into<PathBuf>,
        dimension: usize,
        sample_rate: u32,
        window_secs: u32,
    ) -> Self {
        Self {
            model_path: model_path.into(),
            dimension,
            sample_rate,
            window_len: (sample_rate * window_secs) as usize,
        }
    }

    async fn model(&self) -> Result<&Arc<LoadedModel>, EmbeddingError> {
        MODEL
            .get_or_try_init(|| async {
                tracing::info!(
                    model = %self.model_path.display(),
                    "Loading speaker embedding model"
                );

                let session = Session::builder()
                    .map_err(|e| EmbeddingError::Model(format!("session builder: {}", e)))?
                    .with_intra_threads(2)
                    .map_err(|e| EmbeddingError::Model(format!("threads: {}", e)))?
                    .commit_from_file(&self.model_path)
                    .map_err(|e| {
                        EmbeddingError::Model(format!(
                            "load {}: {}",
                            self.model_path.display(),
                            e
                        ))
                    })?;

                let input_name = session
                    .inputs()
                    .first()
                    .map(|i| i.name().to_string())
                    .ok_or_else(|| EmbeddingError::Model("model has no inputs".to_string()))?;
                let output_name = session
                    .outputs()
                    .first()
                    .map(|o| o.name().to_string())
                    .ok_or_else(|| EmbeddingError::Model("model has no outputs".to_string()))?;

                tracing::info!("Speaker embedding model loaded successfully");

                Ok(Arc::new(LoadedModel {
                    session: Mutex::new(session),
                    input_name,
                    output_name,
                }))
            })
            .await
    }
}

#[async_trait]
impl VoiceEmbedder for OnnxVoiceEmbedder {
    async fn embed(&self, audio: &StagedAudio) -> Result<Voiceprint, EmbeddingError> {
        let data = tokio::fs::read(&audio.path)
            .await
            .map_err(|e| EmbeddingError::Preprocessing(format!("read staged audio: {}", e)))?;

        let pcm = decode_to_mono_pcm(&data, self.sample_rate)?;
        let window = fit_analysis_window(pcm, self.window_len);

        let model = self.model().await?;

        let input = Tensor::from_array(([1usize, self.window_len], window))
            .map_err(|e| EmbeddingError::Model(format!("input tensor: {}", e)))?;

        let mut session = model.session.lock().await;
        let outputs = session
            .run(ort::inputs![model.input_name.as_str() => input])
            .map_err(|e| EmbeddingError::Model(format!("inference: {}", e)))?;

        let (_, values) = outputs[model.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| EmbeddingError::Model(format!("output tensor: {}", e)))?;
        let values = values.to_vec();
        drop(outputs);
        drop(session);

        if values.len() != self.dimension {
            return Err(EmbeddingError::Model(format!(
                "expected {}-dimensional embedding, got {}",
                self.dimension,
                values.len()
            )));
        }

        tracing::debug!(dimensions = values.len(), "Voice embedding extracted");

        Ok(Voiceprint::new(values))
    }
}
