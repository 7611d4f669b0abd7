mod onnx_voice_embedder;

pub use onnx_voice_embedder::OnnxVoiceEmbedder;
