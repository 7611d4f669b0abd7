mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AudioSettings, AuthSettings, DatabaseSettings, EmbeddingSettings, LoggingSettings,
    ScratchSettings, ServerSettings, Settings, SpeechSettings,
};
