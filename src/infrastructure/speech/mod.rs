mod http_speech_engine;

pub use http_speech_engine::HttpSpeechEngine;
