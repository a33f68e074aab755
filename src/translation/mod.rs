mod client;
mod error;
mod prompt;

pub use client::{
    ClientSettings, DEFAULT_ENDPOINT, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT, TranslationClient, TranslationRequest, Translator,
};
pub use error::TranslationError;
pub use prompt::build_system_prompt;
