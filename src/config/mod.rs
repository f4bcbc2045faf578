pub mod gemini;

pub use gemini::{mock_mode, GeminiConfig};
