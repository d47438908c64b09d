pub mod ollama;
pub mod traits;

pub use ollama::OllamaProvider;
pub use traits::Provider;
