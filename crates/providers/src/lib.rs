pub mod corrector;
pub mod entropy;
pub mod error;
pub mod image;
pub mod openai;
pub mod responder;
pub mod router;
pub mod transport;

#[cfg(test)]
mod fake;

pub use corrector::{basic_spell_fix, Corrector};
pub use error::ProviderError;
pub use openai::OpenAIClient;
pub use responder::Responder;
pub use router::{KeywordRouter, RoutingRule};
pub use transport::{CompletionRequest, CompletionTransport};
