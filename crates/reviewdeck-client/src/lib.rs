//! LLM provider dispatcher for reviewdeck
//!
//! Routes a generation request to an OpenAI- or Gemini-compatible API,
//! extracts the generated text from whatever response shape comes back,
//! and normalizes every failure into a `GenerationResult` error.

pub mod dispatch;
pub mod error;
pub mod extract;
pub mod gemini;
pub mod openai;
pub mod transport;

pub use dispatch::Dispatcher;
pub use error::ClientError;
pub use transport::{HttpRequest, HttpTransport, Transport};
