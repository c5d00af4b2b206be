//! Concrete [`ChatProvider`](crate::chat::ChatProvider) implementations.

pub mod openai_compatible;

pub use openai_compatible::OpenAICompatible;
