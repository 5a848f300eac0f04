//! LLM client implementations.

mod openai;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

pub use openai::OpenAi;
