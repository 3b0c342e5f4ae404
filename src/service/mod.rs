pub mod catalog;
pub mod llm;
pub mod mapper;
pub mod parser;
pub mod validation;

pub use llm::LlmClient;
pub use parser::ParserService;
