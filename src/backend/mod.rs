pub mod error;
pub mod export;
pub mod parser;
pub mod pipeline;
pub mod segment;
pub mod settings;
