pub mod cellar;
pub mod config;
pub mod errors;
pub mod mcp;
pub mod resolution;
pub mod sparql;
pub mod types;
