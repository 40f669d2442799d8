pub mod config;
pub mod correlate;
pub mod dialect;
pub mod emit;
pub mod errors;
pub mod indexer;
pub mod location;
pub mod moniker;
pub mod protocol;
