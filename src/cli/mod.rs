pub mod migrate;
pub mod reaction;
pub mod server;
