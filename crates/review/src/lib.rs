pub mod reaction;

pub use reaction::*;
