//! Loader services

pub mod authors;
pub mod bootstrap;
pub mod works;

pub use authors::AuthorLoader;
pub use bootstrap::{InitialLoad, LoadPhase};
pub use works::WorkLoader;
