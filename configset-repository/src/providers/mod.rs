//! Config file provider implementations.

mod directory;

pub use directory::DirectoryConfigProvider;
