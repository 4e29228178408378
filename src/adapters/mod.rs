//! Adapters implementing the domain ports without a network.

pub mod memory;

pub use memory::InMemoryContentStore;
