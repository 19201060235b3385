//! File-backed implementations of the store traits.

pub mod image_store;
