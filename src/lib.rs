//! Bookshelf application library
//!
//! Application modules for the bookshelf service. The binary in `main.rs`
//! wires them into the kernel registry and the HTTP facade.

pub mod modules;

pub use modules::books::store::{BookRepository, InMemoryBookStore};
pub use modules::register_all;
