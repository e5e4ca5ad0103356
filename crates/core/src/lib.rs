//! Domain logic for the portfolio backend.
//!
//! Everything in this crate is pure and synchronous: no I/O, no store
//! access. The HTTP layer and the store layer build on these types.

pub mod collection;
pub mod compression;
pub mod embed;
pub mod encoding;
pub mod error;
pub mod icon;
pub mod message;
pub mod project;
pub mod theme;
pub mod types;
