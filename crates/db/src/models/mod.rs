//! Typed views over documents and the payloads written back.
//!
//! Reads are tolerant: every field has a default, and the decoders in
//! [`lenient`](crate::lenient) also absorb `null` and mistyped values, so an
//! entry written through the generic API still decodes. Each submodule
//! contains:
//! - A `Deserialize` entity struct decoded from a [`Document`](crate::Document)
//! - A `Serialize` input struct converted to document fields on write

pub mod message;
pub mod profile;
pub mod project;
pub mod service;
pub mod session;
pub mod settings;
