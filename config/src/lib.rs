//! Shared configuration structures for the enrichment and extraction crates.
//!
//! Configuration is supplied by the owning stream runtime, deserialized from
//! whatever medium it uses, and validated before any component is built.

pub mod shared;
