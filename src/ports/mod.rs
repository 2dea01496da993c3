//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the application and external systems (storage).

mod storage;

pub use storage::{ScreeningPage, Storage};
