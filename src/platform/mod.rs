//! Platform abstraction layer
//!
//! The game loop, rendering and input live in the browser. This layer
//! exposes the director to that loop and wires up logging.

#[cfg(target_arch = "wasm32")]
pub mod web;
