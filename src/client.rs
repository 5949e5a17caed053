//! Text API client.
//!
//! Keep the public surface small and predictable: one method per operation
//! (strict and lenient), all routed through a single generic dispatch.
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;
mod endpoints;
pub mod signals;

pub use builder::TextApiClientBuilder;
pub use core::TextApiClient;
pub use signals::SignalsSnapshot;
