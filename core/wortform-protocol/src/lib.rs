#![no_std] // Critical for WASM/Embedded compatibility

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod grammar;
pub mod ids;

// Re-export core types for convenience
pub use grammar::*;
pub use ids::EntryId;

pub mod model;
pub use model::*;
