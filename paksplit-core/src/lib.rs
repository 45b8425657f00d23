#![forbid(unsafe_code)]

pub mod error;

pub mod domain;
pub mod layout;
pub mod resolve;

pub mod split {
    pub mod plan;
    pub mod writer;
}

// Re-exports: stable API surface
pub use domain::{PartRow, SplitReport};
pub use layout::PART_LIMIT;
pub use split::writer::{SplitMode, SplitOptions, split};
