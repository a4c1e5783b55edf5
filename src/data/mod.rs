//! Data layer: synthetic frame, train/test split and CSV export.
//!
//! Architecture:
//! ```text
//!   seed, samples
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ generate │  seeded draws → SampleFrame
//!   └──────────┘
//!        │
//!        ├──────────────► export (optional CSV)
//!        ▼
//!   ┌──────────┐
//!   │  split   │  shuffled indices → TrainTestSplit
//!   └──────────┘
//! ```

pub mod export;
pub mod generate;
pub mod model;
pub mod split;
