//! Data layer: core types, loading, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!  .xlsx / .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → RawRecord rows
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │   age     │  clean + bucket ages (once)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ Dataset   │  Vec<Record>, option lists
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  enslaver / data source selection → record view
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate │  counts per enslaver, descriptor, age group
//!   └───────────┘
//! ```

pub mod age;
pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
