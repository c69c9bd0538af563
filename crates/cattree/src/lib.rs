//! Cattree - pedigree analysis for cat breeding records.
//!
//! This crate builds an ancestry graph from flat `(cat, mother, father)`
//! records and computes inbreeding and relationship coefficients with
//! Wright's path method. It provides both a library and the `cattree` CLI.
//!
//! # Example
//!
//! ```
//! use cattree::domain::{CatId, PedigreeRecord};
//! use cattree::graph::AncestryGraph;
//! use cattree::inbreeding::inbreeding_coefficient;
//!
//! let graph = AncestryGraph::build([
//!     PedigreeRecord::with_parents("kit", "sister", "brother"),
//!     PedigreeRecord::with_parents("sister", "dam", "sire"),
//!     PedigreeRecord::with_parents("brother", "dam", "sire"),
//! ]);
//!
//! assert_eq!(inbreeding_coefficient(&graph, &CatId::new("kit")), 0.25);
//! ```

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod config;
pub mod domain;
pub mod error;
pub mod graph;
pub mod inbreeding;
pub mod loader;
pub mod paths;

// Public CLI modules (needed by binary)
pub mod cli;
pub mod output;

pub use error::{Error, Result};
pub use graph::{AncestryGraph, PedigreeView};
pub use inbreeding::{inbreeding_coefficient, InbreedingCalculator, InbreedingReport};
