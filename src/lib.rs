//! Treehash: Versioned Canonical Hashing for Priority-Annotated Trees
//!
//! Represents JSON-like data as immutable, ordered, priority-annotated node
//! trees and computes a reproducible hash for any subtree so that two sides of
//! a synchronization can detect divergence cheaply.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod snapshot;
