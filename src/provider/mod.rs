//! Rate provider abstractions and implementations.
//!
//! This module contains:
//! - The `RateProvider` trait that all providers implement
//! - Concrete provider implementations (BNM, Fixer)
//!
//! Each provider wraps one external source and owns a per-date cache of the
//! full fetched rate set. There is no fallback between providers; the caller
//! picks one through the factory and every failure surfaces directly.

mod traits;

// Provider implementations
pub mod bnm;
pub mod fixer;

// Re-exports
pub use traits::RateProvider;
