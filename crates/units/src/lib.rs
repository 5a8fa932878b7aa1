//! Measurement-unit domain module.
//!
//! This crate owns the unit catalog: a hierarchy of measurement units where
//! each unit optionally points at a parent with a conversion factor
//! (quantity-in-unit × factor = quantity-in-parent). Pure domain logic with
//! no IO or storage concerns; callers snapshot their unit rows into a
//! [`UnitGraph`] and hand it to the engines.

pub mod convert;
pub mod graph;
pub mod unit;

pub use convert::UnitConverter;
pub use graph::{MAX_CHAIN_DEPTH, UnitError, UnitGraph};
pub use unit::{Unit, UnitId, UnitKind};
