use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::unit::{Unit, UnitId, UnitKind};

/// Longest parent chain the graph will walk before declaring the hierarchy
/// corrupt. Real catalogs are two or three levels deep; the visited set
/// already guarantees termination, this bounds pathological data.
pub const MAX_CHAIN_DEPTH: usize = 64;

/// Unit hierarchy / conversion error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnitError {
    /// Walking the parent chain revisited a unit, or an edit would create a
    /// loop.
    #[error("unit hierarchy cycle detected at unit {0}")]
    Cycle(UnitId),

    /// Conversion requested across unit kinds (e.g. weight vs volume).
    #[error("incompatible unit kinds: {from:?} and {to:?}")]
    IncompatibleKinds { from: UnitKind, to: UnitKind },

    /// The unit or one of its ancestors is missing or inactive.
    #[error("unit {0} cannot be resolved")]
    Unresolved(UnitId),

    /// Hierarchy edit rejected: factors must be strictly positive.
    #[error("conversion factor must be positive (got {0})")]
    NonPositiveFactor(Decimal),

    /// The chain's factor product, or a converted quantity, cannot be
    /// represented as a nonzero `Decimal`: it overflowed or rounded to zero.
    #[error("conversion through unit {0} is outside the representable decimal range")]
    OutOfRange(UnitId),
}

/// The unit catalog: owns unit definitions and the parent/factor hierarchy.
///
/// This is a snapshot of the caller's unit rows ("cached unit definitions").
/// Resolution methods take `&self` and are freely parallelizable; hierarchy
/// edits take `&mut self`, so concurrent readers behind the caller's lock
/// never observe a half-applied edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitGraph {
    units: HashMap<UnitId, Unit>,
}

impl UnitGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_units(units: impl IntoIterator<Item = Unit>) -> Self {
        let mut graph = Self::new();
        for unit in units {
            graph.insert(unit);
        }
        graph
    }

    /// Insert or replace a unit definition.
    pub fn insert(&mut self, unit: Unit) {
        self.units.insert(unit.id_typed(), unit);
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Resolve a unit's conversion factor relative to the base unit of its
    /// chain: the product of factors along the parent walk. A base unit
    /// resolves to exactly 1.
    ///
    /// Fails with [`UnitError::Unresolved`] when the unit or any ancestor is
    /// missing or inactive, and with [`UnitError::Cycle`] the moment the walk
    /// revisits a unit. Factors are multiplied with checked arithmetic; a
    /// product that overflows `Decimal` or rounds to zero fails with
    /// [`UnitError::OutOfRange`].
    pub fn resolve_base_factor(&self, id: UnitId) -> Result<Decimal, UnitError> {
        let mut visited = HashSet::new();
        let mut factor = Decimal::ONE;
        let mut current = id;

        for _ in 0..=MAX_CHAIN_DEPTH {
            if !visited.insert(current) {
                return Err(UnitError::Cycle(current));
            }

            let unit = self
                .units
                .get(&current)
                .ok_or(UnitError::Unresolved(current))?;
            if !unit.is_active() {
                return Err(UnitError::Unresolved(current));
            }

            match unit.parent_id() {
                None => return Ok(factor),
                Some(parent) => {
                    // Edges are individually positive, but their product can
                    // still leave Decimal's range (e.g. two 1e-15 factors
                    // round to zero at scale 28).
                    factor = factor
                        .checked_mul(unit.factor())
                        .filter(|product| !product.is_zero())
                        .ok_or(UnitError::OutOfRange(id))?;
                    current = parent;
                }
            }
        }

        Err(UnitError::Cycle(current))
    }

    /// Check whether `parent_id` may become the parent of `unit_id`.
    ///
    /// Rejects self-parenting, unknown units, kind mismatches (every unit in
    /// a chain must share one kind), and any candidate whose own chain leads
    /// back to `unit_id`.
    pub fn validate_new_parent(&self, unit_id: UnitId, parent_id: UnitId) -> Result<(), UnitError> {
        if unit_id == parent_id {
            return Err(UnitError::Cycle(unit_id));
        }

        let unit = self
            .units
            .get(&unit_id)
            .ok_or(UnitError::Unresolved(unit_id))?;
        let parent = self
            .units
            .get(&parent_id)
            .ok_or(UnitError::Unresolved(parent_id))?;

        if unit.kind() != parent.kind() {
            return Err(UnitError::IncompatibleKinds {
                from: unit.kind(),
                to: parent.kind(),
            });
        }

        // Walking up from the candidate must never reach the unit being
        // edited. A dangling ancestor ends the walk; resolution reports it.
        let mut visited = HashSet::new();
        let mut current = parent_id;
        for _ in 0..=MAX_CHAIN_DEPTH {
            if current == unit_id {
                return Err(UnitError::Cycle(unit_id));
            }
            if !visited.insert(current) {
                return Err(UnitError::Cycle(current));
            }
            match self.units.get(&current).and_then(|u| u.parent_id()) {
                Some(next) => current = next,
                None => return Ok(()),
            }
        }

        Err(UnitError::Cycle(current))
    }

    /// Validate and apply a new parent edge in one step.
    pub fn set_parent(
        &mut self,
        unit_id: UnitId,
        parent_id: UnitId,
        factor: Decimal,
    ) -> Result<(), UnitError> {
        if factor <= Decimal::ZERO {
            return Err(UnitError::NonPositiveFactor(factor));
        }
        self.validate_new_parent(unit_id, parent_id)?;

        let unit = self
            .units
            .get_mut(&unit_id)
            .ok_or(UnitError::Unresolved(unit_id))?;
        unit.apply_edge(Some(parent_id), factor);
        Ok(())
    }

    /// Detach a unit from its parent, making it the base of its own chain.
    pub fn clear_parent(&mut self, unit_id: UnitId) -> Result<(), UnitError> {
        let unit = self
            .units
            .get_mut(&unit_id)
            .ok_or(UnitError::Unresolved(unit_id))?;
        unit.apply_edge(None, Decimal::ONE);
        Ok(())
    }

    /// Soft-deactivate a unit. History keeps referencing it; resolution
    /// through it starts failing with [`UnitError::Unresolved`].
    pub fn deactivate(&mut self, unit_id: UnitId) -> Result<(), UnitError> {
        let unit = self
            .units
            .get_mut(&unit_id)
            .ok_or(UnitError::Unresolved(unit_id))?;
        unit.retire();
        Ok(())
    }
}
