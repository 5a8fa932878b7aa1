//! Quantity conversion between units of the same kind.

use rust_decimal::Decimal;

use crate::graph::{UnitError, UnitGraph};
use crate::unit::UnitId;

/// Converts quantities across a [`UnitGraph`] snapshot.
///
/// Both units are reduced to their chain's base via
/// [`UnitGraph::resolve_base_factor`]; the result is
/// `quantity * from_factor / to_factor`, computed entirely in checked
/// `Decimal` arithmetic. A quantity that leaves `Decimal`'s range fails
/// with [`UnitError::OutOfRange`].
#[derive(Debug, Clone, Copy)]
pub struct UnitConverter<'g> {
    graph: &'g UnitGraph,
}

impl<'g> UnitConverter<'g> {
    pub fn new(graph: &'g UnitGraph) -> Self {
        Self { graph }
    }

    /// Convert `quantity` from one unit to another.
    ///
    /// Converting a unit to itself returns the quantity untouched, without
    /// consulting the catalog. Units of different kinds are never
    /// convertible, whatever their hierarchies look like.
    pub fn convert(
        &self,
        quantity: Decimal,
        from: UnitId,
        to: UnitId,
    ) -> Result<Decimal, UnitError> {
        if from == to {
            return Ok(quantity);
        }

        let from_unit = self.graph.get(from).ok_or(UnitError::Unresolved(from))?;
        let to_unit = self.graph.get(to).ok_or(UnitError::Unresolved(to))?;

        if from_unit.kind() != to_unit.kind() {
            return Err(UnitError::IncompatibleKinds {
                from: from_unit.kind(),
                to: to_unit.kind(),
            });
        }

        let from_factor = self.graph.resolve_base_factor(from)?;
        let to_factor = self.graph.resolve_base_factor(to)?;

        let in_base = quantity
            .checked_mul(from_factor)
            .ok_or(UnitError::OutOfRange(from))?;
        in_base
            .checked_div(to_factor)
            .ok_or(UnitError::OutOfRange(to))
    }
}
