use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_core::{DomainError, DomainResult, Entity, ValueObject};

/// Measurement unit identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub Uuid);

impl UnitId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for UnitId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for UnitId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Physical kind of a unit (determines conversion compatibility).
///
/// Two units of different kinds are never comparable, regardless of where
/// they sit in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Weight,
    Volume,
    Count,
}

impl ValueObject for UnitKind {}

/// A measurement unit: one node in the conversion hierarchy.
///
/// A unit with no parent is the *base unit* of its kind (factor 1 relative to
/// itself). Units are soft-deactivated, never hard-deleted, because cost and
/// balance history keeps referencing them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    id: UnitId,
    name: String,
    symbol: String,
    kind: UnitKind,
    parent_id: Option<UnitId>,
    factor: Decimal,
    active: bool,
}

impl Unit {
    /// Create a base unit (no parent, factor 1).
    pub fn base(
        id: UnitId,
        name: impl Into<String>,
        symbol: impl Into<String>,
        kind: UnitKind,
    ) -> DomainResult<Self> {
        let name = name.into();
        let symbol = symbol.into();
        Self::validate_labels(&name, &symbol)?;
        Ok(Self {
            id,
            name,
            symbol,
            kind,
            parent_id: None,
            factor: Decimal::ONE,
            active: true,
        })
    }

    /// Create a unit derived from a parent: `quantity × factor` is the same
    /// quantity expressed in the parent unit.
    pub fn derived(
        id: UnitId,
        name: impl Into<String>,
        symbol: impl Into<String>,
        kind: UnitKind,
        parent_id: UnitId,
        factor: Decimal,
    ) -> DomainResult<Self> {
        let name = name.into();
        let symbol = symbol.into();
        Self::validate_labels(&name, &symbol)?;
        if parent_id == id {
            return Err(DomainError::validation("unit cannot be its own parent"));
        }
        if factor <= Decimal::ZERO {
            return Err(DomainError::validation(
                "conversion factor must be positive",
            ));
        }
        Ok(Self {
            id,
            name,
            symbol,
            kind,
            parent_id: Some(parent_id),
            factor,
            active: true,
        })
    }

    fn validate_labels(name: &str, symbol: &str) -> DomainResult<()> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if symbol.trim().is_empty() {
            return Err(DomainError::validation("symbol cannot be empty"));
        }
        Ok(())
    }

    pub fn id_typed(&self) -> UnitId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    pub fn parent_id(&self) -> Option<UnitId> {
        self.parent_id
    }

    pub fn factor(&self) -> Decimal {
        self.factor
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Rewrite the parent edge. Cycle/kind validation is the graph's job;
    /// this only keeps the entity consistent (base units carry factor 1).
    pub(crate) fn apply_edge(&mut self, parent_id: Option<UnitId>, factor: Decimal) {
        match parent_id {
            Some(parent) => {
                self.parent_id = Some(parent);
                self.factor = factor;
            }
            None => {
                self.parent_id = None;
                self.factor = Decimal::ONE;
            }
        }
    }

    pub(crate) fn retire(&mut self) {
        self.active = false;
    }
}

impl Entity for Unit {
    type Id = UnitId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn base_unit_has_factor_one_and_no_parent() {
        let kg = Unit::base(UnitId::new(), "Kilogram", "kg", UnitKind::Weight).unwrap();
        assert_eq!(kg.factor(), Decimal::ONE);
        assert_eq!(kg.parent_id(), None);
        assert!(kg.is_active());
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = Unit::base(UnitId::new(), "  ", "kg", UnitKind::Weight).unwrap_err();
        assert_eq!(err, DomainError::validation("name cannot be empty"));
    }

    #[test]
    fn non_positive_factor_is_rejected() {
        let kg = UnitId::new();
        let err = Unit::derived(UnitId::new(), "Gram", "g", UnitKind::Weight, kg, dec!(0))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn self_parent_is_rejected() {
        let id = UnitId::new();
        let err =
            Unit::derived(id, "Gram", "g", UnitKind::Weight, id, dec!(0.001)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn unit_serializes_with_lowercase_kind() {
        let kg = Unit::base(UnitId::new(), "Kilogram", "kg", UnitKind::Weight).unwrap();
        let json = serde_json::to_value(&kg).unwrap();
        assert_eq!(json["kind"], "weight");
    }
}
