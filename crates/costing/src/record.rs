use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_core::{BusinessId, CategoryId, DomainError, DomainResult, Entity};
use larder_units::UnitId;

/// Cost record identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostRecordId(pub Uuid);

impl CostRecordId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for CostRecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for CostRecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// One finalized purchase line item.
///
/// Immutable once written. The stream of cost records per (business,
/// category) is the source of truth both for cost estimation and for the
/// purchases side of balance recalculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRecord {
    id: CostRecordId,
    business_id: BusinessId,
    category_id: CategoryId,
    purchased_on: NaiveDate,
    quantity: Decimal,
    unit_id: UnitId,
    unit_cost: Decimal,
    total_cost: Decimal,
}

impl CostRecord {
    /// Record a purchase of `quantity` (in `unit_id`) for `total_cost`.
    /// The per-unit cost is derived from the pair.
    pub fn new(
        business_id: BusinessId,
        category_id: CategoryId,
        purchased_on: NaiveDate,
        quantity: Decimal,
        unit_id: UnitId,
        total_cost: Decimal,
    ) -> DomainResult<Self> {
        if quantity <= Decimal::ZERO {
            return Err(DomainError::validation(
                "purchase quantity must be positive",
            ));
        }
        if total_cost < Decimal::ZERO {
            return Err(DomainError::validation(
                "purchase total cost cannot be negative",
            ));
        }

        Ok(Self {
            id: CostRecordId::new(),
            business_id,
            category_id,
            purchased_on,
            quantity,
            unit_id,
            unit_cost: total_cost / quantity,
            total_cost,
        })
    }

    pub fn id_typed(&self) -> CostRecordId {
        self.id
    }

    pub fn business_id(&self) -> BusinessId {
        self.business_id
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    pub fn purchased_on(&self) -> NaiveDate {
        self.purchased_on
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn unit_id(&self) -> UnitId {
        self.unit_id
    }

    pub fn unit_cost(&self) -> Decimal {
        self.unit_cost
    }

    pub fn total_cost(&self) -> Decimal {
        self.total_cost
    }
}

impl Entity for CostRecord {
    type Id = CostRecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
