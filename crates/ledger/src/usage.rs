use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_core::{CategoryId, DomainError, DomainResult, Entity};

use crate::period::PeriodId;

/// Usage event identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageEventId(pub Uuid);

impl UsageEventId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for UsageEventId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for UsageEventId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Recorded consumption of a category within a period, already expressed in
/// the category's designated unit. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEvent {
    id: UsageEventId,
    category_id: CategoryId,
    period_id: PeriodId,
    quantity: Decimal,
    recorded_at: DateTime<Utc>,
}

impl UsageEvent {
    pub fn new(
        category_id: CategoryId,
        period_id: PeriodId,
        quantity: Decimal,
    ) -> DomainResult<Self> {
        if quantity <= Decimal::ZERO {
            return Err(DomainError::validation("usage quantity must be positive"));
        }
        Ok(Self {
            id: UsageEventId::new(),
            category_id,
            period_id,
            quantity,
            recorded_at: Utc::now(),
        })
    }

    pub fn id_typed(&self) -> UsageEventId {
        self.id
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    pub fn period_id(&self) -> PeriodId {
        self.period_id
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

impl Entity for UsageEvent {
    type Id = UsageEventId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
