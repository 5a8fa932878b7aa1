use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use larder_core::CategoryId;
use larder_units::UnitId;

use crate::period::PeriodId;

/// Materialized stock balance for one (category, period), expressed in the
/// category's designated unit.
///
/// `closing_balance` is always `opening + purchases - usage`; the only ways
/// to change a record re-derive it, so a stored record can never drift from
/// the identity. Closing may go negative (usage was posted for stock the
/// ledger never saw arrive), and that signal is kept, not clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRecord {
    category_id: CategoryId,
    period_id: PeriodId,
    unit_id: UnitId,
    opening_balance: Decimal,
    purchases_total: Decimal,
    usage_total: Decimal,
    closing_balance: Decimal,
    last_recalculated: DateTime<Utc>,
}

impl BalanceRecord {
    pub fn new(
        category_id: CategoryId,
        period_id: PeriodId,
        unit_id: UnitId,
        opening_balance: Decimal,
        purchases_total: Decimal,
        usage_total: Decimal,
    ) -> Self {
        Self {
            category_id,
            period_id,
            unit_id,
            opening_balance,
            purchases_total,
            usage_total,
            closing_balance: opening_balance + purchases_total - usage_total,
            last_recalculated: Utc::now(),
        }
    }

    /// Overwrite every total with freshly recomputed values.
    pub fn apply_recalculation(
        &mut self,
        unit_id: UnitId,
        opening_balance: Decimal,
        purchases_total: Decimal,
        usage_total: Decimal,
    ) {
        self.unit_id = unit_id;
        self.opening_balance = opening_balance;
        self.purchases_total = purchases_total;
        self.usage_total = usage_total;
        self.closing_balance = opening_balance + purchases_total - usage_total;
        self.last_recalculated = Utc::now();
    }

    /// Reset the record to a carried-forward opening, discarding whatever
    /// activity was already posted to it.
    pub fn carry_forward(&mut self, opening_balance: Decimal) {
        self.opening_balance = opening_balance;
        self.purchases_total = Decimal::ZERO;
        self.usage_total = Decimal::ZERO;
        self.closing_balance = opening_balance;
        self.last_recalculated = Utc::now();
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    pub fn period_id(&self) -> PeriodId {
        self.period_id
    }

    pub fn unit_id(&self) -> UnitId {
        self.unit_id
    }

    pub fn opening_balance(&self) -> Decimal {
        self.opening_balance
    }

    pub fn purchases_total(&self) -> Decimal {
        self.purchases_total
    }

    pub fn usage_total(&self) -> Decimal {
        self.usage_total
    }

    pub fn closing_balance(&self) -> Decimal {
        self.closing_balance
    }

    pub fn last_recalculated(&self) -> DateTime<Utc> {
        self.last_recalculated
    }
}
