use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::RwLock;

use chrono::NaiveDate;

use larder_core::{BusinessId, CategoryId};
use larder_costing::{CostHistory, CostRecord};
use larder_ledger::{BalanceRecord, LedgerStore, Period, PeriodId, UsageEvent};
use larder_units::{Unit, UnitGraph, UnitId};

/// In-memory backing store implementing every collaborator trait.
///
/// Intended for tests/dev. Not optimized for performance; queries scan and
/// clone. Ordering is deterministic: cost records come back newest purchase
/// date first, ties broken by id.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    units: RwLock<HashMap<UnitId, Unit>>,
    periods: RwLock<HashMap<PeriodId, Period>>,
    cost_records: RwLock<Vec<CostRecord>>,
    usage_events: RwLock<Vec<UsageEvent>>,
    balances: RwLock<HashMap<(CategoryId, PeriodId), BalanceRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_unit(&self, unit: Unit) {
        if let Ok(mut units) = self.units.write() {
            units.insert(unit.id_typed(), unit);
        }
    }

    pub fn add_period(&self, period: Period) {
        if let Ok(mut periods) = self.periods.write() {
            periods.insert(period.id_typed(), period);
        }
    }

    pub fn add_cost_record(&self, record: CostRecord) {
        if let Ok(mut records) = self.cost_records.write() {
            records.push(record);
        }
    }

    pub fn add_usage(&self, event: UsageEvent) {
        if let Ok(mut events) = self.usage_events.write() {
            events.push(event);
        }
    }

    /// Snapshot the unit catalog into a detached [`UnitGraph`].
    pub fn unit_graph(&self) -> UnitGraph {
        let units = match self.units.read() {
            Ok(map) => map,
            Err(_) => return UnitGraph::new(),
        };
        UnitGraph::from_units(units.values().cloned())
    }
}

impl LedgerStore for InMemoryStore {
    fn period(&self, period_id: PeriodId) -> Option<Period> {
        let periods = self.periods.read().ok()?;
        periods.get(&period_id).cloned()
    }

    fn period_by_month(&self, business_id: BusinessId, year: i32, month: u32) -> Option<Period> {
        let periods = self.periods.read().ok()?;
        periods
            .values()
            .find(|p| p.business_id() == business_id && p.year() == year && p.month() == month)
            .cloned()
    }

    fn recent_periods(&self, business_id: BusinessId, count: usize) -> Vec<Period> {
        let periods = match self.periods.read() {
            Ok(map) => map,
            Err(_) => return vec![],
        };

        let mut rows: Vec<_> = periods
            .values()
            .filter(|p| p.business_id() == business_id)
            .cloned()
            .collect();
        rows.sort_by_key(|p| Reverse((p.year(), p.month())));
        rows.truncate(count);
        rows
    }

    fn purchases_in(
        &self,
        category_id: CategoryId,
        business_id: BusinessId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<CostRecord> {
        let records = match self.cost_records.read() {
            Ok(rows) => rows,
            Err(_) => return vec![],
        };

        records
            .iter()
            .filter(|r| {
                r.category_id() == category_id
                    && r.business_id() == business_id
                    && r.purchased_on() >= from
                    && r.purchased_on() <= to
            })
            .cloned()
            .collect()
    }

    fn usage_in(&self, category_id: CategoryId, period_id: PeriodId) -> Vec<UsageEvent> {
        let events = match self.usage_events.read() {
            Ok(rows) => rows,
            Err(_) => return vec![],
        };

        events
            .iter()
            .filter(|u| u.category_id() == category_id && u.period_id() == period_id)
            .cloned()
            .collect()
    }

    fn balance(&self, category_id: CategoryId, period_id: PeriodId) -> Option<BalanceRecord> {
        let balances = self.balances.read().ok()?;
        balances.get(&(category_id, period_id)).cloned()
    }

    fn balances_in_period(&self, period_id: PeriodId) -> Vec<BalanceRecord> {
        let balances = match self.balances.read() {
            Ok(map) => map,
            Err(_) => return vec![],
        };

        balances
            .values()
            .filter(|r| r.period_id() == period_id)
            .cloned()
            .collect()
    }

    fn upsert_balance(&self, record: BalanceRecord) {
        if let Ok(mut balances) = self.balances.write() {
            balances.insert((record.category_id(), record.period_id()), record);
        }
    }
}

impl CostHistory for InMemoryStore {
    fn cost_records(
        &self,
        category_id: CategoryId,
        business_id: BusinessId,
        offset: usize,
        limit: usize,
    ) -> Vec<CostRecord> {
        let records = match self.cost_records.read() {
            Ok(rows) => rows,
            Err(_) => return vec![],
        };

        let mut rows: Vec<_> = records
            .iter()
            .filter(|r| r.category_id() == category_id && r.business_id() == business_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| Reverse((r.purchased_on(), r.id_typed().0)));
        rows.into_iter().skip(offset).take(limit).collect()
    }
}
