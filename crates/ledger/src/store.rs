use std::sync::Arc;

use chrono::NaiveDate;

use larder_core::{BusinessId, CategoryId};
use larder_costing::CostRecord;

use crate::balance::BalanceRecord;
use crate::period::{Period, PeriodId};
use crate::usage::UsageEvent;

/// Storage collaborator for the balance ledger.
///
/// The engine is a pure calculation over what this trait returns; tenant
/// isolation, transactions, and indexing all live behind it.
pub trait LedgerStore: Send + Sync {
    fn period(&self, period_id: PeriodId) -> Option<Period>;

    fn period_by_month(&self, business_id: BusinessId, year: i32, month: u32) -> Option<Period>;

    /// The business's periods, most recent month first.
    fn recent_periods(&self, business_id: BusinessId, count: usize) -> Vec<Period>;

    /// Finalized purchase lines for the category with a purchase date inside
    /// `from..=to`.
    fn purchases_in(
        &self,
        category_id: CategoryId,
        business_id: BusinessId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<CostRecord>;

    fn usage_in(&self, category_id: CategoryId, period_id: PeriodId) -> Vec<UsageEvent>;

    fn balance(&self, category_id: CategoryId, period_id: PeriodId) -> Option<BalanceRecord>;

    fn balances_in_period(&self, period_id: PeriodId) -> Vec<BalanceRecord>;

    /// Insert or overwrite the record for (category, period).
    fn upsert_balance(&self, record: BalanceRecord);
}

impl<S> LedgerStore for Arc<S>
where
    S: LedgerStore + ?Sized,
{
    fn period(&self, period_id: PeriodId) -> Option<Period> {
        (**self).period(period_id)
    }

    fn period_by_month(&self, business_id: BusinessId, year: i32, month: u32) -> Option<Period> {
        (**self).period_by_month(business_id, year, month)
    }

    fn recent_periods(&self, business_id: BusinessId, count: usize) -> Vec<Period> {
        (**self).recent_periods(business_id, count)
    }

    fn purchases_in(
        &self,
        category_id: CategoryId,
        business_id: BusinessId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<CostRecord> {
        (**self).purchases_in(category_id, business_id, from, to)
    }

    fn usage_in(&self, category_id: CategoryId, period_id: PeriodId) -> Vec<UsageEvent> {
        (**self).usage_in(category_id, period_id)
    }

    fn balance(&self, category_id: CategoryId, period_id: PeriodId) -> Option<BalanceRecord> {
        (**self).balance(category_id, period_id)
    }

    fn balances_in_period(&self, period_id: PeriodId) -> Vec<BalanceRecord> {
        (**self).balances_in_period(period_id)
    }

    fn upsert_balance(&self, record: BalanceRecord) {
        (**self).upsert_balance(record)
    }
}
