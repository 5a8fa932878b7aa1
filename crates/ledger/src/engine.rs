//! Balance recalculation, period transfer, and stock queries.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use larder_core::{BusinessId, CategoryId};
use larder_units::{UnitConverter, UnitError, UnitGraph, UnitId};

use crate::balance::BalanceRecord;
use crate::period::PeriodId;
use crate::store::LedgerStore;

/// Which category a ledger operation is working on, and the unit its
/// balances are kept in. The caller resolves the designation; the engine
/// never guesses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryScope {
    pub business_id: BusinessId,
    pub category_id: CategoryId,
    pub unit_id: UnitId,
}

/// Balance ledger error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("period {0} is not known to the ledger")]
    UnknownPeriod(PeriodId),

    #[error("cannot transfer a period's closing balances onto itself")]
    TransferSamePeriod,

    #[error("unit conversion failed: {0}")]
    Conversion(#[from] UnitError),
}

/// Derives per-period stock balances from the purchase and usage trails.
///
/// Every operation is a synchronous calculation over the [`LedgerStore`]
/// collaborator; recalculation is a pure function of what the store holds
/// and is safe to re-run after any purchase or usage change.
#[derive(Debug)]
pub struct BalanceLedger<S> {
    store: S,
}

impl<S> BalanceLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: LedgerStore> BalanceLedger<S> {
    pub fn get(&self, category_id: CategoryId, period_id: PeriodId) -> Option<BalanceRecord> {
        self.store.balance(category_id, period_id)
    }

    /// Recompute the (category, period) balance from scratch and persist it.
    ///
    /// Opening is the previous month's closing for the category when that
    /// record exists, otherwise zero. Purchases are every finalized cost
    /// record dated inside the month, converted into the scope's unit; a
    /// record that cannot be converted aborts the whole recalculation, since
    /// a partial total would silently understate stock. Usage events are
    /// summed as stored. Closing may come out negative and is kept that way.
    pub fn recalculate(
        &self,
        graph: &UnitGraph,
        scope: CategoryScope,
        period_id: PeriodId,
    ) -> Result<BalanceRecord, LedgerError> {
        let period = self
            .store
            .period(period_id)
            .ok_or(LedgerError::UnknownPeriod(period_id))?;

        let (prev_year, prev_month) = period.previous();
        let opening = self
            .store
            .period_by_month(scope.business_id, prev_year, prev_month)
            .and_then(|prev| self.store.balance(scope.category_id, prev.id_typed()))
            .map(|record| record.closing_balance())
            .unwrap_or(Decimal::ZERO);

        let converter = UnitConverter::new(graph);
        let (first_day, last_day) = period.date_range();
        let mut purchases = Decimal::ZERO;
        for record in
            self.store
                .purchases_in(scope.category_id, scope.business_id, first_day, last_day)
        {
            purchases += converter.convert(record.quantity(), record.unit_id(), scope.unit_id)?;
        }

        let mut usage = Decimal::ZERO;
        for event in self.store.usage_in(scope.category_id, period_id) {
            usage += event.quantity();
        }

        let record = match self.store.balance(scope.category_id, period_id) {
            Some(mut existing) => {
                existing.apply_recalculation(scope.unit_id, opening, purchases, usage);
                existing
            }
            None => BalanceRecord::new(
                scope.category_id,
                period_id,
                scope.unit_id,
                opening,
                purchases,
                usage,
            ),
        };
        self.store.upsert_balance(record.clone());

        debug!(
            category_id = %scope.category_id,
            period_id = %period_id,
            %opening,
            %purchases,
            %usage,
            closing = %record.closing_balance(),
            "balance recalculated"
        );
        Ok(record)
    }

    /// Seed `to_period` from `from_period`: every balance record's closing
    /// becomes the target record's opening, with purchases and usage reset.
    ///
    /// Overwrites whatever the target already holds, so callers run it
    /// before posting activity to the new period (re-running later discards
    /// that activity). Returns how many records were carried.
    pub fn transfer_closing_to_next_period(
        &self,
        from_period_id: PeriodId,
        to_period_id: PeriodId,
    ) -> Result<usize, LedgerError> {
        if from_period_id == to_period_id {
            return Err(LedgerError::TransferSamePeriod);
        }
        self.store
            .period(from_period_id)
            .ok_or(LedgerError::UnknownPeriod(from_period_id))?;
        self.store
            .period(to_period_id)
            .ok_or(LedgerError::UnknownPeriod(to_period_id))?;

        let sources = self.store.balances_in_period(from_period_id);
        let transferred = sources.len();
        for source in sources {
            let record = match self.store.balance(source.category_id(), to_period_id) {
                Some(mut existing) => {
                    existing.carry_forward(source.closing_balance());
                    existing
                }
                None => BalanceRecord::new(
                    source.category_id(),
                    to_period_id,
                    source.unit_id(),
                    source.closing_balance(),
                    Decimal::ZERO,
                    Decimal::ZERO,
                ),
            };
            self.store.upsert_balance(record);
        }

        info!(
            from_period_id = %from_period_id,
            to_period_id = %to_period_id,
            transferred,
            "closing balances carried into the next period"
        );
        Ok(transferred)
    }

    /// Records with `0 <= closing <= threshold`, lowest first.
    pub fn low_stock(&self, period_id: PeriodId, threshold: Decimal) -> Vec<BalanceRecord> {
        let mut rows: Vec<_> = self
            .store
            .balances_in_period(period_id)
            .into_iter()
            .filter(|r| r.closing_balance() >= Decimal::ZERO && r.closing_balance() <= threshold)
            .collect();
        rows.sort_by_key(|r| r.closing_balance());
        rows
    }

    /// Records whose closing went below zero, most negative first.
    pub fn negative_balances(&self, period_id: PeriodId) -> Vec<BalanceRecord> {
        let mut rows: Vec<_> = self
            .store
            .balances_in_period(period_id)
            .into_iter()
            .filter(|r| r.closing_balance() < Decimal::ZERO)
            .collect();
        rows.sort_by_key(|r| r.closing_balance());
        rows
    }

    /// Mean usage_total over the business's `months_back` most recent
    /// periods. Periods where the category has no balance record count as
    /// zero usage; a business with no periods at all averages to zero.
    pub fn average_monthly_usage(
        &self,
        category_id: CategoryId,
        business_id: BusinessId,
        months_back: usize,
    ) -> Decimal {
        let periods = self.store.recent_periods(business_id, months_back);
        if periods.is_empty() {
            return Decimal::ZERO;
        }

        let total: Decimal = periods
            .iter()
            .map(|period| {
                self.store
                    .balance(category_id, period.id_typed())
                    .map(|record| record.usage_total())
                    .unwrap_or(Decimal::ZERO)
            })
            .sum();
        total / Decimal::from(periods.len())
    }
}
