//! larder-ledger: per-period stock balances derived from purchase and
//! usage history.
//!
//! [`BalanceLedger`] recalculates one [`BalanceRecord`] per
//! (category, [`Period`]) out of the cost records and [`UsageEvent`]s the
//! [`LedgerStore`] collaborator holds, carries closings across period
//! boundaries, and answers low-stock and usage-trend queries.

pub mod balance;
pub mod engine;
pub mod period;
pub mod store;
pub mod usage;

pub use balance::BalanceRecord;
pub use engine::{BalanceLedger, CategoryScope, LedgerError};
pub use period::{Period, PeriodId};
pub use store::LedgerStore;
pub use usage::{UsageEvent, UsageEventId};
