use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_core::{BusinessId, DomainError, DomainResult, Entity};

/// Accounting period identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodId(pub Uuid);

impl PeriodId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for PeriodId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for PeriodId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// One calendar month of accounting for one business.
///
/// Balances, purchases, and usage all attach to a period; month arithmetic
/// here is what lets the ledger find the preceding period when it derives an
/// opening balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct Period {
    id: PeriodId,
    business_id: BusinessId,
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(business_id: BusinessId, year: i32, month: u32) -> DomainResult<Self> {
        check_bounds(year, month)?;
        Ok(Self {
            id: PeriodId::new(),
            business_id,
            year,
            month,
        })
    }

    pub fn id_typed(&self) -> PeriodId {
        self.id
    }

    pub fn business_id(&self) -> BusinessId {
        self.business_id
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Year and month of the preceding period, wrapping the year boundary.
    pub fn previous(&self) -> (i32, u32) {
        if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        }
    }

    /// Year and month of the following period, wrapping the year boundary.
    pub fn next(&self) -> (i32, u32) {
        if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        }
    }

    /// Inclusive first and last day of the month, February in leap years
    /// included.
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("validated year and month form a date");
        let (next_year, next_month) = self.next();
        let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
            .expect("validated year and month have a month end");
        (first, last)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl Entity for Period {
    type Id = PeriodId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn check_bounds(year: i32, month: u32) -> DomainResult<()> {
    if !(1..=12).contains(&month) {
        return Err(DomainError::validation("month must be between 1 and 12"));
    }
    if !(1..=9999).contains(&year) {
        return Err(DomainError::validation("year must be between 1 and 9999"));
    }
    Ok(())
}

/// Unvalidated field mirror; deserializing a [`Period`] funnels through
/// [`TryFrom`] so stored rows face the same bounds checks as [`Period::new`].
#[derive(Deserialize)]
struct RawPeriod {
    id: PeriodId,
    business_id: BusinessId,
    year: i32,
    month: u32,
}

impl TryFrom<RawPeriod> for Period {
    type Error = DomainError;

    fn try_from(raw: RawPeriod) -> DomainResult<Self> {
        check_bounds(raw.year, raw.month)?;
        Ok(Self {
            id: raw.id,
            business_id: raw.business_id,
            year: raw.year,
            month: raw.month,
        })
    }
}
