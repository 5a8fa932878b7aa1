use std::sync::Arc;

use larder_core::{BusinessId, CategoryId};

use crate::record::CostRecord;

/// Read access to the finalized purchase trail.
///
/// Implementations return records for one (category, business) pair ordered
/// newest purchase date first, paginated by `offset`/`limit`, so the
/// estimator can fetch just enough history to fill its sample.
pub trait CostHistory: Send + Sync {
    fn cost_records(
        &self,
        category_id: CategoryId,
        business_id: BusinessId,
        offset: usize,
        limit: usize,
    ) -> Vec<CostRecord>;
}

impl<S> CostHistory for Arc<S>
where
    S: CostHistory + ?Sized,
{
    fn cost_records(
        &self,
        category_id: CategoryId,
        business_id: BusinessId,
        offset: usize,
        limit: usize,
    ) -> Vec<CostRecord> {
        (**self).cost_records(category_id, business_id, offset, limit)
    }
}
