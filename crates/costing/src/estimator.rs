//! Weighted-average cost estimation over recent purchase history.

use rust_decimal::Decimal;
use tracing::debug;

use larder_core::{BusinessId, CategoryId};
use larder_units::{UnitConverter, UnitGraph, UnitId};

use crate::history::CostHistory;

/// Estimator configuration.
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// How many successfully converted records make a full sample.
    pub sample_size: usize,
    /// Upper bound on history fetches per estimate; the scan stops here even
    /// if the sample is still short.
    pub max_fetch_rounds: usize,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            sample_size: 3,
            max_fetch_rounds: 4,
        }
    }
}

impl EstimatorConfig {
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    pub fn with_max_fetch_rounds(mut self, max_fetch_rounds: usize) -> Self {
        self.max_fetch_rounds = max_fetch_rounds;
        self
    }
}

/// Estimates what a category currently costs per unit, from the most recent
/// purchases of it.
///
/// Read-only: estimation never writes through the [`CostHistory`]
/// collaborator.
#[derive(Debug)]
pub struct CostEstimator<S> {
    history: S,
    config: EstimatorConfig,
}

impl<S> CostEstimator<S> {
    pub fn new(history: S) -> Self {
        Self::with_config(history, EstimatorConfig::default())
    }

    pub fn with_config(history: S, config: EstimatorConfig) -> Self {
        Self { history, config }
    }
}

impl<S: CostHistory> CostEstimator<S> {
    /// Weighted-average cost per `target_unit` over the most recent
    /// convertible purchases: Σ(total paid) / Σ(quantity in target units).
    ///
    /// Records whose quantity cannot be converted into `target_unit`
    /// (incompatible kind, retired or unknown unit) are skipped, and the
    /// scan reaches further back to replace them, up to
    /// [`EstimatorConfig::max_fetch_rounds`] batches. `None` means no
    /// usable pricing data, which is an ordinary state for a category that
    /// has never been purchased.
    pub fn average_cost(
        &self,
        graph: &UnitGraph,
        category_id: CategoryId,
        business_id: BusinessId,
        target_unit: UnitId,
    ) -> Option<Decimal> {
        let converter = UnitConverter::new(graph);
        let batch = self.config.sample_size * 2;

        let mut offset = 0;
        let mut sampled = 0;
        let mut cost_sum = Decimal::ZERO;
        let mut quantity_sum = Decimal::ZERO;

        for _ in 0..self.config.max_fetch_rounds {
            let records = self
                .history
                .cost_records(category_id, business_id, offset, batch);
            if records.is_empty() {
                break;
            }
            let fetched = records.len();
            offset += fetched;

            for record in records {
                if sampled == self.config.sample_size {
                    break;
                }
                match converter.convert(record.quantity(), record.unit_id(), target_unit) {
                    Ok(converted) => {
                        cost_sum += record.total_cost();
                        quantity_sum += converted;
                        sampled += 1;
                    }
                    Err(error) => {
                        debug!(
                            record_id = %record.id_typed(),
                            %error,
                            "skipping cost record during estimation"
                        );
                    }
                }
            }

            if sampled == self.config.sample_size || fetched < batch {
                break;
            }
        }

        if sampled == 0 || quantity_sum.is_zero() {
            return None;
        }
        Some(cost_sum / quantity_sum)
    }
}
