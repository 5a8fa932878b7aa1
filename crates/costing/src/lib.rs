//! larder-costing: purchase cost history and weighted-average estimation.
//!
//! [`CostRecord`] is the append-only trail of finalized purchase line items.
//! [`CostEstimator`] reads that trail through a [`CostHistory`] collaborator
//! and produces a recent weighted-average cost per unit, which
//! [`CostEstimator::cost_recipe`] applies line by line to price a recipe.

pub mod estimator;
pub mod history;
pub mod record;
pub mod recipe;

pub use estimator::{CostEstimator, EstimatorConfig};
pub use history::CostHistory;
pub use record::{CostRecord, CostRecordId};
pub use recipe::{RecipeCost, RecipeLine, RecipeLineCost};
