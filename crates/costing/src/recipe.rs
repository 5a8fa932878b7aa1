//! Recipe costing on top of the estimator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use larder_core::{BusinessId, CategoryId};
use larder_units::{UnitGraph, UnitId};

use crate::estimator::CostEstimator;
use crate::history::CostHistory;

/// One ingredient of a recipe: a quantity of a category, in a given unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeLine {
    pub category_id: CategoryId,
    pub quantity: Decimal,
    pub unit_id: UnitId,
}

/// Pricing outcome for one recipe line. `None` marks an ingredient with no
/// usable purchase history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeLineCost {
    pub category_id: CategoryId,
    pub unit_cost: Option<Decimal>,
    pub line_total: Option<Decimal>,
}

/// Priced recipe. `total` is `Some` only when every line priced, so a
/// partially priced recipe never masquerades as a cheap one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeCost {
    pub lines: Vec<RecipeLineCost>,
    pub total: Option<Decimal>,
}

impl<S: CostHistory> CostEstimator<S> {
    /// Price each line at its category's current average cost in the line's
    /// own unit. Read-only.
    pub fn cost_recipe(
        &self,
        graph: &UnitGraph,
        business_id: BusinessId,
        lines: &[RecipeLine],
    ) -> RecipeCost {
        let mut costed = Vec::with_capacity(lines.len());
        let mut total = Some(Decimal::ZERO);

        for line in lines {
            let unit_cost = self.average_cost(graph, line.category_id, business_id, line.unit_id);
            let line_total = unit_cost.map(|cost| cost * line.quantity);

            match line_total {
                Some(value) => {
                    if let Some(sum) = total.as_mut() {
                        *sum += value;
                    }
                }
                None => {
                    debug!(category_id = %line.category_id, "recipe line has no pricing data");
                    total = None;
                }
            }

            costed.push(RecipeLineCost {
                category_id: line.category_id,
                unit_cost,
                line_total,
            });
        }

        RecipeCost {
            lines: costed,
            total,
        }
    }
}
