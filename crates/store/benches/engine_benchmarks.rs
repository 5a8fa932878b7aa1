use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use larder_core::{BusinessId, CategoryId};
use larder_costing::{CostEstimator, CostRecord};
use larder_ledger::{BalanceLedger, CategoryScope, Period, PeriodId, UsageEvent};
use larder_store::InMemoryStore;
use larder_units::{Unit, UnitConverter, UnitGraph, UnitId, UnitKind};

fn metric_weights() -> (UnitGraph, UnitId, UnitId, UnitId) {
    let kg = Unit::base(UnitId::new(), "Kilogram", "kg", UnitKind::Weight).unwrap();
    let g = Unit::derived(
        UnitId::new(),
        "Gram",
        "g",
        UnitKind::Weight,
        kg.id_typed(),
        dec!(0.001),
    )
    .unwrap();
    let mg = Unit::derived(
        UnitId::new(),
        "Milligram",
        "mg",
        UnitKind::Weight,
        g.id_typed(),
        dec!(0.001),
    )
    .unwrap();
    let (kg_id, g_id, mg_id) = (kg.id_typed(), g.id_typed(), mg.id_typed());
    (UnitGraph::from_units([kg, g, mg]), kg_id, g_id, mg_id)
}

struct SeededLedger {
    store: Arc<InMemoryStore>,
    graph: UnitGraph,
    scope: CategoryScope,
    period_id: PeriodId,
}

/// One period holding `purchases` cost records (alternating kg and g) and a
/// handful of usage events.
fn seed_ledger(purchases: usize) -> SeededLedger {
    let (graph, kg, g, _) = metric_weights();
    let store = Arc::new(InMemoryStore::new());
    for unit in graph.units() {
        store.add_unit(unit.clone());
    }

    let business = BusinessId::new();
    let category = CategoryId::new();
    let period = Period::new(business, 2024, 5).unwrap();
    let period_id = period.id_typed();
    store.add_period(period);

    for i in 0..purchases {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1 + (i % 28) as u32).unwrap();
        let unit = if i % 2 == 0 { kg } else { g };
        store.add_cost_record(
            CostRecord::new(business, category, date, dec!(2.5), unit, dec!(10)).unwrap(),
        );
    }
    for _ in 0..8 {
        store.add_usage(UsageEvent::new(category, period_id, dec!(0.75)).unwrap());
    }

    SeededLedger {
        store,
        graph,
        scope: CategoryScope {
            business_id: business,
            category_id: category,
            unit_id: kg,
        },
        period_id,
    }
}

fn bench_unit_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("unit_conversion");
    let (graph, kg, _, mg) = metric_weights();
    let converter = UnitConverter::new(&graph);

    group.bench_function("two_hop_chain", |b| {
        b.iter(|| {
            converter
                .convert(black_box(dec!(1500000)), mg, kg)
                .unwrap()
        });
    });

    group.bench_function("identity_shortcut", |b| {
        b.iter(|| converter.convert(black_box(dec!(42)), kg, kg).unwrap());
    });

    group.finish();
}

fn bench_balance_recalculation(c: &mut Criterion) {
    let mut group = c.benchmark_group("balance_recalculation");

    for purchases in [10usize, 100, 1000] {
        group.throughput(Throughput::Elements(purchases as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(purchases),
            &purchases,
            |b, &n| {
                let seeded = seed_ledger(n);
                let ledger = BalanceLedger::new(Arc::clone(&seeded.store));
                b.iter(|| {
                    ledger
                        .recalculate(&seeded.graph, seeded.scope, seeded.period_id)
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

fn bench_average_cost(c: &mut Criterion) {
    let mut group = c.benchmark_group("average_cost");

    group.bench_function("mixed_unit_history", |b| {
        let seeded = seed_ledger(200);
        let estimator = CostEstimator::new(Arc::clone(&seeded.store));
        let target = seeded.scope.unit_id;
        b.iter(|| {
            estimator.average_cost(
                &seeded.graph,
                seeded.scope.category_id,
                seeded.scope.business_id,
                black_box(target),
            )
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_unit_conversion,
    bench_balance_recalculation,
    bench_average_cost
);
criterion_main!(benches);
