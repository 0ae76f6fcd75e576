//! Throughput of the three engines on a common 10y callable scenario.

use criterion::{criterion_group, criterion_main, Criterion};
use pricer_core::market_data::curves::FlatCurve;
use pricer_core::types::time::{Date, DayCount};
use pricer_engines::lsmc::LsmcConfig;
use pricer_engines::pde::PdeConfig;
use pricer_engines::tree::TreeConfig;
use pricer_engines::Engine;
use pricer_models::instruments::CallTerm;
use pricer_models::schedules::Frequency;
use pricer_models::{BlackKarasinskiParams, CallableBondSpec, CirParams, HullWhiteParams};

fn scenario() -> (FlatCurve<f64>, CallableBondSpec, Date) {
    let valuation = Date::from_ymd(2025, 12, 2).unwrap();
    let bond = CallableBondSpec::new(
        100.0,
        0.05,
        Frequency::Semiannual,
        valuation,
        Date::from_ymd(2035, 12, 2).unwrap(),
        vec![CallTerm {
            date: Date::from_ymd(2030, 12, 2).unwrap(),
            price: 100.0,
        }],
        0.0,
        DayCount::Thirty360US,
    )
    .unwrap();
    (FlatCurve::new(0.04), bond, valuation)
}

fn bench_engines(c: &mut Criterion) {
    let (curve, bond, valuation) = scenario();
    let engines = [
        Engine::HullWhiteLsmc {
            params: HullWhiteParams::new(0.1, 0.01).unwrap(),
            config: LsmcConfig::default(),
        },
        Engine::BlackKarasinskiTree {
            params: BlackKarasinskiParams::new(0.1, 0.2).unwrap(),
            config: TreeConfig::default(),
        },
        Engine::CirPde {
            params: CirParams::new(0.3, 0.04, 0.08).unwrap(),
            config: PdeConfig::default(),
        },
    ];

    let mut group = c.benchmark_group("price");
    for engine in &engines {
        group.bench_function(engine.name(), |b| {
            b.iter(|| engine.price(&curve, &bond, valuation).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_engines);
criterion_main!(benches);
