use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use probe_table::{
    strategy::{Chaining, CustomProbing, DoubleHashing},
    CollisionStrategy, Config, HashFunction, Strategy,
};
use rand::{distr::Alphanumeric, rngs::StdRng, Rng, SeedableRng};

const ITEM_COUNT: usize = 10_000;

fn random_keys(count: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(7);

    (0..count)
        .map(|_| {
            let len = rng.random_range(4..16);
            (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(len)
                .map(char::from)
                .collect()
        })
        .collect()
}

fn strategies() -> [Strategy; 3] {
    [
        Chaining.into(),
        DoubleHashing.into(),
        CustomProbing::default().into(),
    ]
}

fn table_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("table insert");
    let keys = random_keys(ITEM_COUNT);

    for strategy in strategies() {
        for function in [HashFunction::Polynomial, HashFunction::Djb2] {
            group.bench_function(
                format!("{} {} x{ITEM_COUNT}", strategy.get_name(), function.name()),
                |b| {
                    b.iter_batched(
                        || {
                            Config::new(strategy)
                                .hash_function(function)
                                .build::<usize>()
                                .unwrap()
                        },
                        |mut table| {
                            for (idx, key) in keys.iter().enumerate() {
                                let _ = table.insert(key.as_str(), idx);
                            }
                            table
                        },
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }
}

fn table_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("table search");
    let keys = random_keys(ITEM_COUNT);

    for strategy in strategies() {
        for function in [HashFunction::Polynomial, HashFunction::Djb2] {
            let mut table = Config::new(strategy)
                .hash_function(function)
                .build::<usize>()
                .unwrap();

            for (idx, key) in keys.iter().enumerate() {
                let _ = table.insert(key.as_str(), idx);
            }

            group.bench_function(
                format!("{} {} hit", strategy.get_name(), function.name()),
                |b| {
                    let mut idx = 0;

                    b.iter(|| {
                        idx = (idx + 1) % keys.len();
                        table.search(&keys[idx]).is_ok()
                    });
                },
            );

            group.bench_function(
                format!("{} {} miss", strategy.get_name(), function.name()),
                |b| {
                    b.iter(|| table.search("this key does not exist").is_err());
                },
            );

            eprintln!(
                "{} {}: {}",
                strategy.get_name(),
                function.name(),
                table.statistics()
            );
        }
    }
}

criterion_group!(benches, table_insert, table_search);
criterion_main!(benches);
