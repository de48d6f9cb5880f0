use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

use recstore::predicate::WhereClause;
use recstore::sql::{Projection, tokenize};
use recstore::{Executor, TableStore};

// Test configuration
const TABLE_SIZES: [usize; 3] = [1_000, 10_000, 100_000];
const SEED: u64 = 0x5eed;

const CLAUSES: [(&str, &str); 4] = [
    ("compare", "age>50"),
    ("like", "name_like_7"),
    ("in", "city_in_(oslo,lima,pune)"),
    ("fold", "age>=30 and city==oslo or name_like_u1"),
];

const CITIES: [&str; 6] = ["oslo", "lima", "pune", "kyiv", "quito", "accra"];

fn populated_executor(rows: usize) -> Executor {
    let mut rng = StdRng::seed_from_u64(SEED);
    let executor = Executor::new(TableStore::new());

    let columns = ["id", "name", "age", "city"].map(String::from).to_vec();
    executor.create_table("people", columns, None).unwrap();

    let tuples = (0..rows)
        .map(|i| {
            vec![
                i.to_string(),
                format!("u{}", rng.gen_range(0..rows)),
                rng.gen_range(18..90).to_string(),
                CITIES[rng.gen_range(0..CITIES.len())].to_string(),
            ]
        })
        .collect();
    executor.insert("people", tuples).unwrap();
    executor
}

fn where_clause(text: &str) -> WhereClause {
    WhereClause::parse(&tokenize(text)).unwrap()
}

// Raw predicate evaluation over one table
pub fn bench_where_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("WhereEvaluate");

    for rows in TABLE_SIZES {
        let executor = populated_executor(rows);
        let handle = executor.store().get_table("people").unwrap();

        for (label, text) in CLAUSES {
            let clause = where_clause(text);
            group.bench_with_input(BenchmarkId::new(label, rows), &clause, |b, clause| {
                b.iter(|| {
                    let table = handle.read();
                    black_box(clause.evaluate(&table).unwrap())
                });
            });
        }
    }

    group.finish();
}

// Full select path: scan, fold and projection
pub fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("Select");
    let projection = Projection::Columns(vec!["name".to_string(), "city".to_string()]);

    for rows in TABLE_SIZES {
        let executor = populated_executor(rows);
        let clause = where_clause("age>50 or city==lima");

        group.bench_function(BenchmarkId::from_parameter(rows), |b| {
            b.iter(|| black_box(executor.select("people", &projection, Some(&clause)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_where_evaluate, bench_select);
criterion_main!(benches);
