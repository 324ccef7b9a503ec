use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use listprompt::{List, Listing, StreamList};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::runtime::Runtime;

fn generate_paths(count: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(42);
    let dirs = ["src", "tests", "benches", "docs", "src/app", "src/list", "src/render"];
    let stems = ["main", "lib", "config", "error", "runtime", "viewport", "catalog", "theme"];
    let exts = ["rs", "md", "toml", "txt"];

    (0..count)
        .map(|i| {
            format!(
                "{}/{}_{}.{}",
                dirs[rng.gen_range(0..dirs.len())],
                stems[rng.gen_range(0..stems.len())],
                i,
                exts[rng.gen_range(0..exts.len())]
            )
        })
        .collect()
}

fn bench_fuzzy_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("fuzzy_search");
    group.measurement_time(Duration::from_secs(10));

    for count in [1_000, 10_000, 50_000] {
        let items = generate_paths(count);
        for query in ["rs", "srcapp", "viewport_9"] {
            group.bench_with_input(
                BenchmarkId::new(format!("{count}_items"), query),
                &query,
                |b, query| {
                    let mut list = List::new(items.clone(), 10).expect("valid size");
                    b.iter(|| {
                        list.search(black_box(query));
                        black_box(list.len())
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_navigation(c: &mut Criterion) {
    let items = generate_paths(10_000);
    let mut list = List::new(items, 10).expect("valid size");
    list.search("src");

    c.bench_function("page_through_matches", |b| {
        b.iter(|| {
            while list.can_page_down() {
                list.page_down();
            }
            while list.can_page_up() {
                list.page_up();
            }
            black_box(list.items().len())
        });
    });
}

fn bench_stream_population(c: &mut Criterion) {
    let rt = Runtime::new().expect("runtime");
    let items = generate_paths(20_000);

    c.bench_function("stream_population_20k", |b| {
        b.to_async(&rt).iter(|| {
            let items = items.clone();
            async move {
                let mut list = StreamList::new(futures::stream::iter(items), 10).expect("valid size");
                let mut progress = list.take_progress().expect("progress channel");
                while progress.recv().await.is_some() {}
                black_box(list.item_count())
            }
        });
    });
}

criterion_group!(
    benches,
    bench_fuzzy_search,
    bench_navigation,
    bench_stream_population
);
criterion_main!(benches);
