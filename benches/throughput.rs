use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use criterion::{criterion_group, criterion_main, Criterion};
use upsell_rules::{evaluate, Cart, Rule, RuleDraft};

fn build_shared_rules() -> (Arc<Vec<Rule>>, Cart) {
    let n = 20;

    let mut rules: Vec<Rule> = (0..n)
        .map(|i| {
            RuleDraft::triggered(&format!("t{i}"))
                .trigger_products([format!("p{i}")])
                .upsell_products([format!("u{i}")])
                .cart_value_threshold(100.0)
                .build(&[])
                .unwrap()
        })
        .collect();
    rules.push(
        RuleDraft::global_except("fallback")
            .excluded_collections(["gift-cards"])
            .upsell_products(["gift-wrap"])
            .build(&[])
            .unwrap(),
    );

    let cart = Cart::from_products([format!("p{}", n - 1)])
        .with_collection("apparel")
        .with_total(250.0);

    (Arc::new(rules), cart)
}

fn bench_throughput(c: &mut Criterion) {
    let thread_counts = [1, 2, 4, 8];

    let mut group = c.benchmark_group("throughput");
    group.measurement_time(Duration::from_secs(5));

    for &threads in &thread_counts {
        let (rules, cart) = build_shared_rules();

        group.bench_function(&format!("{threads}_threads"), |b| {
            b.iter_custom(|iters| {
                let per_thread = iters / threads as u64;
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let rules = Arc::clone(&rules);
                        let cart = cart.clone();
                        thread::spawn(move || {
                            let start = Instant::now();
                            for _ in 0..per_thread {
                                let _ = evaluate(&rules, &cart);
                            }
                            start.elapsed()
                        })
                    })
                    .collect();

                let mut max_elapsed = Duration::ZERO;
                for h in handles {
                    let elapsed = h.join().unwrap();
                    if elapsed > max_elapsed {
                        max_elapsed = elapsed;
                    }
                }
                max_elapsed
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_throughput);
criterion_main!(benches);
