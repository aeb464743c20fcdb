use std::sync::Arc;
use std::thread;

use upsell_rules::{evaluate, Cart, RuleDraft};

fn main() {
    let rules = Arc::new(vec![
        RuleDraft::global("rule-1")
            .upsell_products(["cable", "adapter"])
            .build(&[])
            .expect("invalid rule"),
        RuleDraft::triggered("rule-2")
            .trigger_products(["iphone-15"])
            .upsell_products(["iphone-case"])
            .cart_value_threshold(500.0)
            .build(&[])
            .expect("invalid rule"),
    ]);

    let handles: Vec<_> = (0..4_u32)
        .map(|i| {
            let rules = Arc::clone(&rules);
            thread::spawn(move || {
                // Each request brings its own cart snapshot
                let cart = Cart::from_products(["iphone-15"]).with_total(f64::from(250 * i));
                let result = evaluate(&rules, &cart).map(|r| r.id());
                println!("Thread {i}: {result:?}");
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
