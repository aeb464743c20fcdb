use std::sync::Arc;
use std::thread;

use upsell_rules::{evaluate, Cart, Rule, RuleDraft};

#[test]
fn evaluate_across_threads() {
    let rules: Arc<Vec<Rule>> = Arc::new(vec![
        RuleDraft::global("rule-1")
            .upsell_products(["cable", "adapter"])
            .build(&[])
            .unwrap(),
        RuleDraft::triggered("rule-2")
            .trigger_products(["iphone-15"])
            .upsell_products(["iphone-case"])
            .build(&[])
            .unwrap(),
        RuleDraft::triggered("rule-3")
            .trigger_products(["laptop"])
            .upsell_products(["laptop-sleeve"])
            .cart_value_threshold(1000.0)
            .build(&[])
            .unwrap(),
    ]);

    let carts = vec![
        // Thread 1: iphone -> rule-2
        Cart::from_products(["iphone-15"]),
        // Thread 2: cheap laptop misses the threshold -> rule-1
        Cart::from_products(["laptop"]).with_total(800.0),
        // Thread 3: expensive laptop -> rule-3
        Cart::from_products(["laptop"]).with_total(1800.0),
        // Thread 4: empty cart -> rule-1
        Cart::new(),
    ];

    let handles: Vec<_> = carts
        .into_iter()
        .map(|cart| {
            let rules = Arc::clone(&rules);
            thread::spawn(move || evaluate(&rules, &cart).map(|r| r.id().to_owned()))
        })
        .collect();

    let results: Vec<Option<String>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(
        results,
        vec![
            Some("rule-2".to_owned()),
            Some("rule-1".to_owned()),
            Some("rule-3".to_owned()),
            Some("rule-1".to_owned()),
        ]
    );
}

#[test]
fn rules_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Rule>();
    assert_send_sync::<Cart>();
    assert_send_sync::<RuleDraft>();
}
