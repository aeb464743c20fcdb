use upsell_rules::{evaluate, Cart, RuleDraft};

fn main() {
    // Define rules
    let rules = vec![
        RuleDraft::global("rule-1")
            .upsell_products(["cable", "adapter"])
            .build(&[])
            .expect("invalid rule"),
        RuleDraft::triggered("rule-2")
            .trigger_products(["iphone-15"])
            .upsell_products(["iphone-case", "screen-protector"])
            .limit(2)
            .build(&[])
            .expect("invalid rule"),
    ];

    for rule in &rules {
        println!("{rule}");
    }

    // Evaluate against a cart
    let cart = Cart::from_products(["iphone-15", "charger"]).with_total(1029.0);

    match evaluate(&rules, &cart) {
        Some(rule) => {
            println!("Result: {rule}");
            for product in rule.displayed_upsells() {
                println!("  show {product}");
            }
        }
        None => println!("No upsell rule matched."),
    }
}
