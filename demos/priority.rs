use upsell_rules::{evaluate, Cart, Rule, RuleDraft};

fn report(label: &str, rules: &[Rule], cart: &Cart) {
    match evaluate(rules, cart) {
        Some(rule) => println!("{label}: {rule}"),
        None => println!("{label}: no match"),
    }
}

fn main() {
    // Triggered rules outrank GLOBAL_EXCEPT, which outranks GLOBAL,
    // whatever order the rules are stored in.
    let rules = vec![
        RuleDraft::global_except("no-gift-cards")
            .excluded_products(["gift-card", "warranty"])
            .upsell_products(["gift-wrap"])
            .build(&[])
            .expect("invalid rule"),
        RuleDraft::triggered("laptop-big-spender")
            .trigger_products(["laptop"])
            .upsell_products(["docking-station"])
            .cart_value_threshold(2000.0)
            .build(&[])
            .expect("invalid rule"),
        RuleDraft::triggered("laptop")
            .trigger_products(["laptop"])
            .upsell_products(["laptop-sleeve", "mouse"])
            .build(&[])
            .expect("invalid rule"),
    ];

    // Expensive laptop cart: the thresholded rule comes first in its tier
    report(
        "Premium laptop",
        &rules,
        &Cart::from_products(["laptop", "warranty"]).with_total(2400.0),
    );

    // Cheap laptop cart: threshold fails, next triggered rule wins
    report(
        "Budget laptop",
        &rules,
        &Cart::from_products(["laptop"]).with_total(900.0),
    );

    // No trigger, no excluded item: GLOBAL_EXCEPT applies
    report("Clothing", &rules, &Cart::from_products(["shirt", "shoes"]));

    // Excluded item and no trigger: nothing to show
    report("Gift card", &rules, &Cart::from_products(["gift-card"]));
}
