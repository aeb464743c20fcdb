use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use upsell_rules::{evaluate_detailed, Cart, RuleDraft};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "upsell_rules=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rules = vec![
        RuleDraft::global("rule-1")
            .upsell_products(["cable", "adapter"])
            .build(&[])
            .expect("invalid rule"),
        RuleDraft::triggered("rule-2")
            .trigger_products(["iphone-15"])
            .upsell_products(["iphone-case"])
            .build(&[])
            .expect("invalid rule"),
        RuleDraft::triggered("rule-3")
            .enabled(false)
            .trigger_products(["laptop"])
            .upsell_products(["laptop-sleeve"])
            .build(&[])
            .expect("invalid rule"),
    ];

    let cart = Cart::from_products(["water-bottle", "notebook"]);
    let report = evaluate_detailed(&rules, &cart);

    println!("{report}");
    println!();
    println!("Consulted: {:?}", report.consulted());
    println!("Tier: {:?}", report.tier());
    println!("Disabled rules skipped: {}", report.skipped_disabled());
    println!("Duration: {:?}", report.duration());
}
