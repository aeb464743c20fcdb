use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use upsell_rules::{Cart, MemoryRuleStore, RuleDraft, RuleKind, UpsellEngine};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "upsell_rules=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut engine = UpsellEngine::new(MemoryRuleStore::new());

    let saved = engine
        .save(&RuleDraft::global("rule-1").upsell_products(["cable", "adapter"]))
        .expect("rule should be accepted");
    println!("Saved: {saved}");

    // The admin UI greys out GLOBAL_EXCEPT while a GLOBAL rule is enabled
    let check = engine
        .can_enable(RuleKind::GlobalExcept)
        .expect("store unavailable");
    println!("Can enable GLOBAL_EXCEPT: {check}");

    // A draft with several mistakes reports all of them at once
    let draft = RuleDraft::triggered("rule-2")
        .trigger_products(["iphone-15"])
        .upsell_products(["iphone-15", "iphone-case", "iphone-case"])
        .limit(9);
    match engine.save(&draft) {
        Ok(rule) => println!("Saved: {rule}"),
        Err(err) => {
            println!("Rejected:");
            if let Some(errors) = err.validation_errors() {
                for error in errors {
                    println!("  [{:?}] {error}", error.category());
                }
            }
        }
    }

    // Fix the draft and try again
    let fixed = RuleDraft::triggered("rule-2")
        .trigger_products(["iphone-15"])
        .upsell_products(["iphone-case", "screen-protector"])
        .limit(2);
    engine.save(&fixed).expect("fixed rule should be accepted");

    let cart = Cart::from_products(["iphone-15"]);
    match engine.recommend(&cart).expect("store unavailable") {
        Some(rule) => println!("Recommend: {rule}"),
        None => println!("Recommend: nothing"),
    }
}
