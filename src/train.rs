//! Model training and smoke-test run.
//!
//! `rig train` reloads the catalog, refits the description model from
//! scratch, and exercises the full recommendation path on a fixed set of
//! scenarios. There is nothing to persist — the model is cheap enough to
//! refit on every process start — so this doubles as an end-to-end health
//! check for the tables and the scoring pipeline.

use anyhow::Result;

use crate::catalog::load_catalog;
use crate::config::Config;
use crate::recommend::Engine;

/// Fixed smoke scenarios: (budget, use case, hint).
const SCENARIOS: [(f64, &str, &str); 3] = [
    (1000.0, "gaming", "Need high FPS for competitive gaming"),
    (1500.0, "productivity", "Video editing and 3D rendering"),
    (2000.0, "development", "Software development with multiple VMs"),
];

/// Run the train command: refit the model and smoke-test recommendations.
pub fn run_train(config: &Config) -> Result<()> {
    println!("Fitting description model...");

    let catalog = load_catalog(&config.catalog)?;
    println!("  cpus: {}", catalog.cpus.len());
    println!("  gpus: {}", catalog.gpus.len());

    let engine = Engine::new(catalog);
    println!(
        "  vocabulary: {} terms over {} descriptions",
        engine.model().vocab_size(),
        engine.model().document_count()
    );

    println!();
    println!("Testing recommendations...");

    for (budget, use_case, hint) in SCENARIOS {
        println!();
        println!("use case: {}, budget: ${}", use_case, budget);
        println!("hint: {}", hint);

        let build = engine.recommend(budget, use_case, Some(hint))?;
        print_slot("cpu", build.cpu.as_ref().map(|c| (&c.brand, &c.model, c.price)));
        print_slot("gpu", build.gpu.as_ref().map(|g| (&g.brand, &g.model, g.price)));
        println!("  total: ${}", build.total_price);
    }

    println!();
    println!("Training completed.");
    Ok(())
}

fn print_slot(label: &str, chosen: Option<(&String, &String, f64)>) {
    match chosen {
        Some((brand, model, price)) => println!("  {}: {} {} (${})", label, brand, model, price),
        None => println!("  {}: no suitable part within budget", label),
    }
}
