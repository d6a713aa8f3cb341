//! Catalog overview.
//!
//! Provides a quick summary of what's loaded: row counts, price ranges, and
//! the size of the fitted vocabulary. Used by `rig catalog` to give
//! confidence that the tables parse and the model fits as expected.

use anyhow::Result;

use crate::catalog::load_catalog;
use crate::config::Config;
use crate::recommend::Engine;

/// Run the catalog command: load the tables and print a summary.
pub fn run_catalog(config: &Config) -> Result<()> {
    let catalog = load_catalog(&config.catalog)?;
    let engine = Engine::new(catalog);
    let catalog = engine.catalog();

    println!("Rig Advisor — Catalog Stats");
    println!("===========================");
    println!();
    println!("  CPU table:   {}", config.catalog.cpus.display());
    println!("  GPU table:   {}", config.catalog.gpus.display());
    println!();

    let (cpu_min, cpu_max) = price_range(catalog.cpus.iter().map(|c| c.price));
    let (gpu_min, gpu_max) = price_range(catalog.gpus.iter().map(|g| g.price));
    println!(
        "  CPUs:        {} (price {} to {})",
        catalog.cpus.len(),
        cpu_min,
        cpu_max
    );
    println!(
        "  GPUs:        {} (price {} to {})",
        catalog.gpus.len(),
        gpu_min,
        gpu_max
    );
    println!();
    println!(
        "  Vocabulary:  {} terms over {} descriptions",
        engine.model().vocab_size(),
        engine.model().document_count()
    );

    Ok(())
}

/// Min and max over a non-empty price sequence.
fn price_range(prices: impl Iterator<Item = f64>) -> (f64, f64) {
    prices.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), p| {
        (min.min(p), max.max(p))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_range() {
        let (min, max) = price_range([150.0, 89.99, 549.0].into_iter());
        assert_eq!(min, 89.99);
        assert_eq!(max, 549.0);
    }
}
