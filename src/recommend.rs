//! Budget split, similarity scoring, and top-1 selection per part class.
//!
//! # Scoring Algorithm
//!
//! 1. Split the budget into CPU/GPU shares by use-case weights.
//! 2. Keep parts whose price fits their class share (strict, no tolerance).
//! 3. Build the query from the use-case label and optional hint, case-folded.
//! 4. Score each eligible part: cosine(query, description) × spec fit.
//! 5. Select the maximum per class; ties go to the earlier catalog row.
//!
//! An empty class never blocks the other: the result simply carries an
//! absent slot and its price contributes nothing to the total.

use thiserror::Error;
use tracing::debug;

use crate::catalog::Catalog;
use crate::models::{Build, Part};
use crate::tfidf::{cosine_similarity, TfIdfModel};

/// Workload profiles with dedicated budget splits and spec weights.
///
/// Unknown labels take [`UseCase::Other`]: a balanced split and unweighted
/// spec averages. The raw label still flows into the similarity query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseCase {
    Gaming,
    Productivity,
    Streaming,
    Design,
    Development,
    Other,
}

impl UseCase {
    /// Case-insensitive label match.
    pub fn parse(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "gaming" => UseCase::Gaming,
            "productivity" => UseCase::Productivity,
            "streaming" => UseCase::Streaming,
            "design" => UseCase::Design,
            "development" => UseCase::Development,
            _ => UseCase::Other,
        }
    }

    /// `(cpu_weight, gpu_weight)`; the pair always sums to 1.0.
    pub fn budget_split(self) -> (f64, f64) {
        match self {
            UseCase::Gaming => (0.3, 0.7),
            UseCase::Productivity => (0.7, 0.3),
            UseCase::Streaming => (0.5, 0.5),
            UseCase::Design => (0.4, 0.6),
            UseCase::Development => (0.8, 0.2),
            UseCase::Other => (0.5, 0.5),
        }
    }
}

/// Unexpected internal failure while scoring.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("budget must be a finite number, got {0}")]
    InvalidBudget(f64),

    #[error("no fitted vector for catalog part at corpus index {index}")]
    MissingVector { index: usize },
}

/// A loaded catalog plus the description model fitted over it.
///
/// Construction fits the model once; [`recommend`](Engine::recommend) is a
/// pure function of the engine and its arguments afterwards.
pub struct Engine {
    catalog: Catalog,
    model: TfIdfModel,
}

impl Engine {
    /// Fit the description model over every part, in catalog order.
    pub fn new(catalog: Catalog) -> Self {
        let corpus: Vec<String> = catalog.parts().map(|part| part.description()).collect();
        let model = TfIdfModel::fit(&corpus);
        Self { catalog, model }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn model(&self) -> &TfIdfModel {
        &self.model
    }

    /// Recommend the best CPU and GPU for `budget` and `use_case`.
    ///
    /// `use_case` is matched case-insensitively against the known labels;
    /// anything else gets the balanced profile. `hint` is free text folded
    /// into the similarity query.
    pub fn recommend(
        &self,
        budget: f64,
        use_case: &str,
        hint: Option<&str>,
    ) -> Result<Build, RecommendError> {
        if !budget.is_finite() {
            return Err(RecommendError::InvalidBudget(budget));
        }

        let profile = UseCase::parse(use_case);
        let (cpu_weight, gpu_weight) = profile.budget_split();
        let cpu_budget = budget * cpu_weight;
        let gpu_budget = budget * gpu_weight;

        let query = match hint.map(str::trim) {
            Some(h) if !h.is_empty() => format!("{} {}", use_case, h).to_lowercase(),
            _ => use_case.to_lowercase(),
        };
        let query_vec = self.model.vector(&query);

        let cpu = self.select(&self.catalog.cpus, 0, cpu_budget, profile, &query_vec, Part::Cpu)?;
        let gpu = self.select(
            &self.catalog.gpus,
            self.catalog.cpus.len(),
            gpu_budget,
            profile,
            &query_vec,
            Part::Gpu,
        )?;

        let total_price =
            cpu.map(|c| c.price).unwrap_or(0.0) + gpu.map(|g| g.price).unwrap_or(0.0);

        debug!(
            budget,
            use_case,
            cpu_budget,
            gpu_budget,
            cpu_found = cpu.is_some(),
            gpu_found = gpu.is_some(),
            "recommendation computed"
        );

        Ok(Build {
            cpu: cpu.cloned(),
            gpu: gpu.cloned(),
            total_price,
        })
    }

    /// Top-1 selection within one class.
    ///
    /// `offset` maps a slice index onto the corpus index of the fitted model
    /// (CPUs first, then GPUs). First occurrence wins on score ties.
    fn select<'a, T>(
        &'a self,
        parts: &'a [T],
        offset: usize,
        share: f64,
        profile: UseCase,
        query_vec: &[f64],
        as_part: impl Fn(&'a T) -> Part<'a>,
    ) -> Result<Option<&'a T>, RecommendError> {
        if share <= 0.0 {
            return Ok(None);
        }

        let mut best: Option<(&T, f64)> = None;
        for (i, item) in parts.iter().enumerate() {
            let part = as_part(item);
            if part.price() > share {
                continue;
            }

            let index = offset + i;
            let doc_vec = self
                .model
                .document_vector(index)
                .ok_or(RecommendError::MissingVector { index })?;
            let score = cosine_similarity(query_vec, doc_vec) * spec_score(part, profile);

            if best.map_or(true, |(_, s)| score > s) {
                best = Some((item, score));
            }
        }

        Ok(best.map(|(item, _)| item))
    }
}

/// Hand-weighted linear fit of a part's specs for a workload.
///
/// Each term is normalized against a high-end reference (16 cores, 32
/// threads, 5.0 GHz boost; 16 GB memory, 2500 MHz boost).
fn spec_score(part: Part<'_>, use_case: UseCase) -> f64 {
    match part {
        Part::Cpu(cpu) => {
            let core = cpu.cores as f64 / 16.0;
            let thread = cpu.threads as f64 / 32.0;
            let clock = cpu.boost_clock / 5.0;
            match use_case {
                UseCase::Gaming => 0.5 * clock + 0.3 * core + 0.2 * thread,
                UseCase::Productivity => 0.4 * core + 0.4 * thread + 0.2 * clock,
                UseCase::Development => 0.5 * thread + 0.3 * core + 0.2 * clock,
                _ => (core + thread + clock) / 3.0,
            }
        }
        Part::Gpu(gpu) => {
            let memory = gpu.memory as f64 / 16.0;
            let clock = gpu.boost_clock / 2500.0;
            match use_case {
                UseCase::Gaming => 0.6 * clock + 0.4 * memory,
                UseCase::Design => 0.7 * memory + 0.3 * clock,
                _ => (memory + clock) / 2.0,
            }
        }
    }
}
