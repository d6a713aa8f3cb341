//! Core data models used throughout Rig Advisor.
//!
//! These types represent the catalog parts and recommendation results that
//! flow through the loading and scoring pipeline.

use serde::Serialize;

/// A CPU row from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cpu {
    pub brand: String,
    pub model: String,
    pub cores: u32,
    pub threads: u32,
    /// Base clock in GHz.
    pub base_clock: f64,
    /// Boost clock in GHz.
    pub boost_clock: f64,
    /// Thermal design power in watts.
    pub tdp: f64,
    pub price: f64,
    pub amazon_link: String,
    pub flipkart_link: String,
}

/// A GPU row from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gpu {
    pub brand: String,
    pub model: String,
    /// Memory size in GB.
    pub memory: u32,
    /// Memory bus/technology label, e.g. `GDDR6`.
    pub memory_type: String,
    /// Base clock in MHz.
    pub base_clock: f64,
    /// Boost clock in MHz.
    pub boost_clock: f64,
    /// Thermal design power in watts.
    pub tdp: f64,
    pub price: f64,
    pub amazon_link: String,
    pub flipkart_link: String,
}

/// A catalog part, tagged by class.
///
/// Scoring logic dispatches on the tag; there is no structural probing of
/// which fields a record happens to carry.
#[derive(Debug, Clone, Copy)]
pub enum Part<'a> {
    Cpu(&'a Cpu),
    Gpu(&'a Gpu),
}

impl<'a> Part<'a> {
    pub fn price(&self) -> f64 {
        match self {
            Part::Cpu(cpu) => cpu.price,
            Part::Gpu(gpu) => gpu.price,
        }
    }

    /// Canonical description sentence for this part.
    ///
    /// These sentences form the document corpus the similarity model is
    /// fitted over, so the wording is stable and class-specific.
    pub fn description(&self) -> String {
        match self {
            Part::Cpu(cpu) => format!(
                "{} {} CPU with {} cores {} threads {}GHz base {}GHz boost {}W TDP",
                cpu.brand,
                cpu.model,
                cpu.cores,
                cpu.threads,
                cpu.base_clock,
                cpu.boost_clock,
                cpu.tdp
            ),
            Part::Gpu(gpu) => format!(
                "{} {} GPU with {}GB {} {}MHz base {}MHz boost {}W TDP",
                gpu.brand,
                gpu.model,
                gpu.memory,
                gpu.memory_type,
                gpu.base_clock,
                gpu.boost_clock,
                gpu.tdp
            ),
        }
    }
}

/// A recommended build: at most one part per class plus the combined price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Build {
    pub cpu: Option<Cpu>,
    pub gpu: Option<Gpu>,
    pub total_price: f64,
}
