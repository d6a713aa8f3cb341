//! Catalog loading and caching.
//!
//! Reads the two part tables (CPUs, GPUs) from delimited text into typed
//! records. Parsing is strict: the whole load fails on the first malformed
//! row, so `NaN` or half-parsed rows never reach the scorer. The loaded
//! catalog is immutable for the life of the process; [`CatalogCache`] holds
//! the fitted engine and only reloads after an explicit [`CatalogCache::reset`].

use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use csv::StringRecord;
use thiserror::Error;
use tracing::{debug, error};

use crate::config::CatalogConfig;
use crate::models::{Cpu, Gpu, Part};
use crate::recommend::Engine;

/// Expected field count for every row in either table.
const FIELDS_PER_ROW: usize = 10;

/// Failure to produce a usable catalog from the source tables.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}:{line}: {detail}")]
    Row {
        file: String,
        line: u64,
        detail: String,
    },

    #[error("catalog table {path} has a header but no rows")]
    Empty { path: String },
}

/// The two part tables, in source row order.
///
/// Row order carries no meaning beyond stable tie-breaking, so it is
/// preserved exactly as read.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub cpus: Vec<Cpu>,
    pub gpus: Vec<Gpu>,
}

impl Catalog {
    /// All parts in corpus order: CPUs first, then GPUs.
    pub fn parts<'a>(&'a self) -> impl Iterator<Item = Part<'a>> + 'a {
        self.cpus
            .iter()
            .map(Part::Cpu)
            .chain(self.gpus.iter().map(Part::Gpu))
    }

    pub fn len(&self) -> usize {
        self.cpus.len() + self.gpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cpus.is_empty() && self.gpus.is_empty()
    }
}

/// Load both tables. Errors are logged here and propagated; callers must
/// not substitute empty data on failure.
pub fn load_catalog(config: &CatalogConfig) -> Result<Catalog, CatalogError> {
    match try_load(config) {
        Ok(catalog) => {
            debug!(
                cpus = catalog.cpus.len(),
                gpus = catalog.gpus.len(),
                "catalog loaded"
            );
            Ok(catalog)
        }
        Err(err) => {
            error!(%err, "catalog load failed");
            Err(err)
        }
    }
}

fn try_load(config: &CatalogConfig) -> Result<Catalog, CatalogError> {
    let cpus = load_table(&config.cpus, parse_cpu)?;
    let gpus = load_table(&config.gpus, parse_gpu)?;
    Ok(Catalog { cpus, gpus })
}

fn load_table<T>(
    path: &Path,
    parse: fn(&Path, u64, &StringRecord) -> Result<T, CatalogError>,
) -> Result<Vec<T>, CatalogError> {
    let file = File::open(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;

    // First record is the header; it is skipped, never validated by name.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            row_error(path, line, e.to_string())
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        rows.push(parse(path, line, &record)?);
    }

    if rows.is_empty() {
        return Err(CatalogError::Empty {
            path: path.display().to_string(),
        });
    }

    Ok(rows)
}

fn parse_cpu(file: &Path, line: u64, record: &StringRecord) -> Result<Cpu, CatalogError> {
    check_field_count(file, line, record)?;
    Ok(Cpu {
        brand: text_field(file, line, record, 0, "brand")?,
        model: text_field(file, line, record, 1, "model")?,
        cores: int_field(file, line, record, 2, "cores")?,
        threads: int_field(file, line, record, 3, "threads")?,
        base_clock: float_field(file, line, record, 4, "base_clock")?,
        boost_clock: float_field(file, line, record, 5, "boost_clock")?,
        tdp: float_field(file, line, record, 6, "tdp")?,
        price: float_field(file, line, record, 7, "price")?,
        amazon_link: raw_field(record, 8),
        flipkart_link: raw_field(record, 9),
    })
}

fn parse_gpu(file: &Path, line: u64, record: &StringRecord) -> Result<Gpu, CatalogError> {
    check_field_count(file, line, record)?;
    Ok(Gpu {
        brand: text_field(file, line, record, 0, "brand")?,
        model: text_field(file, line, record, 1, "model")?,
        memory: int_field(file, line, record, 2, "memory")?,
        memory_type: text_field(file, line, record, 3, "memory_type")?,
        base_clock: float_field(file, line, record, 4, "base_clock")?,
        boost_clock: float_field(file, line, record, 5, "boost_clock")?,
        tdp: float_field(file, line, record, 6, "tdp")?,
        price: float_field(file, line, record, 7, "price")?,
        amazon_link: raw_field(record, 8),
        flipkart_link: raw_field(record, 9),
    })
}

fn check_field_count(file: &Path, line: u64, record: &StringRecord) -> Result<(), CatalogError> {
    if record.len() != FIELDS_PER_ROW {
        return Err(row_error(
            file,
            line,
            format!("expected {} fields, found {}", FIELDS_PER_ROW, record.len()),
        ));
    }
    Ok(())
}

fn text_field(
    file: &Path,
    line: u64,
    record: &StringRecord,
    idx: usize,
    name: &str,
) -> Result<String, CatalogError> {
    let value = record.get(idx).unwrap_or("");
    if value.is_empty() {
        return Err(row_error(file, line, format!("empty {} field", name)));
    }
    Ok(value.to_string())
}

/// Link fields are opaque and may be empty.
fn raw_field(record: &StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or("").to_string()
}

fn int_field(
    file: &Path,
    line: u64,
    record: &StringRecord,
    idx: usize,
    name: &str,
) -> Result<u32, CatalogError> {
    let raw = record.get(idx).unwrap_or("");
    u32::from_str(raw)
        .map_err(|e| row_error(file, line, format!("bad {} value '{}': {}", name, raw, e)))
}

fn float_field(
    file: &Path,
    line: u64,
    record: &StringRecord,
    idx: usize,
    name: &str,
) -> Result<f64, CatalogError> {
    let raw = record.get(idx).unwrap_or("");
    let value = f64::from_str(raw)
        .map_err(|e| row_error(file, line, format!("bad {} value '{}': {}", name, raw, e)))?;
    // NaN parses successfully; the catalog invariant is finite and non-negative.
    if !value.is_finite() || value < 0.0 {
        return Err(row_error(
            file,
            line,
            format!("{} value '{}' is not a finite non-negative number", name, raw),
        ));
    }
    Ok(value)
}

fn row_error(file: &Path, line: u64, detail: impl Into<String>) -> CatalogError {
    CatalogError::Row {
        file: file.display().to_string(),
        line,
        detail: detail.into(),
    }
}

/// Owned, lazily-initialized engine cache.
///
/// The first [`get_or_load`](CatalogCache::get_or_load) call reads the tables
/// and fits the description model; later calls return the same engine without
/// touching storage. A failed load leaves the cache empty, so a later call
/// retries.
#[derive(Default)]
pub struct CatalogCache {
    engine: Option<Engine>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&mut self, config: &CatalogConfig) -> Result<&Engine, CatalogError> {
        let engine = match self.engine.take() {
            Some(engine) => engine,
            None => Engine::new(load_catalog(config)?),
        };
        Ok(self.engine.insert(engine))
    }

    /// Drop the cached engine so the next call reloads from storage.
    pub fn reset(&mut self) {
        self.engine = None;
    }
}
