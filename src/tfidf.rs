//! Term-frequency–inverse-document-frequency model over part descriptions.
//!
//! The model is fitted once over the full corpus of canonical description
//! sentences (every catalog part, in catalog order) and never updated.
//! Document vectors are stored by corpus index, so two parts whose rendered
//! descriptions happen to be byte-identical still keep distinct vectors.
//!
//! # Weighting
//!
//! ```text
//! tf(t, d)  = raw count of t in d
//! idf(t)    = 1 + ln(N / (1 + df(t)))
//! w(t, d)   = tf(t, d) × idf(t)
//! ```
//!
//! `idf` is strictly positive for every `df ≤ N`, so all vector components
//! are non-negative and cosine similarity stays in `[0, 1]`.

use std::collections::{HashMap, HashSet};

/// A fitted TF-IDF model: vocabulary, idf table, and per-document vectors.
pub struct TfIdfModel {
    vocab: HashMap<String, usize>,
    idf: Vec<f64>,
    vectors: Vec<Vec<f64>>,
}

impl TfIdfModel {
    /// Fit a model over `documents`. Vector `i` corresponds to `documents[i]`.
    pub fn fit(documents: &[String]) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|doc| tokenize(doc)).collect();

        let mut vocab: HashMap<String, usize> = HashMap::new();
        let mut df: Vec<usize> = Vec::new();
        for terms in &tokenized {
            let mut seen: HashSet<&str> = HashSet::new();
            for term in terms {
                if !seen.insert(term) {
                    continue;
                }
                let id = match vocab.get(term.as_str()) {
                    Some(&id) => id,
                    None => {
                        let id = vocab.len();
                        vocab.insert(term.clone(), id);
                        df.push(0);
                        id
                    }
                };
                df[id] += 1;
            }
        }

        let doc_count = documents.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| 1.0 + (doc_count / (1.0 + d as f64)).ln())
            .collect();

        let vectors = tokenized
            .iter()
            .map(|terms| weigh(terms, &vocab, &idf))
            .collect();

        Self { vocab, idf, vectors }
    }

    /// Number of documents the model was fitted over.
    pub fn document_count(&self) -> usize {
        self.vectors.len()
    }

    /// Number of distinct terms in the fitted vocabulary.
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Weight vector for document `index`, as fitted.
    pub fn document_vector(&self, index: usize) -> Option<&[f64]> {
        self.vectors.get(index).map(Vec::as_slice)
    }

    /// Project arbitrary text into the fitted vocabulary.
    ///
    /// Terms outside the vocabulary contribute nothing; text made up
    /// entirely of unknown terms projects to the zero vector.
    pub fn vector(&self, text: &str) -> Vec<f64> {
        weigh(&tokenize(text), &self.vocab, &self.idf)
    }
}

fn weigh(terms: &[String], vocab: &HashMap<String, usize>, idf: &[f64]) -> Vec<f64> {
    let mut vector = vec![0.0; vocab.len()];
    for term in terms {
        if let Some(&id) = vocab.get(term.as_str()) {
            vector[id] += idf[id];
        }
    }
    vector
}

/// Whitespace tokenizer with case folding.
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Compute cosine similarity between two weight vectors.
///
/// Returns `0.0` for empty vectors, vectors of different lengths, or when
/// either vector has (near-)zero magnitude.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f64::EPSILON {
        return 0.0;
    }

    dot / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_cosine_identical() {
        let v = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        let sim = cosine_similarity(&a, &b);
        assert!(sim.abs() < 1e-9);
    }

    #[test]
    fn test_cosine_symmetric() {
        let a = vec![0.2, 1.5, 0.0, 3.0];
        let b = vec![1.0, 0.5, 2.0, 0.1];
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_cosine_empty() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_cosine_different_lengths() {
        let a = vec![1.0, 2.0];
        let b = vec![1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_zero_vector() {
        let a = vec![0.0, 0.0, 0.0];
        let b = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_fit_dimensions() {
        let model = TfIdfModel::fit(&docs(&["alpha beta", "beta gamma delta"]));
        assert_eq!(model.document_count(), 2);
        assert_eq!(model.vocab_size(), 4);
        assert_eq!(model.document_vector(0).unwrap().len(), 4);
        assert!(model.document_vector(2).is_none());
    }

    #[test]
    fn test_identical_documents_keep_distinct_vectors() {
        let model = TfIdfModel::fit(&docs(&["same text here", "same text here"]));
        let a = model.document_vector(0).unwrap();
        let b = model.document_vector(1).unwrap();
        assert_eq!(a, b);
        // Same weights, but stored separately: index 1 is addressable on its own.
        assert_eq!(model.document_count(), 2);
    }

    #[test]
    fn test_weights_non_negative() {
        let model = TfIdfModel::fit(&docs(&["a b c", "a b", "a"]));
        for i in 0..model.document_count() {
            for &w in model.document_vector(i).unwrap() {
                assert!(w >= 0.0, "negative weight {}", w);
            }
        }
    }

    #[test]
    fn test_query_similarity_bounded() {
        let model = TfIdfModel::fit(&docs(&[
            "amd ryzen cpu with 6 cores",
            "intel core cpu with 8 cores",
            "nvidia geforce gpu with 12gb",
        ]));
        let query = model.vector("gaming cpu with cores");
        for i in 0..model.document_count() {
            let sim = cosine_similarity(&query, model.document_vector(i).unwrap());
            assert!((0.0..=1.0 + 1e-9).contains(&sim), "similarity {} out of range", sim);
        }
    }

    #[test]
    fn test_unknown_terms_project_to_zero() {
        let model = TfIdfModel::fit(&docs(&["alpha beta", "gamma delta"]));
        let query = model.vector("epsilon zeta");
        assert!(query.iter().all(|&w| w == 0.0));
        assert_eq!(
            cosine_similarity(&query, model.document_vector(0).unwrap()),
            0.0
        );
    }

    #[test]
    fn test_case_folding() {
        let model = TfIdfModel::fit(&docs(&["AMD Ryzen", "Intel Core"]));
        let upper = model.vector("AMD RYZEN");
        let lower = model.vector("amd ryzen");
        assert_eq!(upper, lower);
        assert!(cosine_similarity(&upper, model.document_vector(0).unwrap()) > 0.9);
    }
}
