//! Text vectorizer - character / word n-gram counts with optional tf-idf weighting

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use super::artifact::{Analyzer, Norm, VectorizerSpec};

/// Sparse feature vector: feature index -> weight.
///
/// Ordered so that downstream dot products always sum in the same order.
pub type SparseVector = BTreeMap<usize, f64>;

/// Word tokens: maximal runs of two or more word chars.
///
/// Word chars are letters, numbers and `_`. Combining marks (Mn/Mc) break a token,
/// the way Python's `(?u)\b\w\w+\b` does; the regex crate's own `\w` would keep them.
fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"[\p{L}\p{N}_]{2,}").expect("static token regex"))
}

/// Python also treats the information separators U+001C..U+001F as whitespace
fn white_spaces() -> &'static Regex {
    static WHITE_SPACES: OnceLock<Regex> = OnceLock::new();
    WHITE_SPACES.get_or_init(|| Regex::new(r"[\s\x1C-\x1F]{2,}").expect("static whitespace regex"))
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Split text into n-gram terms according to the analyzer
pub fn analyze(analyzer: Analyzer, ngram_range: (usize, usize), lowercase: bool, text: &str) -> Vec<String> {
    let text = if lowercase { text.to_lowercase() } else { text.to_string() };
    let (min_n, max_n) = ngram_range;

    match analyzer {
        Analyzer::Char => char_ngrams(&text, min_n, max_n),
        Analyzer::CharWb => char_wb_ngrams(&text, min_n, max_n),
        Analyzer::Word => word_ngrams(&text, min_n, max_n),
    }
}

fn char_ngrams(text: &str, min_n: usize, max_n: usize) -> Vec<String> {
    // only runs of two or more whitespace chars collapse; a lone tab stays a tab
    let chars: Vec<char> = white_spaces().replace_all(text, " ").chars().collect();
    let mut grams = Vec::new();

    for n in min_n..=max_n.min(chars.len()) {
        for window in chars.windows(n) {
            grams.push(window.iter().collect());
        }
    }
    grams
}

fn char_wb_ngrams(text: &str, min_n: usize, max_n: usize) -> Vec<String> {
    let mut grams = Vec::new();

    for word in text.split(is_separator).filter(|w| !w.is_empty()) {
        let padded: Vec<char> = std::iter::once(' ')
            .chain(word.chars())
            .chain(std::iter::once(' '))
            .collect();

        for n in min_n..=max_n {
            if padded.len() <= n {
                // short word counted once
                grams.push(padded.iter().collect());
                break;
            }
            for window in padded.windows(n) {
                grams.push(window.iter().collect());
            }
        }
    }
    grams
}

fn word_ngrams(text: &str, min_n: usize, max_n: usize) -> Vec<String> {
    let tokens: Vec<&str> = token_pattern().find_iter(text).map(|m| m.as_str()).collect();
    let mut grams = Vec::new();

    for n in min_n..=max_n.min(tokens.len()) {
        for window in tokens.windows(n) {
            grams.push(window.join(" "));
        }
    }
    grams
}

/// Vectorizer bound to a fitted vocabulary
pub struct Vectorizer {
    spec: VectorizerSpec,
}

impl Vectorizer {
    pub fn new(spec: VectorizerSpec) -> Self {
        Self { spec }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.spec.vocabulary.len()
    }

    /// Term counts -> (sublinear) tf -> idf -> norm
    pub fn transform(&self, text: &str) -> SparseVector {
        let spec = &self.spec;
        let mut features = SparseVector::new();

        for term in analyze(spec.analyzer, spec.ngram_range, spec.lowercase, text) {
            if let Some(&index) = spec.vocabulary.get(&term) {
                *features.entry(index).or_insert(0.0) += 1.0;
            }
        }

        if spec.sublinear_tf {
            for tf in features.values_mut() {
                *tf = 1.0 + tf.ln();
            }
        }

        if let Some(idf) = &spec.idf {
            for (index, value) in features.iter_mut() {
                *value *= idf[*index];
            }
        }

        match spec.norm {
            Some(Norm::L1) => normalize(&mut features, |v| v.iter().map(|x| x.abs()).sum()),
            Some(Norm::L2) => normalize(&mut features, |v| v.iter().map(|x| x * x).sum::<f64>().sqrt()),
            None => {}
        }

        features
    }
}

fn normalize(features: &mut SparseVector, norm: impl Fn(&[f64]) -> f64) {
    let values: Vec<f64> = features.values().copied().collect();
    let total = norm(&values);
    if total > 0.0 {
        for value in features.values_mut() {
            *value /= total;
        }
    }
}
