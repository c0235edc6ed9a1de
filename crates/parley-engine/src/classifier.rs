use std::collections::{HashMap, HashSet};

use anyhow::Result;

use crate::intents::IntentSet;

/// Laplace smoothing applied to per-tag token weights
const SMOOTHING_ALPHA: f64 = 1.0;

/// Split free text into lowercase tokens. Apostrophes stay inside tokens
/// so contractions like "i'm" survive as single features.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|token| token.trim_matches('\''))
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
        .collect()
}

/// Outcome of classifying one input
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub tag: String,
    /// Normalized probability of the winning tag, in (0, 1]
    pub confidence: f64,
}

/// Multinomial naive Bayes over tf-idf weighted pattern tokens.
///
/// Trained once at startup from the intent patterns. Each pattern becomes
/// an L2-normalized tf-idf vector; per-tag token weights are smoothed and
/// prediction scores are normalized into probabilities so callers can
/// gate on confidence. Tokens never seen in training are ignored, so an
/// input of only unknown tokens degenerates to the tag priors.
pub struct IntentClassifier {
    tags: Vec<String>,
    log_priors: Vec<f64>,
    vocabulary: HashMap<String, usize>,
    // Per tag, indexed by vocabulary id
    log_likelihoods: Vec<Vec<f64>>,
}

impl IntentClassifier {
    /// Train on every intent that has at least one tokenizable pattern.
    /// Intents without patterns (the fallback) are left out and stay
    /// reachable only through the caller's confidence gate.
    pub fn train(intents: &IntentSet) -> Result<Self> {
        let mut tags = Vec::new();
        let mut docs: Vec<(usize, Vec<String>)> = Vec::new();

        for intent in &intents.intents {
            let intent_docs: Vec<Vec<String>> = intent
                .patterns
                .iter()
                .map(|pattern| tokenize(pattern))
                .filter(|tokens| !tokens.is_empty())
                .collect();
            if intent_docs.is_empty() {
                continue;
            }
            let tag_index = tags.len();
            tags.push(intent.tag.clone());
            for tokens in intent_docs {
                docs.push((tag_index, tokens));
            }
        }

        anyhow::ensure!(!docs.is_empty(), "intent set has no trainable patterns");
        let total_docs = docs.len() as f64;

        // Vocabulary and document frequencies
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_frequency: Vec<f64> = Vec::new();
        for (_, tokens) in &docs {
            let mut seen: HashSet<&str> = HashSet::new();
            for token in tokens {
                if seen.insert(token.as_str()) {
                    let next_id = vocabulary.len();
                    let id = *vocabulary.entry(token.clone()).or_insert(next_id);
                    if id == doc_frequency.len() {
                        doc_frequency.push(0.0);
                    }
                    doc_frequency[id] += 1.0;
                }
            }
        }

        // Smoothed idf over the training patterns
        let idf: Vec<f64> = doc_frequency
            .iter()
            .map(|df| ((1.0 + total_docs) / (1.0 + df)).ln() + 1.0)
            .collect();

        // Accumulate L2-normalized tf-idf vectors per tag
        let mut doc_counts = vec![0.0_f64; tags.len()];
        let mut weight_sums = vec![vec![0.0_f64; vocabulary.len()]; tags.len()];
        for (tag_index, tokens) in &docs {
            doc_counts[*tag_index] += 1.0;

            let mut tf: HashMap<usize, f64> = HashMap::new();
            for token in tokens {
                *tf.entry(vocabulary[token.as_str()]).or_insert(0.0) += 1.0;
            }

            let mut vector: Vec<(usize, f64)> = tf
                .into_iter()
                .map(|(id, count)| (id, count * idf[id]))
                .collect();
            let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, weight) in &mut vector {
                    *weight /= norm;
                }
            }
            for (id, weight) in vector {
                weight_sums[*tag_index][id] += weight;
            }
        }

        let vocabulary_size = vocabulary.len() as f64;
        let log_priors = doc_counts
            .iter()
            .map(|count| (count / total_docs).ln())
            .collect();
        let log_likelihoods = weight_sums
            .iter()
            .map(|weights| {
                let total: f64 = weights.iter().sum();
                weights
                    .iter()
                    .map(|weight| {
                        ((weight + SMOOTHING_ALPHA)
                            / (total + SMOOTHING_ALPHA * vocabulary_size))
                            .ln()
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            tags,
            log_priors,
            vocabulary,
            log_likelihoods,
        })
    }

    /// Predict the most likely tag and its normalized probability
    pub fn classify(&self, text: &str) -> Prediction {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokenize(text) {
            if let Some(&id) = self.vocabulary.get(token.as_str()) {
                *counts.entry(id).or_insert(0.0) += 1.0;
            }
        }

        let scores: Vec<f64> = (0..self.tags.len())
            .map(|tag_index| {
                let mut score = self.log_priors[tag_index];
                for (&id, &count) in &counts {
                    score += count * self.log_likelihoods[tag_index][id];
                }
                score
            })
            .collect();

        let mut best = 0;
        for (index, score) in scores.iter().enumerate() {
            if *score > scores[best] {
                best = index;
            }
        }

        // Softmax via log-sum-exp
        let max = scores[best];
        let denominator: f64 = scores.iter().map(|score| (score - max).exp()).sum();

        Prediction {
            tag: self.tags[best].clone(),
            confidence: 1.0 / denominator,
        }
    }
}
