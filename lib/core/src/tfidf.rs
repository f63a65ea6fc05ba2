use crate::text::{ngrams, tokenize};
use crate::Vector;
use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Default vocabulary cap for the reference corpus
pub const DEFAULT_MAX_FEATURES: usize = 1500;

/// TF-IDF vectorizer over word n-grams (unigrams through trigrams).
///
/// Fit exactly once over the reference corpus, then frozen: `transform`
/// never re-estimates the vocabulary or the IDF weights. Output vectors
/// are L2-normalized, so Euclidean distance between them is
/// cosine-equivalent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// term -> feature index
    vocabulary: AHashMap<String, usize>,
    /// smoothed inverse document frequency per feature
    idf: Vec<f32>,
    ngram_min: usize,
    ngram_max: usize,
}

impl TfidfVectorizer {
    /// Fit a vectorizer over the corpus documents.
    ///
    /// The vocabulary keeps the `max_features` most frequent terms; ties
    /// are broken lexicographically so fitting is deterministic. IDF uses
    /// the smoothed form `ln((1 + n) / (1 + df)) + 1`.
    pub fn fit(documents: &[String], max_features: usize) -> Self {
        let mut term_counts: AHashMap<String, u64> = AHashMap::new();
        let mut doc_counts: AHashMap<String, u64> = AHashMap::new();

        for doc in documents {
            let tokens = tokenize(doc);
            let terms = ngrams(&tokens, 1, 3);

            let mut seen: AHashSet<&str> = AHashSet::new();
            for term in &terms {
                *term_counts.entry(term.clone()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *doc_counts.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        let mut ranked: Vec<(String, u64)> = term_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(max_features);

        let mut vocabulary = AHashMap::with_capacity(ranked.len());
        let mut idf = vec![0.0f32; ranked.len()];
        let n_docs = documents.len() as f64;
        for (index, (term, _)) in ranked.into_iter().enumerate() {
            let df = doc_counts.get(&term).copied().unwrap_or(0) as f64;
            idf[index] = (((1.0 + n_docs) / (1.0 + df)).ln() + 1.0) as f32;
            vocabulary.insert(term, index);
        }

        Self {
            vocabulary,
            idf,
            ngram_min: 1,
            ngram_max: 3,
        }
    }

    /// Transform text into an L2-normalized TF-IDF vector.
    ///
    /// Pure: identical input yields a bit-identical vector. Empty text,
    /// or text with no in-vocabulary terms, yields the zero vector.
    pub fn transform(&self, text: &str) -> Vector {
        let mut weights = vec![0.0f32; self.vocabulary.len()];

        let tokens = tokenize(text);
        for term in ngrams(&tokens, self.ngram_min, self.ngram_max) {
            if let Some(&index) = self.vocabulary.get(&term) {
                weights[index] += 1.0;
            }
        }

        for (w, idf) in weights.iter_mut().zip(self.idf.iter()) {
            *w *= idf;
        }

        let mut vector = Vector::new(weights);
        vector.normalize();
        vector
    }

    /// Transform a batch of documents, one vector per document.
    ///
    /// Per-document transforms are independent, so this runs in parallel;
    /// output order matches input order.
    pub fn transform_batch(&self, documents: &[String]) -> Vec<Vector> {
        documents
            .par_iter()
            .map(|doc| self.transform(doc))
            .collect()
    }

    #[inline]
    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.vocabulary.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        vec![
            "a running fox logo".to_string(),
            "a flying eagle logo".to_string(),
            "a blue tech startup".to_string(),
        ]
    }

    #[test]
    fn test_transform_is_deterministic() {
        let vectorizer = TfidfVectorizer::fit(&corpus(), DEFAULT_MAX_FEATURES);
        let a = vectorizer.transform("fox running logo");
        let b = vectorizer.transform("fox running logo");
        assert_eq!(a, b);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let a = TfidfVectorizer::fit(&corpus(), DEFAULT_MAX_FEATURES);
        let b = TfidfVectorizer::fit(&corpus(), DEFAULT_MAX_FEATURES);
        assert_eq!(a.transform("flying eagle"), b.transform("flying eagle"));
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let vectorizer = TfidfVectorizer::fit(&corpus(), DEFAULT_MAX_FEATURES);
        assert!(vectorizer.transform("").is_zero());
        assert!(vectorizer.transform("   ").is_zero());
    }

    #[test]
    fn test_unknown_terms_are_zero_vector() {
        let vectorizer = TfidfVectorizer::fit(&corpus(), DEFAULT_MAX_FEATURES);
        assert!(vectorizer.transform("zebra crossing").is_zero());
    }

    #[test]
    fn test_transform_is_normalized() {
        let vectorizer = TfidfVectorizer::fit(&corpus(), DEFAULT_MAX_FEATURES);
        let v = vectorizer.transform("running fox");
        assert!((v.norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_vocabulary_cap() {
        let vectorizer = TfidfVectorizer::fit(&corpus(), 4);
        assert_eq!(vectorizer.vocabulary_len(), 4);
    }

    #[test]
    fn test_corpus_document_is_own_exact_match() {
        let docs = corpus();
        let vectorizer = TfidfVectorizer::fit(&docs, DEFAULT_MAX_FEATURES);
        let v1 = vectorizer.transform(&docs[0]);
        let v2 = vectorizer.transform(&docs[0]);
        assert_eq!(v1.l2_distance(&v2), 0.0);
    }

    #[test]
    fn test_transform_batch_matches_transform() {
        let docs = corpus();
        let vectorizer = TfidfVectorizer::fit(&docs, DEFAULT_MAX_FEATURES);
        let batch = vectorizer.transform_batch(&docs);
        for (doc, vec) in docs.iter().zip(batch.iter()) {
            assert_eq!(vec, &vectorizer.transform(doc));
        }
    }
}
