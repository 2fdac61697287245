//! Full-text search index over extracted page text.
//!
//! Pages are chunked into fixed-size word windows which feed a flat
//! inverted index. The index is rebuilt whole for each loaded document and
//! is read-only afterwards; queries take `&self` and are safe to run
//! concurrently.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::model::PageInfo;

/// Words per indexed chunk.
pub const CHUNK_WORDS: usize = 50;

/// Words of context kept on each side of a chunk for display snippets.
pub const CONTEXT_PAD: usize = 10;

/// Maximum number of results returned by a query.
pub const MAX_RESULTS: usize = 50;

/// One indexed unit: a fixed-size word window of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexChunk {
    /// Identifier encoding page and word offset (`"{page}-{offset}"`)
    pub id: String,

    /// Owning page number (1-indexed)
    pub page: u32,

    /// Word offset of the chunk within the page text
    pub offset: usize,

    /// The chunk text itself
    pub text: String,

    /// Wider window around the chunk, for human-readable snippets
    pub context: String,
}

/// A ranked match produced by a query. Ephemeral; not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Identifier of the matched chunk
    pub id: String,

    /// Page the match originates from (1-indexed)
    pub page: u32,

    /// Matched chunk text
    pub text: String,

    /// Context snippet around the chunk
    pub context: String,

    /// Relevance score (summed query-token frequency)
    pub score: f32,
}

/// Inverted index over all chunks of one document.
pub struct SearchIndex {
    chunks: Vec<IndexChunk>,
    /// token → (chunk index, occurrences), postings in document order
    postings: HashMap<String, Vec<(usize, u32)>>,
}

impl SearchIndex {
    /// Create an empty index. Queries against it return no results.
    pub fn new() -> Self {
        Self {
            chunks: Vec::new(),
            postings: HashMap::new(),
        }
    }

    /// Build an index over extracted pages.
    ///
    /// Chunking runs per page in parallel; chunk order follows the input
    /// page order regardless of completion order, so results are stable.
    pub fn build<'a, I>(pages: I) -> Self
    where
        I: IntoIterator<Item = &'a PageInfo>,
    {
        let pages: Vec<&PageInfo> = pages.into_iter().collect();

        let chunks: Vec<IndexChunk> = pages
            .par_iter()
            .map(|page| chunk_page(page))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect();

        let mut postings: HashMap<String, Vec<(usize, u32)>> = HashMap::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let mut counts: HashMap<String, u32> = HashMap::new();
            for token in tokenize(&chunk.text) {
                *counts.entry(token).or_insert(0) += 1;
            }
            for (token, count) in counts {
                postings.entry(token).or_default().push((idx, count));
            }
        }
        // Postings are appended in ascending chunk order, but make the
        // invariant explicit for the tie-break contract.
        for list in postings.values_mut() {
            list.sort_by_key(|&(idx, _)| idx);
        }

        log::debug!(
            "index: {} chunks, {} distinct tokens",
            chunks.len(),
            postings.len()
        );

        Self { chunks, postings }
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Check if the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// All chunks in document order.
    pub fn chunks(&self) -> &[IndexChunk] {
        &self.chunks
    }

    /// Query the index.
    ///
    /// An empty or whitespace-only query returns no results without
    /// touching the index. Otherwise chunks are scored by summed
    /// query-token frequency, ranked descending, ties broken by document
    /// order (page, then offset), capped at [`MAX_RESULTS`].
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut scores: HashMap<usize, u32> = HashMap::new();
        for token in &tokens {
            if let Some(list) = self.postings.get(token) {
                for &(chunk_idx, count) in list {
                    *scores.entry(chunk_idx).or_insert(0) += count;
                }
            }
        }

        let mut hits: Vec<(usize, u32)> = scores.into_iter().collect();
        // Chunk indices ascend in document order, giving the tie-break.
        hits.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        hits.truncate(MAX_RESULTS);

        hits.into_iter()
            .map(|(idx, score)| {
                let chunk = &self.chunks[idx];
                SearchResult {
                    id: chunk.id.clone(),
                    page: chunk.page,
                    text: chunk.text.clone(),
                    context: chunk.context.clone(),
                    score: score as f32,
                }
            })
            .collect()
    }
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Split one page's text into non-overlapping chunk windows with padded
/// context, clamped to the page bounds.
fn chunk_page(page: &PageInfo) -> Vec<IndexChunk> {
    let words: Vec<&str> = page.text.split_whitespace().collect();
    let mut chunks = Vec::new();

    let mut offset = 0;
    while offset < words.len() {
        let end = (offset + CHUNK_WORDS).min(words.len());
        let context_start = offset.saturating_sub(CONTEXT_PAD);
        let context_end = (offset + CHUNK_WORDS + CONTEXT_PAD).min(words.len());

        chunks.push(IndexChunk {
            id: format!("{}-{}", page.number, offset),
            page: page.number,
            offset,
            text: words[offset..end].join(" "),
            context: words[context_start..context_end].join(" "),
        });

        offset += CHUNK_WORDS;
    }

    chunks
}

/// Lowercased alphanumeric tokens.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_words(number: u32, count: usize) -> PageInfo {
        let text = (0..count)
            .map(|i| format!("w{}", i))
            .collect::<Vec<_>>()
            .join(" ");
        PageInfo {
            number,
            width: 612.0,
            height: 792.0,
            text,
            fragments: vec![],
        }
    }

    fn page_with_text(number: u32, text: &str) -> PageInfo {
        PageInfo {
            number,
            width: 612.0,
            height: 792.0,
            text: text.to_string(),
            fragments: vec![],
        }
    }

    #[test]
    fn test_chunking_boundaries_120_words() {
        let page = page_with_words(1, 120);
        let index = SearchIndex::build([&page]);

        assert_eq!(index.len(), 3);
        let chunks = index.chunks();

        assert_eq!(chunks[0].id, "1-0");
        assert_eq!(chunks[1].id, "1-50");
        assert_eq!(chunks[2].id, "1-100");

        // First chunk's context is clamped at word 0.
        assert!(chunks[0].context.starts_with("w0 "));
        assert_eq!(chunks[0].context.split_whitespace().count(), 60);

        // Middle chunk pads 10 words on each side.
        assert!(chunks[1].context.starts_with("w40 "));
        assert_eq!(chunks[1].context.split_whitespace().count(), 70);

        // Last chunk holds the 20-word tail, context clamped at the end.
        assert_eq!(chunks[2].text.split_whitespace().count(), 20);
        assert!(chunks[2].context.ends_with("w119"));
    }

    #[test]
    fn test_empty_page_produces_no_chunks() {
        let page = page_with_text(1, "");
        let index = SearchIndex::build([&page]);
        assert!(index.is_empty());
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let page = page_with_text(1, "alpha beta gamma");
        let index = SearchIndex::build([&page]);

        assert!(index.search("").is_empty());
        assert!(index.search("   \t ").is_empty());
    }

    #[test]
    fn test_unbuilt_index_returns_nothing() {
        let index = SearchIndex::new();
        assert!(index.search("anything").is_empty());
    }

    #[test]
    fn test_search_scores_by_frequency() {
        let pages = vec![
            page_with_text(1, "rust once in this chunk"),
            page_with_text(2, "rust rust rust all over"),
        ];
        let index = SearchIndex::build(pages.iter());

        let results = index.search("rust");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].page, 2);
        assert_eq!(results[0].score, 3.0);
        assert_eq!(results[1].page, 1);
        assert_eq!(results[1].score, 1.0);
    }

    #[test]
    fn test_search_ties_break_by_document_order() {
        let pages = vec![
            page_with_text(1, "needle here"),
            page_with_text(2, "needle there"),
            page_with_text(3, "needle everywhere"),
        ];
        let index = SearchIndex::build(pages.iter());

        let results = index.search("needle");
        let pages: Vec<u32> = results.iter().map(|r| r.page).collect();
        assert_eq!(pages, vec![1, 2, 3]);
    }

    #[test]
    fn test_search_caps_results() {
        // 60 pages, one matching chunk each.
        let pages: Vec<PageInfo> = (1..=60)
            .map(|n| page_with_text(n, "needle in a page"))
            .collect();
        let index = SearchIndex::build(pages.iter());

        let results = index.search("needle");
        assert_eq!(results.len(), MAX_RESULTS);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let page = page_with_text(1, "Kubernetes cluster operations");
        let index = SearchIndex::build([&page]);

        assert_eq!(index.search("kubernetes").len(), 1);
        assert_eq!(index.search("KUBERNETES").len(), 1);
    }

    #[test]
    fn test_multi_token_query_sums_scores() {
        let pages = vec![
            page_with_text(1, "alpha beta"),
            page_with_text(2, "alpha alpha"),
            page_with_text(3, "beta gamma delta"),
        ];
        let index = SearchIndex::build(pages.iter());

        let results = index.search("alpha beta");
        assert_eq!(results.len(), 3);
        // Page 1 and 2 both score 2; document order breaks the tie.
        assert_eq!(results[0].page, 1);
        assert_eq!(results[1].page, 2);
        assert_eq!(results[2].page, 3);
    }
}
