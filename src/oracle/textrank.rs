//! Built-in TextRank phrase oracle.
//!
//! Candidate phrases are maximal runs of content words inside a sentence.
//! Content words are linked in an undirected co-occurrence graph and scored
//! with PageRank; a phrase scores `sqrt(sum of word ranks) / word count`.

use std::collections::HashMap;

use petgraph::algo::page_rank;
use petgraph::graph::{NodeIndex, UnGraph};
use tracing::debug;

use super::{Chunk, OracleOutput, Phrase, PhraseOracle, SentenceSpan};
use crate::error::OracleError;
use crate::tokenize::{is_sentence_terminal, is_wordlike, tokenize_with_offsets, Token};

const DEFAULT_WINDOW: usize = 3;
const DAMPING: f64 = 0.85;
const MAX_ITERATIONS: usize = 100;

/// Words that never start, end, or join a candidate phrase
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "were", "been", "be", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "must", "shall", "can", "need",
    "it", "its", "this", "that", "these", "those", "i", "you", "he", "she", "we", "they", "what",
    "which", "who", "when", "where", "why", "how", "all", "each", "every", "both", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "just", "also", "now", "here", "there", "then", "once", "if", "while",
    "although", "because", "until", "without", "unless", "about", "into", "through", "during",
    "before", "after", "above", "below", "between", "under", "again", "further", "any", "am",
    "being",
    "me", "my", "your", "his", "her", "our", "their", "them", "him", "us", "up", "out", "get",
    "got", "go", "going", "um", "uh", "yeah", "okay", "oh", "well", "like", "really", "gonna",
    "don't", "it's", "i'm", "that's", "you're", "we're", "they're", "can't", "i've", "there's",
];

/// Graph-ranked phrase extraction with stopword-delimited candidates.
#[derive(Debug, Clone)]
pub struct TextRankOracle {
    window: usize,
}

impl Default for TextRankOracle {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }
}

impl TextRankOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Co-occurrence window in content words (values below 2 are raised to 2).
    pub fn with_window(window: usize) -> Self {
        Self {
            window: window.max(2),
        }
    }
}

impl PhraseOracle for TextRankOracle {
    fn rank_phrases_and_segment(&self, text: &str) -> Result<OracleOutput, OracleError> {
        let tokens = tokenize_with_offsets(text);
        let sentences = split_sentences(text, &tokens);
        let ranks = word_ranks(&tokens, &sentences, self.window);
        let phrases = collect_phrases(text, &tokens, &sentences, &ranks);
        debug!(
            tokens = tokens.len(),
            sentences = sentences.len(),
            phrases = phrases.len(),
            "textrank oracle finished"
        );
        Ok(OracleOutput { sentences, phrases })
    }
}

fn split_sentences(text: &str, tokens: &[Token<'_>]) -> Vec<SentenceSpan> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for (idx, token) in tokens.iter().enumerate() {
        let next_is_terminal = tokens
            .get(idx + 1)
            .map(|next| is_sentence_terminal(next.text))
            .unwrap_or(false);
        if is_sentence_terminal(token.text) && !next_is_terminal {
            sentences.push(sentence_span(text, tokens, start, idx + 1));
            start = idx + 1;
        }
    }
    if start < tokens.len() {
        sentences.push(sentence_span(text, tokens, start, tokens.len()));
    }
    sentences
}

fn sentence_span(text: &str, tokens: &[Token<'_>], start: usize, end: usize) -> SentenceSpan {
    let byte_start = tokens[start].start;
    let byte_end = tokens[end - 1].end;
    SentenceSpan {
        start,
        end,
        text: text[byte_start..byte_end].to_string(),
    }
}

fn is_content_word(token: &str) -> bool {
    is_wordlike(token) && !STOP_WORDS.contains(&token.to_lowercase().as_str())
}

fn word_ranks(
    tokens: &[Token<'_>],
    sentences: &[SentenceSpan],
    window: usize,
) -> HashMap<String, f64> {
    let mut graph: UnGraph<String, ()> = UnGraph::new_undirected();
    let mut nodes: HashMap<String, NodeIndex> = HashMap::new();

    for sentence in sentences {
        let words: Vec<NodeIndex> = tokens[sentence.start..sentence.end]
            .iter()
            .filter(|token| is_content_word(token.text))
            .map(|token| {
                let key = token.text.to_lowercase();
                *nodes
                    .entry(key.clone())
                    .or_insert_with(|| graph.add_node(key))
            })
            .collect();
        for (i, &from) in words.iter().enumerate() {
            for &to in words.iter().skip(i + 1).take(window - 1) {
                if from != to {
                    graph.update_edge(from, to, ());
                }
            }
        }
    }

    let scores = page_rank(&graph, DAMPING, MAX_ITERATIONS);
    graph
        .node_indices()
        .map(|idx| (graph[idx].clone(), scores[idx.index()]))
        .collect()
}

fn collect_phrases(
    text: &str,
    tokens: &[Token<'_>],
    sentences: &[SentenceSpan],
    ranks: &HashMap<String, f64>,
) -> Vec<Phrase> {
    let mut phrases: Vec<Phrase> = Vec::new();
    let mut by_key: HashMap<String, usize> = HashMap::new();

    for sentence in sentences {
        let mut run_start: Option<usize> = None;
        for idx in sentence.start..=sentence.end {
            let content = idx < sentence.end && is_content_word(tokens[idx].text);
            match (content, run_start) {
                (true, None) => run_start = Some(idx),
                (false, Some(start)) => {
                    let words = &tokens[start..idx];
                    let key = words
                        .iter()
                        .map(|token| token.text.to_lowercase())
                        .collect::<Vec<_>>()
                        .join(" ");
                    let chunk = Chunk {
                        text: text[words[0].start..words[words.len() - 1].end].to_string(),
                        start,
                        end: idx,
                    };
                    let slot = *by_key.entry(key.clone()).or_insert_with(|| {
                        phrases.push(Phrase {
                            rank: phrase_score(&key, ranks),
                            text: key,
                            chunks: Vec::new(),
                        });
                        phrases.len() - 1
                    });
                    phrases[slot].chunks.push(chunk);
                    run_start = None;
                }
                _ => {}
            }
        }
    }

    phrases.sort_by(|a, b| b.rank.total_cmp(&a.rank));
    phrases
}

fn phrase_score(key: &str, ranks: &HashMap<String, f64>) -> f64 {
    let words: Vec<&str> = key.split(' ').collect();
    let total: f64 = words
        .iter()
        .map(|word| ranks.get(*word).copied().unwrap_or(0.0))
        .sum();
    total.sqrt() / words.len() as f64
}
