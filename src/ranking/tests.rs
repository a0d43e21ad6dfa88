use approx::assert_relative_eq;

use super::{build_vectors, rank_oracle_output, SegmentRanker};
use crate::oracle::{Chunk, OracleOutput, Phrase, SentenceSpan, TextRankOracle};

fn sentence(start: usize, end: usize, text: &str) -> SentenceSpan {
    SentenceSpan {
        start,
        end,
        text: text.to_string(),
    }
}

fn phrase(text: &str, rank: f64, spans: &[(usize, usize)]) -> Phrase {
    Phrase {
        text: text.to_string(),
        rank,
        chunks: spans
            .iter()
            .map(|&(start, end)| Chunk {
                text: text.to_string(),
                start,
                end,
            })
            .collect(),
    }
}

fn pets() -> OracleOutput {
    OracleOutput {
        sentences: vec![
            sentence(0, 4, "The cat sat."),
            sentence(4, 9, "The dog barked loudly."),
            sentence(9, 16, "A cat and a dog met."),
        ],
        phrases: vec![
            phrase("loudly", 0.2, &[(7, 8)]),
            phrase("cat", 0.5, &[(1, 2), (10, 11)]),
            phrase("dog", 0.3, &[(5, 6), (13, 14)]),
        ],
    }
}

#[test]
fn test_most_central_sentence_first() {
    let ranked = rank_oracle_output(&pets(), 1);
    let ids: Vec<usize> = ranked.iter().map(|segment| segment.id).collect();
    assert_eq!(ids, vec![2, 0, 1]);
    assert_relative_eq!(ranked[0].distance, 0.2, epsilon = 1e-12);
    assert_relative_eq!(ranked[1].distance, 0.13f64.sqrt(), epsilon = 1e-12);
    assert_relative_eq!(ranked[2].distance, 0.5, epsilon = 1e-12);
    assert_eq!(ranked[0].text, "A cat and a dog met.");
}

#[test]
fn test_output_is_permutation_of_sentences() {
    let output = pets();
    let ranked = rank_oracle_output(&output, 1);
    let mut ranked_texts: Vec<&str> = ranked.iter().map(|s| s.text.as_str()).collect();
    let mut sentence_texts: Vec<&str> = output.sentences.iter().map(|s| s.text.as_str()).collect();
    ranked_texts.sort_unstable();
    sentence_texts.sort_unstable();
    assert_eq!(ranked_texts, sentence_texts);
}

#[test]
fn test_phrase_ids_follow_rank_order() {
    let (unit, segments) = build_vectors(&pets(), 1);
    // cat=0, dog=1, loudly=2 after sorting by rank
    assert_relative_eq!(unit.scores()[0], 0.5, epsilon = 1e-12);
    assert_relative_eq!(unit.scores()[2], 0.2, epsilon = 1e-12);
    assert_eq!(segments[0].phrase_ids.iter().copied().collect::<Vec<_>>(), vec![0]);
    assert_eq!(
        segments[1].phrase_ids.iter().copied().collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert_eq!(
        segments[2].phrase_ids.iter().copied().collect::<Vec<_>>(),
        vec![0, 1]
    );
}

#[test]
fn test_unit_vector_sums_to_one() {
    let mut output = pets();
    for idx in 0..17 {
        output
            .phrases
            .push(phrase("filler", 0.01 * idx as f64 + 0.7, &[(2, 3)]));
    }
    let (unit, _) = build_vectors(&output, 10);
    assert_eq!(unit.len(), 2);
    assert_relative_eq!(unit.scores().iter().sum::<f64>(), 1.0, epsilon = 1e-9);
}

#[test]
fn test_too_few_phrases_keeps_sentence_order() {
    // 3 phrases / 10 = 0 retained
    let ranked = rank_oracle_output(&pets(), 10);
    let ids: Vec<usize> = ranked.iter().map(|segment| segment.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
    assert!(ranked.iter().all(|segment| segment.distance == 0.0));
}

#[test]
fn test_zero_sum_ranks_are_degenerate() {
    let mut output = pets();
    for phrase in &mut output.phrases {
        phrase.rank = 0.0;
    }
    let (unit, _) = build_vectors(&output, 1);
    assert!(unit.is_degenerate());
    let ids: Vec<usize> = rank_oracle_output(&output, 1)
        .iter()
        .map(|segment| segment.id)
        .collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn test_equal_distances_keep_sentence_order() {
    let output = OracleOutput {
        sentences: vec![
            sentence(0, 2, "Alpha one."),
            sentence(2, 4, "Beta two."),
            sentence(4, 6, "Gamma three."),
        ],
        phrases: vec![phrase("elsewhere", 1.0, &[(40, 41)])],
    };
    let ids: Vec<usize> = rank_oracle_output(&output, 1)
        .iter()
        .map(|segment| segment.id)
        .collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn test_chunk_spanning_sentences_is_dropped() {
    let output = OracleOutput {
        sentences: vec![sentence(0, 3, "Hello there."), sentence(3, 6, "Big news.")],
        phrases: vec![phrase("there big", 1.0, &[(1, 4)])],
    };
    let (_, segments) = build_vectors(&output, 1);
    assert!(segments.iter().all(|segment| segment.phrase_ids.is_empty()));
}

#[test]
fn test_chunk_credited_to_first_containing_segment() {
    let output = OracleOutput {
        sentences: vec![sentence(0, 4, "Same span."), sentence(0, 4, "Same span.")],
        phrases: vec![phrase("span", 1.0, &[(1, 2)])],
    };
    let (_, segments) = build_vectors(&output, 1);
    assert_eq!(segments[0].phrase_ids.len(), 1);
    assert!(segments[1].phrase_ids.is_empty());
}

#[test]
fn test_no_sentences_yields_empty_ranking() {
    let ranked = rank_oracle_output(&OracleOutput::default(), 10);
    assert!(ranked.is_empty());
}

#[test]
fn test_ranker_is_deterministic() {
    let text = "Podcasts need previews. Automatic previews save editing time. \
        Editing time is expensive for small podcasts. The weather was nice.";
    let ranker = SegmentRanker::new(TextRankOracle::new()).with_phrase_divisor(1);
    let first = ranker.rank(text).unwrap();
    let second = ranker.rank(text).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}
