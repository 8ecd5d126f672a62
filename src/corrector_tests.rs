use super::*;
use crate::doc_id::DocIdGenerator;
use crate::document::{Corpus, Document};
use crate::lang::Language;
use crate::normalizer::NormalizerConfig;
use crate::stemmer::StemmerKind;
use std::collections::HashSet;

fn dictionary_index() -> InvertedIndex {
    let generator = DocIdGenerator::new();
    let documents = vec![
        Document::from_text(None, "dog cat table running"),
        Document::from_text(None, "eating car"),
    ];
    let corpus = Corpus::build(documents, &generator).unwrap();
    let config = NormalizerConfig {
        remove_stop_words: false,
        language: Language::English,
        stemmer: StemmerKind::None,
    };
    InvertedIndex::build(&corpus, &config, &HashSet::new()).unwrap()
}

#[test]
fn edit_distance_strategy_finds_a_close_dictionary_token() {
    let index = dictionary_index();
    let mut corrector = SpellingCorrector::new("dig", CorrectionStrategy::EditDistance);
    let batch = corrector.correct(&index);
    assert!(batch.contains(&"dog".to_string()), "expected dog in {batch:?}");
}

#[test]
fn phonetic_strategy_finds_a_soundex_match_even_with_large_edit_distance() {
    let index = dictionary_index();
    let mut corrector = SpellingCorrector::new(
        "dagg",
        CorrectionStrategy::Phonetic { use_edit_distance: false },
    );
    let batch = corrector.correct(&index);
    assert!(batch.contains(&"dog".to_string()), "expected dog in {batch:?}");
}

#[test]
fn edit_distance_corrector_eventually_stops() {
    let index = dictionary_index();
    let mut corrector = SpellingCorrector::new("zzzzzzzzzz", CorrectionStrategy::EditDistance);
    for _ in 0..(MAX_EDIT_DISTANCE_BOUND + 2) {
        corrector.correct(&index);
        if corrector.is_stopped() {
            break;
        }
    }
    assert!(corrector.is_stopped());
}

#[test]
fn already_yielded_candidates_are_not_repeated_across_rounds() {
    let index = dictionary_index();
    let mut corrector = SpellingCorrector::new("dig", CorrectionStrategy::EditDistance);
    let first = corrector.correct(&index);
    assert!(first.contains(&"dog".to_string()));
    let second = corrector.correct(&index);
    assert!(!second.contains(&"dog".to_string()), "dog should not be re-yielded: {second:?}");
}

#[test]
fn apply_round_folds_candidates_into_an_or_chain_with_the_original() {
    let index = dictionary_index();
    let mut correctors = LeafCorrectors::new(CorrectionStrategy::EditDistance);
    let expr = Expr::value("dig");
    let rewritten = correctors.apply_round(&expr, &index);
    match rewritten {
        Expr::Binary(BinaryOp::Or, left, _) => {
            assert_eq!(*left, Expr::Value("dig".to_string()));
        }
        other => panic!("expected an Or at the root, got {other:?}"),
    }
}

#[test]
fn a_leaf_that_is_itself_a_correction_is_never_recorrected() {
    let index = dictionary_index();
    let mut correctors = LeafCorrectors::new(CorrectionStrategy::EditDistance);
    let expr = Expr::value("dig");
    let rewritten = correctors.apply_round(&expr, &index);
    // "dog" is now a tracked correction token; feeding it back in as its own leaf must not
    // spin up a new corrector for it.
    let second_pass = correctors.apply_round(&Expr::value("dog"), &index);
    assert_eq!(second_pass, Expr::Value("dog".to_string()));
    let _ = rewritten;
}
