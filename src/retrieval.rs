//! The public retrieval facade: [`Irs`] (a built corpus + index) and the [`BooleanExpression`]
//! builder used to construct and evaluate queries against it (§4.7).

use std::collections::HashSet;

use crate::corrector::{CorrectionStrategy, LeafCorrectors};
use crate::doc_id::{DocId, DocIdGenerator};
use crate::document::{Corpus, Document};
use crate::error::IrError;
use crate::evaluator;
use crate::index::InvertedIndex;
use crate::normalizer::NormalizerConfig;
use crate::query::{parse_query, Expr, UnaryOp};

/// `BooleanExpression` builder states (§4.7). `set_value`/`set_phrase` are only valid from
/// `New`; `and`/`or`/`parse_query` always land on `Aggregated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExpressionState {
    New,
    ValueSet,
    PhraseSet,
    Aggregated,
}

/// A retrieval session over a fixed corpus and its index — the process-lifetime owner of
/// both (§4.7's note on borrowing rather than `Arc`).
pub struct Irs {
    corpus: Corpus,
    index: InvertedIndex,
    default_max_results: Option<usize>,
}

impl Irs {
    /// Build a fresh corpus and index from `documents`. `stopwords` and `normalizer_config`
    /// are supplied by the caller — stop-word loading and configuration resolution are
    /// external collaborators (§6), not something this facade does on their behalf.
    pub fn build<I>(
        documents: I,
        normalizer_config: NormalizerConfig,
        stopwords: &HashSet<String>,
        default_max_results: Option<usize>,
    ) -> Result<Irs, IrError>
    where
        I: IntoIterator<Item = Document>,
    {
        let generator = DocIdGenerator::new();
        let corpus = Corpus::build(documents, &generator)?;
        let index = InvertedIndex::build(&corpus, &normalizer_config, stopwords)?;
        Ok(Irs {
            corpus,
            index,
            default_max_results,
        })
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    /// A fresh, empty expression builder bound to this session.
    pub fn create_expression(&self) -> BooleanExpression<'_> {
        BooleanExpression {
            irs: self,
            state: ExpressionState::New,
            expr: None,
            max_results: self.default_max_results,
            correctors: None,
            last_result: None,
        }
    }

    /// Convenience: parse `query_string` and evaluate it in one call, resolving document
    /// identifiers back to documents.
    pub fn retrieve(&self, query_string: &str) -> Result<Vec<&Document>, IrError> {
        let mut expression = self.create_expression();
        expression.parse_query(query_string)?;
        let ids = expression.evaluate()?;
        Ok(ids.into_iter().filter_map(|id| self.corpus.get(id)).collect())
    }
}

/// A mutable query-expression builder bound to one [`Irs`] session (§4.7).
///
/// Per §5, the only mutation here is the cached last evaluation result and spelling-corrector
/// state; an expression is never shared across threads.
pub struct BooleanExpression<'a> {
    irs: &'a Irs,
    state: ExpressionState,
    expr: Option<Expr>,
    max_results: Option<usize>,
    correctors: Option<LeafCorrectors>,
    last_result: Option<Vec<DocId>>,
}

impl<'a> BooleanExpression<'a> {
    pub fn set_value(&mut self, word: impl Into<String>) -> Result<&mut Self, IrError> {
        if self.state != ExpressionState::New {
            return Err(IrError::InvalidQuery(
                "set_value is only valid on a fresh expression".to_string(),
            ));
        }
        self.expr = Some(Expr::value(word.into()));
        self.state = ExpressionState::ValueSet;
        Ok(self)
    }

    pub fn set_phrase(&mut self, words: Vec<String>, distances: Vec<i64>) -> Result<&mut Self, IrError> {
        if self.state != ExpressionState::New {
            return Err(IrError::InvalidQuery(
                "set_phrase is only valid on a fresh expression".to_string(),
            ));
        }
        let expr = if words.len() == 1 {
            Expr::value(words.into_iter().next().unwrap())
        } else {
            Expr::phrase(words, distances)
                .ok_or_else(|| IrError::InvalidQuery("phrase distances must be strictly increasing and positive".to_string()))?
        };
        self.expr = Some(expr);
        self.state = ExpressionState::PhraseSet;
        Ok(self)
    }

    /// Combine `self` and `other` under AND, consuming both and producing a new
    /// `Aggregated` expression.
    pub fn and(mut self, other: BooleanExpression<'a>) -> Result<Self, IrError> {
        let left = self.take_expr()?;
        let right = other.expr.ok_or_else(|| IrError::InvalidQuery("and() operand is empty".to_string()))?;
        self.expr = Some(left.and(right));
        self.state = ExpressionState::Aggregated;
        Ok(self)
    }

    pub fn or(mut self, other: BooleanExpression<'a>) -> Result<Self, IrError> {
        let left = self.take_expr()?;
        let right = other.expr.ok_or_else(|| IrError::InvalidQuery("or() operand is empty".to_string()))?;
        self.expr = Some(left.or(right));
        self.state = ExpressionState::Aggregated;
        Ok(self)
    }

    /// Toggle the unary operator of the current node: `NOT ∘ NOT = IDENTITY`.
    pub fn not(&mut self) -> Result<&mut Self, IrError> {
        let inner = self.take_expr()?;
        self.expr = Some(match inner {
            Expr::Unary(UnaryOp::Not, boxed) => *boxed,
            other => other.not(),
        });
        Ok(self)
    }

    pub fn limit(&mut self, n: usize) -> &mut Self {
        self.max_results = Some(n);
        self
    }

    /// Replace this expression's contents by parsing `query`. A parse failure is recovered
    /// per §7: it is wrapped as `InvalidQuery` and the caller may choose to treat it as "no
    /// results" rather than aborting the session.
    pub fn parse_query(&mut self, query: &str) -> Result<&mut Self, IrError> {
        let expr = parse_query(query).map_err(|err| IrError::InvalidQuery(err.to_string()))?;
        self.expr = Some(expr);
        self.state = ExpressionState::Aggregated;
        Ok(self)
    }

    /// Advance one round of spelling/phonetic correction over every leaf and fold the
    /// candidates in as `original | (candidate₁ | ...)` (§4.6).
    pub fn spelling_correction(&mut self, phonetic: bool, use_edit_distance: bool) -> Result<&mut Self, IrError> {
        let expr = self
            .expr
            .clone()
            .ok_or_else(|| IrError::InvalidQuery("spelling_correction on an empty expression".to_string()))?;
        let strategy = if phonetic {
            CorrectionStrategy::Phonetic { use_edit_distance }
        } else {
            CorrectionStrategy::EditDistance
        };
        let correctors = self.correctors.get_or_insert_with(|| LeafCorrectors::new(strategy));
        self.expr = Some(correctors.apply_round(&expr, self.irs.index()));
        Ok(self)
    }

    /// Evaluate the current expression. On stack exhaustion (§5's cancellation rule), the
    /// corrector is stopped and the previous cached result is returned rather than erroring.
    pub fn evaluate(&mut self) -> Result<Vec<DocId>, IrError> {
        let expr = self
            .expr
            .as_ref()
            .ok_or_else(|| IrError::InvalidQuery("evaluate on an empty expression".to_string()))?;
        match evaluator::evaluate(expr, self.irs.index(), self.max_results) {
            Ok(ids) => {
                self.last_result = Some(ids.clone());
                Ok(ids)
            }
            Err(IrError::StackExhaustion(reason)) => {
                tracing::warn!(reason, "stack exhaustion during evaluation; returning last cached result");
                if let Some(correctors) = &mut self.correctors {
                    correctors.stop_all();
                }
                Ok(self.last_result.clone().unwrap_or_default())
            }
            Err(other) => Err(other),
        }
    }

    pub fn query_string(&self) -> String {
        self.expr.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    /// The widest edit-distance bound any active leaf corrector has reached, if correction
    /// has been invoked at least once.
    pub fn edit_distance_for_correction(&self) -> Option<usize> {
        self.correctors.as_ref().and_then(LeafCorrectors::max_edit_distance_bound)
    }

    fn take_expr(&mut self) -> Result<Expr, IrError> {
        self.expr
            .take()
            .ok_or_else(|| IrError::InvalidQuery("operation requires a non-empty expression".to_string()))
    }
}

#[cfg(test)]
#[path = "retrieval_tests.rs"]
mod tests;
