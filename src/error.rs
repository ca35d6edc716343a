use crate::action::Action;
use crate::rules::Rule;
use crate::symbols::Nonterminal;

/// A rule table that can't be turned into a working grammar
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
  #[error("empty ruleset")]
  Empty,

  #[error("{0} is reserved for the augmented start rule")]
  Reserved(Nonterminal),

  #[error("the sentence symbol {0} must have exactly one rule, found {1}")]
  EntryAlternatives(Nonterminal, usize),

  #[error("the sentence rule `{0}` must end in a nonterminal to widen on recovery")]
  EntryNotWidenable(Rule),

  #[error("{symbol} is used in `{rule}` but has no rules")]
  Undefined { symbol: Nonterminal, rule: Rule },

  #[error("action {action} can't build a node from {len} children in `{rule}`")]
  Arity { action: Action, len: usize, rule: Rule },
}

/// An inconsistency met while rebuilding a tree from the chart
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
  #[error("no derivation recorded for {item} at column {column}")]
  MissingDerivation { item: String, column: usize },

  #[error("ran out of tokens rebuilding {item}")]
  TokensExhausted { item: String },

  #[error("{0} tokens left over after rebuilding the tree")]
  LeftoverTokens(usize),
}
