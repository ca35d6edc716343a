use std::collections::HashMap;

use crate::earley::Item;
use crate::error::ParseError;
use crate::grammar::Snapshot;
use crate::rules::Production;
use crate::symbols::{Label, Token};
use crate::syntree::{SynTree, Word};

/// A chart cell: an item, and the column it's in
pub type Cell = (Item, usize);

/// Every way the chart found to advance an item past a nonterminal.
///
/// Keyed by the advanced item and its column, each entry lists the completed
/// child items (with their columns) that justified the advance, in the order
/// they were found. An entry with more than one child is an ambiguity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forest(HashMap<Cell, Vec<Cell>>);

impl Forest {
  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Records that `child` derives `key`. Recording the same child twice is a no-op.
  pub fn record(&mut self, key: Cell, child: Cell) {
    let children = self.0.entry(key).or_default();
    if !children.contains(&child) {
      children.push(child);
    }
  }

  pub fn get(&self, key: &Cell) -> Option<&Vec<Cell>> {
    self.0.get(key)
  }

  /// Forgets every cell in column `column` or later
  pub fn purge_from(&mut self, column: usize) {
    self.0.retain(|(_, k), _| *k < column);
  }

  /// The number of cells with more than one derivation
  pub fn ambiguities(&self) -> usize {
    self.0.values().filter(|children| children.len() > 1).count()
  }

  /// Rebuilds the tree rooted at the accepting `START -> <sentence> eof •`
  /// item. `tokens` must include the end marker.
  pub fn tree(
    &self,
    snapshot: &Snapshot<'_>,
    tokens: &[Token],
  ) -> Result<SynTree<Label, Token>, ParseError> {
    let accept = Item {
      rule: snapshot.grammar().start(),
      dot: 2,
      origin: 0,
    };

    let builder = TreeBuilder {
      snapshot,
      forest: self,
      tokens,
    };
    let (tree, rest) = builder.build(accept, tokens.len(), tokens.len())?;
    if rest != 0 {
      return Err(ParseError::LeftoverTokens(rest));
    }
    Ok(tree)
  }
}

/// Picks the candidate whose rule has the highest action priority. On a tie the
/// first candidate, in the order the chart recorded them, wins.
pub fn resolve(snapshot: &Snapshot<'_>, candidates: &[Cell]) -> Option<Cell> {
  let priority = |(item, _): &Cell| snapshot.action(item.rule).priority();

  let mut best: Option<Cell> = None;
  for candidate in candidates {
    if best.is_none_or(|b| priority(candidate) > priority(&b)) {
      best = Some(*candidate);
    }
  }
  best
}

struct TreeBuilder<'a> {
  snapshot: &'a Snapshot<'a>,
  forest: &'a Forest,
  tokens: &'a [Token],
}

impl TreeBuilder<'_> {
  /// Builds the subtree for the complete `item` ending at `column`, whose
  /// leaves are the tokens before `cursor`. Returns the subtree and the cursor
  /// left at its first token.
  fn build(
    &self,
    item: Item,
    column: usize,
    cursor: usize,
  ) -> Result<(SynTree<Label, Token>, usize), ParseError> {
    let productions = self.snapshot.productions(item.rule);
    let mut children = Vec::with_capacity(item.dot);

    let mut at = item;
    let mut col = column;
    let mut cursor = cursor;

    // right to left: each step moves the dot back over one production
    while at.dot > 0 {
      match productions[at.dot - 1] {
        Production::Terminal(_) => {
          cursor = cursor.checked_sub(1).ok_or_else(|| ParseError::TokensExhausted {
            item: self.snapshot.display_item(&item),
          })?;
          children.push(SynTree::Leaf(Word {
            value: self.tokens[cursor].clone(),
            span: (cursor, cursor + 1),
          }));
          col = col.saturating_sub(1);
        }
        Production::Nonterminal(_) => {
          let missing = || ParseError::MissingDerivation {
            item: self.snapshot.display_item(&at),
            column: col,
          };
          let candidates = self.forest.get(&(at, col)).ok_or_else(missing)?;
          let (child, child_col) = resolve(self.snapshot, candidates).ok_or_else(missing)?;

          let (subtree, rest) = self.build(child, child_col, cursor)?;
          children.push(subtree);
          cursor = rest;
          col = child.origin;
        }
      }
      at = at.retreat();
    }

    children.reverse();
    let action = self.snapshot.action(item.rule);
    Ok((action.apply((item.origin, column), children), cursor))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grammar::Grammar;
  use crate::rules::RuleId;
  use crate::symbols::Nonterminal;

  fn grammar() -> Grammar {
    r#"
      SENT -> PHRASE => sentence;
      PHRASE -> pron => word;
      PHRASE -> NP => phrase_np;
      PHRASE -> ADVP => phrase_advp;
      NP -> pron => np_phrase;
      ADVP -> pron => advp;
    "#
    .parse()
    .unwrap()
  }

  fn complete(g: &Grammar, id: RuleId) -> Cell {
    (
      Item {
        rule: id,
        dot: g.rule(id).len(),
        origin: 0,
      },
      1,
    )
  }

  #[test]
  fn test_resolve_prefers_priority() {
    let g = grammar();
    let snapshot = g.snapshot();
    let phrases = g.rules_for(Nonterminal::Phrase);
    let word = complete(&g, phrases[0]);
    let np = complete(&g, phrases[1]);
    let advp = complete(&g, phrases[2]);

    assert_eq!(resolve(&snapshot, &[word, np, advp]), Some(np));
    assert_eq!(resolve(&snapshot, &[advp, word]), Some(advp));
    assert_eq!(resolve(&snapshot, &[]), None);
  }

  #[test]
  fn test_resolve_ties_go_to_the_first_recorded() {
    let g: Grammar = r#"
      SENT -> PHRASE => sentence;
      PHRASE -> pron => phrase_advp;
      PHRASE -> adv => phrase_vc;
    "#
    .parse()
    .unwrap();
    let snapshot = g.snapshot();
    let phrases = g.rules_for(Nonterminal::Phrase);
    let a = complete(&g, phrases[0]);
    let b = complete(&g, phrases[1]);

    assert_eq!(resolve(&snapshot, &[a, b]), Some(a));
    assert_eq!(resolve(&snapshot, &[b, a]), Some(b));
  }

  #[test]
  fn test_record_is_idempotent_and_purge_drops_later_columns() {
    let g = grammar();
    let phrases = g.rules_for(Nonterminal::Phrase);
    let parent = (Item::new(RuleId(0), 0).advance(), 1);
    let child = complete(&g, phrases[0]);

    let mut forest = Forest::default();
    forest.record(parent, child);
    forest.record(parent, child);
    assert_eq!(forest.get(&parent).map(Vec::len), Some(1));
    assert_eq!(forest.ambiguities(), 0);

    forest.record(parent, complete(&g, phrases[1]));
    assert_eq!(forest.ambiguities(), 1);

    forest.purge_from(2);
    assert_eq!(forest.len(), 1);
    forest.purge_from(1);
    assert!(forest.is_empty());
  }

  #[test]
  fn test_missing_derivation_is_an_error() {
    let g = grammar();
    let snapshot = g.snapshot();
    let tokens = vec![Token::eof()];
    let err = Forest::default().tree(&snapshot, &tokens).unwrap_err();
    assert!(matches!(err, ParseError::MissingDerivation { column: 0, .. }), "{}", err);
  }
}
