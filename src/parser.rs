//! The parse driver: runs the chart forward over a sentence and recovers when
//! it gets stuck.
//!
//! Recovery works on the sentence rule (`SENT -> PHRASE` in the built-in
//! grammar). When a column comes up empty, or the end of input is reached
//! without an accepting item, the sentence rule is widened by one more
//! recoverable phrase and the chart is rolled back to the column before the
//! failure and rebuilt from there. If the same token is blamed twice in a row
//! the last token is dropped and the whole parse restarts, keeping the
//! widening. The widening belongs to a single call: every call starts from a
//! fresh [`Snapshot`].

use crate::earley::{Chart, ChartDisplay, Item, build_column};
use crate::error::ParseError;
use crate::forest::Forest;
use crate::grammar::{Grammar, Snapshot};
use crate::symbols::{Label, Token};
use crate::syntree::SynTree;

/// A finished chart for one sentence, ready to be turned into a tree
#[derive(Debug)]
pub struct Derivation<'g> {
  snapshot: Snapshot<'g>,
  chart: Chart,
  forest: Forest,
  /// The tokens that were finally accepted, plus the end marker
  input: Vec<Token>,
}

impl<'g> Derivation<'g> {
  /// Rebuilds the highest-priority tree from the forest
  pub fn tree(&self) -> Result<SynTree<Label, Token>, ParseError> {
    self.forest.tree(&self.snapshot, &self.input)
  }

  pub fn chart(&self) -> ChartDisplay<'_> {
    self.chart.display(&self.snapshot)
  }

  pub fn forest(&self) -> &Forest {
    &self.forest
  }

  /// The tokens that were accepted. Recovery may have dropped some from the end.
  pub fn tokens(&self) -> &[Token] {
    &self.input[..self.input.len() - 1]
  }

  /// How many phrases the sentence rule ended up with
  pub fn entry_len(&self) -> usize {
    self.snapshot.entry_len()
  }
}

#[derive(Debug, Clone, Copy)]
pub struct Parser<'g> {
  grammar: &'g Grammar,
}

impl<'g> Parser<'g> {
  pub fn new(grammar: &'g Grammar) -> Self {
    Self { grammar }
  }

  pub fn grammar(&self) -> &'g Grammar {
    self.grammar
  }

  /// Parses a sentence into its highest-priority tree. `Ok(None)` means the
  /// sentence couldn't be recovered.
  pub fn parse(&self, tokens: Vec<Token>) -> Result<Option<SynTree<Label, Token>>, ParseError> {
    match self.recognize(tokens) {
      Some(derivation) => derivation.tree().map(Some),
      None => Ok(None),
    }
  }

  /// Builds the chart for a sentence, recovering as needed. Returns `None` if
  /// every token had to be dropped.
  pub fn recognize(&self, mut tokens: Vec<Token>) -> Option<Derivation<'g>> {
    let mut snapshot = self.grammar.snapshot();
    let accept = Item {
      rule: self.grammar.start(),
      dot: 2,
      origin: 0,
    };

    'restart: loop {
      if tokens.is_empty() {
        tracing::debug!(entry_len = snapshot.entry_len(), "no tokens left to parse");
        return None;
      }

      let mut input = tokens.clone();
      input.push(Token::eof());

      let mut chart = Chart::new();
      let mut forest = Forest::default();
      chart.add(0, Item::new(self.grammar.start(), 0));

      // the word blamed for the last failure in this attempt
      let mut prev_error: Option<Option<String>> = None;
      let mut from = 0;

      loop {
        let mut stuck = None;
        for k in from..input.len() {
          if chart.len_at(k) == 0 {
            stuck = Some(k);
            break;
          }
          build_column(&snapshot, &mut chart, &mut forest, k, input[k].terminal);
        }

        let fail = match stuck {
          Some(k) => k,
          None if chart.has(input.len(), &accept) => {
            tracing::trace!(
              tokens = tokens.len(),
              entry_len = snapshot.entry_len(),
              ambiguities = forest.ambiguities(),
              "accepted"
            );
            return Some(Derivation {
              snapshot,
              chart,
              forest,
              input,
            });
          }
          // ran out of input without accepting: blame the last real token
          None => input.len() - 1,
        };

        let offending = input[fail - 1].word.clone();
        if prev_error.as_ref() == Some(&offending) {
          let dropped = tokens.pop();
          snapshot.widen();
          tracing::debug!(
            column = fail,
            dropped = ?dropped.as_ref().and_then(|t| t.word.as_deref()),
            entry_len = snapshot.entry_len(),
            "same failure twice, dropping the last token and restarting"
          );
          continue 'restart;
        }

        snapshot.widen();
        tracing::debug!(
          column = fail,
          word = ?offending.as_deref(),
          entry_len = snapshot.entry_len(),
          "recognition failed, widening the sentence rule"
        );
        prev_error = Some(offending);

        chart.truncate(fail);
        forest.purge_from(fail);
        from = fail - 1;
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::symbols::{Nonterminal, Terminal};

  fn token(terminal: Terminal, word: &str) -> Token {
    Token::new(terminal, word, "X")
  }

  fn words(tree: &SynTree<Label, Token>) -> Vec<String> {
    tree
      .leaves()
      .into_iter()
      .filter_map(|w| w.value.word.clone())
      .collect()
  }

  #[test]
  fn test_noun_phrase_without_recovery() {
    let g = Grammar::builtin().unwrap();
    let parser = Parser::new(&g);
    let derivation = parser
      .recognize(vec![
        token(Terminal::Det, "en"),
        token(Terminal::AdjSing, "stor"),
        token(Terminal::ComNoun, "bil"),
      ])
      .unwrap();
    assert_eq!(derivation.entry_len(), 1);

    let tree = derivation.tree().unwrap();
    let (root, _) = tree.get_branch().unwrap();
    assert!(root.value.is(Nonterminal::Sent));
    assert_eq!(root.span, (0, 3));
    assert_eq!(tree.noun_phrases(), vec!["en stor bil"]);
  }

  #[test]
  fn test_recovery_widens_the_sentence() {
    let g = Grammar::builtin().unwrap();
    let parser = Parser::new(&g);
    let tokens = vec![
      token(Terminal::Pron, "hon"),
      token(Terminal::FinVerb, "köper"),
      token(Terminal::Det, "en"),
      token(Terminal::ComNoun, "bil"),
    ];

    let derivation = parser.recognize(tokens).unwrap();
    assert_eq!(derivation.entry_len(), 3);
    assert_eq!(derivation.tokens().len(), 4);

    let tree = derivation.tree().unwrap();
    assert_eq!(tree.get_branch().unwrap().1.len(), 3);
    assert_eq!(tree.noun_phrases(), vec!["hon", "en bil"]);
    assert_eq!(tree.phrases(Nonterminal::Vc), vec!["köper"]);

    // the next call starts over with an unwidened sentence rule
    let again = parser.recognize(vec![token(Terminal::Pron, "hon")]).unwrap();
    assert_eq!(again.entry_len(), 1);
  }

  #[test]
  fn test_unparsable_tokens_are_dropped_from_the_tail() {
    let g: Grammar = r#"
      SENT -> PHRASE => sentence;
      PHRASE -> det => word;
    "#
    .parse()
    .unwrap();
    let parser = Parser::new(&g);

    let tokens = vec![token(Terminal::Det, "a"), token(Terminal::Pron, "x")];
    assert!(parser.recognize(tokens).is_none());
    assert!(parser.parse(Vec::new()).unwrap().is_none());
  }

  #[test]
  fn test_dropping_stops_at_a_parsable_prefix() {
    let g: Grammar = r#"
      SENT -> PHRASE_S => sentence;
      PHRASE_S -> PHRASE_S PHRASE => list_cons_left;
      PHRASE_S -> => list_empty_low;
      PHRASE -> det => word;
    "#
    .parse()
    .unwrap();
    let parser = Parser::new(&g);

    let derivation = parser
      .recognize(vec![
        token(Terminal::Det, "a"),
        token(Terminal::Det, "b"),
        token(Terminal::Pron, "x"),
      ])
      .unwrap();
    assert_eq!(derivation.tokens().len(), 2);
    assert!(derivation.entry_len() > 1);

    let tree = derivation.tree().unwrap();
    assert_eq!(words(&tree), vec!["a", "b"]);
  }

  #[test]
  fn test_parsing_is_deterministic() {
    let g = Grammar::builtin().unwrap();
    let parser = Parser::new(&g);
    let tokens = vec![
      token(Terminal::Prep, "med"),
      token(Terminal::PossPron, "sin"),
      token(Terminal::AdjSing, "nya"),
      token(Terminal::ComNoun, "bil"),
    ];

    let a = parser.recognize(tokens.clone()).unwrap();
    let b = parser.recognize(tokens).unwrap();
    assert_eq!(a.forest(), b.forest());
    assert_eq!(a.tree().unwrap(), b.tree().unwrap());
    assert_eq!(a.chart().to_string(), b.chart().to_string());
  }
}
