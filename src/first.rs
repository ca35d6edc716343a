use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::rules::{Production, Rule};
use crate::symbols::{Nonterminal, Terminal};

/// The terminals that can begin a nonterminal's expansions, and whether one of
/// them can begin with nothing at all
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirstSet {
  pub terminals: BTreeSet<Terminal>,
  pub empty: bool,
}

impl FirstSet {
  /// Whether a prediction of this symbol can succeed with `lookahead` next
  pub fn admits(&self, lookahead: Terminal) -> bool {
    self.empty || self.terminals.contains(&lookahead)
  }

  /// Adds everything in `other`, returning whether anything was new
  fn absorb(&mut self, other: &FirstSet) -> bool {
    let before = self.terminals.len();
    self.terminals.extend(other.terminals.iter().copied());
    let changed = self.terminals.len() != before || (other.empty && !self.empty);
    self.empty |= other.empty;
    changed
  }
}

impl fmt::Display for FirstSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{{")?;
    let mut first = true;
    for t in self.terminals.iter() {
      if !first {
        write!(f, ",")?;
      }
      write!(f, " {}", t)?;
      first = false;
    }
    if self.empty {
      write!(f, "{} <empty>", if first { "" } else { "," })?;
    }
    write!(f, " }}")
  }
}

/// FIRST sets for every nonterminal of a rule list, to depth one
#[derive(Debug)]
pub struct FirstSets {
  sets: HashMap<Nonterminal, FirstSet>,
  /// `(target, source)`: first(target) includes first(source)
  edges: Vec<(Nonterminal, Nonterminal)>,
}

impl FirstSets {
  pub fn compute(rules: &[Rule]) -> Self {
    let mut sets: HashMap<Nonterminal, FirstSet> = HashMap::new();
    let mut edges = Vec::new();

    for rule in rules {
      let set = sets.entry(rule.symbol).or_default();
      match rule.productions.first() {
        None => set.empty = true,
        Some(Production::Terminal(t)) => {
          set.terminals.insert(*t);
        }
        Some(Production::Nonterminal(nt)) => {
          let edge = (rule.symbol, *nt);
          if rule.symbol != *nt && !edges.contains(&edge) {
            edges.push(edge);
          }
        }
      }
    }

    let mut first = Self { sets, edges };
    while first.propagate() {}
    first
  }

  /// One pass over the dependency edges, returning whether any set grew
  pub fn propagate(&mut self) -> bool {
    let mut changed = false;
    for &(target, source) in self.edges.iter() {
      let source = match self.sets.get(&source) {
        Some(set) => set.clone(),
        None => continue,
      };
      changed |= self.sets.entry(target).or_default().absorb(&source);
    }
    changed
  }

  pub fn get(&self, symbol: Nonterminal) -> Option<&FirstSet> {
    self.sets.get(&symbol)
  }

  /// Whether `symbol` can start with `lookahead`, or derive nothing
  pub fn admits(&self, symbol: Nonterminal, lookahead: Terminal) -> bool {
    self.get(symbol).is_some_and(|set| set.admits(lookahead))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parse_grammar::parse_rules;

  fn first_sets(s: &str) -> FirstSets {
    FirstSets::compute(&parse_rules(s).unwrap().0)
  }

  #[test]
  fn test_direct_and_inherited() {
    let first = first_sets(
      r#"
      SENT -> PHRASE => sentence;
      PHRASE -> NP => phrase_np;
      PHRASE -> adv => word;
      NP -> det com_noun => np_rest;
      NP -> pron => word;
      "#,
    );

    let phrase = first.get(Nonterminal::Phrase).unwrap();
    assert!(!phrase.empty);
    assert_eq!(
      phrase.terminals.iter().copied().collect::<Vec<_>>(),
      vec![Terminal::Det, Terminal::Adv, Terminal::Pron]
    );
    assert!(first.admits(Nonterminal::Sent, Terminal::Pron));
    assert!(!first.admits(Nonterminal::Sent, Terminal::ComNoun));
  }

  #[test]
  fn test_empty_marker_propagates() {
    let first = first_sets(
      r#"
      NP -> DET_Q com_noun => np_rest;
      DET_Q -> => opt_none;
      DET_Q -> det => opt_term;
      "#,
    );

    let np = first.get(Nonterminal::Np).unwrap();
    assert!(np.empty);
    assert!(np.terminals.contains(&Terminal::Det));
    // an empty-capable set admits any lookahead
    assert!(first.admits(Nonterminal::Np, Terminal::Num));
  }

  #[test]
  fn test_cycles_reach_a_shared_fixed_point() {
    let mut first = first_sets(
      r#"
      AP -> APMIN => ap_min_alt;
      APMIN -> AP => ap_min;
      APMIN -> adj_sing => adj;
      AP -> adv => word;
      "#,
    );

    assert_eq!(first.get(Nonterminal::Ap), first.get(Nonterminal::ApMin));
    assert_eq!(first.get(Nonterminal::Ap).unwrap().terminals.len(), 2);
    assert!(!first.propagate());
  }

  #[test]
  fn test_builtin_grammar_converges() {
    let mut first = FirstSets::compute(crate::Grammar::builtin().unwrap().rules());
    assert!(!first.propagate());
    assert!(first.admits(Nonterminal::Np, Terminal::Det));
    assert!(first.admits(Nonterminal::Pp, Terminal::PrepMellan));
    assert!(!first.admits(Nonterminal::Pp, Terminal::Det));
  }
}
