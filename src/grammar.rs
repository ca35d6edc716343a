use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::action::Action;
use crate::earley::Item;
use crate::error::GrammarError;
use crate::first::FirstSets;
use crate::rules::{Production, Rule, RuleId};
use crate::symbols::{Nonterminal, Terminal};
use crate::utils::Err;

/// The rule table shipped with the crate
pub const SWEDISH_NP: &str = include_str!("../grammars/swedish-np.fgr");

#[derive(Debug)]
pub struct Grammar {
  /// Every rule, indexed by `RuleId`. The last one is the augmented start rule.
  rules: Vec<Rule>,
  by_symbol: HashMap<Nonterminal, Vec<RuleId>>,
  first: FirstSets,
  entry: RuleId,
  start: RuleId,
}

impl fmt::Display for Grammar {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "//** sentence: {}", self.sentence())?;
    writeln!(f, "//** recovers with: {}", self.recovery_symbol())?;
    for nt in Nonterminal::ALL {
      if let Some(set) = self.first.get(*nt) {
        writeln!(f, "//** first {}: {}", nt, set)?;
      }
    }

    for rule in self.rules.iter() {
      writeln!(f, "{};", rule)?;
    }

    Ok(())
  }
}

impl Grammar {
  /// Builds a grammar from a rule list whose first rule is the sentence rule,
  /// and augments it with `START -> <sentence> eof`
  pub fn new(rules: Vec<Rule>) -> Result<Self, GrammarError> {
    let mut rules = Self::dedup(rules);
    Self::validate(&rules)?;

    let sentence = rules[0].symbol;
    rules.push(Rule {
      symbol: Nonterminal::Start,
      productions: vec![
        Production::Nonterminal(sentence),
        Production::Terminal(Terminal::Eof),
      ],
      action: Action::Start,
    });

    let mut by_symbol: HashMap<Nonterminal, Vec<RuleId>> = HashMap::new();
    for (idx, rule) in rules.iter().enumerate() {
      by_symbol
        .entry(rule.symbol)
        .or_default()
        .push(RuleId(idx as u32));
    }

    let first = FirstSets::compute(&rules);

    Ok(Self {
      entry: RuleId(0),
      start: RuleId(rules.len() as u32 - 1),
      rules,
      by_symbol,
      first,
    })
  }

  /// The built-in Swedish noun-phrase grammar
  pub fn builtin() -> Result<Self, Err> {
    SWEDISH_NP.parse()
  }

  /// Drops rules that repeat an earlier rule's symbol and productions
  fn dedup(rules: Vec<Rule>) -> Vec<Rule> {
    let mut kept: Vec<Rule> = Vec::with_capacity(rules.len());
    for rule in rules {
      if kept.iter().any(|k| k.same_shape(&rule)) {
        tracing::warn!(%rule, "dropping duplicate rule");
      } else {
        kept.push(rule);
      }
    }
    kept
  }

  fn validate(rules: &[Rule]) -> Result<(), GrammarError> {
    let entry = rules.first().ok_or(GrammarError::Empty)?;

    let reserved = |p: &Production| *p == Production::Nonterminal(Nonterminal::Start);
    if rules
      .iter()
      .any(|r| r.symbol == Nonterminal::Start || r.productions.iter().any(reserved))
    {
      return Err(GrammarError::Reserved(Nonterminal::Start));
    }

    let alternatives = rules.iter().filter(|r| r.symbol == entry.symbol).count();
    if alternatives != 1 {
      return Err(GrammarError::EntryAlternatives(entry.symbol, alternatives));
    }
    if !matches!(entry.productions.last(), Some(Production::Nonterminal(_))) {
      return Err(GrammarError::EntryNotWidenable(entry.clone()));
    }

    let defined = rules.iter().map(|r| r.symbol).collect::<HashSet<_>>();
    for rule in rules {
      if let Some(symbol) = rule
        .productions
        .iter()
        .filter_map(Production::nonterminal)
        .find(|nt| !defined.contains(nt))
      {
        return Err(GrammarError::Undefined {
          symbol,
          rule: rule.clone(),
        });
      }

      if !rule.action.accepts(rule.len()) {
        return Err(GrammarError::Arity {
          action: rule.action,
          len: rule.len(),
          rule: rule.clone(),
        });
      }
    }

    Ok(())
  }

  pub fn rule(&self, id: RuleId) -> &Rule {
    &self.rules[id.index()]
  }

  pub fn rules(&self) -> &[Rule] {
    &self.rules
  }

  /// The alternatives for `symbol`, in declaration order
  pub fn rules_for(&self, symbol: Nonterminal) -> &[RuleId] {
    self.by_symbol.get(&symbol).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn first(&self) -> &FirstSets {
    &self.first
  }

  /// The sentence rule, widened on recovery
  pub fn entry(&self) -> RuleId {
    self.entry
  }

  /// The augmented `START -> <sentence> eof` rule
  pub fn start(&self) -> RuleId {
    self.start
  }

  pub fn sentence(&self) -> Nonterminal {
    self.rule(self.entry).symbol
  }

  /// The symbol appended to the sentence rule each time the parser recovers
  pub fn recovery_symbol(&self) -> Nonterminal {
    // validate() guarantees the entry rule ends in a nonterminal
    self
      .rule(self.entry)
      .productions
      .last()
      .and_then(Production::nonterminal)
      .unwrap_or(Nonterminal::Phrase)
  }

  /// A fresh per-parse view of the grammar, with the sentence rule unwidened
  pub fn snapshot(&self) -> Snapshot<'_> {
    Snapshot {
      grammar: self,
      entry: self.rule(self.entry).productions.clone(),
    }
  }
}

/// The grammar as one parse sees it: shared rules, plus a private copy of the
/// sentence rule's productions that recovery can grow
#[derive(Debug, Clone)]
pub struct Snapshot<'g> {
  grammar: &'g Grammar,
  entry: Vec<Production>,
}

impl<'g> Snapshot<'g> {
  pub fn grammar(&self) -> &'g Grammar {
    self.grammar
  }

  pub fn productions(&self, id: RuleId) -> &[Production] {
    if id == self.grammar.entry {
      &self.entry
    } else {
      &self.grammar.rule(id).productions
    }
  }

  /// The symbol after the item's dot, if it isn't complete
  pub fn next_production(&self, item: &Item) -> Option<Production> {
    self.productions(item.rule).get(item.dot).copied()
  }

  pub fn symbol(&self, id: RuleId) -> Nonterminal {
    self.grammar.rule(id).symbol
  }

  pub fn action(&self, id: RuleId) -> Action {
    self.grammar.rule(id).action
  }

  /// Lets the sentence rule take one more recoverable phrase
  pub fn widen(&mut self) {
    self.entry.push(Production::Nonterminal(self.grammar.recovery_symbol()));
  }

  pub fn entry_len(&self) -> usize {
    self.entry.len()
  }

  /// Shows a dotted rule, using the widened sentence rule where needed
  pub fn display_item(&self, item: &Item) -> String {
    let mut out = format!("{} ->", self.symbol(item.rule));
    let prods = self.productions(item.rule);
    for (idx, p) in prods.iter().enumerate() {
      if idx == item.dot {
        out.push_str(" •");
      }
      out.push_str(&format!(" {}", p));
    }
    if item.dot >= prods.len() {
      out.push_str(" •");
    }
    out.push_str(&format!(" ({})", item.origin));
    out
  }
}
