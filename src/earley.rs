use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::forest::Forest;
use crate::grammar::Snapshot;
use crate::rules::{Production, RuleId};
use crate::symbols::{Nonterminal, Terminal};

/// A dotted rule anchored at the column where its recognition began
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Item {
  pub rule: RuleId,
  pub dot: usize,
  pub origin: usize,
}

impl Item {
  pub fn new(rule: RuleId, origin: usize) -> Self {
    Self { rule, dot: 0, origin }
  }

  pub fn advance(&self) -> Self {
    Self {
      dot: self.dot + 1,
      ..*self
    }
  }

  /// The same item with its dot moved back one place
  pub fn retreat(&self) -> Self {
    Self {
      dot: self.dot.saturating_sub(1),
      ..*self
    }
  }
}

/// The items valid at one input position, in the order they were added
#[derive(Debug, Clone, Default)]
pub struct Column {
  items: Vec<Item>,
  seen: HashSet<Item>,
}

impl Column {
  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn has(&self, item: &Item) -> bool {
    self.seen.contains(item)
  }

  /// Adds an item unless it's already present, returning whether it was new
  pub fn add(&mut self, item: Item) -> bool {
    if self.seen.insert(item) {
      self.items.push(item);
      true
    } else {
      false
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = &Item> {
    self.items.iter()
  }
}

#[derive(Debug, Default)]
pub struct Chart(Vec<Column>);

impl Chart {
  pub fn new() -> Self {
    Self(vec![Column::default()])
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn column(&self, k: usize) -> Option<&Column> {
    self.0.get(k)
  }

  /// Makes sure columns `0..=k` exist
  pub fn ensure(&mut self, k: usize) {
    if self.0.len() <= k {
      self.0.resize_with(k + 1, Column::default);
    }
  }

  pub fn len_at(&self, k: usize) -> usize {
    self.0.get(k).map(Column::len).unwrap_or(0)
  }

  pub fn has(&self, k: usize, item: &Item) -> bool {
    self.0.get(k).is_some_and(|c| c.has(item))
  }

  pub fn add(&mut self, k: usize, item: Item) -> bool {
    self.ensure(k);
    self.0[k].add(item)
  }

  /// Drops column `k` and everything after it
  pub fn truncate(&mut self, k: usize) {
    self.0.truncate(k);
  }

  /// Get an owned item so that passing around &mut chart is more ergonomic
  fn get_state(&self, k: usize, idx: usize) -> Item {
    self.0[k].items[idx]
  }

  /// Displays the chart with each item's rule spelled out
  pub fn display<'a>(&'a self, snapshot: &'a Snapshot<'a>) -> ChartDisplay<'a> {
    ChartDisplay {
      chart: self,
      snapshot,
    }
  }
}

pub struct ChartDisplay<'a> {
  chart: &'a Chart,
  snapshot: &'a Snapshot<'a>,
}

impl fmt::Display for ChartDisplay<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (k, column) in self.chart.0.iter().enumerate() {
      writeln!(f, "State {}:", k)?;
      for item in column.iter() {
        writeln!(f, "  {}..{}: {}", item.origin, k, self.snapshot.display_item(item))?;
      }
    }
    Ok(())
  }
}

/// Bookkeeping for one pass over a column
#[derive(Debug, Default)]
struct ColumnPass {
  /// Symbols already expanded here
  predicted: HashSet<Nonterminal>,
  /// Completions that started and ended in this column, by symbol
  zero_width: HashMap<Nonterminal, Vec<Item>>,
}

/// Runs the predictor, scanner and completer over column `k` until it stops
/// growing. Scanned items land in column `k + 1`, and every advance past a
/// nonterminal is recorded in the forest.
pub fn build_column(
  snapshot: &Snapshot<'_>,
  chart: &mut Chart,
  forest: &mut Forest,
  k: usize,
  lookahead: Terminal,
) {
  chart.ensure(k + 1);

  let mut pass = ColumnPass::default();

  // need to use while loop because the number of items at k can expand during the loop
  let mut idx = 0;
  while idx < chart.len_at(k) {
    let item = chart.get_state(k, idx);
    idx += 1;

    match snapshot.next_production(&item) {
      None => completer(snapshot, chart, forest, &mut pass, k, item),
      Some(Production::Nonterminal(symbol)) => {
        predictor(snapshot, chart, forest, &mut pass, k, item, symbol, lookahead)
      }
      Some(Production::Terminal(wanted)) => scanner(chart, k, item, wanted, lookahead),
    }
  }

  tracing::trace!(column = k, items = chart.len_at(k), %lookahead, "built column");
}

fn completer(
  snapshot: &Snapshot<'_>,
  chart: &mut Chart,
  forest: &mut Forest,
  pass: &mut ColumnPass,
  k: usize,
  item: Item,
) {
  let symbol = snapshot.symbol(item.rule);
  if item.origin == k {
    pass.zero_width.entry(symbol).or_default().push(item);
  }

  // item has been completed, now look for items in its origin column that are
  // waiting for its symbol
  for idx in 0..chart.len_at(item.origin) {
    let parent = chart.get_state(item.origin, idx);

    if snapshot.next_production(&parent) == Some(Production::Nonterminal(symbol)) {
      // found one, advance its dot and add it *at k*, because it's now waiting
      // on the token there
      let advanced = parent.advance();
      chart.add(k, advanced);
      forest.record((advanced, k), (item, k));
    }
  }
}

#[allow(clippy::too_many_arguments)]
fn predictor(
  snapshot: &Snapshot<'_>,
  chart: &mut Chart,
  forest: &mut Forest,
  pass: &mut ColumnPass,
  k: usize,
  item: Item,
  symbol: Nonterminal,
  lookahead: Terminal,
) {
  // symbol was already completed without consuming anything here, so the
  // completer has come and gone: advance past it ourselves
  if let Some(completed) = pass.zero_width.get(&symbol) {
    let advanced = item.advance();
    chart.add(k, advanced);
    for child in completed {
      forest.record((advanced, k), (*child, k));
    }
  }

  if !pass.predicted.insert(symbol) {
    return;
  }

  let grammar = snapshot.grammar();
  for &id in grammar.rules_for(symbol) {
    let admit = match snapshot.productions(id).first() {
      None => true,
      Some(Production::Terminal(t)) => *t == lookahead,
      Some(Production::Nonterminal(nt)) => {
        lookahead == Terminal::Eof || grammar.first().admits(*nt, lookahead)
      }
    };

    if admit {
      chart.add(k, Item::new(id, k));
    }
  }
}

fn scanner(chart: &mut Chart, k: usize, item: Item, wanted: Terminal, lookahead: Terminal) {
  if wanted == lookahead {
    // consume the token, and wait for the next one in column k + 1
    chart.add(k + 1, item.advance());
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grammar::Grammar;

  fn symbols_at(g: &Grammar, k: usize, chart: &Chart) -> Vec<Nonterminal> {
    chart
      .column(k)
      .unwrap()
      .iter()
      .map(|item| g.rule(item.rule).symbol)
      .collect()
  }

  #[test]
  fn test_prediction_is_pruned_by_lookahead() {
    let g: Grammar = r#"
      SENT -> PHRASE => sentence;
      PHRASE -> NP => phrase_np;
      PHRASE -> VC => phrase_vc;
      NP -> det com_noun => np_rest;
      VC -> fin_verb => vc;
    "#
    .parse()
    .unwrap();

    let snapshot = g.snapshot();
    let mut chart = Chart::new();
    let mut forest = Forest::default();
    chart.add(0, Item::new(g.start(), 0));
    build_column(&snapshot, &mut chart, &mut forest, 0, Terminal::Det);

    let symbols = symbols_at(&g, 0, &chart);
    assert!(symbols.contains(&Nonterminal::Np));
    assert!(!symbols.contains(&Nonterminal::Vc));
    // only NP -> det • com_noun was scanned
    assert_eq!(chart.len_at(1), 1);
    assert!(forest.is_empty());
  }

  #[test]
  fn test_epsilon_completion_stays_in_column() {
    let g: Grammar = r#"
      SENT -> PHRASE => sentence;
      PHRASE -> AP_Q com_noun => ap_min_item;
      AP_Q -> => opt_none;
      AP_Q -> adj_sing => opt_term;
    "#
    .parse()
    .unwrap();

    let snapshot = g.snapshot();
    let mut chart = Chart::new();
    let mut forest = Forest::default();
    chart.add(0, Item::new(g.start(), 0));
    build_column(&snapshot, &mut chart, &mut forest, 0, Terminal::ComNoun);

    let phrase = g.rules_for(Nonterminal::Phrase)[0];
    let past_empty = Item {
      rule: phrase,
      dot: 1,
      origin: 0,
    };
    assert!(chart.has(0, &past_empty));
    assert_eq!(forest.get(&(past_empty, 0)).map(Vec::len), Some(1));
    // and that item scans the noun into the next column
    assert!(chart.has(1, &past_empty.advance()));
  }

  #[test]
  fn test_display() {
    let g: Grammar = "SENT -> PHRASE => sentence; PHRASE -> pron => word;".parse().unwrap();
    let snapshot = g.snapshot();
    let mut chart = Chart::new();
    let mut forest = Forest::default();
    chart.add(0, Item::new(g.start(), 0));
    build_column(&snapshot, &mut chart, &mut forest, 0, Terminal::Pron);

    let shown = chart.display(&snapshot).to_string();
    assert!(shown.starts_with("State 0:\n  0..0: START -> • SENT eof (0)\n"), "{}", shown);
    assert!(shown.contains("State 1:\n  0..1: PHRASE -> pron • (0)"), "{}", shown);
  }
}
