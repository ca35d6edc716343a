use std::fmt;

use crate::action::Action;
use crate::symbols::{Nonterminal, Terminal};

/// Index of a rule in the grammar's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(pub u32);

impl RuleId {
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

impl fmt::Display for RuleId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
  Terminal(Terminal),
  Nonterminal(Nonterminal),
}

impl Production {
  pub fn nonterminal(&self) -> Option<Nonterminal> {
    match self {
      Self::Nonterminal(nt) => Some(*nt),
      _ => None,
    }
  }
}

impl fmt::Display for Production {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Terminal(t) => write!(f, "{}", t),
      Self::Nonterminal(nt) => write!(f, "{}", nt),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
  pub symbol: Nonterminal,
  pub productions: Vec<Production>,
  pub action: Action,
}

impl Rule {
  pub fn len(&self) -> usize {
    self.productions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Same left-hand side and right-hand side, whatever the action
  pub fn same_shape(&self, other: &Rule) -> bool {
    self.symbol == other.symbol && self.productions == other.productions
  }
}

impl fmt::Display for Rule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ->", self.symbol)?;
    for p in self.productions.iter() {
      write!(f, " {}", p)?;
    }
    write!(f, " => {}", self.action)
  }
}
