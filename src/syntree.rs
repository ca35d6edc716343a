use std::fmt;

use crate::symbols::{Label, Nonterminal, Token};

#[derive(Debug, PartialEq, Clone)]
pub struct Constituent<T> {
  pub value: T,
  pub span: (usize, usize),
}

impl<T> fmt::Display for Constituent<T>
where
  T: fmt::Display,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}..{}: {}", self.span.0, self.span.1, self.value)
  }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Word<U> {
  pub value: U,
  pub span: (usize, usize),
}

impl<U> fmt::Display for Word<U>
where
  U: fmt::Display,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}..{}: {}", self.span.0, self.span.1, self.value)
  }
}

#[derive(Debug, PartialEq, Clone)]
pub enum SynTree<T, U> {
  Branch(Constituent<T>, Vec<SynTree<T, U>>),
  Leaf(Word<U>),
}

impl<T, U> SynTree<T, U> {
  pub fn is_leaf(&self) -> bool {
    matches!(self, Self::Leaf(_))
  }

  pub fn get_branch(&self) -> Option<(&Constituent<T>, &Vec<SynTree<T, U>>)> {
    match self {
      Self::Branch(c, cs) => Some((c, cs)),
      _ => None,
    }
  }

  /// The leaves under this node, left to right
  pub fn leaves(&self) -> Vec<&Word<U>> {
    let mut out = Vec::new();
    self.collect_leaves(&mut out);
    out
  }

  fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Word<U>>) {
    match self {
      Self::Leaf(w) => out.push(w),
      Self::Branch(_, children) => {
        for c in children {
          c.collect_leaves(out);
        }
      }
    }
  }
}

impl SynTree<Label, Token> {
  /// The text of every node labelled `symbol`, in post-order (an inner node
  /// comes before the node that contains it). Each text is the words of the
  /// node's leaves joined by single spaces.
  pub fn phrases(&self, symbol: Nonterminal) -> Vec<String> {
    let mut out = Vec::new();
    self.collect_phrases(symbol, &mut out);
    out
  }

  /// The noun phrases of a sentence tree
  pub fn noun_phrases(&self) -> Vec<String> {
    self.phrases(Nonterminal::Np)
  }

  fn collect_phrases(&self, symbol: Nonterminal, out: &mut Vec<String>) {
    if let Self::Branch(cons, children) = self {
      for c in children {
        c.collect_phrases(symbol, out);
      }
      if cons.value.is(symbol) {
        let words = self
          .leaves()
          .into_iter()
          .filter_map(|w| w.value.word.as_deref())
          .collect::<Vec<_>>();
        out.push(words.join(" "));
      }
    }
  }
}

impl<T, U> fmt::Display for SynTree<T, U>
where
  T: fmt::Display,
  U: fmt::Display,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Leaf(t) => write!(f, "{}", t),
      Self::Branch(t, ts) => {
        write!(f, "({}", t)?;
        if ts.len() == 1 {
          write!(f, " ({}))", ts[0])
        } else {
          for t in ts.iter() {
            // TODO: is there a nice way to do this that doesn't allocate a String?
            let fmt = format!("{}", t);
            for line in fmt.lines() {
              write!(f, "\n  {}", line)?;
            }
          }
          write!(f, ")")
        }
      }
    }
  }
}
