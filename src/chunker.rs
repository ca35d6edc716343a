use crate::grammar::Grammar;
use crate::parser::Parser;
use crate::segment::segments;
use crate::symbols::{Label, Token};
use crate::syntree::SynTree;
use crate::tagger::tokenize;
use crate::utils::Err;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
  /// Lines with more items than this are parsed in pieces
  pub max_tokens: usize,
}

impl Default for Config {
  fn default() -> Self {
    Self { max_tokens: 20 }
  }
}

/// Extracts noun phrases from tagged text with the built-in grammar
#[derive(Debug)]
pub struct Chunker {
  grammar: Grammar,
  config: Config,
}

impl Chunker {
  pub fn new(config: Config) -> Result<Self, Err> {
    Ok(Self::with_grammar(Grammar::builtin()?, config))
  }

  pub fn with_grammar(grammar: Grammar, config: Config) -> Self {
    Self { grammar, config }
  }

  pub fn grammar(&self) -> &Grammar {
    &self.grammar
  }

  pub fn config(&self) -> Config {
    self.config
  }

  pub fn parser(&self) -> Parser<'_> {
    Parser::new(&self.grammar)
  }

  /// The pieces a line is parsed in
  pub fn segments<'a>(&self, line: &'a str) -> Vec<&'a str> {
    segments(line, self.config.max_tokens)
  }

  /// Tags and parses one segment. Returns `None` if nothing in it could be
  /// tagged or recovered.
  pub fn parse_segment(&self, segment: &str) -> Option<SynTree<Label, Token>> {
    let tokens = tokenize(segment);
    if tokens.is_empty() {
      return None;
    }

    match self.parser().parse(tokens) {
      Ok(tree) => tree,
      Err(e) => {
        tracing::warn!(segment, error = %e, "couldn't build a tree");
        None
      }
    }
  }

  /// Every noun phrase in `lines`, in order. Inner phrases come before the
  /// phrases that contain them.
  pub fn noun_phrases<'a>(&self, lines: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut nps = Vec::new();
    for line in lines {
      if line.trim().is_empty() {
        continue;
      }

      for segment in self.segments(line) {
        if let Some(tree) = self.parse_segment(segment) {
          nps.extend(tree.noun_phrases());
        }
      }
    }
    nps
  }
}
