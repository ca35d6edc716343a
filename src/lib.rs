#[macro_use]
extern crate lazy_static;

#[macro_use]
pub mod utils;

pub mod action;
pub mod chunker;
pub mod earley;
pub mod error;
pub mod first;
pub mod forest;
pub mod grammar;
pub mod parse_grammar;
pub mod parser;
pub mod rules;
pub mod segment;
pub mod symbols;
pub mod syntree;
pub mod tagger;

pub use crate::chunker::{Chunker, Config};
pub use crate::error::{GrammarError, ParseError};
pub use crate::grammar::Grammar;
pub use crate::parser::{Derivation, Parser};
pub use crate::symbols::{Label, Nonterminal, Terminal, Token};
pub use crate::syntree::SynTree;
pub use crate::utils::Err;

#[test]
fn test_chunk_tagged_text() {
  let chunker = Chunker::new(Config::default()).unwrap();
  let text = "Detta/PF@NS0@S är/V@IPAS en/DI@US@S del/NCUSN@IS av/SPS Nationell/AQPUSNIS psykiatrisamordning/NCUSN@IS";

  let nps = chunker.noun_phrases(text.lines());
  assert_eq!(nps.first().map(String::as_str), Some("Detta"));
  assert!(nps.iter().any(|np| np == "Nationell psykiatrisamordning"), "{:?}", nps);
}
