//! Turns `word/TAG` items into terminals.
//!
//! A handful of words get their own terminal no matter how generic their tag
//! is, so those patterns see the whole `word/TAG` item and are tried first.
//! Everything else is decided by the tag alone. Patterns must match the whole
//! string.

use regex::Regex;

use crate::symbols::{Terminal, Token};

regex_static!(
  SENT_ADV,
  "^(?:[aA]ldrig|[aA]lltid|[aA]lltså|[bB]ara|[dD]it|[dD]ock|[dD]ärför|[fF]aktiskt|\
   [gG]enast|[gG]ivetvis|[hH]eller|[hH]it|[hH]ittills|[hH]ur|[iI]från|[iI]nte|[jJ]u|\
   [kK]anske|[nN]aturligtvis|[nN]u|[nN]og|[nN]ämligen|[nN]är|[nN]ödvändigtvis|\
   [oO]ckså|[oO]fta|[pP]lötsligt|[sS]äkert|[uU]pp|[vV]ad|[vV]arför|[vV]isserligen|\
   [äÄ]ndå|[äÄ]ven)/R...$"
);
regex_static!(HERE_THERE, "^[HhDd]är/RG0S$");
regex_static!(PREP_MELLAN, "^[Mm]ellan/SPS$");

/// Tag patterns in the order they're tried
const TAG_PATTERNS: &[(&str, Terminal)] = &[
  ("D......", Terminal::Det),
  ("NC..G@.S", Terminal::NGen),
  ("NP00G@0S", Terminal::PropNGen),
  ("R...", Terminal::Adv),
  ("CC.", Terminal::Konj),
  ("CSS", Terminal::Subj),
  ("SP.", Terminal::Prep),
  ("A...S...", Terminal::AdjSing),
  ("A...P...", Terminal::AdjPlur),
  ("A...0...", Terminal::AdjSingPlur),
  ("M......", Terminal::Num),
  ("P[FEHI]......", Terminal::Pron),
  ("PS......", Terminal::PossPron),
  ("NC...@.C|V@000C", Terminal::CompNoun),
  ("NP000@0C", Terminal::PropCompNoun),
  ("NP00N@.S", Terminal::PropNoun),
  ("NC..[N0]@.[SA]", Terminal::ComNoun),
  ("CIS", Terminal::Inf),
  ("V@N...", Terminal::InfVerb),
  ("QS", Terminal::Part),
  ("V@I[IP]..", Terminal::FinVerb),
  ("V@IU..", Terminal::SupVerb),
  ("V@M...|V@000A", Terminal::ImpVerb),
  ("V@S...", Terminal::ConjVerb),
  ("FI", Terminal::DelMin),
  ("FE", Terminal::DelMaj),
  ("FP", Terminal::DelParen),
  ("I", Terminal::Interj),
  ("XF", Terminal::UO),
];

lazy_static! {
  static ref WORD_RULES: Vec<(&'static Regex, Terminal)> = vec![
    (&*SENT_ADV, Terminal::SentAdv),
    (&*HERE_THERE, Terminal::HereThere),
    (&*PREP_MELLAN, Terminal::PrepMellan),
  ];
  static ref TAG_RULES: Vec<(Regex, Terminal)> = TAG_PATTERNS
    .iter()
    .map(|(pattern, terminal)| (Regex::new(&format!("^(?:{})$", pattern)).unwrap(), *terminal))
    .collect();
}

/// Classifies a single `word/TAG` item. The split happens at the last `/`, so
/// the word itself may contain slashes; an item with no `/` at all is taken to
/// be a bare tag. Returns `None` if no pattern matches.
pub fn classify(word_tag: &str) -> Option<Token> {
  let (word, tag) = match word_tag.rfind('/') {
    Some(idx) => (Some(&word_tag[..idx]), &word_tag[idx + 1..]),
    None => (None, word_tag),
  };

  let by_word = WORD_RULES
    .iter()
    .find(|(re, _)| re.is_match(word_tag))
    .map(|(_, t)| *t);
  let terminal = by_word.or_else(|| {
    TAG_RULES
      .iter()
      .find(|(re, _)| re.is_match(tag))
      .map(|(_, t)| *t)
  })?;

  Some(Token {
    terminal,
    word: word.map(str::to_string),
    tag: Some(tag.to_string()),
  })
}

/// Classifies every space-separated item of a line, dropping the ones no
/// pattern recognizes (including the empty items left by repeated spaces)
pub fn tokenize(line: &str) -> Vec<Token> {
  line.split(' ').filter_map(classify).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn terminal(s: &str) -> Option<Terminal> {
    classify(s).map(|t| t.terminal)
  }

  #[test]
  fn test_word_patterns_come_first() {
    assert_eq!(terminal("inte/RG0S"), Some(Terminal::SentAdv));
    assert_eq!(terminal("Aldrig/RG0S"), Some(Terminal::SentAdv));
    assert_eq!(terminal("Där/RG0S"), Some(Terminal::HereThere));
    assert_eq!(terminal("snabbt/RG0S"), Some(Terminal::Adv));
    assert_eq!(terminal("mellan/SPS"), Some(Terminal::PrepMellan));
    assert_eq!(terminal("på/SPS"), Some(Terminal::Prep));
  }

  #[test]
  fn test_tag_patterns() {
    assert_eq!(terminal("Detta/PF@NS0@S"), Some(Terminal::Pron));
    assert_eq!(terminal("är/V@IPAS"), Some(Terminal::FinVerb));
    assert_eq!(terminal("en/DI@US@S"), Some(Terminal::Det));
    assert_eq!(terminal("del/NCUSN@IS"), Some(Terminal::ComNoun));
    assert_eq!(terminal("stor/AQPUSNIS"), Some(Terminal::AdjSing));
    assert_eq!(terminal("sin/PS@000@S"), Some(Terminal::PossPron));
    assert_eq!(terminal("bil-/NCUSN@IC"), Some(Terminal::CompNoun));
    assert_eq!(terminal("./FE"), Some(Terminal::DelMaj));
  }

  #[test]
  fn test_patterns_match_the_whole_tag() {
    assert_eq!(terminal("x/RG0SX"), None);
    assert_eq!(terminal("x/ZZ"), None);
    assert_eq!(terminal("x/"), None);
  }

  #[test]
  fn test_split_at_last_slash() {
    let token = classify("1/2/MC00G0S").unwrap();
    assert_eq!(token.terminal, Terminal::Num);
    assert_eq!(token.word.as_deref(), Some("1/2"));
    assert_eq!(token.tag.as_deref(), Some("MC00G0S"));

    let bare = classify("FE").unwrap();
    assert_eq!(bare.terminal, Terminal::DelMaj);
    assert_eq!(bare.word, None);
  }

  #[test]
  fn test_tokenize_drops_unrecognized_items() {
    let tokens = tokenize("Detta/PF@NS0@S  är/V@IPAS ???/ZZ en/DI@US@S");
    let words = tokens
      .iter()
      .map(|t| t.word.as_deref().unwrap())
      .collect::<Vec<_>>();
    assert_eq!(words, vec!["Detta", "är", "en"]);
    assert!(tokenize("").is_empty());
  }
}
