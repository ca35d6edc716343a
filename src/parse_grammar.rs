//! Simple recursive-descent parsing of rule tables
//!
//! ```text
//! // comments run to the end of the line
//! NP -> NPREST_L => np_rest_phrase;
//! AP_S -> => list_empty;
//! ```
//!
//! Upper-case names are nonterminals, lower-case names are terminals, and the
//! name after `=>` is the rule's semantic action.

use regex::Regex;
use std::str::FromStr;

use crate::action::Action;
use crate::grammar::Grammar;
use crate::rules::{Production, Rule};
use crate::symbols::{Nonterminal, Terminal};
use crate::utils::Err;

impl FromStr for Grammar {
  type Err = Err;

  /// Parses a grammar from a string. Assumes the first rule's symbol
  /// is the sentence symbol.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (rules, _) = parse_rules(s)?;
    Ok(Self::new(rules)?)
  }
}

type Infallible<'a, T> = (T, &'a str);
type ParseResult<'a, T> = Result<(T, &'a str), Err>;

/// Try to consume a regex, returning None if it doesn't match
fn optional_re<'a>(re: &'static Regex, s: &'a str) -> Infallible<'a, Option<&'a str>> {
  if let Some(m) = re.find(s) {
    if m.start() > 0 {
      return (None, s);
    }
    let (_, rest) = s.split_at(m.end());
    (Some(m.as_str()), rest)
  } else {
    (None, s)
  }
}

/// Try to consume a regex, failing if it doesn't match
fn needed_re<'a>(re: &'static Regex, s: &'a str) -> ParseResult<'a, &'a str> {
  if let (Some(c), rest) = optional_re(re, s) {
    Ok((c, rest))
  } else {
    Err(format!("couldn't match {} at {}", re, excerpt(s)).into())
  }
}

/// Try to consume a char, returning None if it doesn't match
fn optional_char(c: char, s: &str) -> Infallible<'_, Option<char>> {
  match s.strip_prefix(c) {
    Some(rest) => (Some(c), rest),
    None => (None, s),
  }
}

/// Try to consume a char, failing if it doesn't match
fn needed_char(c: char, s: &str) -> ParseResult<'_, char> {
  if let (Some(c), rest) = optional_char(c, s) {
    Ok((c, rest))
  } else {
    Err(format!("couldn't match {} at {}", c, excerpt(s)).into())
  }
}

/// The start of the remaining input, for error messages
fn excerpt(s: &str) -> &str {
  let end = s.char_indices().nth(40).map(|(idx, _)| idx).unwrap_or(s.len());
  let line_end = s.find('\n').unwrap_or(s.len());
  &s[..end.min(line_end)]
}

/// Skips any run of whitespace and `//` comments
fn skip_whitespace(s: &str) -> &str {
  regex_static!(WHITESPACE_OR_COMMENT, r"(?:\s+|//[^\n]*)+");
  optional_re(&*WHITESPACE_OR_COMMENT, s).1
}

/// Tries to parse a name made of letters, numbers and _
fn parse_name(s: &str) -> ParseResult<'_, &str> {
  regex_static!(NAME, r"[a-zA-Z0-9_]+");
  needed_re(&*NAME, s).map_err(|err| format!("name: {}", err).into())
}

fn parse_production(s: &str) -> ParseResult<'_, Production> {
  let (name, s) = parse_name(s).map_err(|e| -> Err { format!("symbol: {}", e).into() })?;

  // parse_name never returns an empty match
  let production = if name.starts_with(|c: char| c.is_lowercase()) {
    Production::Terminal(name.parse::<Terminal>()?)
  } else {
    Production::Nonterminal(name.parse::<Nonterminal>()?)
  };
  Ok((production, s))
}

fn parse_symbol(s: &str) -> ParseResult<'_, Nonterminal> {
  let (prod, rest) = parse_production(s)?;
  match prod {
    Production::Nonterminal(symbol) => Ok((symbol, rest)),
    Production::Terminal(t) => {
      Err(format!("expected symbol, got terminal {}: {}", t, excerpt(s)).into())
    }
  }
}

fn parse_action(s: &str) -> ParseResult<'_, Action> {
  let (name, rest) = parse_name(s).map_err(|e| -> Err { format!("action: {}", e).into() })?;
  Ok((name.parse::<Action>()?, rest))
}

/// Symbol, productions, action, terminated by `;`
fn parse_rule(s: &str) -> ParseResult<'_, Rule> {
  #![allow(clippy::trivial_regex)]
  regex_static!(ARROW, "->");
  regex_static!(FAT_ARROW, "=>");

  let (symbol, s) = parse_symbol(s).map_err(|e| -> Err { format!("rule symbol: {}", e).into() })?;
  let s = skip_whitespace(s);
  let (_, s) = needed_re(&*ARROW, s).map_err(|e| -> Err { format!("rule arrow: {}", e).into() })?;

  let mut productions = Vec::new();
  let mut rem = s;
  loop {
    rem = skip_whitespace(rem);
    if let (Some(_), s) = optional_re(&*FAT_ARROW, rem) {
      rem = skip_whitespace(s);
      break;
    }
    if rem.starts_with(';') || rem.is_empty() {
      return Err(format!("rule for {} has no action: {}", symbol, excerpt(rem)).into());
    }
    let (prod, s) =
      parse_production(rem).map_err(|e| -> Err { format!("rule production: {}", e).into() })?;
    productions.push(prod);
    rem = s;
  }

  let (action, s) = parse_action(rem).map_err(|e| -> Err { format!("rule {}: {}", symbol, e).into() })?;
  let s = skip_whitespace(s);
  let (_, s) = needed_char(';', s).map_err(|e| -> Err { format!("rule end: {}", e).into() })?;

  Ok((
    Rule {
      symbol,
      productions,
      action,
    },
    s,
  ))
}

pub(crate) fn parse_rules(s: &str) -> ParseResult<'_, Vec<Rule>> {
  let mut rules = Vec::new();
  let mut rem = s;
  loop {
    rem = skip_whitespace(rem);
    if rem.is_empty() {
      return Ok((rules, rem));
    }
    let (rule, s) = parse_rule(rem)?;
    rules.push(rule);
    rem = s;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_rules() {
    let (rules, rest) = parse_rules(
      r#"
      // leading comment
      SENT -> PHRASE => sentence;
      PHRASE -> det => word; // trailing comment
      AP_S ->
        => list_empty;
      "#,
    )
    .unwrap();

    assert!(rest.is_empty());
    assert_eq!(rules.len(), 3);
    assert_eq!(rules[0].symbol, Nonterminal::Sent);
    assert_eq!(rules[1].productions, vec![Production::Terminal(Terminal::Det)]);
    assert_eq!(rules[1].action, Action::Word);
    assert!(rules[2].is_empty());
    assert_eq!(rules[2].to_string(), "AP_S -> => list_empty");
  }

  #[test]
  fn test_terminal_lhs_is_rejected() {
    let err = parse_rules("det -> PHRASE => word;").unwrap_err();
    assert!(err.to_string().contains("expected symbol"), "{}", err);
  }

  #[test]
  fn test_unknown_names_are_rejected() {
    assert!(parse_rules("SENT -> PHRASES => sentence;").is_err());
    assert!(parse_rules("SENT -> PHRASE => sentense;").is_err());
    assert!(parse_rules("SENT -> determiner => sentence;").is_err());
  }

  #[test]
  fn test_missing_action_or_terminator() {
    assert!(parse_rules("SENT -> PHRASE;").is_err());
    assert!(parse_rules("SENT -> PHRASE => sentence").is_err());
  }
}
