//! The closed alphabets of the chunking grammar.
//!
//! Terminals are the word classes the tagger can assign to a `word/TAG` token,
//! plus the end-of-input marker. Nonterminals are the phrase categories of the
//! rule table. Terminal names are lower case and nonterminal names upper case,
//! which is how the rule notation tells them apart.

use std::fmt;

named_enum! {
  /// A word class assigned by the tagger
  pub enum Terminal ("terminal") {
    SentAdv => "sent_adv",
    HereThere => "here_there",
    PrepMellan => "prep_mellan",
    Det => "det",
    NGen => "n_gen",
    PropNGen => "prop_n_gen",
    Adv => "adv",
    Konj => "konj",
    Subj => "subj",
    Prep => "prep",
    AdjSing => "adj_sing",
    AdjPlur => "adj_plur",
    AdjSingPlur => "adj_sing_plur",
    Num => "num",
    Pron => "pron",
    PossPron => "poss_pron",
    CompNoun => "comp_noun",
    PropCompNoun => "prop_comp_noun",
    PropNoun => "prop_noun",
    ComNoun => "com_noun",
    Inf => "inf",
    InfVerb => "inf_verb",
    Part => "part",
    FinVerb => "fin_verb",
    SupVerb => "sup_verb",
    ImpVerb => "imp_verb",
    ConjVerb => "conj_verb",
    DelMin => "del_min",
    DelMaj => "del_maj",
    DelParen => "del_paren",
    Interj => "interj",
    UO => "u_o",
    Particip => "particip",
    KonjVerb => "konj_verb",
    /// Appended to every token stream by the parser
    Eof => "eof",
  }
}

named_enum! {
  /// A phrase category defined by the rule table
  pub enum Nonterminal ("nonterminal") {
    Np => "NP",
    AdjPlur => "ADJPLUR",
    AdjSing => "ADJSING",
    Advp => "ADVP",
    AdvpQ => "ADVP_Q",
    AdvpS => "ADVP_S",
    Ap => "AP",
    ApMin => "APMIN",
    ApMinPlurContL => "APMINPLURCONT_L",
    ApMinPlurContS => "APMINPLURCONT_S",
    ApMinPlurL => "APMINPLUR_L",
    ApMinPlurS => "APMINPLUR_S",
    ApMinSingContL => "APMINSINGCONT_L",
    ApMinSingContS => "APMINSINGCONT_S",
    ApMinSingL => "APMINSING_L",
    ApMinSingS => "APMINSING_S",
    ApMax => "APMAX",
    ApS => "AP_S",
    ApQ => "AP_Q",
    ComNounS => "COMNOUN_S",
    CompNounContL => "COMPNOUNCONT_L",
    CompNounContS => "COMPNOUNCONT_S",
    DelMinQ => "DELMIN_Q",
    Det => "DET",
    DetQ => "DET_Q",
    DetPossPron => "DETPOSSPRON",
    DetPossPronQ => "DETPOSSPRON_Q",
    HereThereQ => "HERETHERE_Q",
    KonjDelMinQ => "KONJDELMINQ",
    KonjQ => "KONJ_Q",
    NpComL => "NPCOM_L",
    NpCom1L => "NPCOM1_L",
    NpCom2L => "NPCOM2_L",
    NpCom3L => "NPCOM3_L",
    NpCompL => "NPCOMP_L",
    NGenQ => "NGEN_Q",
    NppcL => "NPPC_L",
    NpPropL => "NPPROP_L",
    NpRestL => "NPREST_L",
    NpSifL => "NPSIF_L",
    NumQ => "NUM_Q",
    NumS => "NUM_S",
    NumP => "NUMP",
    PropCompNounContL => "PROPCOMPNOUNCONT_L",
    PropCompNounContS => "PROPCOMPNOUNCONT_S",
    PropNounS => "PROPNOUN_S",
    CompNounS => "COMPNOUN_S",
    Infp => "INFP",
    InfVerbS => "INFVERB_S",
    NpS => "NP_S",
    PartQ => "PART_Q",
    Phrase => "PHRASE",
    PhraseS => "PHRASE_S",
    Pp => "PP",
    PpQ => "PP_Q",
    PpS => "PP_S",
    SAdvpS => "SADVP_S",
    Sent => "SENT",
    Vc => "VC",
    /// Reserved for the augmented `START -> <sentence> eof` rule
    Start => "START",
  }
}

/// The tag of a branch in a derivation tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
  /// An anonymous list node, built by the list and optional rules and usually
  /// spread into its parent
  List,
  /// A node tagged with a phrase category, such as NP or PP
  Symbol(Nonterminal),
}

impl Label {
  pub fn is(&self, symbol: Nonterminal) -> bool {
    *self == Label::Symbol(symbol)
  }
}

impl fmt::Display for Label {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::List => write!(f, "list"),
      Self::Symbol(s) => write!(f, "{}", s),
    }
  }
}

/// One classified input token: the terminal it was tagged as, and the word and
/// tag it came from. The end-of-input marker has neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  pub terminal: Terminal,
  pub word: Option<String>,
  pub tag: Option<String>,
}

impl Token {
  pub fn new(terminal: Terminal, word: &str, tag: &str) -> Self {
    Self {
      terminal,
      word: Some(word.to_string()),
      tag: Some(tag.to_string()),
    }
  }

  pub fn eof() -> Self {
    Self {
      terminal: Terminal::Eof,
      word: None,
      tag: None,
    }
  }
}

impl fmt::Display for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match (&self.word, &self.tag) {
      (Some(word), Some(tag)) => write!(f, "{}/{} [{}]", word, tag, self.terminal),
      (None, Some(tag)) => write!(f, "{} [{}]", tag, self.terminal),
      (Some(word), None) => write!(f, "{} [{}]", word, self.terminal),
      (None, None) => write!(f, "{}", self.terminal),
    }
  }
}
