//! Semantic actions: how a completed rule turns its children into a tree node.
//!
//! Every rule in the table names one action. An action does one of three
//! things with the children built for the rule's productions:
//!
//! * passes its first child through unchanged,
//! * builds a node with a label, keeping or spreading each child in turn
//!   (spreading splices a list child's own children into the new node, which
//!   is how the right-recursive `_S` and optional `_Q` rules stay flat), or
//! * builds the sentence node from all of its children.
//!
//! The action's priority decides between competing derivations of the same
//! chart cell: the higher one wins.

use crate::symbols::{Label, Nonterminal, Token};
use crate::syntree::{Constituent, SynTree};

/// What to do with one child when building a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Splice {
  /// Add the child itself
  Keep,
  /// Add the child's children (a leaf is kept as is)
  Spread,
}

use Splice::{Keep as K, Spread as S};

/// How an action assembles its node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
  Pass,
  Sentence,
  Node(Label, &'static [Splice]),
}

const LIST: Label = Label::List;

named_enum! {
  /// The closed set of semantic actions, named as in the rule table
  pub enum Action ("action") {
    Start => "start",
    Sentence => "sentence",
    ListEmpty => "list_empty",
    ListEmptyLow => "list_empty_low",
    ListTerm => "list_term",
    ListCons => "list_cons",
    ListConsSing => "list_cons_sing",
    ListConsPlur => "list_cons_plur",
    ListConsLeft => "list_cons_left",
    OptNone => "opt_none",
    OptTerm => "opt_term",
    OptNonterm => "opt_nonterm",
    Word => "word",
    PhraseDetPossPron => "phrase_det_poss_pron",
    PhraseAdvp => "phrase_advp",
    PhraseVc => "phrase_vc",
    PhraseAp => "phrase_ap",
    PhraseInfp => "phrase_infp",
    PhraseNump => "phrase_nump",
    PhraseNp => "phrase_np",
    PhrasePp => "phrase_pp",
    Advp => "advp",
    Det => "det",
    DetPossPron => "det_poss_pron",
    DetPossPronDet => "det_poss_pron_det",
    Adj => "adj",
    ApMinItem => "ap_min_item",
    ApMin => "ap_min",
    ApMinCont => "ap_min_cont",
    ApMinAlt => "ap_min_alt",
    ApMaxAlt => "ap_max_alt",
    ApMax => "ap_max",
    KonjDelMin => "konj_del_min",
    PropCompNounCont => "prop_comp_noun_cont",
    CompNounCont => "comp_noun_cont",
    NumPhrase => "num_phrase",
    NpRestPhrase => "np_rest_phrase",
    NpRest => "np_rest",
    NpSifPhrase => "np_sif_phrase",
    NpSif => "np_sif",
    NpCom1 => "np_com_1",
    NpCom2 => "np_com_2",
    NpCom3 => "np_com_3",
    NpPhrase => "np_phrase",
    NpCom => "np_com",
    NpProp => "np_prop",
    Nppc => "nppc",
    NpComp => "np_comp",
    PpAp => "pp_ap",
    Vc => "vc",
    PpNp => "pp_np",
    VcList => "vc_list",
    PpMellan => "pp_mellan",
    PpKonj => "pp_konj",
    VcListSup => "vc_list_sup",
    Infp => "infp",
  }
}

impl Action {
  pub fn priority(self) -> u32 {
    match self {
      Self::Start | Self::Sentence => 0,
      Self::ListEmptyLow | Self::Word => 10,
      Self::ListEmpty | Self::OptNone => 20,
      Self::ListTerm
      | Self::ListCons
      | Self::ListConsSing
      | Self::ListConsPlur
      | Self::OptTerm
      | Self::OptNonterm
      | Self::PhraseDetPossPron => 30,
      Self::PhraseAdvp | Self::PhraseVc => 40,
      Self::PhraseAp | Self::PhraseInfp | Self::PhraseNump => 50,
      Self::PhraseNp => 60,
      Self::PhrasePp => 70,
      Self::Advp | Self::Det | Self::DetPossPron | Self::DetPossPronDet => 90,
      Self::Adj => 100,
      Self::ApMinItem => 110,
      Self::ApMin => 120,
      Self::ApMinCont => 130,
      Self::ApMinAlt => 140,
      Self::ApMaxAlt | Self::ApMax => 150,
      Self::KonjDelMin => 160,
      Self::PropCompNounCont | Self::CompNounCont | Self::NumPhrase => 170,
      Self::NpRestPhrase | Self::NpRest => 180,
      Self::NpSifPhrase | Self::NpSif => 190,
      Self::NpCom1 | Self::NpCom2 | Self::NpCom3 => 200,
      Self::NpPhrase | Self::NpCom | Self::NpProp | Self::Nppc | Self::NpComp => 210,
      Self::PpAp | Self::Vc => 220,
      Self::PpNp | Self::VcList => 230,
      Self::PpMellan | Self::PpKonj | Self::VcListSup => 240,
      Self::Infp => 250,
      Self::ListConsLeft => 500,
    }
  }

  pub fn shape(self) -> Shape {
    use Nonterminal as N;

    let node = |nt: Nonterminal, plan: &'static [Splice]| Shape::Node(Label::Symbol(nt), plan);

    match self {
      Self::Start
      | Self::Word
      | Self::PhraseDetPossPron
      | Self::PhraseAdvp
      | Self::PhraseVc
      | Self::PhraseAp
      | Self::PhraseInfp
      | Self::PhraseNump
      | Self::PhraseNp
      | Self::PhrasePp
      | Self::Det
      | Self::DetPossPron
      | Self::DetPossPronDet
      | Self::Adj
      | Self::ApMinAlt
      | Self::ApMaxAlt
      | Self::KonjDelMin
      | Self::NpCom => Shape::Pass,
      Self::Sentence => Shape::Sentence,
      Self::ListEmpty | Self::ListEmptyLow | Self::OptNone => Shape::Node(LIST, &[]),
      Self::ListTerm
      | Self::ListCons
      | Self::ListConsSing
      | Self::ListConsPlur
      | Self::ListConsLeft
      | Self::ApMinCont
      | Self::NpRest
      | Self::NpCom1 => Shape::Node(LIST, &[K, S]),
      Self::OptTerm | Self::OptNonterm => Shape::Node(LIST, &[K]),
      Self::Advp => node(N::Advp, &[K]),
      Self::ApMinItem | Self::CompNounCont => Shape::Node(LIST, &[S, K]),
      Self::ApMin => node(N::ApMin, &[S]),
      Self::ApMax => node(N::ApMax, &[S, S, S, S]),
      Self::PropCompNounCont | Self::NpSif => Shape::Node(LIST, &[S, S, K]),
      Self::NumPhrase => node(N::NumP, &[S, K, S]),
      Self::NpRestPhrase | Self::NpSifPhrase | Self::NpPhrase => node(N::Np, &[S]),
      Self::NpCom2 => Shape::Node(LIST, &[S, K, S, S, S, S, S, K, S]),
      Self::NpCom3 => Shape::Node(LIST, &[S, S, S, S, S, S, S, K, S]),
      Self::NpProp => Shape::Node(LIST, &[S, S, S, K, S]),
      Self::Nppc => Shape::Node(LIST, &[K, S, S, K, S]),
      Self::NpComp => Shape::Node(LIST, &[S, S, K, S, K, S, S, S, K, S]),
      Self::PpAp | Self::PpNp => node(N::Pp, &[K, K]),
      Self::PpMellan | Self::PpKonj => node(N::Pp, &[K, K, K, K]),
      Self::Vc => node(N::Vc, &[K]),
      Self::VcList => node(N::Vc, &[K, S]),
      Self::VcListSup => node(N::Vc, &[K, S, K]),
      Self::Infp => node(N::Infp, &[K, S, K, S]),
    }
  }

  /// Whether this action can build a node for a rule with `len` productions
  pub fn accepts(self, len: usize) -> bool {
    match self.shape() {
      Shape::Pass | Shape::Sentence => len >= 1,
      Shape::Node(_, plan) => plan.len() == len,
    }
  }

  /// Builds the node for one application of a rule spanning `span`
  pub fn apply(self, span: (usize, usize), children: Vec<SynTree<Label, Token>>) -> SynTree<Label, Token> {
    match self.shape() {
      Shape::Pass => children
        .into_iter()
        .next()
        .unwrap_or_else(|| SynTree::Branch(Constituent { value: LIST, span }, Vec::new())),
      Shape::Sentence => SynTree::Branch(
        Constituent {
          value: Label::Symbol(Nonterminal::Sent),
          span,
        },
        children,
      ),
      Shape::Node(label, plan) => {
        let mut spliced = Vec::with_capacity(children.len());
        for (child, splice) in children.into_iter().zip(plan.iter().copied()) {
          match (splice, child) {
            (Splice::Spread, SynTree::Branch(_, grandchildren)) => spliced.extend(grandchildren),
            (_, child) => spliced.push(child),
          }
        }
        SynTree::Branch(Constituent { value: label, span }, spliced)
      }
    }
  }
}
