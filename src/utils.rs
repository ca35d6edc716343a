use std::error::Error;

/// Boxed static error type
pub type Err = Box<dyn Error + 'static>;

/// helper macro for initializing a regex with lazy_static!
macro_rules! regex_static {
  ($name:ident, $pattern:expr) => {
    lazy_static! {
      static ref $name: regex::Regex = regex::Regex::new($pattern).unwrap();
    }
  };
}

/// Declares a closed symbol enum together with its textual names, so the same
/// spelling is used by the rule notation, `Display` and `FromStr`.
macro_rules! named_enum {
  (
    $(#[$meta:meta])*
    pub enum $name:ident ($kind:literal) {
      $($(#[$vmeta:meta])* $variant:ident => $text:literal,)*
    }
  ) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub enum $name {
      $($(#[$vmeta])* $variant,)*
    }

    impl $name {
      /// Every variant, in declaration order
      pub const ALL: &'static [$name] = &[$($name::$variant,)*];

      pub fn name(self) -> &'static str {
        match self {
          $($name::$variant => $text,)*
        }
      }
    }

    impl std::fmt::Display for $name {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
      }
    }

    impl std::str::FromStr for $name {
      type Err = $crate::utils::Err;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
          $($text => Ok($name::$variant),)*
          _ => Err(format!("unknown {} `{}`", $kind, s).into()),
        }
      }
    }
  };
}
