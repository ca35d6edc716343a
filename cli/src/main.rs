use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use npchunk::tagger::tokenize;
use npchunk::{Chunker, Config, Err};

/// Extracts noun phrases from SUC-tagged Swedish text, one `word/TAG` item per
/// word and one sentence per line
#[derive(Parser)]
#[command(version, about)]
struct Args {
  /// Tagged text files (default: stdin)
  files: Vec<PathBuf>,

  /// Parse long lines in pieces of at most this many items
  #[arg(short = 'm', long, value_name = "N", default_value_t = Config::default().max_tokens)]
  max_tokens: usize,

  /// Print each segment's tree
  #[arg(short, long)]
  tree: bool,

  /// Print each segment's parse chart
  #[arg(short, long)]
  chart: bool,
}

fn read_input(files: &[PathBuf]) -> Result<String, Err> {
  if files.is_empty() {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    return Ok(input);
  }

  let mut input = String::new();
  for path in files {
    input.push_str(&fs::read_to_string(path)?);
    input.push('\n');
  }
  Ok(input)
}

/// Prints the chart and tree of every segment on their way to the phrases
fn explain(chunker: &Chunker, line: &str, args: &Args) -> Result<(), Err> {
  for segment in chunker.segments(line) {
    let tokens = tokenize(segment);
    if tokens.is_empty() {
      continue;
    }

    let Some(derivation) = chunker.parser().recognize(tokens) else {
      println!("no parse for: {}\n", segment);
      continue;
    };

    if args.chart {
      println!("chart:\n{}", derivation.chart());
    }

    let tree = derivation.tree()?;
    if args.tree {
      println!("{}\n", tree);
    }
    for np in tree.noun_phrases() {
      println!("{}", np);
    }
  }
  Ok(())
}

fn main() -> Result<(), Err> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(io::stderr)
    .init();

  let args = Args::parse();
  let chunker = Chunker::new(Config {
    max_tokens: args.max_tokens,
  })?;
  let input = read_input(&args.files)?;

  if args.tree || args.chart {
    for line in input.lines().filter(|l| !l.trim().is_empty()) {
      explain(&chunker, line, &args)?;
    }
  } else {
    for np in chunker.noun_phrases(input.lines()) {
      println!("{}", np);
    }
  }

  Ok(())
}
