/// Splits a line into slices of at most `max_tokens` space-separated items,
/// since parsing time grows quickly with sentence length. A line that's short
/// enough comes back whole. A `max_tokens` of 0 is treated as 1.
pub fn segments(line: &str, max_tokens: usize) -> Vec<&str> {
  let max_tokens = max_tokens.max(1);

  let mut out = Vec::new();
  let mut start = 0;
  let mut count = 0;
  for (idx, _) in line.match_indices(' ') {
    count += 1;
    if count == max_tokens {
      out.push(&line[start..idx]);
      start = idx + 1;
      count = 0;
    }
  }

  if start < line.len() || out.is_empty() {
    out.push(&line[start..]);
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_short_lines_are_whole() {
    assert_eq!(segments("a/X b/X c/X", 3), vec!["a/X b/X c/X"]);
    assert_eq!(segments("a/X", 20), vec!["a/X"]);
    assert_eq!(segments("", 20), vec![""]);
  }

  #[test]
  fn test_long_lines_are_cut() {
    assert_eq!(
      segments("a b c d e f g", 3),
      vec!["a b c", "d e f", "g"]
    );
    assert_eq!(segments("a b c d e f", 3), vec!["a b c", "d e f"]);
    assert_eq!(segments("a b c", 0), vec!["a", "b", "c"]);
  }

  #[test]
  fn test_no_segment_exceeds_the_limit() {
    let line = (0..47).map(|i| format!("w{}/NCUSN@IS", i)).collect::<Vec<_>>().join(" ");
    let parts = segments(&line, 20);
    assert_eq!(parts.len(), 3);
    assert!(parts.iter().all(|p| p.split(' ').count() <= 20));
    assert_eq!(parts.join(" "), line);
  }
}
