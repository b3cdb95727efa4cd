//! Matching-block similarity ratio.
//!
//! Repeatedly takes the longest common substring, then recurses into the
//! unmatched pieces on either side of it. The ratio is
//! `2 * matched / (len(a) + len(b))`, computed over chars.

/// Similarity of two strings in `[0, 1]`.
///
/// Returns `0.0` when either side is empty.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let matched = matching_chars(&a, &b);
    2.0 * matched as f64 / (a.len() + b.len()) as f64
}

/// Total length of all matching blocks between `a` and `b`.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        total += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }

    total
}

/// Longest common run in `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, len)`.
///
/// Among equally long runs the one starting earliest in `a` wins, then the
/// one starting earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_len) = (alo, blo, 0);
    let width = bhi - blo;
    // run lengths ending at the previous row of `a`
    let mut prev = vec![0usize; width];
    let mut curr = vec![0usize; width];

    for i in alo..ahi {
        for j in blo..bhi {
            let col = j - blo;
            curr[col] = if a[i] == b[j] {
                let run = if col > 0 { prev[col - 1] } else { 0 } + 1;
                if run > best_len {
                    best_i = i + 1 - run;
                    best_j = j + 1 - run;
                    best_len = run;
                }
                run
            } else {
                0
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    (best_i, best_j, best_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identical_strings() {
        assert!(approx(similarity_ratio("Baker", "Baker"), 1.0));
    }

    #[test]
    fn test_case_difference() {
        // "aker" matches, "b"/"B" does not
        assert!(approx(similarity_ratio("baker", "Baker"), 0.8));
    }

    #[test]
    fn test_shifted_overlap() {
        assert!(approx(similarity_ratio("abcd", "bcde"), 0.75));
    }

    #[test]
    fn test_recurses_on_both_sides() {
        // "abb" first, then "c" to its right
        assert!(approx(similarity_ratio("abbxc", "abbyc"), 0.8));
    }

    #[test]
    fn test_disjoint_strings() {
        assert!(approx(similarity_ratio("abc", "xyz"), 0.0));
    }

    #[test]
    fn test_empty_side_is_zero() {
        assert!(approx(similarity_ratio("", "Baker"), 0.0));
        assert!(approx(similarity_ratio("Baker", ""), 0.0));
        assert!(approx(similarity_ratio("", ""), 0.0));
    }

    #[test]
    fn test_is_symmetric_for_simple_cases() {
        let pairs = [("girl", "Girl Skateboards"), ("Toy Machine", "toy machine")];
        for (a, b) in pairs {
            assert!(approx(similarity_ratio(a, b), similarity_ratio(b, a)));
        }
    }

    #[test]
    fn test_unicode_counts_chars() {
        // "ber" matches, "Ü"/"u" does not
        assert!(approx(similarity_ratio("Über", "uber"), 0.75));
    }

    #[test]
    fn test_longest_match_prefers_earliest() {
        let a: Vec<char> = "abab".chars().collect();
        let b: Vec<char> = "ab".chars().collect();
        assert_eq!(longest_match(&a, &b, 0, 4, 0, 2), (0, 0, 2));
    }
}
