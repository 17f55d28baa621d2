// Character-level sequence similarity (Ratcliff/Obershelp).
//
// Finds the longest common block, recurses on the pieces to its left and
// right, and sums the sizes of every block found. The ratio is
//
//   2 * matched_chars / (len(a) + len(b))
//
// Characters that are very common in a long `b` (more than 1% of it, once `b`
// reaches 200 chars) are not used to seed a match but can still extend one.
// This keeps long texts from matching mostly on spaces and vowels.

use std::collections::HashMap;

const AUTOJUNK_MIN_LEN: usize = 200;

/// Similarity ratio of two strings in [0, 1].
///
/// Operates on `char`s, so multi-byte text compares by character. Two empty
/// strings are identical (1.0). The result can differ slightly if `a` and `b`
/// are swapped.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = SequenceMatcher::new(&a, &b).matching_chars();
    2.0 * matched as f64 / total as f64
}

struct SequenceMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of each (non-popular) char in `b`, ascending
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> SequenceMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }

        Self { a, b, b2j }
    }

    /// Longest matching block in a[alo..ahi] x b[blo..bhi] as (i, j, size).
    ///
    /// Ties go to the block starting earliest in `a`, then earliest in `b`.
    fn find_longest_match(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut new_j2len: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = if j == 0 {
                        1
                    } else {
                        j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                    };
                    new_j2len.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = new_j2len;
        }

        // Popular chars never seed a block; let them extend one on either side.
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        (best_i, best_j, best_size)
    }

    /// Total number of chars covered by all matching blocks.
    fn matching_chars(&self) -> usize {
        let mut total = 0;
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, k) = self.find_longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            total += k;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                pending.push((i + k, ahi, j + k, bhi));
            }
        }

        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identical() {
        assert!(close(ratio("pay raise", "pay raise"), 1.0));
    }

    #[test]
    fn test_both_empty() {
        assert!(close(ratio("", ""), 1.0));
    }

    #[test]
    fn test_one_empty() {
        assert!(close(ratio("abc", ""), 0.0));
    }

    #[test]
    fn test_nothing_in_common() {
        assert!(close(ratio("abc", "xyz"), 0.0));
    }

    #[test]
    fn test_known_ratios() {
        // "abcd" vs "bcde": block "bcd" -> 2*3/8
        assert!(close(ratio("abcd", "bcde"), 0.75));
        assert!(close(
            ratio("nurses strike over pay", "nurses strike over pay and staffing"),
            44.0 / 57.0
        ));
        assert!(close(
            ratio(
                "teachers union wins 8% raise",
                "teacher union secures 8 percent pay increase"
            ),
            46.0 / 72.0
        ));
    }

    #[test]
    fn test_asymmetric() {
        let forward = ratio("city council approves new budget", "minimum wage rises in oregon");
        let backward = ratio("minimum wage rises in oregon", "city council approves new budget");
        assert!(close(forward, 0.3));
        assert!(close(backward, 0.4));
    }

    #[test]
    fn test_multibyte_chars() {
        assert!(close(ratio("café", "cafe"), 0.75));
    }
}
