use std::collections::HashMap;

/// Similarity ratio of two strings: `2·M / (|a| + |b|)`, where `M` is the
/// number of characters covered by recursively found longest common blocks
/// (Ratcliff/Obershelp). Two empty strings are identical (1.0).
///
/// No characters are treated as junk. Python's `difflib.SequenceMatcher`
/// enables its autojunk heuristic once the second sequence reaches 200
/// characters and ignores characters that fill more than 1% of it, so for
/// long candidates this ratio can be higher than difflib's (a 250-char run
/// of `a` against `"aaa"` gives 0.0 there, `6/253` here).
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

/// Total size of the matching blocks between `a` and `b`.
pub fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        b2j.entry(*c).or_default().push(j);
    }

    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }
    matched
}

/// Longest block `a[i..i+k] == b[j..j+k]` inside the given windows. Among
/// equally long blocks the one starting earliest in `a`, then in `b`, wins.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
    // run length of the match ending at b[j], for the previous row of a
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(c) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = if j > 0 { j2len.get(&(j - 1)).copied().unwrap_or(0) } else { 0 } + 1;
                next.insert(j, k);
                if k > best_k {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_k = k;
                }
            }
        }
        j2len = next;
    }

    (best_i, best_j, best_k)
}
