//! Global pairwise alignment of a read against a mature reference
//!
//! Needleman–Wunsch with affine gaps (Gotoh three-matrix recurrence): a
//! single end-to-end alignment between two short sequences, scored with the
//! fixed isomiR scheme of +1 match, -1 mismatch, -1 gap open, -0.5 gap
//! extend. Scores are `f64` so the half-unit extend penalty needs no integer
//! scaling. Only one optimal alignment is reported; on ties any optimal
//! alignment is acceptable and downstream logic must not depend on the
//! tie-break.
//!
//! This stage is skipped when the upstream mapper already supplies a
//! coordinate alignment; see [`crate::expand_cigar`].
//!
//! # Examples
//!
//! ```
//! use isomir::align;
//!
//! let result = align("TGAGGTAGT", "TGAGGTAGT");
//! assert_eq!(result.query, result.target);
//! assert_eq!(result.score, 9.0);
//! ```

use log::debug;
use rayon::prelude::*;

/// Alignment scoring parameters
///
/// The `Default` impl carries the fixed isomiR scheme; penalties are
/// negative values added to the running score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringScheme {
    /// Score added per matching column
    pub match_score: f64,
    /// Score added per mismatching column
    pub mismatch: f64,
    /// Score added for the first column of a gap run
    pub gap_open: f64,
    /// Score added for each further column of a gap run
    pub gap_extend: f64,
}

impl Default for ScoringScheme {
    fn default() -> Self {
        Self {
            match_score: 1.0,
            mismatch: -1.0,
            gap_open: -1.0,
            gap_extend: -0.5,
        }
    }
}

/// A computed global alignment: the two dash-gapped strings and the score
///
/// `query` and `target` are always the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentResult {
    /// Gapped read sequence
    pub query: String,
    /// Gapped reference sequence
    pub target: String,
    /// Total alignment score
    pub score: f64,
}

// Traceback markers for the h matrix: where the cell's best score came from
const DIAG: u8 = 1;
const FROM_F: u8 = 2; // enter the f matrix (gap in target, consumes query)
const FROM_E: u8 = 3; // enter the e matrix (gap in query, consumes target)
const IN_H: u8 = 0;

/// Align two sequences globally under the default isomiR scoring scheme
///
/// Total over all inputs: aligning against an empty string yields an
/// all-gap side and a pure gap-penalty score. Runs in O(n·m) time and
/// space for sequences of length n and m.
pub fn align(x: &str, y: &str) -> AlignmentResult {
    align_with(x, y, &ScoringScheme::default())
}

/// Align two sequences globally under an explicit scoring scheme
pub fn align_with(x: &str, y: &str, scheme: &ScoringScheme) -> AlignmentResult {
    let a: Vec<char> = x.chars().collect();
    let b: Vec<char> = y.chars().collect();
    let n = a.len();
    let m = b.len();

    let neg = f64::NEG_INFINITY;
    // h = best ending anywhere, e = gap in query (left), f = gap in target (up).
    // e/f carry gap-run state independent of h, so each keeps its own
    // open-vs-extend traceback; leaving a gap matrix through anything but
    // its open step would split the run and mis-score the affine gap.
    let mut h = vec![vec![neg; m + 1]; n + 1];
    let mut e = vec![vec![neg; m + 1]; n + 1];
    let mut f = vec![vec![neg; m + 1]; n + 1];
    let mut tb_h = vec![vec![0u8; m + 1]; n + 1];
    let mut e_opened = vec![vec![false; m + 1]; n + 1];
    let mut f_opened = vec![vec![false; m + 1]; n + 1];

    h[0][0] = 0.0;
    for j in 1..=m {
        e[0][j] = if j == 1 {
            h[0][0] + scheme.gap_open
        } else {
            e[0][j - 1] + scheme.gap_extend
        };
        e_opened[0][j] = j == 1;
        h[0][j] = e[0][j];
        tb_h[0][j] = FROM_E;
    }
    for i in 1..=n {
        f[i][0] = if i == 1 {
            h[0][0] + scheme.gap_open
        } else {
            f[i - 1][0] + scheme.gap_extend
        };
        f_opened[i][0] = i == 1;
        h[i][0] = f[i][0];
        tb_h[i][0] = FROM_F;
    }

    for i in 1..=n {
        for j in 1..=m {
            let open = h[i][j - 1] + scheme.gap_open;
            let extend = e[i][j - 1] + scheme.gap_extend;
            if open >= extend {
                e[i][j] = open;
                e_opened[i][j] = true;
            } else {
                e[i][j] = extend;
            }

            let open = h[i - 1][j] + scheme.gap_open;
            let extend = f[i - 1][j] + scheme.gap_extend;
            if open >= extend {
                f[i][j] = open;
                f_opened[i][j] = true;
            } else {
                f[i][j] = extend;
            }

            let pair = if a[i - 1] == b[j - 1] {
                scheme.match_score
            } else {
                scheme.mismatch
            };
            let diag = h[i - 1][j - 1] + pair;

            let mut best = diag;
            let mut dir = DIAG;
            if f[i][j] > best {
                best = f[i][j];
                dir = FROM_F;
            }
            if e[i][j] > best {
                best = e[i][j];
                dir = FROM_E;
            }
            h[i][j] = best;
            tb_h[i][j] = dir;
        }
    }

    // Traceback from the bottom-right corner, tracking which matrix the
    // current step lives in
    let mut i = n;
    let mut j = m;
    let mut matrix = IN_H;
    let mut query = Vec::with_capacity(n + m);
    let mut target = Vec::with_capacity(n + m);
    loop {
        if matrix == IN_H {
            if i == 0 && j == 0 {
                break;
            }
            match tb_h[i][j] {
                DIAG => {
                    query.push(a[i - 1]);
                    target.push(b[j - 1]);
                    i -= 1;
                    j -= 1;
                }
                other => matrix = other,
            }
        } else if matrix == FROM_E {
            query.push('-');
            target.push(b[j - 1]);
            if e_opened[i][j] {
                matrix = IN_H;
            }
            j -= 1;
        } else {
            query.push(a[i - 1]);
            target.push('-');
            if f_opened[i][j] {
                matrix = IN_H;
            }
            i -= 1;
        }
    }
    query.reverse();
    target.reverse();

    AlignmentResult {
        query: query.into_iter().collect(),
        target: target.into_iter().collect(),
        score: h[n][m],
    }
}

/// Align one read against every candidate precursor in parallel
///
/// Each (read, candidate) pair is independent, so the fan-out runs on the
/// rayon pool. Results come back in candidate order regardless of worker
/// scheduling.
pub fn align_candidates(
    read: &str,
    candidates: &[(String, String)],
) -> Vec<(String, AlignmentResult)> {
    debug!(
        "aligning read ({} nt) against {} candidate precursors",
        read.len(),
        candidates.len()
    );
    candidates
        .par_iter()
        .map(|(name, reference)| (name.clone(), align(read, reference)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_identical() {
        let result = align("ACGTACGT", "ACGTACGT");
        assert_eq!(result.query, "ACGTACGT");
        assert_eq!(result.target, "ACGTACGT");
        assert_eq!(result.score, 8.0);
    }

    #[test]
    fn test_align_single_mismatch() {
        let result = align("ACGA", "ACGT");
        assert_eq!(result.query, "ACGA");
        assert_eq!(result.target, "ACGT");
        // 3 matches - 1 mismatch
        assert_eq!(result.score, 2.0);
    }

    #[test]
    fn test_align_gap_in_query() {
        // Deleting one base costs one gap open
        let result = align("ACGT", "ACGGT");
        assert_eq!(result.query.len(), result.target.len());
        assert_eq!(result.query.matches('-').count(), 1);
        assert_eq!(result.target.matches('-').count(), 0);
        assert_eq!(result.score, 3.0);
    }

    #[test]
    fn test_align_affine_gap_run() {
        // A two-base gap costs open + extend, cheaper than two opens
        let result = align("ACGT", "ACGGGT");
        assert_eq!(result.query.matches('-').count(), 2);
        assert_eq!(result.score, 4.0 - 1.5);
    }

    #[test]
    fn test_align_empty_side() {
        let result = align("", "ACG");
        assert_eq!(result.query, "---");
        assert_eq!(result.target, "ACG");
        assert_eq!(result.score, -2.0);

        let result = align("ACG", "");
        assert_eq!(result.query, "ACG");
        assert_eq!(result.target, "---");

        let result = align("", "");
        assert_eq!(result.query, "");
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_align_equal_length_outputs() {
        let result = align("TGAGGTAGTAGGTTG", "TGAGGTAGGTTG");
        assert_eq!(result.query.len(), result.target.len());
        // Gap-free removal of dashes recovers the inputs
        assert_eq!(result.query.replace('-', ""), "TGAGGTAGTAGGTTG");
        assert_eq!(result.target.replace('-', ""), "TGAGGTAGGTTG");
    }

    /// Recompute the affine score of a gapped pair column by column
    fn rescore(query: &str, target: &str, scheme: &ScoringScheme) -> f64 {
        let mut sc = 0.0;
        let mut gap_q = false;
        let mut gap_t = false;
        for (q, t) in query.chars().zip(target.chars()) {
            if q == '-' {
                sc += if gap_q { scheme.gap_extend } else { scheme.gap_open };
                gap_q = true;
                gap_t = false;
            } else if t == '-' {
                sc += if gap_t { scheme.gap_extend } else { scheme.gap_open };
                gap_t = true;
                gap_q = false;
            } else {
                sc += if q == t {
                    scheme.match_score
                } else {
                    scheme.mismatch
                };
                gap_q = false;
                gap_t = false;
            }
        }
        sc
    }

    fn sequence(len: usize, seed: usize) -> String {
        (0..len)
            .map(|i| ['A', 'C', 'G', 'T'][(i * 7 + seed * 13 + i * i / 3) % 4])
            .collect()
    }

    #[test]
    fn test_align_score_describes_emitted_strings() {
        // A gap run entered through the extend branch must not be split
        // into two opens by the traceback
        let scheme = ScoringScheme::default();
        let result = align("ACGCT", "TGCTATGA");
        assert_eq!(rescore(&result.query, &result.target, &scheme), result.score);
    }

    #[test]
    fn test_align_score_consistency_sweep() {
        let scheme = ScoringScheme::default();
        for n in 0..=10 {
            for m in 0..=10 {
                let x = sequence(n, n + 3 * m + 1);
                let y = sequence(m, 2 * n + m + 5);
                let result = align(&x, &y);
                assert_eq!(result.query.replace('-', ""), x);
                assert_eq!(result.target.replace('-', ""), y);
                assert_eq!(
                    rescore(&result.query, &result.target, &scheme),
                    result.score,
                    "x={x} y={y} q={} t={}",
                    result.query,
                    result.target
                );
            }
        }
    }

    #[test]
    fn test_align_with_custom_scheme() {
        let scheme = ScoringScheme {
            match_score: 2.0,
            mismatch: -3.0,
            gap_open: -5.0,
            gap_extend: -2.0,
        };
        let result = align_with("ACGT", "ACGT", &scheme);
        assert_eq!(result.score, 8.0);
    }

    #[test]
    fn test_align_candidates_preserves_order() {
        let candidates = vec![
            ("mir-a".to_string(), "ACGTACGT".to_string()),
            ("mir-b".to_string(), "ACGTACGA".to_string()),
            ("mir-c".to_string(), "TTTTTTTT".to_string()),
        ];
        let results = align_candidates("ACGTACGT", &candidates);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, "mir-a");
        assert_eq!(results[1].0, "mir-b");
        assert_eq!(results[2].0, "mir-c");
        assert!(results[0].1.score > results[1].1.score);
        assert!(results[1].1.score > results[2].1.score);
    }
}
