//! Compact alignment summaries
//!
//! Two directions around the same encoding. [`build_cigar`] reduces a pair
//! of gapped strings to a run-length difference string; [`expand_cigar`]
//! reconstructs gapped strings from the coordinate operations an external
//! mapper reports, so reads that arrive pre-aligned never touch the
//! alignment engine.
//!
//! The string form collapses match runs only: substitution letters, `D` and
//! `I` are always emitted one symbol per column. That asymmetry keeps every
//! mismatch and indel individually addressable when the string is parsed
//! back into variant annotations.
//!
//! # Examples
//!
//! ```
//! use isomir::{build_cigar, expand_cigar, CigarOp};
//!
//! assert_eq!(build_cigar("ACGT", "ACGA")?, "3MA");
//!
//! let ops = [CigarOp::Match(2), CigarOp::Insertion(1), CigarOp::Match(1)];
//! let (query, target) = expand_cigar(&ops, "ACGT", "ACT")?;
//! assert_eq!(query, "ACGT");
//! assert_eq!(target, "AC-T");
//! # Ok::<(), isomir::IsomirError>(())
//! ```

use crate::error::{IsomirError, Result};

/// One coordinate alignment operation from an external mapper
///
/// Only the three kinds this core consumes; clipping and padding are the
/// mapper's concern and must be resolved before the operations reach here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CigarOp {
    /// Consume `n` bases from both query and target
    Match(u32),
    /// Consume `n` bases from the query only (absent from the target)
    Insertion(u32),
    /// Consume `n` bases from the target only (absent from the query)
    Deletion(u32),
}

impl CigarOp {
    /// The number of columns this operation spans
    pub fn length(&self) -> u32 {
        match self {
            CigarOp::Match(n) | CigarOp::Insertion(n) | CigarOp::Deletion(n) => *n,
        }
    }
}

fn flush_match_run(out: &mut String, run: usize) {
    if run > 1 {
        out.push_str(&run.to_string());
    }
    if run > 0 {
        out.push('M');
    }
}

/// Build the compact difference string for a pair of gapped strings
///
/// Per column: equal characters are a match; differing non-gap characters
/// emit the target (reference) character literally; a query gap emits `D`;
/// a target gap emits `I`.
///
/// # Errors
///
/// [`IsomirError::AlignedLengthMismatch`] when the two strings differ in
/// length.
///
/// # Examples
///
/// ```
/// use isomir::build_cigar;
///
/// assert_eq!(build_cigar("ACGTACGT", "ACGTACGT")?, "8M");
/// assert_eq!(build_cigar("A", "A")?, "M");
/// assert_eq!(build_cigar("AC-T", "ACGT")?, "2MDM");
/// # Ok::<(), isomir::IsomirError>(())
/// ```
pub fn build_cigar(query_aligned: &str, target_aligned: &str) -> Result<String> {
    let query: Vec<char> = query_aligned.chars().collect();
    let target: Vec<char> = target_aligned.chars().collect();
    if query.len() != target.len() {
        return Err(IsomirError::AlignedLengthMismatch {
            query: query.len(),
            target: target.len(),
        });
    }

    let mut out = String::with_capacity(query.len());
    let mut run = 0usize;
    for (&q, &t) in query.iter().zip(target.iter()) {
        let symbol = if q == t {
            run += 1;
            continue;
        } else if q != '-' && t != '-' {
            t
        } else if q == '-' {
            'D'
        } else {
            'I'
        };
        flush_match_run(&mut out, run);
        run = 0;
        out.push(symbol);
    }
    flush_match_run(&mut out, run);
    Ok(out)
}

/// Expand coordinate operations back into a pair of gapped strings
///
/// Walks `query` and `target` in step with the operation list; the outputs
/// are always equal length. Whether a matched column is a true match or a
/// substitution is not decided here: compare characters afterwards, exactly
/// as [`build_cigar`] does.
///
/// # Errors
///
/// [`IsomirError::CigarOverrun`] when an operation consumes past the end of
/// either string, [`IsomirError::CigarUnderrun`] when the list leaves bases
/// of either string unconsumed. Never truncates silently.
pub fn expand_cigar(ops: &[CigarOp], query: &str, target: &str) -> Result<(String, String)> {
    let query: Vec<char> = query.chars().collect();
    let target: Vec<char> = target.chars().collect();

    let mut query_pos = 0usize;
    let mut target_pos = 0usize;
    let mut query_fixed = String::with_capacity(query.len() + target.len());
    let mut target_fixed = String::with_capacity(query.len() + target.len());

    let take = |chars: &[char], pos: usize, len: usize, side: &'static str| -> Result<String> {
        if pos + len > chars.len() {
            return Err(IsomirError::CigarOverrun {
                side,
                needed: len,
                available: chars.len() - pos,
            });
        }
        Ok(chars[pos..pos + len].iter().collect())
    };

    for op in ops {
        let len = op.length() as usize;
        match op {
            CigarOp::Match(_) => {
                query_fixed.push_str(&take(&query, query_pos, len, "query")?);
                target_fixed.push_str(&take(&target, target_pos, len, "target")?);
                query_pos += len;
                target_pos += len;
            }
            CigarOp::Insertion(_) => {
                query_fixed.push_str(&take(&query, query_pos, len, "query")?);
                target_fixed.push_str(&"-".repeat(len));
                query_pos += len;
            }
            CigarOp::Deletion(_) => {
                query_fixed.push_str(&"-".repeat(len));
                target_fixed.push_str(&take(&target, target_pos, len, "target")?);
                target_pos += len;
            }
        }
    }

    if query_pos != query.len() {
        return Err(IsomirError::CigarUnderrun {
            side: "query",
            consumed: query_pos,
            length: query.len(),
        });
    }
    if target_pos != target.len() {
        return Err(IsomirError::CigarUnderrun {
            side: "target",
            consumed: target_pos,
            length: target.len(),
        });
    }
    Ok((query_fixed, target_fixed))
}
