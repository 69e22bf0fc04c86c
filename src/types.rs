//! Common types used throughout isomir
//!
//! The variant model ties one observed read ([`Hit`]) to its candidate
//! precursor alignments ([`IsomirRecord`]), one record per (read, precursor)
//! pair. Records start empty and are populated incrementally as alignment,
//! CIGAR parsing, and classification proceed; they are never shared between
//! hits.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::alignment::AlignmentResult;
use crate::coder::encode;
use crate::error::{IsomirError, Result};

/// DNA strand orientation
///
/// # Examples
///
/// ```
/// use isomir::Strand;
/// use std::str::FromStr;
///
/// assert_eq!(Strand::from_str("+")?, Strand::Forward);
/// assert_eq!(Strand::from_str("-")?, Strand::Reverse);
/// assert_eq!(Strand::Forward.to_string(), "+");
/// # Ok::<(), isomir::IsomirError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Strand {
    /// Plus strand (+)
    #[default]
    Forward,
    /// Minus strand (-)
    Reverse,
}

impl FromStr for Strand {
    type Err = IsomirError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            _ => Err(IsomirError::InvalidStrand(s.to_string())),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

/// 5' or 3' end state of a read relative to the mature reference
///
/// Trimmed ends render lowercase and extended ends uppercase, following the
/// mirGFF3 convention, so the two cases stay distinguishable in output even
/// though both carry the same terminal bases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EndVariant {
    /// End coincides with the mature reference boundary
    #[default]
    Absent,
    /// Bases present in the reference but missing from the read
    Trimmed(String),
    /// Bases present in the read beyond the reference boundary
    Extended(String),
}

impl EndVariant {
    /// True when the end matches the reference boundary exactly
    pub fn is_absent(&self) -> bool {
        matches!(self, EndVariant::Absent)
    }

    /// The terminal bases involved, or `None` when absent
    pub fn bases(&self) -> Option<&str> {
        match self {
            EndVariant::Absent => None,
            EndVariant::Trimmed(b) | EndVariant::Extended(b) => Some(b),
        }
    }

    /// Render the end code: lowercase for trimming, uppercase for extension,
    /// empty for an unmodified end
    pub fn render(&self) -> String {
        match self {
            EndVariant::Absent => String::new(),
            EndVariant::Trimmed(b) => b.to_ascii_lowercase(),
            EndVariant::Extended(b) => b.to_ascii_uppercase(),
        }
    }
}

/// One internal substitution relative to the mature reference
///
/// Positions are 1-based from the mature 5' end. The rendering order is
/// always position, reference base, read base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Substitution {
    /// 1-based position within the mature reference
    pub position: usize,
    /// Base in the reference at that position
    pub reference: char,
    /// Base observed in the read
    pub read: char,
}

impl Substitution {
    /// Create a substitution record
    pub fn new(position: usize, reference: char, read: char) -> Self {
        Self {
            position,
            reference,
            read,
        }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.position, self.reference, self.read)
    }
}

/// One (read, candidate-precursor) alignment outcome
///
/// Created empty when a [`Hit`] first references a precursor, then filled in
/// by the annotation pipeline. `start`/`end` follow the strand convention of
/// [`IsomirRecord::set_pos`].
#[derive(Debug, Clone, PartialEq)]
pub struct IsomirRecord {
    /// 5' end trimming/extension
    pub t5: EndVariant,
    /// 3' end trimming/extension
    pub t3: EndVariant,
    /// Non-templated 3' addition, `None` when absent
    pub add: Option<String>,
    /// Substitutions ordered left to right along the reference
    pub subs: Vec<Substitution>,
    /// Cached alignment against the mature reference, if one was computed
    pub align: Option<AlignmentResult>,
    /// Cached compact CIGAR string for `align`
    pub cigar: Option<String>,
    /// Pass/fail status, default "Pass"
    pub filter: String,
    /// Alignment quality score from the upstream mapper
    pub map_score: f64,
    /// 1-based start coordinate on the precursor (see [`IsomirRecord::set_pos`])
    pub start: Option<u64>,
    /// 1-based end coordinate on the precursor
    pub end: Option<u64>,
    /// Identifier of the mature miRNA this alignment is relative to
    pub mirna: Option<String>,
    /// Strand of the alignment
    pub strand: Strand,
}

impl Default for IsomirRecord {
    fn default() -> Self {
        Self {
            t5: EndVariant::Absent,
            t3: EndVariant::Absent,
            add: None,
            subs: Vec::new(),
            align: None,
            cigar: None,
            filter: "Pass".to_string(),
            map_score: 0.0,
            start: None,
            end: None,
            mirna: None,
            strand: Strand::Forward,
        }
    }
}

impl IsomirRecord {
    /// Create an empty record with `filter == "Pass"`
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the alignment span from a 5' coordinate, length and strand
    ///
    /// On the plus strand `end = start + length - 1`. On the minus strand
    /// the two are swapped: `start` holds the higher coordinate and `end`
    /// the externally supplied 5' coordinate.
    ///
    /// Coordinates are 1-based, so `length` must be at least 1 (debug
    /// assertion).
    ///
    /// # Examples
    ///
    /// ```
    /// use isomir::{IsomirRecord, Strand};
    ///
    /// let mut record = IsomirRecord::new();
    /// record.set_pos(100, 20, Strand::Forward);
    /// assert_eq!((record.start, record.end), (Some(100), Some(119)));
    ///
    /// record.set_pos(100, 20, Strand::Reverse);
    /// assert_eq!((record.start, record.end), (Some(119), Some(100)));
    /// ```
    pub fn set_pos(&mut self, start: u64, length: u64, strand: Strand) {
        debug_assert!(length >= 1, "alignment length must be at least 1");
        self.strand = strand;
        match strand {
            Strand::Forward => {
                self.start = Some(start);
                self.end = Some(start + length - 1);
            }
            Strand::Reverse => {
                self.start = Some(start + length - 1);
                self.end = Some(start);
            }
        }
    }

    /// True when the record carries a non-empty non-templated addition
    pub fn has_addition(&self) -> bool {
        matches!(&self.add, Some(a) if !a.is_empty())
    }

    /// True iff the read differs from the mature reference in any way
    ///
    /// A record with no trimming, extension, addition, or substitution is
    /// the canonical (reference-identical) form.
    pub fn is_variant(&self) -> bool {
        !self.t5.is_absent() || !self.t3.is_absent() || self.has_addition() || !self.subs.is_empty()
    }
}

/// One observed read and its candidate precursor alignments
///
/// `sequence` and `idseq` are kept private so the identifier can never drift
/// from the sequence; [`Hit::set_sequence`] is the only way to change either.
///
/// # Examples
///
/// ```
/// use isomir::Hit;
///
/// let mut hit = Hit::new();
/// hit.set_sequence("TGAGGTAGTAGGTTGTATAGTT")?;
/// hit.counts = 154;
///
/// // Accessing an unknown precursor creates an empty record for it
/// let record = hit.precursor_mut("hsa-let-7a-1");
/// assert_eq!(record.filter, "Pass");
/// assert!(!record.is_variant());
/// # Ok::<(), isomir::IsomirError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hit {
    sequence: String,
    idseq: String,
    /// Candidate precursor name -> alignment outcome
    pub precursors: HashMap<String, IsomirRecord>,
    /// One score slot per contributing alignment attempt, insertion order
    pub scores: Vec<f64>,
    /// Alignment results selected as best candidates
    pub best_hits: Vec<AlignmentResult>,
    /// Observation count of this exact sequence
    pub counts: u64,
}

impl Hit {
    /// Create an empty hit with no sequence and no precursors
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the read sequence, recomputing the compact identifier
    ///
    /// # Errors
    ///
    /// Propagates [`crate::encode`] failures; on error the hit is left
    /// unchanged.
    pub fn set_sequence(&mut self, sequence: &str) -> Result<()> {
        let idseq = encode(sequence)?;
        self.sequence = sequence.to_string();
        self.idseq = idseq;
        Ok(())
    }

    /// The literal read sequence
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// The compact identifier derived from the sequence
    pub fn idseq(&self) -> &str {
        &self.idseq
    }

    /// Mutable access to the record for a precursor, creating an empty one
    /// on first access
    ///
    /// Auto-vivification is the intended contract: callers must not rely on
    /// key absence as an error signal.
    pub fn precursor_mut(&mut self, precursor: &str) -> &mut IsomirRecord {
        self.precursors.entry(precursor.to_string()).or_default()
    }

    /// Replace (or insert) the record for a precursor
    pub fn set_precursor(&mut self, precursor: &str, record: IsomirRecord) {
        self.precursors.insert(precursor.to_string(), record);
    }

    /// Drop a candidate precursor, returning its record if it existed
    pub fn remove_precursor(&mut self, precursor: &str) -> Option<IsomirRecord> {
        self.precursors.remove(precursor)
    }
}
