//! isomir: classification core for isomiR variants of mature microRNAs
//!
//! # Overview
//!
//! isomir takes an observed short RNA read and one or more candidate
//! reference sequences and derives a compact, deterministic description of
//! their differences: 5'/3' trimming or extension, internal substitutions,
//! and non-templated 3' additions. Everything is pure and synchronous; the
//! only state is the [`Hit`]/[`IsomirRecord`] instances passed in, so reads
//! and candidate precursors parallelize freely (see [`align_candidates`]).
//!
//! File formats, genomic annotation databases, and output serialization
//! live in the callers; this crate only consumes already-parsed sequences
//! or mapper-supplied coordinate operations and hands structured variant
//! data back.
//!
//! ## Quick Start
//!
//! ```
//! use isomir::{align, build_cigar, classify, score, Hit};
//!
//! # fn main() -> isomir::Result<()> {
//! let mut hit = Hit::new();
//! hit.set_sequence("TGAGGTAGTAGGTTGTATAGT")?;
//!
//! // Align the read against a mature reference and summarize it
//! let result = align(hit.sequence(), "TGAGGTAGTAGGTTGTATAGTT");
//! let cigar = build_cigar(&result.query, &result.target)?;
//!
//! let record = hit.precursor_mut("hsa-let-7a-1");
//! record.cigar = Some(cigar);
//! record.align = Some(result);
//!
//! // No substitutions, additions, or end changes recorded yet
//! let record = &hit.precursors["hsa-let-7a-1"];
//! assert_eq!(classify(record), "NA");
//! assert_eq!(score(record, 30.0), 30.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`coder`]: compact sequence identifiers (triplet encoding)
//! - [`alignment`]: global pairwise alignment (Needleman–Wunsch, affine gaps)
//! - [`cigar`]: compact alignment summaries and their coordinate expansion
//! - [`types`]: the [`Hit`]/[`IsomirRecord`] variant model
//! - [`classify`]: isomiR category labels and confidence scoring
//! - [`format`]: the two textual encodings of a record's annotations

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod alignment;
pub mod cigar;
pub mod classify;
pub mod coder;
pub mod error;
pub mod format;
pub mod types;

// Re-export commonly used items
pub use alignment::{align, align_candidates, align_with, AlignmentResult, ScoringScheme};
pub use cigar::{build_cigar, expand_cigar, CigarOp};
pub use classify::{classify, score, LABEL_CANONICAL};
pub use coder::encode;
pub use error::{IsomirError, Result};
pub use format::{format_fields, format_id};
pub use types::{EndVariant, Hit, IsomirRecord, Strand, Substitution};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
