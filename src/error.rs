//! Error types for isomir

use thiserror::Error;

/// Result type alias for isomir operations
pub type Result<T> = std::result::Result<T, IsomirError>;

/// Error types that can occur in isomir
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IsomirError {
    /// Character outside the A/C/G/T alphabet passed to the sequence coder
    #[error("Invalid nucleotide '{base}' at position {position}")]
    InvalidNucleotide {
        /// The offending character
        base: char,
        /// Zero-based position within the input sequence
        position: usize,
    },

    /// The sequence coder requires at least one nucleotide
    #[error("Cannot encode an empty sequence")]
    EmptySequence,

    /// Gapped strings of differing length passed to the CIGAR builder
    #[error("Aligned strings differ in length: query={query}, target={target}")]
    AlignedLengthMismatch {
        /// Length of the gapped query string
        query: usize,
        /// Length of the gapped target string
        target: usize,
    },

    /// A CIGAR operation list consumed past the end of query or target
    #[error("CIGAR operations overrun the {side}: need {needed} bases, {available} available")]
    CigarOverrun {
        /// Which string was overrun ("query" or "target")
        side: &'static str,
        /// Bases the operation list tried to consume
        needed: usize,
        /// Bases actually remaining
        available: usize,
    },

    /// A CIGAR operation list left part of query or target unconsumed
    #[error("CIGAR operations underrun the {side}: consumed {consumed} of {length} bases")]
    CigarUnderrun {
        /// Which string was underrun ("query" or "target")
        side: &'static str,
        /// Bases consumed by the operation list
        consumed: usize,
        /// Total length of the string
        length: usize,
    },

    /// Unrecognized strand symbol (only "+" and "-" are meaningful here)
    #[error("Invalid strand: '{0}' (expected '+' or '-')")]
    InvalidStrand(String),
}
