//! Compact sequence identifiers
//!
//! Encodes a nucleotide sequence into a short alphanumeric identifier by
//! packing consecutive base triplets (codons) through a fixed 64-entry
//! lookup table, one output character per triplet. A trailing partial
//! triplet is right-padded with `A` and the pad count (1 or 2) is appended
//! as a literal digit, so two same-length sequences can never collide.
//!
//! The identifier is a third the length of the sequence and is used as a
//! stable key for an observed read across runs and samples. Decoding is
//! not provided; downstream tooling only compares identifiers for equality.
//!
//! # Examples
//!
//! ```
//! use isomir::encode;
//!
//! // 21-mer -> 7 triplets, no padding
//! let id = encode("TGAGGTAGTAGGTTGTATAGT")?;
//! assert_eq!(id.len(), 7);
//!
//! // Partial final triplet records how many bases were synthetic
//! assert!(encode("ACGTA")?.ends_with('1'));
//! assert!(encode("ACGT")?.ends_with('2'));
//! # Ok::<(), isomir::IsomirError>(())
//! ```

use crate::error::{IsomirError, Result};

/// Triplet-to-character lookup table
///
/// Indexed by `16*b0 + 4*b1 + b2` with A=0, C=1, G=2, T=3. Injective by
/// construction: 64 triplets, 64 distinct characters. Immutable and shared
/// freely across threads; see [`encode`].
const TRIPLET_CODE: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789#@";

/// Base used to right-pad a trailing partial triplet
const PAD_BASE_INDEX: usize = 0; // 'A'

#[inline]
fn base_index(base: u8) -> Option<usize> {
    match base {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

/// Encode a nucleotide sequence into its compact identifier
///
/// Deterministic and stateless: the same sequence always yields the same
/// identifier, and same-length sequences that differ anywhere yield
/// different identifiers.
///
/// # Errors
///
/// - [`IsomirError::EmptySequence`] for a zero-length input
/// - [`IsomirError::InvalidNucleotide`] for any character outside A/C/G/T
///   (fails before emitting anything, never a silently wrong encoding)
///
/// # Examples
///
/// ```
/// use isomir::encode;
///
/// assert_eq!(encode("AAA")?, encode("AAA")?);
/// assert_ne!(encode("AAA")?, encode("AAC")?);
/// assert!(encode("ACGN").is_err());
/// # Ok::<(), isomir::IsomirError>(())
/// ```
pub fn encode(sequence: &str) -> Result<String> {
    if sequence.is_empty() {
        return Err(IsomirError::EmptySequence);
    }

    let mut indices = Vec::with_capacity(sequence.len());
    for (position, base) in sequence.bytes().enumerate() {
        let index = base_index(base).ok_or(IsomirError::InvalidNucleotide {
            base: base as char,
            position,
        })?;
        indices.push(index);
    }

    let mut id = String::with_capacity(indices.len() / 3 + 2);
    for triplet in indices.chunks(3) {
        let pad = 3 - triplet.len();
        let mut code = 0usize;
        for slot in 0..3 {
            code = code * 4 + triplet.get(slot).copied().unwrap_or(PAD_BASE_INDEX);
        }
        id.push(TRIPLET_CODE[code] as char);
        if pad > 0 {
            id.push((b'0' + pad as u8) as char);
        }
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_deterministic() {
        assert_eq!(encode("AAA").unwrap(), encode("AAA").unwrap());
        assert_eq!(encode("TGAGGTAGT").unwrap(), encode("TGAGGTAGT").unwrap());
    }

    #[test]
    fn test_encode_full_triplets() {
        // One character per triplet, no pad digit: AAA -> index 0, CCC -> 21
        assert_eq!(encode("AAACCC").unwrap(), "AV");
        assert_eq!(encode("AAA").unwrap(), "A");
        assert_eq!(encode("TTT").unwrap(), "@");
    }

    #[test]
    fn test_encode_pad_digits() {
        // Two leftover bases -> one synthetic base -> digit 1
        let id = encode("AAACC").unwrap();
        assert_eq!(id, "AU1");

        // One leftover base -> two synthetic bases -> digit 2
        let id = encode("AAAC").unwrap();
        assert_eq!(id, "AQ2");
    }

    #[test]
    fn test_encode_pad_distinguishes_lengths() {
        // "AC" padded becomes the same triplet as "ACA", but the pad digit
        // keeps the identifiers distinct
        assert_ne!(encode("AC").unwrap(), encode("ACA").unwrap());
        assert_ne!(encode("A").unwrap(), encode("AA").unwrap());
    }

    #[test]
    fn test_encode_injective_same_length() {
        let seqs = ["ACGTACG", "ACGTACC", "ACGTACT", "TCGTACG", "ACGAACG"];
        let ids: Vec<_> = seqs.iter().map(|s| encode(s).unwrap()).collect();
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                assert_ne!(ids[i], ids[j], "{} vs {}", seqs[i], seqs[j]);
            }
        }
    }

    #[test]
    fn test_encode_single_base() {
        let id = encode("T").unwrap();
        assert_eq!(id.len(), 2);
        assert!(id.ends_with('2'));
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(""), Err(IsomirError::EmptySequence));
    }

    #[test]
    fn test_encode_invalid_nucleotide() {
        let err = encode("ACGNACG").unwrap_err();
        assert_eq!(
            err,
            IsomirError::InvalidNucleotide {
                base: 'N',
                position: 3
            }
        );

        // Lowercase is not accepted
        assert!(encode("acg").is_err());
    }

    #[test]
    fn test_encode_table_injective() {
        let mut seen = std::collections::HashSet::new();
        for &c in TRIPLET_CODE.iter() {
            assert!(seen.insert(c), "duplicate code character {}", c as char);
        }
    }
}
