//! isomiR category labels and confidence scoring
//!
//! Classification reads a populated [`IsomirRecord`] and emits the
//! comma-joined label list downstream writers expect, in the fixed order
//! {SNP category, addition, 5' variant, 3' variant}. The SNP category comes
//! from the first substitution only and reflects where it falls on the
//! mature reference: the seed region (positions 2-7) drives target
//! recognition, so substitutions there are flagged distinctly from central
//! and supplementary ones.
//!
//! Scoring is a strict additive-penalty model on top of the mapper's
//! quality score: more edits never increase the score.

use crate::types::IsomirRecord;

/// Label for a record with no variant at all
pub const LABEL_CANONICAL: &str = "NA";

/// Derive the comma-joined label list for a record
///
/// # Examples
///
/// ```
/// use isomir::{classify, EndVariant, IsomirRecord, Substitution};
///
/// let mut record = IsomirRecord::new();
/// assert_eq!(classify(&record), "NA");
///
/// record.subs.push(Substitution::new(4, 'A', 'G'));
/// record.t3 = EndVariant::Trimmed("T".to_string());
/// assert_eq!(classify(&record), "iso_snp_seed,iso_3p");
/// ```
pub fn classify(record: &IsomirRecord) -> String {
    let mut labels: Vec<&'static str> = Vec::new();

    if let Some(first) = record.subs.first() {
        let p = first.position;
        labels.push(if p > 1 && p < 8 {
            "iso_snp_seed"
        } else if p == 8 {
            "iso_snp_central_offset"
        } else if p > 8 && p < 13 {
            "iso_snp_central"
        } else if p > 12 && p < 18 {
            "iso_snp_central_supp"
        } else {
            "iso_snp"
        });
    }
    if record.has_addition() {
        labels.push("iso_add");
    }
    if !record.t5.is_absent() {
        labels.push("iso_5p");
    }
    if !record.t3.is_absent() {
        labels.push("iso_3p");
    }

    if labels.is_empty() {
        LABEL_CANONICAL.to_string()
    } else {
        labels.join(",")
    }
}

/// Confidence score for a record, starting from the mapper's quality score
///
/// Each non-templated addition base costs 0.25 when it is A or T/U and 0.75
/// otherwise (non-A/T additions are less likely to be templated artifacts);
/// each substitution costs exactly 1.0 regardless of identity. The result
/// is not clamped and may go negative.
///
/// # Examples
///
/// ```
/// use isomir::{score, IsomirRecord, Substitution};
///
/// let mut record = IsomirRecord::new();
/// assert_eq!(score(&record, 10.0), 10.0);
///
/// record.add = Some("TC".to_string());
/// record.subs.push(Substitution::new(9, 'G', 'A'));
/// assert_eq!(score(&record, 10.0), 10.0 - 0.25 - 0.75 - 1.0);
/// ```
pub fn score(record: &IsomirRecord, base_score: f64) -> f64 {
    let mut sc = base_score;
    if let Some(add) = &record.add {
        for base in add.chars() {
            sc -= match base {
                'A' | 'T' | 'U' => 0.25,
                _ => 0.75,
            };
        }
    }
    sc -= record.subs.len() as f64;
    sc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EndVariant, Substitution};

    fn record_with_sub(position: usize) -> IsomirRecord {
        let mut record = IsomirRecord::new();
        record.subs.push(Substitution::new(position, 'A', 'G'));
        record
    }

    #[test]
    fn test_classify_canonical() {
        assert_eq!(classify(&IsomirRecord::new()), "NA");
    }

    #[test]
    fn test_classify_snp_bands() {
        assert_eq!(classify(&record_with_sub(1)), "iso_snp");
        assert_eq!(classify(&record_with_sub(2)), "iso_snp_seed");
        assert_eq!(classify(&record_with_sub(4)), "iso_snp_seed");
        assert_eq!(classify(&record_with_sub(7)), "iso_snp_seed");
        assert_eq!(classify(&record_with_sub(8)), "iso_snp_central_offset");
        assert_eq!(classify(&record_with_sub(9)), "iso_snp_central");
        assert_eq!(classify(&record_with_sub(12)), "iso_snp_central");
        assert_eq!(classify(&record_with_sub(13)), "iso_snp_central_supp");
        assert_eq!(classify(&record_with_sub(17)), "iso_snp_central_supp");
        assert_eq!(classify(&record_with_sub(18)), "iso_snp");
        assert_eq!(classify(&record_with_sub(22)), "iso_snp");
    }

    #[test]
    fn test_classify_first_substitution_wins() {
        let mut record = record_with_sub(4);
        record.subs.push(Substitution::new(20, 'C', 'T'));
        assert_eq!(classify(&record), "iso_snp_seed");
    }

    #[test]
    fn test_classify_label_order() {
        let mut record = record_with_sub(10);
        record.add = Some("T".to_string());
        record.t5 = EndVariant::Extended("A".to_string());
        record.t3 = EndVariant::Trimmed("GT".to_string());
        assert_eq!(classify(&record), "iso_snp_central,iso_add,iso_5p,iso_3p");
    }

    #[test]
    fn test_classify_t5_only() {
        let mut record = IsomirRecord::new();
        record.t5 = EndVariant::Trimmed("T".to_string());
        assert_eq!(classify(&record), "iso_5p");
    }

    #[test]
    fn test_classify_t3_only() {
        let mut record = IsomirRecord::new();
        record.t3 = EndVariant::Extended("TT".to_string());
        assert_eq!(classify(&record), "iso_3p");
    }

    #[test]
    fn test_score_no_edits() {
        assert_eq!(score(&IsomirRecord::new(), 38.0), 38.0);
        assert_eq!(score(&IsomirRecord::new(), 0.0), 0.0);
    }

    #[test]
    fn test_score_addition_penalty_by_identity() {
        let mut record = IsomirRecord::new();
        record.add = Some("A".to_string());
        assert_eq!(score(&record, 10.0), 9.75);

        record.add = Some("U".to_string());
        assert_eq!(score(&record, 10.0), 9.75);

        record.add = Some("G".to_string());
        assert_eq!(score(&record, 10.0), 9.25);

        record.add = Some("CC".to_string());
        assert_eq!(score(&record, 10.0), 8.5);
    }

    #[test]
    fn test_score_substitution_penalty() {
        let mut record = record_with_sub(4);
        assert_eq!(score(&record, 10.0), 9.0);
        record.subs.push(Substitution::new(15, 'G', 'C'));
        assert_eq!(score(&record, 10.0), 8.0);
    }

    #[test]
    fn test_score_monotonic_and_unclamped() {
        let mut record = IsomirRecord::new();
        let mut last = score(&record, 1.0);
        for position in [3, 9, 14, 20] {
            record.subs.push(Substitution::new(position, 'A', 'C'));
            let current = score(&record, 1.0);
            assert!(current < last);
            last = current;
        }
        assert!(last < 0.0);
    }
}
