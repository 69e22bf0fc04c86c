//! Textual renderings of a record's variant annotations
//!
//! Two encodings consumed by downstream writers. [`format_fields`] is the
//! fixed-width form: every field always present, absent substitutions and
//! additions rendered as the literal `0` and unmodified ends as `NA`.
//! [`format_id`] is the sparse form used inside composite identifiers:
//! absent tokens are omitted entirely, present ones joined in the fixed
//! order {5', substitutions, 3', addition}.

use crate::types::IsomirRecord;

fn render_subs(record: &IsomirRecord) -> String {
    record
        .subs
        .iter()
        .map(|sub| sub.to_string())
        .collect::<Vec<_>>()
        .join("")
}

/// Render the four variant fields joined by `sep`, for tabular output
///
/// Field order is substitutions, addition, 5' code, 3' code.
///
/// # Examples
///
/// ```
/// use isomir::{format_fields, EndVariant, IsomirRecord, Substitution};
///
/// let mut record = IsomirRecord::new();
/// assert_eq!(format_fields(&record, "\t"), "0\t0\tNA\tNA");
///
/// record.subs.push(Substitution::new(4, 'A', 'G'));
/// record.add = Some("TT".to_string());
/// record.t5 = EndVariant::Trimmed("T".to_string());
/// assert_eq!(format_fields(&record, "\t"), "4AG\tTT\tt\tNA");
/// ```
pub fn format_fields(record: &IsomirRecord, sep: &str) -> String {
    let subs = match render_subs(record) {
        s if s.is_empty() => "0".to_string(),
        s => s,
    };
    let add = if record.has_addition() {
        record.add.clone().unwrap_or_default()
    } else {
        "0".to_string()
    };
    let t5 = match record.t5.render() {
        s if s.is_empty() => "NA".to_string(),
        s => s,
    };
    let t3 = match record.t3.render() {
        s if s.is_empty() => "NA".to_string(),
        s => s,
    };
    [subs, add, t5, t3].join(sep)
}

/// Render the sparse composite identifier tokens joined by `sep`
///
/// The 5' token carries an `s` prefix and the addition token an `e` prefix;
/// the substitution token concatenates every substitution; the 3' token is
/// the raw end code. Absent tokens are omitted, never rendered empty, so a
/// canonical record yields the empty string.
///
/// # Examples
///
/// ```
/// use isomir::{format_id, EndVariant, IsomirRecord, Substitution};
///
/// let mut record = IsomirRecord::new();
/// assert_eq!(format_id(&record, "."), "");
///
/// record.t5 = EndVariant::Trimmed("T".to_string());
/// record.subs.push(Substitution::new(4, 'A', 'G'));
/// record.add = Some("TT".to_string());
/// assert_eq!(format_id(&record, "."), "st.4AG.eTT");
/// ```
pub fn format_id(record: &IsomirRecord, sep: &str) -> String {
    let mut tokens: Vec<String> = Vec::with_capacity(4);

    let t5 = record.t5.render();
    if !t5.is_empty() {
        tokens.push(format!("s{t5}"));
    }
    let subs = render_subs(record);
    if !subs.is_empty() {
        tokens.push(subs);
    }
    let t3 = record.t3.render();
    if !t3.is_empty() {
        tokens.push(t3);
    }
    if record.has_addition() {
        tokens.push(format!("e{}", record.add.as_deref().unwrap_or_default()));
    }

    tokens.join(sep)
}
