// src/labels.rs

//! Case-label groups for the emitted dispatch macros.
//!
//! Grouping is computed as a value first: a partition of operations expands
//! into a flat, ordered list of dispatch tags, with each complex operation
//! contributing its real and imaginary tags adjacently. One shared renderer
//! then formats the list as a fallthrough-safe label sequence.
//!
//! The consuming artifact spells `case FIRST:` at the use site, so the first
//! entry omits the `case` keyword and the last entry omits the `: \`
//! continuation. A lone entry is both: leading form, no continuation.

use crate::op::Op;

/// Expands a partition into its ordered dispatch tags.
pub fn label_entries(ops: &[&Op]) -> Vec<String> {
    ops.iter().flat_map(|op| op.dispatch_tags()).collect()
}

/// One side of the complex partitions: a single real- or imaginary-tagged
/// entry per operation.
pub fn complex_side_entries(ops: &[&Op], suffix: char) -> Vec<String> {
    ops.iter()
        .map(|op| format!("{}{}", op.tag(), suffix))
        .collect()
}

/// Renders a label group. Empty input renders an empty (valid, no-op) group.
pub fn render_case_labels(entries: &[String]) -> String {
    let mut out = String::new();
    if entries.is_empty() {
        out.push('\n');
        return out;
    }
    let last = entries.len() - 1;
    for (i, tag) in entries.iter().enumerate() {
        if i == 0 {
            out.push_str("       ");
        } else {
            out.push_str("  case ");
        }
        out.push_str(tag);
        if i != last {
            out.push_str(": \\\n");
        }
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::Precision;

    fn real_op(name: &str) -> Op {
        Op {
            source_name: name.to_string(),
            display_name: name.to_string(),
            arity: 1,
            is_complex: false,
            precision: Precision::Double,
            needs_round: true,
            exact_func: format!("mpfr_{name}"),
            native_func: Some(name.to_string()),
        }
    }

    fn complex_op(name: &str) -> Op {
        let mut op = real_op(name);
        op.is_complex = true;
        op
    }

    fn tags(ops: &[Op]) -> Vec<String> {
        let refs: Vec<&Op> = ops.iter().collect();
        label_entries(&refs)
    }

    #[test]
    fn empty_group_renders_empty() {
        assert_eq!(render_case_labels(&[]), "\n");
    }

    #[test]
    fn singleton_uses_leading_form_without_continuation() {
        let ops = [real_op("sqrt")];
        let rendered = render_case_labels(&tags(&ops));
        assert_eq!(rendered, "       OP_SQRT\n");
    }

    #[test]
    fn groups_use_leading_middle_and_last_forms() {
        let ops = [real_op("sqrt"), real_op("cbrt"), real_op("exp")];
        let rendered = render_case_labels(&tags(&ops));
        assert_eq!(
            rendered,
            "       OP_SQRT: \\\n  case OP_CBRT: \\\n  case OP_EXP\n"
        );
    }

    #[test]
    fn complex_ops_contribute_adjacent_pairs() {
        let ops = [complex_op("clog"), real_op("sqrt")];
        let rendered = render_case_labels(&tags(&ops));
        assert_eq!(
            rendered,
            "       OP_CLOGR: \\\n  case OP_CLOGI: \\\n  case OP_SQRT\n"
        );
    }

    #[test]
    fn complex_pair_stays_adjacent_at_group_end() {
        let ops = [real_op("sqrt"), complex_op("cexp")];
        let rendered = render_case_labels(&tags(&ops));
        assert_eq!(
            rendered,
            "       OP_SQRT: \\\n  case OP_CEXPR: \\\n  case OP_CEXPI\n"
        );
    }

    #[test]
    fn complex_side_entries_pick_one_identity() {
        let ops = [complex_op("clog"), complex_op("cexp")];
        let refs: Vec<&Op> = ops.iter().collect();
        assert_eq!(
            complex_side_entries(&refs, 'R'),
            vec!["OP_CLOGR", "OP_CEXPR"]
        );
        assert_eq!(
            complex_side_entries(&refs, 'I'),
            vec!["OP_CLOGI", "OP_CEXPI"]
        );
    }
}
