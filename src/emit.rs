// src/emit.rs

//! Dispatch-table emission: serializes the validated registry into the
//! single header artifact the interception runtime includes.
//!
//! The emission order is fixed and the registry is read-only, so repeated
//! runs over the same catalog produce byte-identical output. Section by
//! section: enum member lists, case-label groups per partition, reference
//! function selection switches, the name-lookup switch, the native
//! re-invocation switch, wrap directives, and the final enum definition.

use log::warn;

use crate::labels::{complex_side_entries, label_entries, render_case_labels};
use crate::marshal::native_call_args;
use crate::op::{ExtraOp, Op, Precision};
use crate::registry::{Registry, INVALID_TAG};

/// Serializes every dispatch table for the given registry.
pub fn write_dispatch_tables(registry: &Registry) -> String {
    let mut out = String::new();

    out.push_str("#ifndef _MATHREPLACE_FUNCS_H\n");
    out.push_str("#define _MATHREPLACE_FUNCS_H\n");
    out.push('\n');
    out.push_str("// Generated dispatch tables. Do not edit by hand.\n");
    out.push_str("//\n");
    out.push_str("// Every place the runtime needs per-operation knowledge -- the operation\n");
    out.push_str("// enum, case-label groups, reference-function selection, native\n");
    out.push_str("// re-invocation, symbol wrapping -- is collected here as a macro family,\n");
    out.push_str("// so supporting another libm function never touches runtime code.\n");
    out.push('\n');

    push_enum_lists(&mut out, registry);
    push_case_groups(&mut out, registry);
    push_func_selectors(&mut out, registry);
    push_name_lookup(&mut out, registry.ops());
    push_native_run(&mut out, registry.ops());
    push_wrap_directives(&mut out, registry);
    push_enum_definition(&mut out);

    out.push_str("#endif\n");
    out
}

/// Comma-joined enum member lists, one per arity plus the extras.
fn push_enum_lists(out: &mut String, registry: &Registry) {
    out.push_str("// A list of all the unary operations, for the enum definition farther\n");
    out.push_str("// down in the file.\n");
    push_enum_list(out, "UNARY_OPS_LIST", &registry.arity_ops(1));

    out.push_str("// A list of all the binary ops comma separated, for the enum\n");
    out.push_str("// definition farther down in the file.\n");
    push_enum_list(out, "BINARY_OPS_LIST", &registry.arity_ops(2));

    out.push_str("// A list of all the ternary ops comma separated, for the enum\n");
    out.push_str("// definition farther down in the file.\n");
    push_enum_list(out, "TERNARY_OPS_LIST", &registry.arity_ops(3));

    out.push_str("// A list of all the extra ops comma separated, for the enum\n");
    out.push_str("// definition farther down in the file.\n");
    push_extra_list(out, registry.extras());
}

fn push_enum_list(out: &mut String, name: &str, ops: &[&Op]) {
    out.push_str("#define ");
    out.push_str(name);
    out.push_str(" \\\n");
    for op in ops {
        for tag in op.dispatch_tags() {
            out.push_str("  ");
            out.push_str(&tag);
            out.push_str(", \\\n");
        }
    }
    out.push('\n');
}

fn push_extra_list(out: &mut String, extras: &[ExtraOp]) {
    out.push_str("#define EXTRA_OPS_LIST \\\n");
    for extra in extras {
        out.push_str("    ");
        out.push_str(&extra.tag());
        out.push_str(", \\\n");
    }
}

/// One label-group macro: `#define NAME \` followed by the rendered labels.
fn push_label_macro(out: &mut String, name: &str, entries: &[String]) {
    out.push_str("#define ");
    out.push_str(name);
    out.push_str(" \\\n");
    out.push_str(&render_case_labels(entries));
}

/// The complex label groups for one arity: real side, imaginary side, and
/// the combined composite.
fn push_complex_groups(out: &mut String, prefix: &str, ops: &[&Op]) {
    push_label_macro(
        out,
        &format!("{prefix}_COMPLEX_OPS_CASES_R"),
        &complex_side_entries(ops, 'R'),
    );
    push_label_macro(
        out,
        &format!("{prefix}_COMPLEX_OPS_CASES_I"),
        &complex_side_entries(ops, 'I'),
    );
    out.push_str(&format!("#define {prefix}_COMPLEX_OPS_CASES \\\n"));
    out.push_str(&format!("  {prefix}_COMPLEX_OPS_CASES_R: \\\n"));
    out.push_str(&format!("  case {prefix}_COMPLEX_OPS_CASES_I\n"));
}

/// Every case-label partition: per arity the rounding split, the combined
/// real group and the complex groups, then the precision partitions spanning
/// all arities.
fn push_case_groups(out: &mut String, registry: &Registry) {
    out.push_str("// Case labels for each unary op whose reference function takes a\n");
    out.push_str("// rounding mode, used by the runtime dispatch switch.\n");
    out.push_str("// The leading label omits `case` and the trailing label omits the\n");
    out.push_str("// continuation, so each group can sit inside a larger label list.\n");
    push_label_macro(
        out,
        "UNARY_OPS_ROUND_CASES",
        &label_entries(&registry.real_round_ops(1)),
    );

    out.push_str("// Same as above, but for those that don't need a rounding mode.\n");
    push_label_macro(
        out,
        "UNARY_OPS_NOROUND_CASES",
        &label_entries(&registry.real_noround_ops(1)),
    );

    out.push_str("// For places where we don't care about the rounding mode.\n");
    out.push_str("#define UNARY_OPS_CASES                         \\\n");
    out.push_str("       UNARY_OPS_ROUND_CASES:                     \\\n");
    out.push_str("  case UNARY_OPS_NOROUND_CASES\n");
    out.push('\n');

    push_complex_groups(out, "UNARY", &registry.complex_ops(1));

    out.push_str("// The binary operation cases, split by rounding-mode need.\n");
    push_label_macro(
        out,
        "BINARY_OPS_ROUND_CASES",
        &label_entries(&registry.real_round_ops(2)),
    );
    push_label_macro(
        out,
        "BINARY_OPS_NOROUND_CASES",
        &label_entries(&registry.real_noround_ops(2)),
    );
    push_label_macro(
        out,
        "BINARY_OPS_CASES",
        &label_entries(&registry.real_ops(2)),
    );

    push_complex_groups(out, "BINARY", &registry.complex_ops(2));

    out.push_str("// The ternary operation cases, split by rounding-mode need.\n");
    push_label_macro(
        out,
        "TERNARY_OPS_ROUND_CASES",
        &label_entries(&registry.real_round_ops(3)),
    );
    push_label_macro(
        out,
        "TERNARY_OPS_NOROUND_CASES",
        &label_entries(&registry.real_noround_ops(3)),
    );
    push_label_macro(
        out,
        "TERNARY_OPS_CASES",
        &label_entries(&registry.real_ops(3)),
    );

    push_complex_groups(out, "TERNARY", &registry.complex_ops(3));

    out.push_str("// The single precision cases\n");
    push_label_macro(
        out,
        "SINGLE_CASES",
        &label_entries(&registry.precision_ops(Precision::Single)),
    );

    out.push_str("// The double precision cases\n");
    push_label_macro(
        out,
        "DOUBLE_CASES",
        &label_entries(&registry.precision_ops(Precision::Double)),
    );
}

/// A `switch` macro body assigning the reference function for each op.
fn push_switch_funcs(out: &mut String, ops: &[&Op]) {
    out.push_str("  switch(op){ \\\n");
    for op in ops {
        for tag in op.dispatch_tags() {
            out.push_str("  case ");
            out.push_str(&tag);
            out.push_str(": \\\n");
        }
        out.push_str("    fvar = ");
        out.push_str(&op.exact_func);
        out.push_str("; \\\n");
        out.push_str("    break; \\\n");
    }
    out.push_str("  default: \\\n");
    out.push_str("    break; \\\n");
    out.push_str("  }\n");
    out.push('\n');
}

/// The reference-function selection blocks. Unary is split by rounding-mode
/// need because the reference call signatures differ; binary, ternary and the
/// complex groups are unified.
fn push_func_selectors(out: &mut String, registry: &Registry) {
    out.push_str("// A switch statement to get the reference function for each op.\n");
    out.push_str("#define GET_UNARY_OPS_ROUND_F(fvar, op) \\\n");
    push_switch_funcs(out, &registry.real_round_ops(1));

    out.push_str("// Same as above, but for those that don't need a rounding mode.\n");
    out.push_str("#define GET_UNARY_OPS_NOROUND_F(fvar, op) \\\n");
    push_switch_funcs(out, &registry.real_noround_ops(1));

    out.push_str("#define GET_UNARY_COMPLEX_OPS_F(fvar, op) \\\n");
    push_switch_funcs(out, &registry.complex_ops(1));

    out.push_str("// Same as above, but binary ops\n");
    out.push_str("#define GET_BINARY_OPS_F(fvar, op) \\\n");
    push_switch_funcs(out, &registry.real_ops(2));

    out.push_str("#define GET_BINARY_COMPLEX_OPS_F(fvar, op) \\\n");
    push_switch_funcs(out, &registry.complex_ops(2));

    out.push_str("// Same as above, but ternary ops\n");
    out.push_str("#define GET_TERNARY_OPS_F(fvar, op) \\\n");
    push_switch_funcs(out, &registry.real_ops(3));

    out.push_str("#define GET_TERNARY_COMPLEX_OPS_F(fvar, op) \\\n");
    push_switch_funcs(out, &registry.complex_ops(3));
}

/// Maps every dispatch identity to a display string. The reserved invalid
/// identity reports "invalid"; complex identities report `<source>-real` /
/// `<source>-imag`; extras intentionally fall to the silent default.
fn push_name_lookup(out: &mut String, ops: &[Op]) {
    out.push_str("// Getting a string name of the op.\n");
    out.push_str("#define GET_OP_NAMES(namevar, op)\\\n");
    out.push_str("  switch(op){ \\\n");
    out.push_str("  case ");
    out.push_str(INVALID_TAG);
    out.push_str(": \\\n");
    out.push_str("    namevar = \"invalid\"; \\\n");
    out.push_str("    break;\\\n");
    for op in ops {
        if op.is_complex {
            out.push_str("  case ");
            out.push_str(&op.tag_real());
            out.push_str(": \\\n");
            out.push_str("  namevar = \"");
            out.push_str(&op.source_name);
            out.push_str("-real\"; \\\n");
            out.push_str("  break;\\\n");

            out.push_str("  case ");
            out.push_str(&op.tag_imag());
            out.push_str(": \\\n");
            out.push_str("  namevar = \"");
            out.push_str(&op.source_name);
            out.push_str("-imag\"; \\\n");
            out.push_str("  break;\\\n");
        } else {
            out.push_str("  case ");
            out.push_str(&op.tag());
            out.push_str(": \\\n");
            out.push_str("    namevar = \"");
            out.push_str(op.lookup_name());
            out.push_str("\"; \\\n");
            out.push_str("    break;\\\n");
        }
    }
    out.push_str("  default: \\\n");
    out.push_str("    break; \\\n");
    out.push_str("  }\n");
    out.push('\n');
}

/// The native re-invocation switch. An operation with no native counterpart
/// is omitted and resolves to the documented `result = 0.0` fallback.
fn push_native_run(out: &mut String, ops: &[Op]) {
    out.push_str("// Running the libm version of the op.\n");
    out.push_str("#define RUN(result, op, args) \\\n");
    out.push_str("  switch(op){ \\\n");
    for op in ops {
        let native = match &op.native_func {
            Some(native) => native,
            None => {
                warn!(
                    "operation `{}` has no native counterpart; it falls back to a zero result",
                    op.source_name
                );
                continue;
            }
        };
        let call_args = native_call_args(op);
        if op.is_complex {
            out.push_str("  case ");
            out.push_str(&op.tag_real());
            out.push_str(": \\\n");
            out.push_str(&format!("    result = creal({native}({call_args}));\\\n"));
            out.push_str("    break;\\\n");
            out.push_str("  case ");
            out.push_str(&op.tag_imag());
            out.push_str(": \\\n");
            out.push_str(&format!("    result = cimag({native}({call_args}));\\\n"));
        } else {
            out.push_str("  case ");
            out.push_str(&op.tag());
            out.push_str(": \\\n");
            out.push_str(&format!("    result = {native}({call_args});\\\n"));
        }
        out.push_str("    break; \\\n");
    }
    out.push_str("  default: \\\n");
    out.push_str("    result = 0.0; \\\n");
    out.push_str("    break; \\\n");
    out.push_str("  }\n");
    out.push('\n');
}

/// One wrap directive per registered operation, naming the native symbol to
/// hook, its argument width, and its dispatch identity stem.
fn push_wrap_list(out: &mut String, name: &str, arity_word: &str, ops: &[&Op]) {
    out.push_str("#define ");
    out.push_str(name);
    out.push_str(" \\\n");
    for op in ops {
        let family = if op.is_complex {
            format!("WRAP_{}_COMPLEX_{}", arity_word, op.precision.bits())
        } else {
            format!("WRAP_{}_{}", arity_word, op.precision.bits())
        };
        out.push_str(&format!(
            "  {family}({}, {}); \\\n",
            op.source_name,
            op.tag()
        ));
    }
    out.push('\n');
}

fn push_wrap_directives(out: &mut String, registry: &Registry) {
    out.push_str("// Call the wrapping macro, defined at the interception call site,\n");
    out.push_str("// to wrap each function we support.\n");
    push_wrap_list(out, "WRAP_UNARY_OPS", "UNARY", &registry.arity_ops(1));

    out.push_str("// Same for binary ops.\n");
    push_wrap_list(out, "WRAP_BINARY_OPS", "BINARY", &registry.arity_ops(2));

    out.push_str("// Same for ternary ops.\n");
    push_wrap_list(out, "WRAP_TERNARY_OPS", "TERNARY", &registry.arity_ops(3));
}

/// The closed tag set the runtime dispatches on, invalid first.
fn push_enum_definition(out: &mut String) {
    out.push_str("// Finally, define an enum for the operations we support.\n");
    out.push_str("typedef enum {\n");
    out.push_str("  ");
    out.push_str(INVALID_TAG);
    out.push_str(",\n");
    out.push_str("  // Unary functions\n");
    out.push_str("  UNARY_OPS_LIST\n");
    out.push_str("  // Binary\n");
    out.push_str("  BINARY_OPS_LIST\n");
    out.push_str("  // Ternary\n");
    out.push_str("  TERNARY_OPS_LIST\n");
    out.push_str("  // Extra\n");
    out.push_str("  EXTRA_OPS_LIST\n");
    out.push_str("} OpType;\n");
    out.push('\n');
}
