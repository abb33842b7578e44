// src/marshal.rs

//! Argument marshaling: builds the C argument-list expression that passes a
//! flat buffer of raw argument slots to a native call.
//!
//! The runtime hands every intercepted call a `double*` buffer. Real
//! arguments map slot-for-slot; complex arguments consume two consecutive
//! slots combined into one value; single-precision operations reinterpret the
//! buffer as `float*` before indexing.

use crate::op::{Op, Precision};

/// The buffer expression to index, after any precision reinterpretation.
pub fn args_buffer(precision: Precision) -> &'static str {
    match precision {
        Precision::Single => "((float*)args)",
        Precision::Double => "args",
    }
}

/// Real argument list: slot `i` feeds argument `i`.
pub fn real_args(arity: u8, buffer: &str) -> String {
    (0..arity)
        .map(|i| format!("{buffer}[{i}]"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Complex argument list: argument `k` combines slots `2k` and `2k + 1`.
pub fn complex_args(arity: u8, buffer: &str) -> String {
    (0..arity)
        .map(|k| {
            format!(
                "{buffer}[{}] + {buffer}[{}] * I",
                2 * k,
                2 * k + 1
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// The full argument list for one operation's native call.
pub fn native_call_args(op: &Op) -> String {
    let buffer = args_buffer(op.precision);
    if op.is_complex {
        complex_args(op.arity, buffer)
    } else {
        real_args(op.arity, buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_args_map_slot_for_slot() {
        assert_eq!(real_args(1, "args"), "args[0]");
        assert_eq!(real_args(2, "args"), "args[0], args[1]");
        assert_eq!(real_args(3, "args"), "args[0], args[1], args[2]");
    }

    #[test]
    fn complex_args_pair_consecutive_slots() {
        assert_eq!(complex_args(1, "args"), "args[0] + args[1] * I");
        assert_eq!(
            complex_args(2, "args"),
            "args[0] + args[1] * I, args[2] + args[3] * I"
        );
        assert_eq!(
            complex_args(3, "args"),
            "args[0] + args[1] * I, args[2] + args[3] * I, args[4] + args[5] * I"
        );
    }

    #[test]
    fn single_precision_reinterprets_the_buffer() {
        assert_eq!(
            real_args(2, args_buffer(Precision::Single)),
            "((float*)args)[0], ((float*)args)[1]"
        );
    }
}
