// src/encode.rs

//! Z-encoding of operation source names into dispatch tags.
//!
//! Native math symbols routinely contain underscores (`__ieee754_sqrt`), but
//! the dispatch tags we emit must be safely concatenable with single-letter
//! suffixes (the `R`/`I` tags of a complex operation). The encoding escapes
//! the escape character `Z` first, then rewrites every underscore as `Zu`, so
//! an encoded name never contains a raw underscore and remains reversible in
//! principle.
//!
//! Tags are uppercased for the enum namespace. Uppercasing can fold a literal
//! `zu` onto an encoded underscore, so the registry re-checks global tag
//! uniqueness after registration and refuses to emit on a collision.

/// Escapes `Z` as `ZZ`, then `_` as `Zu`.
pub fn z_encode(name: &str) -> String {
    name.replace('Z', "ZZ").replace('_', "Zu")
}

/// The dispatch tag for a source name: `OP_` + uppercased z-encoding.
pub fn op_tag(name: &str) -> String {
    format!("OP_{}", z_encode(name).to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(z_encode("sqrt"), "sqrt");
        assert_eq!(op_tag("sqrt"), "OP_SQRT");
    }

    #[test]
    fn underscores_become_zu() {
        assert_eq!(z_encode("__log_finite"), "ZuZulogZufinite");
        assert_eq!(op_tag("__ieee754_sqrt"), "OP_ZUZUIEEE754ZUSQRT");
    }

    #[test]
    fn escape_character_is_escaped_first() {
        assert_eq!(z_encode("Zu_x"), "ZZuZux");
        // Distinct inputs stay distinct before uppercasing.
        assert_ne!(z_encode("_x"), z_encode("Zux"));
    }

    #[test]
    fn encoded_names_contain_no_underscore() {
        assert!(!z_encode("__a_b_c__").contains('_'));
    }
}
