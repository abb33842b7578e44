// src/op.rs

//! The operation model: the record types describing one interceptable math
//! operation and its dispatch identities.
//!
//! Each `Op` is one native symbol the instrumentation runtime intercepts. A
//! single mathematical function usually appears as several `Op`s (public
//! name, internal glibc name, SIMD variants, float sibling), all sharing one
//! arbitrary-precision reference function but each owning its own dispatch
//! tag, because the runtime hooks symbols one at a time.

use serde::{Deserialize, Serialize};

use crate::encode::op_tag;

/// Native floating-point width of an operation variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Precision {
    Single,
    Double,
}

impl Precision {
    /// Width in bits, as spelled in the emitted wrap directives.
    pub fn bits(self) -> u32 {
        match self {
            Precision::Single => 32,
            Precision::Double => 64,
        }
    }
}

/// How a reference or native function name is obtained: derived from the
/// registration convention, or explicitly overridden in the catalog.
///
/// Resolution happens exactly once, at registration time; emission only ever
/// sees the resolved name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FuncRef {
    #[default]
    Derived,
    Override(String),
}

impl FuncRef {
    /// Resolves to the override if present, otherwise to the convention name.
    pub fn resolve_with<F: FnOnce() -> String>(&self, derive: F) -> String {
        match self {
            FuncRef::Derived => derive(),
            FuncRef::Override(name) => name.clone(),
        }
    }
}

impl From<Option<String>> for FuncRef {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(name) => FuncRef::Override(name),
            None => FuncRef::Derived,
        }
    }
}

/// One interceptable operation variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Op {
    /// The symbol the runtime intercepts (possibly an alias or SIMD variant).
    pub source_name: String,
    /// Human-readable description for diagnostic output.
    pub display_name: String,
    /// Number of arguments, 1 through 3.
    pub arity: u8,
    /// A complex-valued operation owns two dispatch identities (real, imag)
    /// backed by one underlying computation.
    pub is_complex: bool,
    pub precision: Precision,
    /// Whether the arbitrary-precision reference call takes an explicit
    /// rounding-mode argument. False for already-exact operations such as
    /// floor and ceil.
    pub needs_round: bool,
    /// Arbitrary-precision reference function. Never empty.
    pub exact_func: String,
    /// Platform implementation to re-invoke for comparison. Absent when a
    /// float variant has no natural `f`-suffixed sibling.
    pub native_func: Option<String>,
}

impl Op {
    /// The base dispatch tag. For a real operation this is its sole identity;
    /// for a complex operation it is the stem the wrap directive names.
    pub fn tag(&self) -> String {
        op_tag(&self.source_name)
    }

    /// Real-part identity of a complex operation.
    pub fn tag_real(&self) -> String {
        debug_assert!(self.is_complex);
        format!("{}R", self.tag())
    }

    /// Imaginary-part identity of a complex operation.
    pub fn tag_imag(&self) -> String {
        debug_assert!(self.is_complex);
        format!("{}I", self.tag())
    }

    /// Every dispatch tag this operation contributes to the enumeration, in
    /// emission order. Complex operations contribute their real and imaginary
    /// identities adjacently.
    pub fn dispatch_tags(&self) -> Vec<String> {
        if self.is_complex {
            vec![self.tag_real(), self.tag_imag()]
        } else {
            vec![self.tag()]
        }
    }

    /// The string reported by the name-lookup table. Real operations report
    /// their native name; an operation with no native sibling falls back to
    /// its source symbol.
    pub fn lookup_name(&self) -> &str {
        self.native_func.as_deref().unwrap_or(&self.source_name)
    }
}

/// A dispatch identity that exists purely for enumeration purposes, with no
/// marshaling or exact/native function attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraOp {
    pub name: String,
}

impl ExtraOp {
    pub fn tag(&self) -> String {
        op_tag(&self.name)
    }
}
