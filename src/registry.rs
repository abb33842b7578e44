// src/registry.rs

//! The operation registry: expands catalog entries into the flat operation
//! set and validates it before emission.
//!
//! Expansion happens here, at registration time, so every downstream stage
//! sees aliases as ordinary operations. A real registration fans out into the
//! eight symbol names glibc may resolve a call to, plus the single-precision
//! sibling; a complex registration stays one operation per precision and is
//! split into real/imag identities only when labels are emitted.

use std::collections::HashMap;

use crate::catalog::{Catalog, CatalogEntry, OpEntry};
use crate::error::GenError;
use crate::op::{ExtraOp, FuncRef, Op, Precision};

/// Reserved first member of the emitted enumeration.
pub const INVALID_TAG: &str = "OP_INVALID";

/// The full, validated operation set. Read-only once built.
#[derive(Debug)]
pub struct Registry {
    ops: Vec<Op>,
    extras: Vec<ExtraOp>,
}

/// The internal and SIMD-dispatched symbol variants a libm function may
/// resolve to, alongside its public name.
fn alias_symbols(name: &str) -> [String; 8] {
    [
        name.to_string(),
        format!("__{name}"),
        format!("__{name}_avx"),
        format!("__{name}_fma4"),
        format!("__ieee754_{name}"),
        format!("__ieee754_{name}_avx"),
        format!("__ieee754_{name}_sse2"),
        format!("__ieee754_{name}_fma4"),
    ]
}

impl Registry {
    /// Builds and validates the registry from a catalog. Entry order is
    /// preserved in the operation set.
    pub fn from_catalog(catalog: &Catalog) -> Result<Self, GenError> {
        let mut registry = Registry {
            ops: Vec::new(),
            extras: Vec::new(),
        };
        for entry in &catalog.entries {
            match entry {
                CatalogEntry::Real(e) => registry.register_real(e),
                CatalogEntry::Complex(e) => registry.register_complex(e),
                CatalogEntry::Extra { name } => registry.extras.push(ExtraOp {
                    name: name.clone(),
                }),
            }
        }
        registry.validate()?;
        Ok(registry)
    }

    /// Inserts one operation per symbol alias, plus the single-precision
    /// variant when the catalog declares an `f`-suffixed sibling. All of them
    /// share the resolved exact and native references.
    fn register_real(&mut self, e: &OpEntry) {
        let exact = FuncRef::from(e.exact.clone()).resolve_with(|| format!("mpfr_{}", e.name));
        let native = FuncRef::from(e.native.clone()).resolve_with(|| e.name.clone());
        for source_name in alias_symbols(&e.name) {
            self.ops.push(Op {
                source_name,
                display_name: e.display.clone(),
                arity: e.arity,
                is_complex: false,
                precision: Precision::Double,
                needs_round: e.needs_round,
                exact_func: exact.clone(),
                native_func: Some(native.clone()),
            });
        }
        if e.has_float {
            self.ops.push(Op {
                source_name: format!("{}f", e.name),
                display_name: format!("{} (float)", e.display),
                arity: e.arity,
                is_complex: false,
                precision: Precision::Single,
                needs_round: e.needs_round,
                exact_func: exact,
                native_func: Some(format!("{native}f")),
            });
        }
    }

    /// Inserts the double-precision complex operation and, when declared, its
    /// single-precision sibling. The native reference defaults to the
    /// canonical name; the consumer calls it through a type-generic header.
    fn register_complex(&mut self, e: &OpEntry) {
        let exact = FuncRef::from(e.exact.clone()).resolve_with(|| format!("mpc_{}", e.name));
        let native = FuncRef::from(e.native.clone()).resolve_with(|| e.name.clone());
        self.ops.push(Op {
            source_name: format!("c{}", e.name),
            display_name: format!("complex {}", e.display),
            arity: e.arity,
            is_complex: true,
            precision: Precision::Double,
            needs_round: e.needs_round,
            exact_func: exact.clone(),
            native_func: Some(native.clone()),
        });
        if e.has_float {
            self.ops.push(Op {
                source_name: format!("c{}f", e.name),
                display_name: format!("complex {} (float)", e.display),
                arity: e.arity,
                is_complex: true,
                precision: Precision::Single,
                needs_round: e.needs_round,
                exact_func: exact,
                native_func: Some(format!("{native}f")),
            });
        }
    }

    /// Post-registration validation: arity range, non-empty exact reference,
    /// and global uniqueness of every dispatch tag (including the reserved
    /// invalid tag and the extras).
    fn validate(&self) -> Result<(), GenError> {
        let mut seen: HashMap<String, String> = HashMap::new();
        seen.insert(INVALID_TAG.to_string(), "<reserved>".to_string());
        let mut claim = |tag: String, owner: &str| -> Result<(), GenError> {
            if let Some(first) = seen.insert(tag.clone(), owner.to_string()) {
                return Err(GenError::DuplicateTag {
                    tag,
                    first,
                    second: owner.to_string(),
                });
            }
            Ok(())
        };
        for op in &self.ops {
            if !(1..=3).contains(&op.arity) {
                return Err(GenError::BadArity {
                    source_name: op.source_name.clone(),
                    arity: op.arity,
                });
            }
            if op.exact_func.is_empty() {
                return Err(GenError::EmptyExactRef {
                    source_name: op.source_name.clone(),
                });
            }
            for tag in op.dispatch_tags() {
                claim(tag, &op.source_name)?;
            }
        }
        for extra in &self.extras {
            claim(extra.tag(), &extra.name)?;
        }
        Ok(())
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn extras(&self) -> &[ExtraOp] {
        &self.extras
    }

    /// All operations of one arity, complex included, in registration order.
    pub fn arity_ops(&self, arity: u8) -> Vec<&Op> {
        self.ops.iter().filter(|op| op.arity == arity).collect()
    }

    /// Real-valued operations of one arity.
    pub fn real_ops(&self, arity: u8) -> Vec<&Op> {
        self.ops
            .iter()
            .filter(|op| op.arity == arity && !op.is_complex)
            .collect()
    }

    /// Real-valued operations of one arity whose reference call takes a
    /// rounding mode.
    pub fn real_round_ops(&self, arity: u8) -> Vec<&Op> {
        self.ops
            .iter()
            .filter(|op| op.arity == arity && !op.is_complex && op.needs_round)
            .collect()
    }

    /// Real-valued operations of one arity whose reference call is exact
    /// under any rounding policy.
    pub fn real_noround_ops(&self, arity: u8) -> Vec<&Op> {
        self.ops
            .iter()
            .filter(|op| op.arity == arity && !op.is_complex && !op.needs_round)
            .collect()
    }

    /// Complex operations of one arity.
    pub fn complex_ops(&self, arity: u8) -> Vec<&Op> {
        self.ops
            .iter()
            .filter(|op| op.arity == arity && op.is_complex)
            .collect()
    }

    /// All operations of one native precision, spanning every arity.
    pub fn precision_ops(&self, precision: Precision) -> Vec<&Op> {
        self.ops
            .iter()
            .filter(|op| op.precision == precision)
            .collect()
    }
}

#[cfg(test)]
mod tests;
