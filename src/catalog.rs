// src/catalog.rs

//! The declarative operation catalog.
//!
//! A catalog is the generator's sole input: an ordered list of entry
//! descriptors, each of which the registry expands into one or more concrete
//! operations. The built-in catalog covers the libm surface the analysis
//! runtime understands; an external JSON catalog with the same shape can be
//! supplied instead via `--catalog`.
//!
//! Entry order is significant: it fixes the order of dispatch identities in
//! the emitted enumeration, and generation must be byte-identical from one
//! run to the next.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::GenError;

/// The complete generator input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
}

/// One declarative registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogEntry {
    /// A real-valued libm function, expanded into all its symbol aliases.
    Real(OpEntry),
    /// A complex-valued function, expanded into real/imag identities at
    /// emission time.
    Complex(OpEntry),
    /// An enumeration-only identity.
    Extra { name: String },
}

/// Shared descriptor fields for real and complex registrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpEntry {
    /// Canonical function name, e.g. `sqrt`.
    pub name: String,
    /// Human-readable description, e.g. `square root`.
    pub display: String,
    /// Argument count, 1 through 3.
    pub arity: u8,
    /// Whether an `f`-suffixed single-precision sibling exists.
    #[serde(default = "default_true")]
    pub has_float: bool,
    /// Whether the reference function takes a rounding-mode argument.
    #[serde(default = "default_true")]
    pub needs_round: bool,
    /// Override for the arbitrary-precision reference function name.
    /// Defaults to `mpfr_<name>` (real) or `mpc_<name>` (complex).
    #[serde(default)]
    pub exact: Option<String>,
    /// Override for the native function name. Defaults to the canonical name.
    #[serde(default)]
    pub native: Option<String>,
}

fn default_true() -> bool {
    true
}

/// The built-in catalog, constructed once and read-only thereafter.
pub static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::builtin);

impl Catalog {
    /// Loads an external catalog from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, GenError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// The fixed registration sequence compiled into the generator. The
    /// operations mirror the set the analysis runtime supports natively.
    pub fn builtin() -> Self {
        let entries = vec![
            real("sqrt", "square root", 1),
            real("cbrt", "cube root", 1),
            real_exact("fabs", "absolute value", 1, "mpfr_abs"),
            real("logb", "get exponent", 1),
            real("rint", "round to nearest integer", 1),
            // Exact under any rounding policy.
            real_noround("ceil", "ceiling", 1),
            real_noround("floor", "floor", 1),
            real_noround("round", "round", 1),
            real_noround("trunc", "truncate", 1),
            real("exp", "exponentiate", 1),
            real_renamed("__exp1", "exponentiate", 1, "mpfr_exp", "exp"),
            real("exp2", "base-two exponentiate", 1),
            real("expm1", "exponentiate minus one", 1),
            real("log", "log", 1),
            real_renamed("__log_finite", "log", 1, "mpfr_log", "log"),
            real("log10", "log base ten", 1),
            real_renamed("__log10_finite", "log", 1, "mpfr_log10", "log10"),
            real("log1p", "plus one log", 1),
            real("log2", "log base two", 1),
            real("erf", "error function", 1),
            real("erfc", "complementary error function", 1),
            // lgamma needs glue on the reference side to drop the sign output.
            real_exact("lgamma", "log gamma function", 1, "mpfr_lgamma2"),
            real_exact("tgamma", "gamma function", 1, "mpfr_gamma"),
            real("j0", "order zero first kind bessel function", 1),
            real("j1", "order one first kind bessel function", 1),
            real("y0", "order zero second kind bessel function", 1),
            real("y1", "order one second kind bessel function", 1),
            real("cos", "cosine", 1),
            real("sin", "sine", 1),
            real("tan", "tangent", 1),
            real("asin", "arc sine", 1),
            real("acos", "arc cosine", 1),
            real("atan", "arc tangent", 1),
            real("sinh", "hyperbolic sine", 1),
            real("cosh", "hyperbolic cosine", 1),
            real("tanh", "hyperbolic tangent", 1),
            real("asinh", "hyperbolic arc sine", 1),
            real("acosh", "hyperbolic arc cosine", 1),
            real("atanh", "hyperbolic arc tangent", 1),
            real("atan2", "arc tangent (two arguments)", 2),
            real("hypot", "hypotenuse", 2),
            real("pow", "power", 2),
            real_renamed("__pow_finite", "power", 2, "mpfr_pow", "pow"),
            real_renamed("slowpow", "power", 2, "mpfr_pow", "pow"),
            real("fmod", "modulus", 2),
            real("copysign", "copy sign", 2),
            real_exact("fdim", "positive difference", 2, "mpfr_dim"),
            real_exact("fmax", "maximum", 2, "mpfr_max"),
            real_exact("fmin", "minimum", 2, "mpfr_min"),
            real("remainder", "remainder", 2),
            real("fma", "fused multiply-add", 3),
            extra("cdivr"),
            extra("cdivi"),
            extra("cmulr"),
            extra("cmuli"),
            complex("log", "log", 1),
            complex("exp", "exp", 1),
            complex("pow", "pow", 2),
            complex("fma", "fma", 3),
        ];
        Catalog { entries }
    }
}

fn entry(name: &str, display: &str, arity: u8) -> OpEntry {
    OpEntry {
        name: name.to_string(),
        display: display.to_string(),
        arity,
        has_float: true,
        needs_round: true,
        exact: None,
        native: None,
    }
}

fn real(name: &str, display: &str, arity: u8) -> CatalogEntry {
    CatalogEntry::Real(entry(name, display, arity))
}

fn real_noround(name: &str, display: &str, arity: u8) -> CatalogEntry {
    let mut e = entry(name, display, arity);
    e.needs_round = false;
    CatalogEntry::Real(e)
}

fn real_exact(name: &str, display: &str, arity: u8, exact: &str) -> CatalogEntry {
    let mut e = entry(name, display, arity);
    e.exact = Some(exact.to_string());
    CatalogEntry::Real(e)
}

fn real_renamed(name: &str, display: &str, arity: u8, exact: &str, native: &str) -> CatalogEntry {
    let mut e = entry(name, display, arity);
    e.exact = Some(exact.to_string());
    e.native = Some(native.to_string());
    CatalogEntry::Real(e)
}

fn complex(name: &str, display: &str, arity: u8) -> CatalogEntry {
    CatalogEntry::Complex(entry(name, display, arity))
}

fn extra(name: &str) -> CatalogEntry {
    CatalogEntry::Extra {
        name: name.to_string(),
    }
}
