//! Domain types providing compile-time safety and self-documentation
//!
//! These newtype wrappers keep the JVM's serial thread number apart from the
//! operating-system thread ID, which dumps print in several encodings.

use std::fmt;

/// JVM-assigned thread serial number (`#N` in the header line)
///
/// This is NOT the native thread ID: it is assigned by the JVM in creation
/// order and has no meaning outside the dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThreadNumber(pub u32);

impl fmt::Display for ThreadNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Operating-system thread ID in both of its printed encodings.
///
/// Older JDKs print `nid=0x1a2b`, newer ones print `nid=6699` or only a
/// bracketed `[6699]`. Whichever form is found, the other is derived so the
/// two are always present together. The decimal form matches the thread's
/// PID in `top -H` / `ps -eLf`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NativeThreadId {
    hex: String,
    decimal: u64,
}

impl NativeThreadId {
    /// Build from a `0x`-prefixed hex token, keeping the token as printed.
    ///
    /// Returns `None` when the digits are missing or overflow `u64`.
    #[must_use]
    pub fn from_hex(token: &str) -> Option<Self> {
        let digits = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X"))?;
        let decimal = u64::from_str_radix(digits, 16).ok()?;
        Some(Self { hex: token.to_string(), decimal })
    }

    /// Build from a decimal token, deriving a lowercase `0x` hex form.
    #[must_use]
    pub fn from_decimal(token: &str) -> Option<Self> {
        let decimal = token.parse::<u64>().ok()?;
        Some(Self { hex: format!("0x{decimal:x}"), decimal })
    }

    /// Hex form, e.g. `0x1a2b`
    #[must_use]
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// Numeric value of the ID
    #[must_use]
    pub fn value(&self) -> u64 {
        self.decimal
    }

    /// Decimal form, e.g. `6699`
    #[must_use]
    pub fn decimal(&self) -> String {
        self.decimal.to_string()
    }
}

impl fmt::Display for NativeThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.hex, self.decimal)
    }
}
