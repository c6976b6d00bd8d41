//! Interpreter: decodes a byte range five fixed ways.
//!
//! Bytes are given in file order. Every field is computed on its own; a field that needs
//! more bytes than are available is simply `None` and never affects the other fields.

use crate::model::InterpretationKind;
use std::fmt::Write as _;

/// The five decodings of a byte range.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InterpretationResult {
    /// `0x` + uppercase hex in file order.
    pub hex_be: Option<String>,
    /// `0x` + uppercase hex in reverse order.
    pub hex_le: Option<String>,
    /// First two bytes as little-endian `i16`.
    pub signed_int16: Option<String>,
    /// First four bytes as little-endian `f32`.
    pub float32: Option<String>,
    /// Whole range as a little-endian unsigned integer.
    pub unsigned_decimal: Option<String>,
}

impl InterpretationResult {
    /// Whether every field is empty.
    pub fn is_empty(&self) -> bool {
        InterpretationKind::ALL
            .into_iter()
            .all(|kind| kind.select(self).is_none())
    }

    /// Mutable access to one field, used when the user edits the displayed text.
    pub fn field_mut(&mut self, kind: InterpretationKind) -> &mut Option<String> {
        match kind {
            InterpretationKind::HexBe => &mut self.hex_be,
            InterpretationKind::HexLe => &mut self.hex_le,
            InterpretationKind::SignedInt16 => &mut self.signed_int16,
            InterpretationKind::Float32 => &mut self.float32,
            InterpretationKind::Decimal => &mut self.unsigned_decimal,
        }
    }
}

impl InterpretationKind {
    /// The field of `result` this kind refers to.
    pub fn select(self, result: &InterpretationResult) -> Option<&str> {
        match self {
            InterpretationKind::HexBe => result.hex_be.as_deref(),
            InterpretationKind::HexLe => result.hex_le.as_deref(),
            InterpretationKind::SignedInt16 => result.signed_int16.as_deref(),
            InterpretationKind::Float32 => result.float32.as_deref(),
            InterpretationKind::Decimal => result.unsigned_decimal.as_deref(),
        }
    }
}

/// Decode `bytes` every supported way.
///
/// # Examples
///
/// ```
/// # use hexmark::interpret::interpret;
/// let result = interpret(&[0xFF, 0xFF]);
/// assert_eq!(result.hex_be.as_deref(), Some("0xFFFF"));
/// assert_eq!(result.signed_int16.as_deref(), Some("-1"));
/// assert_eq!(result.float32, None);
/// assert_eq!(result.unsigned_decimal.as_deref(), Some("65535"));
/// ```
pub fn interpret(bytes: &[u8]) -> InterpretationResult {
    InterpretationResult {
        hex_be: hex_be(bytes),
        hex_le: hex_le(bytes),
        signed_int16: signed_int16(bytes),
        float32: float32(bytes),
        unsigned_decimal: unsigned_decimal(bytes),
    }
}

/// Uppercase hex digits with no prefix.
pub fn upper_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // Writing to a String cannot fail
        let _ = write!(out, "{:02X}", b);
    }
    out
}

fn hex_be(bytes: &[u8]) -> Option<String> {
    (!bytes.is_empty()).then(|| format!("0x{}", upper_hex(bytes)))
}

fn hex_le(bytes: &[u8]) -> Option<String> {
    let reversed: Vec<u8> = bytes.iter().rev().copied().collect();
    hex_be(&reversed)
}

fn signed_int16(bytes: &[u8]) -> Option<String> {
    let head: [u8; 2] = bytes.get(..2)?.try_into().ok()?;
    Some(i16::from_le_bytes(head).to_string())
}

fn float32(bytes: &[u8]) -> Option<String> {
    let head: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
    // Widened so the digits match the double the value is exactly equal to
    Some(float_text(f64::from(f32::from_le_bytes(head))))
}

/// Shortest round-trip text of `value`.
///
/// Plain notation with at least one fractional digit for decimal exponents in
/// `-4..16`, otherwise `<digits>e<sign><at least two exponent digits>`. Non-finite
/// values print as `nan`, `inf` and `-inf`.
///
/// ```
/// # use hexmark::interpret::float_text;
/// assert_eq!(float_text(1.0), "1.0");
/// assert_eq!(float_text(1e-5), "1e-05");
/// assert_eq!(float_text(1e16), "1e+16");
/// ```
pub fn float_text(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "inf" } else { "-inf" };
        return text.to_string();
    }

    let scientific = format!("{:e}", value);
    let Some((digits, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or_default();

    if (-4..16).contains(&exponent) {
        let plain = value.to_string();
        if plain.contains('.') {
            plain
        } else {
            format!("{}.0", plain)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", digits, sign, exponent.unsigned_abs())
    }
}

fn unsigned_decimal(bytes: &[u8]) -> Option<String> {
    (!bytes.is_empty()).then(|| le_to_decimal(bytes))
}

/// Decimal text of an arbitrary-length little-endian unsigned integer.
///
/// Accumulates base-10^9 limbs, feeding four bytes per step starting from the most
/// significant end. O(n²) in the byte count.
pub fn le_to_decimal(bytes: &[u8]) -> String {
    const BASE: u64 = 1_000_000_000;

    // Least significant limb first
    let mut limbs: Vec<u64> = Vec::new();
    for chunk in bytes.rchunks(4) {
        let shift = 1u64 << (8 * chunk.len());
        let mut carry = chunk.iter().rev().fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
        for limb in limbs.iter_mut() {
            let cur = *limb * shift + carry;
            *limb = cur % BASE;
            carry = cur / BASE;
        }
        while carry > 0 {
            limbs.push(carry % BASE);
            carry /= BASE;
        }
    }

    let Some((most, rest)) = limbs.split_last() else {
        return "0".to_string();
    };
    let mut out = most.to_string();
    for limb in rest.iter().rev() {
        let _ = write!(out, "{:09}", limb);
    }
    out
}
