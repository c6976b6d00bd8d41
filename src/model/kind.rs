//! The five fixed decodings of a selected byte range.

use std::fmt;

/// Which interpretation of a byte range an annotation refers to.
///
/// The label of each kind is what gets persisted in the annotation log, so labels are part
/// of the file format and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InterpretationKind {
    /// Bytes in file order as hex. Label: `Hex (BE)`
    HexBe,
    /// Bytes in reverse order as hex. Label: `Hex (LE)`
    HexLe,
    /// First two bytes as a little-endian `i16`. Label: `SignedInt16`
    SignedInt16,
    /// First four bytes as a little-endian `f32`. Label: `Float32`
    Float32,
    /// All bytes as a little-endian unsigned integer. Label: `Decimal`
    Decimal,
}

impl InterpretationKind {
    /// All kinds in display order.
    pub const ALL: [InterpretationKind; 5] = [
        InterpretationKind::HexBe,
        InterpretationKind::HexLe,
        InterpretationKind::SignedInt16,
        InterpretationKind::Float32,
        InterpretationKind::Decimal,
    ];

    /// The persisted label.
    pub fn label(self) -> &'static str {
        match self {
            InterpretationKind::HexBe => "Hex (BE)",
            InterpretationKind::HexLe => "Hex (LE)",
            InterpretationKind::SignedInt16 => "SignedInt16",
            InterpretationKind::Float32 => "Float32",
            InterpretationKind::Decimal => "Decimal",
        }
    }

    /// Parse a persisted label. Matching is exact.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hexmark::model::InterpretationKind;
    /// assert_eq!(InterpretationKind::from_label("Float32"), Some(InterpretationKind::Float32));
    /// assert_eq!(InterpretationKind::from_label("float32"), None);
    /// ```
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }

    /// Number of bytes a record of this kind covers, if fixed by the kind itself.
    ///
    /// Hex and decimal records cover as many bytes as their stored hex payload.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            InterpretationKind::SignedInt16 => Some(2),
            InterpretationKind::Float32 => Some(4),
            InterpretationKind::HexBe | InterpretationKind::HexLe | InterpretationKind::Decimal => {
                None
            }
        }
    }
}

impl fmt::Display for InterpretationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
