use std::fmt;

/// Errors raised while checking or decoding shader interchange data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// An integer does not name any slot of the given binding table.
    UnknownSlot { kind: &'static str, value: u32 },
    /// A host field disagrees with the Metal declaration of the same record.
    LayoutMismatch {
        record: &'static str,
        field: &'static str,
        /// `(offset, size)` the Metal compiler assigns.
        expected: (usize, usize),
        /// `(offset, size)` the Rust compiler assigns.
        actual: (usize, usize),
    },
    /// Host and Metal declarations list a different number of fields.
    FieldCount { record: &'static str, expected: usize, actual: usize },
    /// A byte buffer does not have the size of the record it should hold.
    SizeMismatch { record: &'static str, expected: usize, actual: usize },
    /// A fixed-capacity light array is full.
    LightCapacity { capacity: usize },
    /// An `UNUSED` light was offered for a packed light slot.
    UnusedLight { slot: usize },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSlot { kind, value } => {
                write!(f, "{value} is not an assigned {kind} slot")
            }
            Self::LayoutMismatch { record, field, expected, actual } => write!(
                f,
                "{record}.{field}: Metal places it at offset {} ({} bytes), host at offset {} ({} bytes)",
                expected.0, expected.1, actual.0, actual.1
            ),
            Self::FieldCount { record, expected, actual } => {
                write!(f, "{record}: Metal declares {expected} fields, host has {actual}")
            }
            Self::SizeMismatch { record, expected, actual } => {
                write!(f, "{record} is {expected} bytes, got {actual}")
            }
            Self::LightCapacity { capacity } => {
                write!(f, "light array is full ({capacity} slots)")
            }
            Self::UnusedLight { slot } => {
                write!(f, "light slot {slot} would hold an unused light")
            }
        }
    }
}

impl std::error::Error for SchemaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_mismatch_names_record_and_field() {
        let err = SchemaError::LayoutMismatch {
            record: "Light",
            field: "attenuation",
            expected: (64, 16),
            actual: (52, 12),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Light.attenuation:"));
        assert!(msg.contains("offset 64 (16 bytes)"));
        assert!(msg.contains("offset 52 (12 bytes)"));
    }

    #[test]
    fn unknown_slot_message() {
        let err = SchemaError::UnknownSlot { kind: "BufferIndices", value: 16 };
        assert_eq!(err.to_string(), "16 is not an assigned BufferIndices slot");
    }
}
