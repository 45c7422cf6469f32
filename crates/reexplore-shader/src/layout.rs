//! Layout descriptions for host records and their Metal declarations.
//!
//! Each record states its Metal declaration once (`GpuRecord::msl_fields`).
//! From that declaration [`StructLayout::from_msl`] derives the offsets the
//! Metal compiler assigns, and [`GpuRecord::verify_layout`] compares them with
//! the offsets the Rust compiler assigned to the host struct.

use bytemuck::Pod;

use crate::bindings::BufferIndex;
use crate::error::SchemaError;

/// Metal types that appear in shared records.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MslType {
    Float,
    UInt,
    /// A C enum stored as a 32-bit integer; carries the Metal type name.
    Enum(&'static str),
    Float2,
    Float3,
    Float4,
    Float3x3,
    Float4x4,
}

impl MslType {
    pub const fn size(self) -> usize {
        match self {
            Self::Float | Self::UInt | Self::Enum(_) => 4,
            Self::Float2 => 8,
            Self::Float3 | Self::Float4 => 16,
            Self::Float3x3 => 48,
            Self::Float4x4 => 64,
        }
    }

    pub const fn align(self) -> usize {
        match self {
            Self::Float | Self::UInt | Self::Enum(_) => 4,
            Self::Float2 => 8,
            Self::Float3 | Self::Float4 | Self::Float3x3 | Self::Float4x4 => 16,
        }
    }

    /// Spelling used in `simd/simd.h` headers.
    pub const fn msl_name(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::UInt => "uint",
            Self::Enum(name) => name,
            Self::Float2 => "vector_float2",
            Self::Float3 => "vector_float3",
            Self::Float4 => "vector_float4",
            Self::Float3x3 => "matrix_float3x3",
            Self::Float4x4 => "matrix_float4x4",
        }
    }
}

/// Placement of one field inside a record.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: &'static str,
    pub offset: usize,
    pub size: usize,
}

/// Size, alignment and field placement of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructLayout {
    pub name: &'static str,
    pub size: usize,
    pub align: usize,
    pub fields: Vec<FieldLayout>,
}

impl StructLayout {
    /// Lays out a Metal struct declaration the way the Metal compiler does:
    /// each field at the next multiple of its alignment, the struct size
    /// rounded up to its largest field alignment.
    pub fn from_msl(name: &'static str, decl: &[(&'static str, MslType)]) -> Self {
        let mut offset = 0usize;
        let mut align = 1usize;
        let mut fields = Vec::with_capacity(decl.len());

        for &(field, ty) in decl {
            offset = offset.next_multiple_of(ty.align());
            fields.push(FieldLayout { name: field, offset, size: ty.size() });
            offset += ty.size();
            align = align.max(ty.align());
        }

        Self { name, size: offset.next_multiple_of(align), align, fields }
    }

    pub fn field(&self, name: &str) -> Option<&FieldLayout> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// First disagreement between `self` (the Metal side) and `host`.
    pub fn compare(&self, host: &StructLayout) -> Result<(), SchemaError> {
        for (expected, actual) in self.fields.iter().zip(&host.fields) {
            if expected != actual {
                return Err(SchemaError::LayoutMismatch {
                    record: self.name,
                    field: expected.name,
                    expected: (expected.offset, expected.size),
                    actual: (actual.offset, actual.size),
                });
            }
        }
        if self.fields.len() != host.fields.len() {
            return Err(SchemaError::FieldCount {
                record: self.name,
                expected: self.fields.len(),
                actual: host.fields.len(),
            });
        }
        if self.size != host.size {
            return Err(SchemaError::SizeMismatch {
                record: self.name,
                expected: self.size,
                actual: host.size,
            });
        }
        Ok(())
    }
}

/// A host record that crosses the host/GPU boundary.
///
/// Implemented through [`gpu_record!`](crate::gpu_record) so the Metal
/// declaration and the host field list stay side by side.
pub trait GpuRecord: Pod {
    /// Type name in the Metal header.
    const MSL_NAME: &'static str;

    /// Buffer slot the record is bound at.
    const SLOT: BufferIndex;

    /// Emitted as `typedef struct { .. } Name;` when true, `struct Name { .. };` otherwise.
    const MSL_TYPEDEF: bool = true;

    /// Device-side declaration, in field order.
    fn msl_fields() -> &'static [(&'static str, MslType)];

    /// Host-side field placement, in field order.
    fn host_fields() -> Vec<FieldLayout>;

    fn host_layout() -> StructLayout {
        StructLayout {
            name: Self::MSL_NAME,
            size: size_of::<Self>(),
            align: align_of::<Self>(),
            fields: Self::host_fields(),
        }
    }

    fn device_layout() -> StructLayout {
        StructLayout::from_msl(Self::MSL_NAME, Self::msl_fields())
    }

    fn verify_layout() -> Result<(), SchemaError> {
        Self::device_layout().compare(&Self::host_layout())
    }

    /// Upload bytes, exactly `size_of::<Self>()` long.
    fn to_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Reads a record back from bytes in the shared layout.
    ///
    /// `bytes` may be unaligned but must be exactly one record long.
    fn from_bytes(bytes: &[u8]) -> Result<Self, SchemaError> {
        if bytes.len() != size_of::<Self>() {
            return Err(SchemaError::SizeMismatch {
                record: Self::MSL_NAME,
                expected: size_of::<Self>(),
                actual: bytes.len(),
            });
        }
        Ok(bytemuck::pod_read_unaligned(bytes))
    }
}

#[doc(hidden)]
pub fn field_size<T, F>(_project: fn(&T) -> &F) -> usize {
    size_of::<F>()
}

/// Implements [`GpuRecord`] from a field list of
/// `rust_field: "mslName" => MslType`; `slot` names a `BufferIndex` variant.
#[macro_export]
macro_rules! gpu_record {
    (
        $ty:ty as $msl:literal, slot = $slot:ident $(, typedef = $typedef:literal)? {
            $($field:ident : $msl_field:literal => $kind:expr),+ $(,)?
        }
    ) => {
        impl $crate::layout::GpuRecord for $ty {
            const MSL_NAME: &'static str = $msl;
            const SLOT: $crate::bindings::BufferIndex = $crate::bindings::BufferIndex::$slot;
            $(const MSL_TYPEDEF: bool = $typedef;)?

            fn msl_fields() -> &'static [(&'static str, $crate::layout::MslType)] {
                &[$(($msl_field, $kind)),+]
            }

            fn host_fields() -> ::std::vec::Vec<$crate::layout::FieldLayout> {
                ::std::vec![$(
                    $crate::layout::FieldLayout {
                        name: $msl_field,
                        offset: ::core::mem::offset_of!($ty, $field),
                        size: $crate::layout::field_size::<$ty, _>(|r| &r.$field),
                    }
                ),+]
            }
        }
    };
}

/// Checks every record of the schema against its Metal declaration.
pub fn verify_all() -> Result<(), SchemaError> {
    use crate::{FragmentUniforms, Instances, Light, Material, ModelParams, Uniforms};

    Uniforms::verify_layout()?;
    Light::verify_layout()?;
    FragmentUniforms::verify_layout()?;
    Material::verify_layout()?;
    Instances::verify_layout()?;
    ModelParams::verify_layout()?;
    log::debug!("shader interchange layouts verified");
    Ok(())
}
