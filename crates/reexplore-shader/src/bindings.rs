//! Slot tables shared by host binding calls and shader declarations.
//!
//! Discriminants are the slot numbers the shaders declare (`[[attribute(n)]]`,
//! `[[texture(n)]]`, `[[buffer(n)]]`). They are spelled out per variant:
//! `BufferIndex` has holes that belong to vertex streams and other
//! declarations, and must not be compacted.

use crate::error::SchemaError;

macro_rules! slot_table {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $msl_type:literal {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal => $msl:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[repr(u32)]
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value,)+
        }

        impl $name {
            /// Every slot, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Enum type name in the Metal header.
            pub const MSL_TYPE: &'static str = $msl_type;

            #[inline]
            pub const fn index(self) -> u32 {
                self as u32
            }

            /// Enumerator name in the Metal header.
            pub const fn msl_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $msl,)+
                }
            }
        }

        impl TryFrom<u32> for $name {
            type Error = SchemaError;

            fn try_from(value: u32) -> Result<Self, SchemaError> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    _ => Err(SchemaError::UnknownSlot { kind: $msl_type, value }),
                }
            }
        }

        impl From<$name> for u32 {
            #[inline]
            fn from(slot: $name) -> u32 {
                slot.index()
            }
        }
    };
}

slot_table! {
    /// Vertex attribute slots (`[[attribute(n)]]`).
    pub enum Attribute as "Attributes" {
        Position = 0 => "Position",
        Normal = 1 => "Normal",
        UV = 2 => "UV",
        Tangent = 3 => "Tangent",
        Bitangent = 4 => "Bitangent",
        Color = 5 => "Color",
        Joints = 6 => "Joints",
        Weights = 7 => "Weights",
    }
}

slot_table! {
    /// Fragment texture slots (`[[texture(n)]]`).
    pub enum TextureSlot as "Textures" {
        BaseColor = 0 => "BaseColorTexture",
        Normal = 1 => "NormalTexture",
        Roughness = 2 => "RoughnessTexture",
        Metallic = 3 => "MetallicTexture",
        AO = 4 => "AOTexture",
        /// Track of an uploaded GPX file drawn over the terrain.
        UploadTrack = 5 => "UploadTrackTexture",
        /// Track being recorded, drawn over the terrain.
        RecordTrack = 6 => "RecordTrackTexture",
        Info = 7 => "InfoTexture",
        Terrain = 8 => "TerrainTexture",
        ShadowStatic = 9 => "ShadowStaticTexture",
        ShadowDynamic = 10 => "ShadowDynamicTexture",
    }
}

slot_table! {
    /// Buffer slots (`[[buffer(n)]]`).
    ///
    /// `Skybox`, `SkyboxDiffuse` and `BRDFLut` share this table but are bound
    /// as fragment textures.
    pub enum BufferIndex as "BufferIndices" {
        Vertices = 0 => "BufferIndexVertices",
        Uniforms = 11 => "BufferIndexUniforms",
        Lights = 12 => "BufferIndexLights",
        FragmentUniforms = 13 => "BufferIndexFragmentUniforms",
        Materials = 14 => "BufferIndexMaterials",
        Instances = 15 => "BufferIndexInstances",
        ModelParams = 17 => "BufferIndexModelParams",
        Skybox = 20 => "BufferIndexSkybox",
        SkyboxDiffuse = 21 => "BufferIndexSkyboxDiffuse",
        BRDFLut = 22 => "BufferIndexBRDFLut",
    }
}

impl BufferIndex {
    /// Values inside the table's range that no slot may take.
    ///
    /// Extra vertex streams use the low ones (tangents in 1, bitangents in 2).
    pub const RESERVED: &'static [u32] = &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 16, 18, 19];

    pub const fn is_reserved(value: u32) -> bool {
        let mut i = 0;
        while i < Self::RESERVED.len() {
            if Self::RESERVED[i] == value {
                return true;
            }
            i += 1;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn values<T: Copy + Into<u32>>(all: &[T]) -> Vec<u32> {
        all.iter().map(|&s| s.into()).collect()
    }

    #[test]
    fn attribute_values() {
        assert_eq!(values(Attribute::ALL), [0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(Attribute::Weights.index(), 7);
        assert_eq!(Attribute::UV.msl_name(), "UV");
    }

    #[test]
    fn texture_values() {
        assert_eq!(values(TextureSlot::ALL), (0..=10u32).collect::<Vec<_>>());
        assert_eq!(TextureSlot::UploadTrack.index(), 5);
        assert_eq!(TextureSlot::RecordTrack.index(), 6);
        assert_eq!(TextureSlot::ShadowDynamic.index(), 10);
        assert_eq!(TextureSlot::AO.msl_name(), "AOTexture");
    }

    #[test]
    fn buffer_index_values() {
        assert_eq!(values(BufferIndex::ALL), [0, 11, 12, 13, 14, 15, 17, 20, 21, 22]);
        assert_eq!(BufferIndex::ModelParams.index(), 17);
        assert_eq!(BufferIndex::BRDFLut.msl_name(), "BufferIndexBRDFLut");
    }

    #[test]
    fn buffer_index_gaps_stay_unassigned() {
        for &gap in BufferIndex::RESERVED {
            assert!(BufferIndex::try_from(gap).is_err(), "{gap} must stay reserved");
            assert!(BufferIndex::is_reserved(gap));
        }
        for &slot in BufferIndex::ALL {
            assert!(!BufferIndex::is_reserved(slot.index()));
        }
    }

    #[test]
    fn no_two_slots_share_a_value() {
        fn distinct(v: Vec<u32>) -> bool {
            v.iter().collect::<HashSet<_>>().len() == v.len()
        }
        assert!(distinct(values(Attribute::ALL)));
        assert!(distinct(values(TextureSlot::ALL)));
        assert!(distinct(values(BufferIndex::ALL)));
    }

    #[test]
    fn try_from_round_trips_every_slot() {
        for &slot in BufferIndex::ALL {
            assert_eq!(BufferIndex::try_from(slot.index()), Ok(slot));
        }
        for &slot in TextureSlot::ALL {
            assert_eq!(TextureSlot::try_from(slot.index()), Ok(slot));
        }
        for &slot in Attribute::ALL {
            assert_eq!(Attribute::try_from(slot.index()), Ok(slot));
        }
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert_eq!(
            Attribute::try_from(8),
            Err(SchemaError::UnknownSlot { kind: "Attributes", value: 8 })
        );
        assert!(TextureSlot::try_from(11).is_err());
        assert!(BufferIndex::try_from(23).is_err());
    }
}
