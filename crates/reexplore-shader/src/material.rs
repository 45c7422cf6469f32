//! Surface material record.

use bytemuck::{Pod, Zeroable};

use crate::gpu_record;
use crate::layout::MslType;
use crate::simd::Float3;

/// Surface parameters, bound at `BufferIndex::Materials`.
///
/// `shininess` only feeds the legacy Blinn-Phong path; the PBR path reads
/// `roughness`, `metallic` and `ambient_occlusion`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Material {
    pub base_color: Float3,
    pub specular_color: Float3,
    pub roughness: f32,
    pub metallic: f32,
    _pad0: [f32; 2],
    pub ambient_occlusion: Float3,
    pub shininess: f32,
    _pad1: [f32; 3],
}

impl Material {
    pub fn pbr(base_color: Float3, roughness: f32, metallic: f32) -> Self {
        Self {
            base_color,
            roughness,
            metallic,
            ambient_occlusion: Float3::ONE,
            ..Self::zeroed()
        }
    }

    pub fn with_specular(mut self, specular_color: Float3, shininess: f32) -> Self {
        self.specular_color = specular_color;
        self.shininess = shininess;
        self
    }
}

// Unset material properties upload as zero.
impl Default for Material {
    fn default() -> Self {
        Self::zeroed()
    }
}

gpu_record!(Material as "Material", slot = Materials {
    base_color: "baseColor" => MslType::Float3,
    specular_color: "specularColor" => MslType::Float3,
    roughness: "roughness" => MslType::Float,
    metallic: "metallic" => MslType::Float,
    ambient_occlusion: "ambientOcclusion" => MslType::Float3,
    shininess: "shininess" => MslType::Float,
});

const _: () = assert!(size_of::<Material>() == 80);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::GpuRecord;

    #[test]
    fn material_offsets_match_metal() {
        let layout = Material::host_layout();
        let at = |name| layout.field(name).map(|f| f.offset);
        assert_eq!(at("baseColor"), Some(0));
        assert_eq!(at("specularColor"), Some(16));
        assert_eq!(at("roughness"), Some(32));
        assert_eq!(at("metallic"), Some(36));
        assert_eq!(at("ambientOcclusion"), Some(48));
        assert_eq!(at("shininess"), Some(64));
        assert_eq!(Material::verify_layout(), Ok(()));
    }

    #[test]
    fn material_round_trips_through_bytes() {
        let m = Material::pbr(Float3::new(0.8, 0.5, 0.2), 0.35, 1.0)
            .with_specular(Float3::splat(0.04), 32.0);
        let bytes = m.to_bytes().to_vec();
        assert_eq!(f32::from_ne_bytes(bytes[64..68].try_into().unwrap()), 32.0);
        assert_eq!(Material::from_bytes(&bytes), Ok(m));
    }

    #[test]
    fn default_material_is_zero() {
        assert!(Material::default().to_bytes().iter().all(|&b| b == 0));
    }
}
