//! Per-draw, per-frame and per-instance transform records.

use bytemuck::{Pod, Zeroable};

use crate::gpu_record;
use crate::layout::MslType;
use crate::simd::{Float3, Float3x3, Float4x4};

// ── vertex-stage uniforms ─────────────────────────────────────────────────

/// Per-draw transforms, bound at `BufferIndex::Uniforms`.
///
/// Invariant: `normal_matrix` is the inverse-transpose of the upper 3x3 of
/// `model_matrix`. Assign the model through [`Uniforms::set_model_matrix`]
/// to keep it.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
    pub model_matrix: Float4x4,
    pub view_matrix: Float4x4,
    pub projection_matrix: Float4x4,
    pub normal_matrix: Float3x3,
    /// Light-space projection of the static shadow caster pass.
    pub shadow_matrix_static: Float4x4,
    /// Light-space projection of the dynamic shadow caster pass.
    pub shadow_matrix_dynamic: Float4x4,
}

impl Uniforms {
    pub fn new(view_matrix: Float4x4, projection_matrix: Float4x4) -> Self {
        Self { view_matrix, projection_matrix, ..Self::default() }
    }

    /// Sets the model matrix and recomputes the normal matrix from it.
    pub fn set_model_matrix(&mut self, model: Float4x4) {
        self.model_matrix = model;
        self.normal_matrix = Float3x3::normal_from(&model);
    }

    pub fn with_model_matrix(mut self, model: Float4x4) -> Self {
        self.set_model_matrix(model);
        self
    }
}

impl Default for Uniforms {
    fn default() -> Self {
        Self {
            model_matrix: Float4x4::IDENTITY,
            view_matrix: Float4x4::IDENTITY,
            projection_matrix: Float4x4::IDENTITY,
            normal_matrix: Float3x3::IDENTITY,
            shadow_matrix_static: Float4x4::IDENTITY,
            shadow_matrix_dynamic: Float4x4::IDENTITY,
        }
    }
}

gpu_record!(Uniforms as "Uniforms", slot = Uniforms {
    model_matrix: "modelMatrix" => MslType::Float4x4,
    view_matrix: "viewMatrix" => MslType::Float4x4,
    projection_matrix: "projectionMatrix" => MslType::Float4x4,
    normal_matrix: "normalMatrix" => MslType::Float3x3,
    shadow_matrix_static: "shadowMatrixStatic" => MslType::Float4x4,
    shadow_matrix_dynamic: "shadowMatrixDynamic" => MslType::Float4x4,
});

// ── fragment-stage uniforms ───────────────────────────────────────────────

/// Per-frame fragment globals, bound at `BufferIndex::FragmentUniforms`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FragmentUniforms {
    /// Number of leading entries of the light array the shader reads.
    pub light_count: u32,
    _pad0: [u32; 3],
    pub camera_position: Float3,
    /// Texture repetition factor of the model being drawn.
    pub tiling: u32,
    _pad1: [u32; 3],
}

impl FragmentUniforms {
    pub const fn new(light_count: u32, camera_position: Float3, tiling: u32) -> Self {
        Self { light_count, _pad0: [0; 3], camera_position, tiling, _pad1: [0; 3] }
    }

    /// Copy with the tiling of the model about to be drawn.
    pub const fn with_tiling(mut self, tiling: u32) -> Self {
        self.tiling = tiling;
        self
    }
}

impl Default for FragmentUniforms {
    fn default() -> Self {
        Self::new(0, Float3::ZERO, 1)
    }
}

gpu_record!(FragmentUniforms as "FragmentUniforms", slot = FragmentUniforms {
    light_count: "lightCount" => MslType::UInt,
    camera_position: "cameraPosition" => MslType::Float3,
    tiling: "tiling" => MslType::UInt,
});

// ── instancing ────────────────────────────────────────────────────────────

/// One element of the instance array at `BufferIndex::Instances`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Instances {
    pub model_matrix: Float4x4,
    pub normal_matrix: Float3x3,
}

impl Instances {
    pub fn new(model_matrix: Float4x4) -> Self {
        Self { model_matrix, normal_matrix: Float3x3::normal_from(&model_matrix) }
    }
}

impl Default for Instances {
    fn default() -> Self {
        Self { model_matrix: Float4x4::IDENTITY, normal_matrix: Float3x3::IDENTITY }
    }
}

gpu_record!(Instances as "Instances", slot = Instances, typedef = false {
    model_matrix: "modelMatrix" => MslType::Float4x4,
    normal_matrix: "normalMatrix" => MslType::Float3x3,
});

// ── model parameters ──────────────────────────────────────────────────────

/// Per-model transform and tiling, bound at `BufferIndex::ModelParams`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ModelParams {
    pub model_matrix: Float4x4,
    pub tiling: u32,
    _pad: [u32; 3],
}

impl ModelParams {
    pub const fn new(model_matrix: Float4x4, tiling: u32) -> Self {
        Self { model_matrix, tiling, _pad: [0; 3] }
    }
}

impl Default for ModelParams {
    fn default() -> Self {
        Self::new(Float4x4::IDENTITY, 1)
    }
}

gpu_record!(ModelParams as "ModelParams", slot = ModelParams {
    model_matrix: "modelMatrix" => MslType::Float4x4,
    tiling: "tiling" => MslType::UInt,
});

const _: () = {
    assert!(size_of::<Uniforms>() == 368);
    assert!(size_of::<FragmentUniforms>() == 48);
    assert!(size_of::<Instances>() == 112);
    assert!(size_of::<ModelParams>() == 80);
};

#[cfg(test)]
mod tests {
    use glam::{Mat3, Mat4, Vec3};

    use super::*;
    use crate::layout::GpuRecord;

    fn offsets<T: GpuRecord>() -> Vec<(&'static str, usize)> {
        T::host_layout().fields.iter().map(|f| (f.name, f.offset)).collect()
    }

    #[test]
    fn uniforms_offsets() {
        assert_eq!(
            offsets::<Uniforms>(),
            [
                ("modelMatrix", 0),
                ("viewMatrix", 64),
                ("projectionMatrix", 128),
                ("normalMatrix", 192),
                ("shadowMatrixStatic", 240),
                ("shadowMatrixDynamic", 304),
            ]
        );
        assert_eq!(Uniforms::device_layout(), Uniforms::host_layout());
    }

    #[test]
    fn fragment_uniforms_offsets() {
        assert_eq!(
            offsets::<FragmentUniforms>(),
            [("lightCount", 0), ("cameraPosition", 16), ("tiling", 32)]
        );
        assert_eq!(FragmentUniforms::device_layout(), FragmentUniforms::host_layout());
    }

    #[test]
    fn instances_and_model_params_offsets() {
        assert_eq!(offsets::<Instances>(), [("modelMatrix", 0), ("normalMatrix", 64)]);
        assert_eq!(offsets::<ModelParams>(), [("modelMatrix", 0), ("tiling", 64)]);
        assert_eq!(Instances::device_layout(), Instances::host_layout());
        assert_eq!(ModelParams::device_layout(), ModelParams::host_layout());
    }

    #[test]
    fn set_model_matrix_keeps_normal_matrix_in_sync() {
        let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 0.5));
        let mut u = Uniforms::default();
        u.set_model_matrix(model.into());

        let expected = Mat3::from_mat4(model).inverse().transpose();
        assert!(Mat3::from(u.normal_matrix).abs_diff_eq(expected, 1e-6));
        assert_eq!(Mat4::from(u.model_matrix), model);
    }

    #[test]
    fn uniforms_round_trip_through_bytes() {
        let u = Uniforms {
            view_matrix: Mat4::from_translation(Vec3::new(0.0, -2.0, 5.0)).into(),
            projection_matrix: Mat4::perspective_lh(1.0, 1.5, 0.1, 400.0).into(),
            shadow_matrix_static: Mat4::orthographic_lh(-8.0, 8.0, -8.0, 8.0, 0.1, 400.0).into(),
            shadow_matrix_dynamic: Mat4::from_rotation_x(0.3).into(),
            ..Uniforms::default()
        }
        .with_model_matrix(Mat4::from_rotation_y(1.2).into());

        let bytes = u.to_bytes().to_vec();
        assert_eq!(bytes.len(), 368);
        assert_eq!(Uniforms::from_bytes(&bytes), Ok(u));
    }

    #[test]
    fn fragment_uniforms_bytes_place_fields_at_metal_offsets() {
        let f = FragmentUniforms::new(3, Float3::new(1.0, 2.0, 3.0), 1).with_tiling(16);
        let bytes = f.to_bytes();
        assert_eq!(u32::from_ne_bytes(bytes[0..4].try_into().unwrap()), 3);
        assert_eq!(f32::from_ne_bytes(bytes[20..24].try_into().unwrap()), 2.0);
        assert_eq!(u32::from_ne_bytes(bytes[32..36].try_into().unwrap()), 16);
        assert_eq!(FragmentUniforms::from_bytes(bytes), Ok(f));
    }

    #[test]
    fn from_bytes_rejects_wrong_length() {
        let err = ModelParams::from_bytes(&[0u8; 64]).unwrap_err();
        assert_eq!(
            err,
            crate::SchemaError::SizeMismatch { record: "ModelParams", expected: 80, actual: 64 }
        );
    }

    #[test]
    fn instance_derives_normal_matrix() {
        let model = Mat4::from_scale(Vec3::new(1.0, 3.0, 1.0));
        let inst = Instances::new(model.into());
        let n: Mat3 = inst.normal_matrix.into();
        assert!((n.y_axis.y - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn instances_round_trip_through_bytes() {
        let model = Mat4::from_scale_rotation_translation(
            Vec3::new(2.0, 0.5, 1.0),
            glam::Quat::from_rotation_y(0.8),
            Vec3::new(-3.0, 0.0, 12.0),
        );
        let inst = Instances::new(model.into());

        let bytes = inst.to_bytes().to_vec();
        assert_eq!(bytes.len(), 112);
        assert_eq!(f32::from_ne_bytes(bytes[48..52].try_into().unwrap()), -3.0);
        assert_eq!(Instances::from_bytes(&bytes), Ok(inst));
    }

    #[test]
    fn model_params_round_trip_through_bytes() {
        let params = ModelParams::new(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)).into(), 8);

        let bytes = params.to_bytes().to_vec();
        assert_eq!(bytes.len(), 80);
        assert_eq!(u32::from_ne_bytes(bytes[64..68].try_into().unwrap()), 8);
        assert_eq!(ModelParams::from_bytes(&bytes), Ok(params));
    }

    #[test]
    fn model_params_default_tiling_is_one() {
        assert_eq!(ModelParams::default().tiling, 1);
        assert_eq!(FragmentUniforms::default().tiling, 1);
    }
}
