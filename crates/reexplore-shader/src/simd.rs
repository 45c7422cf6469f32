//! Host mirrors of the Metal `simd` vector and matrix types.
//!
//! Metal pads `vector_float3` to 16 bytes and aligns it like a `float4`;
//! `matrix_float3x3` is three such padded columns. The types here spell that
//! padding out as real fields so every record built from them is `Pod`.
//!
//! Matrices are column-major, like both `simd` and `glam`.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

/// `vector_float2`: 8 bytes, 8-byte aligned.
#[repr(C, align(8))]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Float2 {
    pub x: f32,
    pub y: f32,
}

impl Float2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// `vector_float3`: 12 bytes of data in a 16-byte, 16-aligned slot.
#[repr(C, align(16))]
#[derive(Debug, Copy, Clone, Default, Pod, Zeroable)]
pub struct Float3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    _pad: f32,
}

impl Float3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, _pad: 0.0 }
    }

    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

// The padding lane is not part of the value.
impl PartialEq for Float3 {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }
}

/// `vector_float4`: 16 bytes, 16-byte aligned.
#[repr(C, align(16))]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Float4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Float4 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    #[inline]
    pub const fn xyz(self) -> Float3 {
        Float3::new(self.x, self.y, self.z)
    }
}

/// `matrix_float3x3`: three padded columns, 48 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Float3x3 {
    pub columns: [Float3; 3],
}

impl Float3x3 {
    pub const IDENTITY: Self = Self {
        columns: [
            Float3::new(1.0, 0.0, 0.0),
            Float3::new(0.0, 1.0, 0.0),
            Float3::new(0.0, 0.0, 1.0),
        ],
    };

    #[inline]
    pub const fn from_columns(x: Float3, y: Float3, z: Float3) -> Self {
        Self { columns: [x, y, z] }
    }

    /// Matrix that transforms normals correctly under `model`.
    ///
    /// This is the inverse-transpose of the model's upper-left 3x3 block, so
    /// normals stay perpendicular to surfaces under non-uniform scale. A
    /// singular block has no inverse; the plain upper-left block is returned
    /// in that case. Singularity is judged relative to the column lengths, so
    /// small but invertible scales still get a true inverse.
    pub fn normal_from(model: &Float4x4) -> Self {
        let upper = Mat3::from_mat4(Mat4::from(*model));
        let det = upper.determinant();
        let volume = upper.x_axis.length() * upper.y_axis.length() * upper.z_axis.length();
        if det.abs() <= f32::EPSILON * volume || !det.is_finite() {
            log::debug!("normal matrix: singular model transform (det = {det}), using upper-left block");
            return upper.into();
        }
        let normal = upper.inverse().transpose();
        if !normal.is_finite() {
            log::debug!("normal matrix: inverse overflowed, using upper-left block");
            return upper.into();
        }
        normal.into()
    }
}

impl Default for Float3x3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// `matrix_float4x4`: four `Float4` columns, 64 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Float4x4 {
    pub columns: [Float4; 4],
}

impl Float4x4 {
    pub const IDENTITY: Self = Self {
        columns: [
            Float4::new(1.0, 0.0, 0.0, 0.0),
            Float4::new(0.0, 1.0, 0.0, 0.0),
            Float4::new(0.0, 0.0, 1.0, 0.0),
            Float4::new(0.0, 0.0, 0.0, 1.0),
        ],
    };

    #[inline]
    pub const fn from_columns(x: Float4, y: Float4, z: Float4, w: Float4) -> Self {
        Self { columns: [x, y, z, w] }
    }

    /// Upper-left 3x3 block, without inversion.
    #[inline]
    pub const fn upper_left(&self) -> Float3x3 {
        Float3x3::from_columns(
            self.columns[0].xyz(),
            self.columns[1].xyz(),
            self.columns[2].xyz(),
        )
    }
}

impl Default for Float4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ── glam / array conversions ─────────────────────────────────────────────

impl From<Vec2> for Float2 {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Float2> for Vec2 {
    fn from(v: Float2) -> Self {
        Vec2::new(v.x, v.y)
    }
}

impl From<[f32; 3]> for Float3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vec3> for Float3 {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Float3> for Vec3 {
    fn from(v: Float3) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

impl From<Vec4> for Float4 {
    fn from(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Float4> for Vec4 {
    fn from(v: Float4) -> Self {
        Vec4::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Mat3> for Float3x3 {
    fn from(m: Mat3) -> Self {
        Self::from_columns(m.x_axis.into(), m.y_axis.into(), m.z_axis.into())
    }
}

impl From<Float3x3> for Mat3 {
    fn from(m: Float3x3) -> Self {
        let [x, y, z] = m.columns;
        Mat3::from_cols(x.into(), y.into(), z.into())
    }
}

impl From<Mat4> for Float4x4 {
    fn from(m: Mat4) -> Self {
        Self::from_columns(m.x_axis.into(), m.y_axis.into(), m.z_axis.into(), m.w_axis.into())
    }
}

impl From<Float4x4> for Mat4 {
    fn from(m: Float4x4) -> Self {
        let [x, y, z, w] = m.columns;
        Mat4::from_cols(x.into(), y.into(), z.into(), w.into())
    }
}

impl From<[[f32; 4]; 4]> for Float4x4 {
    fn from(cols: [[f32; 4]; 4]) -> Self {
        Mat4::from_cols_array_2d(&cols).into()
    }
}

const _: () = {
    assert!(size_of::<Float2>() == 8 && align_of::<Float2>() == 8);
    assert!(size_of::<Float3>() == 16 && align_of::<Float3>() == 16);
    assert!(size_of::<Float4>() == 16 && align_of::<Float4>() == 16);
    assert!(size_of::<Float3x3>() == 48 && align_of::<Float3x3>() == 16);
    assert!(size_of::<Float4x4>() == 64 && align_of::<Float4x4>() == 16);
};
