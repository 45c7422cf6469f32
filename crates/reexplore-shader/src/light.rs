//! Light records and the fixed-capacity light array.

use std::fmt;

use bytemuck::{Pod, Zeroable};

use crate::error::SchemaError;
use crate::gpu_record;
use crate::layout::MslType;
use crate::simd::Float3;

/// Capacity of the light array the fragment shaders are compiled against.
pub const MAX_LIGHTS: usize = 16;

/// Discriminant of a [`Light`].
///
/// Stored as a raw `u32` because the value comes from GPU-visible memory;
/// anything outside the named constants is carried through unchanged.
#[repr(transparent)]
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct LightType(pub u32);

impl LightType {
    /// Inactive slot. Zeroed memory reads as this value.
    pub const UNUSED: Self = Self(0);
    pub const SUNLIGHT: Self = Self(1);
    pub const SPOTLIGHT: Self = Self(2);
    pub const POINTLIGHT: Self = Self(3);
    pub const AMBIENTLIGHT: Self = Self(4);

    pub const ALL: [Self; 5] =
        [Self::UNUSED, Self::SUNLIGHT, Self::SPOTLIGHT, Self::POINTLIGHT, Self::AMBIENTLIGHT];

    pub const MSL_TYPE: &'static str = "LightType";

    /// Enumerator name in the Metal header.
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("unused"),
            1 => Some("Sunlight"),
            2 => Some("Spotlight"),
            3 => Some("Pointlight"),
            4 => Some("Ambientlight"),
            _ => None,
        }
    }

    pub const fn is_known(self) -> bool {
        self.name().is_some()
    }
}

impl fmt::Debug for LightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "LightType::{name}"),
            None => write!(f, "LightType({})", self.0),
        }
    }
}

/// One light source, element of the array at `BufferIndex::Lights`.
///
/// `cone_angle`, `cone_direction` and `cone_attenuation` are only read for
/// spotlights.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Light {
    pub position: Float3,
    pub color: Float3,
    pub specular_color: Float3,
    pub intensity: f32,
    _pad0: [f32; 3],
    /// Constant, linear and quadratic attenuation terms.
    pub attenuation: Float3,
    pub light_type: LightType,
    pub cone_angle: f32,
    _pad1: [f32; 2],
    pub cone_direction: Float3,
    pub cone_attenuation: f32,
    _pad2: [f32; 3],
}

impl Light {
    /// White sunlight at the origin with intensity 0.6 and no falloff.
    pub fn default_light() -> Self {
        Self {
            position: Float3::ZERO,
            color: Float3::ONE,
            specular_color: Float3::ONE,
            intensity: 0.6,
            attenuation: Float3::new(1.0, 0.0, 0.0),
            light_type: LightType::SUNLIGHT,
            ..Self::zeroed()
        }
    }

    pub fn sunlight(position: Float3) -> Self {
        Self { position, ..Self::default_light() }
    }

    pub fn point(position: Float3, color: Float3, attenuation: Float3) -> Self {
        Self {
            position,
            color,
            attenuation,
            light_type: LightType::POINTLIGHT,
            ..Self::default_light()
        }
    }

    /// `cone_angle` is in radians.
    pub fn spot(
        position: Float3,
        color: Float3,
        cone_direction: Float3,
        cone_angle: f32,
        cone_attenuation: f32,
    ) -> Self {
        Self {
            position,
            color,
            cone_direction,
            cone_angle,
            cone_attenuation,
            light_type: LightType::SPOTLIGHT,
            ..Self::default_light()
        }
    }

    pub fn ambient(color: Float3, intensity: f32) -> Self {
        Self { color, intensity, light_type: LightType::AMBIENTLIGHT, ..Self::default_light() }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.light_type != LightType::UNUSED
    }
}

gpu_record!(Light as "Light", slot = Lights {
    position: "position" => MslType::Float3,
    color: "color" => MslType::Float3,
    specular_color: "specularColor" => MslType::Float3,
    intensity: "intensity" => MslType::Float,
    attenuation: "attenuation" => MslType::Float3,
    light_type: "type" => MslType::Enum(LightType::MSL_TYPE),
    cone_angle: "coneAngle" => MslType::Float,
    cone_direction: "coneDirection" => MslType::Float3,
    cone_attenuation: "coneAttenuation" => MslType::Float,
});

const _: () = assert!(size_of::<Light>() == 128);

// ── light array ───────────────────────────────────────────────────────────

/// Fixed-capacity light array as uploaded to the GPU.
///
/// All `N` slots are always uploaded; unfilled slots stay zeroed and so read
/// as [`LightType::UNUSED`]. Lights are packed at the front, so `len()` is
/// the `light_count` for [`FragmentUniforms`](crate::FragmentUniforms).
#[derive(Debug, Clone)]
pub struct LightSet<const N: usize = MAX_LIGHTS> {
    lights: [Light; N],
    len: usize,
}

impl<const N: usize> LightSet<N> {
    pub fn new() -> Self {
        Self { lights: [Light::zeroed(); N], len: 0 }
    }

    /// The scene lighting the renderer starts with: one sun above the terrain.
    pub fn with_default_sun() -> Result<Self, SchemaError> {
        let mut set = Self::new();
        set.push(Light::sunlight(Float3::new(3.0, 2.0, 0.0)))?;
        Ok(set)
    }

    /// Appends a light, returning its slot.
    ///
    /// `UNUSED` lights are rejected with [`SchemaError::UnusedLight`] so the
    /// first `light_count` slots are all lights the shader should evaluate.
    pub fn push(&mut self, light: Light) -> Result<usize, SchemaError> {
        if self.len == N {
            return Err(SchemaError::LightCapacity { capacity: N });
        }
        if !light.is_active() {
            log::warn!("refusing unused light for slot {}", self.len);
            return Err(SchemaError::UnusedLight { slot: self.len });
        }
        self.lights[self.len] = light;
        self.len += 1;
        Ok(self.len - 1)
    }

    pub fn clear(&mut self) {
        self.lights = [Light::zeroed(); N];
        self.len = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of filled slots whose type is not `UNUSED`.
    pub fn active_count(&self) -> usize {
        self.iter().filter(|l| l.is_active()).count()
    }

    /// Value for `FragmentUniforms::light_count`.
    pub fn light_count(&self) -> u32 {
        self.len as u32
    }

    pub fn iter(&self) -> impl Iterator<Item = &Light> {
        self.lights[..self.len].iter()
    }

    /// Every slot, filled or not.
    pub fn slots(&self) -> &[Light] {
        &self.lights
    }

    /// Upload bytes covering all `N` slots.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lights[..])
    }
}

impl<const N: usize> Default for LightSet<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::GpuRecord;

    #[test]
    fn light_type_values() {
        assert_eq!(LightType::UNUSED.0, 0);
        assert_eq!(LightType::SUNLIGHT.0, 1);
        assert_eq!(LightType::SPOTLIGHT.0, 2);
        assert_eq!(LightType::POINTLIGHT.0, 3);
        assert_eq!(LightType::AMBIENTLIGHT.0, 4);
        assert_eq!(LightType::default(), LightType::UNUSED);
    }

    #[test]
    fn unknown_light_type_is_carried_through() {
        let t = LightType(9);
        assert!(!t.is_known());
        assert_eq!(format!("{t:?}"), "LightType(9)");
        assert_eq!(format!("{:?}", LightType::SPOTLIGHT), "LightType::Spotlight");
    }

    #[test]
    fn zeroed_light_is_unused() {
        let light = Light::zeroed();
        assert_eq!(light.light_type, LightType::UNUSED);
        assert!(!light.is_active());
    }

    #[test]
    fn light_offsets_match_metal() {
        let host = Light::host_layout();
        let offsets: Vec<_> = host.fields.iter().map(|f| (f.name, f.offset)).collect();
        assert_eq!(
            offsets,
            [
                ("position", 0),
                ("color", 16),
                ("specularColor", 32),
                ("intensity", 48),
                ("attenuation", 64),
                ("type", 80),
                ("coneAngle", 84),
                ("coneDirection", 96),
                ("coneAttenuation", 112),
            ]
        );
        assert_eq!(host.size, 128);
        assert_eq!(Light::verify_layout(), Ok(()));
    }

    #[test]
    fn default_light_matches_scene_defaults() {
        let l = Light::default_light();
        assert_eq!(l.color, Float3::ONE);
        assert_eq!(l.specular_color, Float3::ONE);
        assert_eq!(l.intensity, 0.6);
        assert_eq!(l.attenuation, Float3::new(1.0, 0.0, 0.0));
        assert_eq!(l.light_type, LightType::SUNLIGHT);
    }

    #[test]
    fn spotlight_round_trips_through_bytes() {
        let l = Light::spot(
            Float3::new(0.0, 10.0, -3.0),
            Float3::new(1.0, 0.9, 0.7),
            Float3::new(0.0, -1.0, 0.0),
            0.6,
            12.0,
        );
        let bytes = l.to_bytes();
        assert_eq!(u32::from_ne_bytes(bytes[80..84].try_into().unwrap()), 2);
        assert_eq!(Light::from_bytes(bytes), Ok(l));
    }

    #[test]
    fn light_set_starts_all_unused() {
        let set = LightSet::<4>::new();
        assert!(set.is_empty());
        assert!(set.slots().iter().all(|l| l.light_type == LightType::UNUSED));
        assert!(set.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(set.as_bytes().len(), 4 * 128);
    }

    #[test]
    fn light_set_push_until_full() {
        let mut set = LightSet::<2>::new();
        assert_eq!(set.push(Light::default_light()), Ok(0));
        assert_eq!(set.push(Light::ambient(Float3::splat(0.2), 0.1)), Ok(1));
        assert_eq!(
            set.push(Light::default_light()),
            Err(SchemaError::LightCapacity { capacity: 2 })
        );
        assert_eq!(set.light_count(), 2);
        assert_eq!(set.active_count(), 2);
    }

    #[test]
    fn push_rejects_unused_light() {
        let mut set = LightSet::<3>::new();
        set.push(Light::default_light()).unwrap();
        assert_eq!(set.push(Light::zeroed()), Err(SchemaError::UnusedLight { slot: 1 }));
        assert_eq!(set.len(), 1);
        assert_eq!(set.light_count(), 1);
        assert_eq!(set.active_count(), 1);
        assert_eq!(set.slots()[1].light_type, LightType::UNUSED);

        assert_eq!(set.push(Light::ambient(Float3::splat(0.2), 0.1)), Ok(1));
        assert_eq!(set.light_count(), 2);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.active_count(), 0);
    }

    #[test]
    fn default_sun_set() {
        let set: LightSet = LightSet::with_default_sun().unwrap();
        assert_eq!(set.capacity(), MAX_LIGHTS);
        assert_eq!(set.light_count(), 1);
        let sun = set.iter().next().unwrap();
        assert_eq!(sun.position, Float3::new(3.0, 2.0, 0.0));
        assert_eq!(sun.light_type, LightType::SUNLIGHT);
    }
}
