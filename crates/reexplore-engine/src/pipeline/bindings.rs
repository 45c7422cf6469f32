//! Bind-group-layout entries keyed by the shared slot tables.
//!
//! Binding numbers are the slot values themselves, so a WGSL port of the
//! shaders declares `@binding(n)` with the same numbers the Metal shaders use
//! for `[[buffer(n)]]` / `[[texture(n)]]`.

use std::num::NonZeroU64;

use anyhow::{bail, Result};
use reexplore_shader::{BufferIndex, GpuRecord, TextureSlot};

/// Minimum binding size for one `T`. Records are never zero-sized.
fn record_size<T: GpuRecord>() -> Option<NonZeroU64> {
    NonZeroU64::new(size_of::<T>() as u64)
}

/// Uniform buffer holding a single `T` at `slot`.
pub fn uniform_entry<T: GpuRecord>(
    slot: BufferIndex,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: slot.index(),
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: record_size::<T>(),
        },
        count: None,
    }
}

/// Read-only storage buffer holding an array of `T` at `slot`.
pub fn storage_entry<T: GpuRecord>(
    slot: BufferIndex,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: slot.index(),
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only: true },
            has_dynamic_offset: false,
            min_binding_size: record_size::<T>(),
        },
        count: None,
    }
}

fn texture_entry_at(
    binding: u32,
    sample_type: wgpu::TextureSampleType,
    view_dimension: wgpu::TextureViewDimension,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type,
            view_dimension,
            multisampled: false,
        },
        count: None,
    }
}

/// Filterable 2D fragment texture at `slot`.
pub fn texture_entry(slot: TextureSlot) -> wgpu::BindGroupLayoutEntry {
    texture_entry_at(
        slot.index(),
        wgpu::TextureSampleType::Float { filterable: true },
        wgpu::TextureViewDimension::D2,
    )
}

/// Depth texture for shadow comparison at `slot`.
pub fn shadow_texture_entry(slot: TextureSlot) -> wgpu::BindGroupLayoutEntry {
    texture_entry_at(
        slot.index(),
        wgpu::TextureSampleType::Depth,
        wgpu::TextureViewDimension::D2,
    )
}

/// Fragment texture bound through the buffer table (skybox and BRDF lookup).
pub fn buffer_slot_texture_entry(slot: BufferIndex) -> wgpu::BindGroupLayoutEntry {
    let view_dimension = match slot {
        BufferIndex::Skybox | BufferIndex::SkyboxDiffuse => wgpu::TextureViewDimension::Cube,
        _ => wgpu::TextureViewDimension::D2,
    };
    texture_entry_at(
        slot.index(),
        wgpu::TextureSampleType::Float { filterable: true },
        view_dimension,
    )
}

/// Collects entries for one bind group layout, rejecting reused binding numbers.
///
/// Metal keeps separate buffer and texture tables, so `TextureSlot::Info` and
/// e.g. a vertex stream both use 7; a wgpu bind group has a single table.
#[derive(Debug, Default, Clone)]
pub struct LayoutEntries {
    label: Option<&'static str>,
    entries: Vec<wgpu::BindGroupLayoutEntry>,
}

impl LayoutEntries {
    pub fn new(label: &'static str) -> Self {
        Self { label: Some(label), entries: Vec::new() }
    }

    pub fn push(mut self, entry: wgpu::BindGroupLayoutEntry) -> Result<Self> {
        if let Some(existing) = self.entries.iter().find(|e| e.binding == entry.binding) {
            bail!(
                "{}: binding {} is already used by {:?}",
                self.label.unwrap_or("bind group"),
                entry.binding,
                existing.ty
            );
        }
        self.entries.push(entry);
        Ok(self)
    }

    pub fn entries(&self) -> &[wgpu::BindGroupLayoutEntry] {
        &self.entries
    }

    pub fn descriptor(&self) -> wgpu::BindGroupLayoutDescriptor<'_> {
        wgpu::BindGroupLayoutDescriptor { label: self.label, entries: &self.entries }
    }

    pub fn create(&self, device: &wgpu::Device) -> wgpu::BindGroupLayout {
        log::debug!(
            "creating bind group layout {:?} with bindings {:?}",
            self.label,
            self.entries.iter().map(|e| e.binding).collect::<Vec<_>>()
        );
        device.create_bind_group_layout(&self.descriptor())
    }
}

// ── presets ───────────────────────────────────────────────────────────────

/// Per-frame group: transforms, lights, fragment globals and shadow maps.
pub fn frame_layout_entries() -> Result<LayoutEntries> {
    use reexplore_shader::{FragmentUniforms, Light, Uniforms};

    LayoutEntries::new("reexplore frame")
        .push(uniform_entry::<Uniforms>(
            BufferIndex::Uniforms,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ))?
        .push(storage_entry::<Light>(BufferIndex::Lights, wgpu::ShaderStages::FRAGMENT))?
        .push(uniform_entry::<FragmentUniforms>(
            BufferIndex::FragmentUniforms,
            wgpu::ShaderStages::FRAGMENT,
        ))?
        .push(shadow_texture_entry(TextureSlot::ShadowStatic))?
        .push(shadow_texture_entry(TextureSlot::ShadowDynamic))
}

/// Per-model group: instances, model parameters, material and PBR maps.
pub fn model_layout_entries() -> Result<LayoutEntries> {
    use reexplore_shader::{Instances, Material, ModelParams};

    let mut entries = LayoutEntries::new("reexplore model")
        .push(storage_entry::<Instances>(BufferIndex::Instances, wgpu::ShaderStages::VERTEX))?
        .push(uniform_entry::<ModelParams>(BufferIndex::ModelParams, wgpu::ShaderStages::VERTEX))?
        .push(uniform_entry::<Material>(BufferIndex::Materials, wgpu::ShaderStages::FRAGMENT))?;

    for slot in [
        TextureSlot::BaseColor,
        TextureSlot::Normal,
        TextureSlot::Roughness,
        TextureSlot::Metallic,
        TextureSlot::AO,
    ] {
        entries = entries.push(texture_entry(slot))?;
    }
    Ok(entries)
}

/// Terrain group: map imagery and the track overlays.
pub fn terrain_layout_entries() -> Result<LayoutEntries> {
    LayoutEntries::new("reexplore terrain")
        .push(texture_entry(TextureSlot::Terrain))?
        .push(texture_entry(TextureSlot::UploadTrack))?
        .push(texture_entry(TextureSlot::RecordTrack))?
        .push(texture_entry(TextureSlot::Info))
}

/// Sky group: environment cube maps and the BRDF lookup table.
pub fn skybox_layout_entries() -> Result<LayoutEntries> {
    LayoutEntries::new("reexplore skybox")
        .push(buffer_slot_texture_entry(BufferIndex::Skybox))?
        .push(buffer_slot_texture_entry(BufferIndex::SkyboxDiffuse))?
        .push(buffer_slot_texture_entry(BufferIndex::BRDFLut))
}
