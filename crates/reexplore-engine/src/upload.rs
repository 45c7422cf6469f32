//! GPU buffers sized for interchange records.

use std::marker::PhantomData;

use anyhow::{ensure, Result};
use reexplore_shader::{GpuRecord, LightSet};

/// Uniform buffer holding exactly one `T`, bound at `T::SLOT`.
pub struct UniformBuffer<T: GpuRecord> {
    buffer: wgpu::Buffer,
    _record: PhantomData<T>,
}

impl<T: GpuRecord> UniformBuffer<T> {
    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(T::MSL_NAME),
            size: size_of::<T>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self { buffer, _record: PhantomData }
    }

    pub fn write(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(&self.buffer, 0, value.to_bytes());
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn bind_group_entry(&self) -> wgpu::BindGroupEntry<'_> {
        wgpu::BindGroupEntry {
            binding: T::SLOT.index(),
            resource: self.buffer.as_entire_binding(),
        }
    }
}

/// Storage buffer holding up to `capacity` elements of `T`, bound at `T::SLOT`.
pub struct ArrayBuffer<T: GpuRecord> {
    buffer: wgpu::Buffer,
    capacity: usize,
    _record: PhantomData<T>,
}

impl<T: GpuRecord> ArrayBuffer<T> {
    pub fn new(device: &wgpu::Device, capacity: usize) -> Self {
        // wgpu rejects zero-sized storage bindings.
        let capacity = capacity.max(1);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(T::MSL_NAME),
            size: (size_of::<T>() * capacity) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self { buffer, capacity, _record: PhantomData }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Writes `items` from the start of the buffer.
    pub fn write(&self, queue: &wgpu::Queue, items: &[T]) -> Result<()> {
        check_capacity::<T>(self.capacity, items.len())?;
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(items));
        Ok(())
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn bind_group_entry(&self) -> wgpu::BindGroupEntry<'_> {
        wgpu::BindGroupEntry {
            binding: T::SLOT.index(),
            resource: self.buffer.as_entire_binding(),
        }
    }
}

impl ArrayBuffer<reexplore_shader::Light> {
    /// Light array sized for a `LightSet<N>`.
    pub fn for_lights<const N: usize>(device: &wgpu::Device) -> Self {
        Self::new(device, N)
    }

    /// Uploads every slot of `lights`, unused ones included.
    pub fn write_lights<const N: usize>(
        &self,
        queue: &wgpu::Queue,
        lights: &LightSet<N>,
    ) -> Result<()> {
        self.write(queue, lights.slots())
    }
}

fn check_capacity<T: GpuRecord>(capacity: usize, len: usize) -> Result<()> {
    ensure!(len <= capacity, "{} array holds {capacity} elements, got {len}", T::MSL_NAME);
    Ok(())
}

#[cfg(test)]
mod tests {
    use reexplore_shader::{Instances, Light};

    use super::*;

    #[test]
    fn array_write_within_capacity_is_accepted() {
        assert!(check_capacity::<Light>(16, 16).is_ok());
        assert!(check_capacity::<Light>(16, 0).is_ok());
    }

    #[test]
    fn array_write_over_capacity_is_rejected() {
        let err = check_capacity::<Instances>(4, 5).unwrap_err();
        assert_eq!(err.to_string(), "Instances array holds 4 elements, got 5");
    }
}
