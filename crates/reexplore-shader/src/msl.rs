//! Metal header generated from the host declarations.
//!
//! The shaders include the emitted header, so the device side of every record
//! and slot table is produced from the same source as the host side.

use std::fmt::{self, Write};

use crate::bindings::{Attribute, BufferIndex, TextureSlot};
use crate::layout::GpuRecord;
use crate::light::LightType;
use crate::{FragmentUniforms, Instances, Light, Material, ModelParams, Uniforms};

const GUARD: &str = "Common_h";

/// Renders the complete shared header (`Common.h`).
pub fn metal_header() -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_header(&mut out);
    out
}

/// Writes the shared header into `out`.
pub fn write_header(out: &mut impl Write) -> fmt::Result {
    writeln!(out, "// Generated by reexplore-shader. Do not edit.")?;
    writeln!(out, "#ifndef {GUARD}")?;
    writeln!(out, "#define {GUARD}")?;
    writeln!(out, "#import <simd/simd.h>")?;

    write_record::<Uniforms>(out)?;
    write_enum(
        out,
        LightType::MSL_TYPE,
        LightType::ALL.iter().filter_map(|t| t.name().map(|n| (n, t.0))),
    )?;
    write_record::<Light>(out)?;
    write_record::<FragmentUniforms>(out)?;
    write_enum(out, Attribute::MSL_TYPE, Attribute::ALL.iter().map(|a| (a.msl_name(), a.index())))?;
    write_enum(
        out,
        TextureSlot::MSL_TYPE,
        TextureSlot::ALL.iter().map(|t| (t.msl_name(), t.index())),
    )?;
    write_enum(
        out,
        BufferIndex::MSL_TYPE,
        BufferIndex::ALL.iter().map(|b| (b.msl_name(), b.index())),
    )?;
    write_record::<Material>(out)?;
    write_record::<Instances>(out)?;
    write_record::<ModelParams>(out)?;

    writeln!(out)?;
    writeln!(out, "#endif")
}

/// Writes one record declaration.
pub fn write_record<T: GpuRecord>(out: &mut impl Write) -> fmt::Result {
    writeln!(out)?;
    if T::MSL_TYPEDEF {
        writeln!(out, "typedef struct {{")?;
    } else {
        writeln!(out, "struct {} {{", T::MSL_NAME)?;
    }
    for (name, ty) in T::msl_fields() {
        writeln!(out, "    {} {};", ty.msl_name(), name)?;
    }
    if T::MSL_TYPEDEF {
        writeln!(out, "}} {};", T::MSL_NAME)
    } else {
        writeln!(out, "}};")
    }
}

/// Writes one enum declaration with explicit values.
pub fn write_enum<'a>(
    out: &mut impl Write,
    name: &str,
    values: impl IntoIterator<Item = (&'a str, u32)>,
) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "typedef enum {{")?;
    let values: Vec<_> = values.into_iter().collect();
    for (i, (enumerator, value)) in values.iter().enumerate() {
        let sep = if i + 1 == values.len() { "" } else { "," };
        writeln!(out, "    {enumerator} = {value}{sep}")?;
    }
    writeln!(out, "}} {name};")
}
