//! Interleaved vertex format handed to the render backend.

use bytemuck::{Pod, Zeroable};

/// One corner of an emitted foliage quad.
///
/// 3 x position, 3 x normal, 2 x uv, packed RGBA, padded to a 48-byte stride.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct FoliageVertex {
    /// Position in world space [x, y, z].
    pub position: [f32; 3],
    /// Face normal [nx, ny, nz].
    pub normal: [f32; 3],
    /// Texture coordinates [u, v].
    pub uv: [f32; 2],
    /// Color as `0xRRGGBBAA`.
    pub color: u32,
    /// Alignment padding.
    pub _pad: [u32; 3],
}

impl FoliageVertex {
    /// Stride in bytes.
    pub const STRIDE: usize = std::mem::size_of::<Self>();

    /// Vertex attributes for WGPU.
    pub const ATTRIBS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3,  // position
        1 => Float32x3,  // normal
        2 => Float32x2,  // uv
        3 => Uint32,     // color
    ];

    /// Creates a vertex.
    #[inline]
    #[must_use]
    pub const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2], color: u32) -> Self {
        Self {
            position,
            normal,
            uv,
            color,
            _pad: [0; 3],
        }
    }

    /// Vertex buffer layout descriptor.
    #[must_use]
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_stride() {
        // 9 data words plus 3 padding words.
        assert_eq!(FoliageVertex::STRIDE, 48);
        assert_eq!(std::mem::align_of::<FoliageVertex>(), 4);
    }

    #[test]
    fn test_layout_matches_stride() {
        let layout = FoliageVertex::desc();
        assert_eq!(layout.array_stride, 48);
        assert_eq!(layout.attributes.len(), 4);
        assert_eq!(layout.attributes[3].offset, 32);
    }

    #[test]
    fn test_cast_to_bytes() {
        let vertices = [FoliageVertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.5, 0.5], 7); 2];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 96);
    }
}
