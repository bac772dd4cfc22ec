//! CPU-side rectangle mesh, rebuilt every frame and streamed to the GPU.

use crate::vertex::RectVertex;

#[derive(Debug, Default)]
pub struct RectBatch {
    pub vertices: Vec<RectVertex>,
    pub indices: Vec<u32>,
}

impl RectBatch {
    pub fn with_capacity(rect_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(rect_count * 4),
            indices: Vec::with_capacity(rect_count * 6),
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn rect_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Append a filled rectangle given its top-left corner and size.
    pub fn push_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) {
        let base_index = self.vertices.len() as u32;
        let (x1, y1) = (x + width, y + height);

        self.vertices.extend_from_slice(&[
            RectVertex {
                position: [x, y],
                color,
            },
            RectVertex {
                position: [x1, y],
                color,
            },
            RectVertex {
                position: [x1, y1],
                color,
            },
            RectVertex {
                position: [x, y1],
                color,
            },
        ]);
        self.indices.extend_from_slice(&[
            base_index,
            base_index + 1,
            base_index + 2,
            base_index,
            base_index + 2,
            base_index + 3,
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_rect_emits_four_vertices_and_two_triangles() {
        let mut batch = RectBatch::default();
        batch.push_rect(10.0, 20.0, 30.0, 40.0, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(batch.vertices.len(), 4);
        assert_eq!(batch.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(batch.vertices[0].position, [10.0, 20.0]);
        assert_eq!(batch.vertices[2].position, [40.0, 60.0]);
    }

    #[test]
    fn indices_are_offset_per_rect() {
        let mut batch = RectBatch::with_capacity(2);
        batch.push_rect(0.0, 0.0, 1.0, 1.0, [1.0; 4]);
        batch.push_rect(5.0, 5.0, 1.0, 1.0, [1.0; 4]);
        assert_eq!(batch.rect_count(), 2);
        assert_eq!(&batch.indices[6..], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn clear_resets_mesh() {
        let mut batch = RectBatch::default();
        batch.push_rect(0.0, 0.0, 1.0, 1.0, [1.0; 4]);
        batch.clear();
        assert!(batch.is_empty());
        assert_eq!(batch.rect_count(), 0);
    }
}
