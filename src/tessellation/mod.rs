mod normals;
mod tessellate_icosahedron;
mod tessellate_tube;

pub use tessellate_icosahedron::TessellateIcosahedron;
pub use tessellate_tube::{TessellateTube, TubeParams};

use crate::error::{Result, TessellationError};
use crate::math::{Point3, Vector3};

/// Index value that breaks a triangle strip into disjoint runs.
pub const RESTART_INDEX: u32 = u32::MAX;

/// How the index buffer of a [`Mesh`] is assembled into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Each index after the first two forms a triangle with the previous
    /// two. [`RESTART_INDEX`] starts a new strip.
    TriangleStrip,
    /// Every three indices form an independent triangle.
    TriangleList,
}

/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// White.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    /// Dark brown used for branches.
    pub const BARK: Self = Self::from_u8(54, 43, 20);
    /// Dark green used for leaves.
    pub const FOLIAGE: Self = Self::from_u8(43, 79, 14);

    /// Creates a color from floating-point channels.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from 8-bit channels.
    #[allow(clippy::cast_lossless)]
    #[must_use]
    pub const fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }
}

/// An indexed triangle mesh with per-vertex position, normal and color.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Vertex positions.
    pub positions: Vec<Point3>,
    /// Vertex normals (unit length, or zero for vertices no face touches).
    pub normals: Vec<Vector3>,
    /// Vertex colors.
    pub colors: Vec<Rgb>,
    /// Index buffer, interpreted according to `topology`.
    pub indices: Vec<u32>,
    /// Primitive assembly mode.
    pub topology: Topology,
}

impl Mesh {
    /// Creates an empty mesh.
    #[must_use]
    pub fn new(topology: Topology) -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            colors: Vec::new(),
            indices: Vec::new(),
            topology,
        }
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns every triangle with the winding the rasterizer will see.
    ///
    /// In a strip, odd triangles after each restart have their first two
    /// indices swapped so all faces share one orientation. Degenerate
    /// triangles (repeated indices) are kept.
    #[must_use]
    pub fn faces(&self) -> Vec<[u32; 3]> {
        match self.topology {
            Topology::TriangleList => self
                .indices
                .chunks_exact(3)
                .map(|tri| [tri[0], tri[1], tri[2]])
                .collect(),
            Topology::TriangleStrip => {
                let mut faces = Vec::new();
                for run in self.indices.split(|&i| i == RESTART_INDEX) {
                    for (k, tri) in run.windows(3).enumerate() {
                        if k % 2 == 0 {
                            faces.push([tri[0], tri[1], tri[2]]);
                        } else {
                            faces.push([tri[1], tri[0], tri[2]]);
                        }
                    }
                }
                faces
            }
        }
    }

    /// Recomputes vertex normals from the faces.
    pub fn compute_normals(&mut self) {
        self.normals = normals::vertex_normals(&self.positions, &self.faces());
    }

    /// Appends `other`, offsetting its indices.
    ///
    /// Strips are separated by a [`RESTART_INDEX`].
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::InvalidParameters`] if the topologies
    /// differ or the combined vertex count does not fit the index type.
    pub fn merge(&mut self, other: &Mesh) -> Result<()> {
        if self.topology != other.topology {
            return Err(TessellationError::InvalidParameters(
                "cannot merge meshes of different topology".to_owned(),
            )
            .into());
        }
        let offset = u32::try_from(self.positions.len())
            .ok()
            .filter(|&offset| {
                u64::from(offset) + other.positions.len() as u64 <= u64::from(RESTART_INDEX)
            })
            .ok_or_else(|| {
                TessellationError::InvalidParameters("merged mesh has too many vertices".to_owned())
            })?;
        if self.topology == Topology::TriangleStrip
            && !self.indices.is_empty()
            && !other.indices.is_empty()
        {
            self.indices.push(RESTART_INDEX);
        }
        self.indices.extend(other.indices.iter().map(|&i| {
            if i == RESTART_INDEX {
                i
            } else {
                i + offset
            }
        }));
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.colors.extend_from_slice(&other.colors);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn quad_strip() -> Mesh {
        let mut mesh = Mesh::new(Topology::TriangleStrip);
        mesh.positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        mesh.colors = vec![Rgb::WHITE; 4];
        mesh.indices = vec![0, 1, 2, 3];
        mesh.compute_normals();
        mesh
    }

    #[test]
    fn strip_faces_alternate_winding() {
        let faces = quad_strip().faces();
        assert_eq!(faces, vec![[0, 1, 2], [2, 1, 3]]);
    }

    #[test]
    fn strip_faces_reset_after_restart() {
        let mut mesh = quad_strip();
        mesh.indices = vec![0, 1, 2, RESTART_INDEX, 1, 3, 2];
        assert_eq!(mesh.faces(), vec![[0, 1, 2], [1, 3, 2]]);
    }

    #[test]
    fn list_faces() {
        let mut mesh = Mesh::new(Topology::TriangleList);
        mesh.indices = vec![0, 1, 2, 2, 1, 3];
        assert_eq!(mesh.faces(), vec![[0, 1, 2], [2, 1, 3]]);
    }

    #[test]
    fn strip_normals_are_consistent() {
        let mesh = quad_strip();
        for n in &mesh.normals {
            assert!((n - Vector3::z()).norm() < 1e-12);
        }
    }

    #[test]
    fn merge_offsets_and_separates() {
        let mut a = quad_strip();
        let b = quad_strip();
        a.merge(&b).unwrap();
        assert_eq!(a.vertex_count(), 8);
        assert_eq!(a.indices, vec![0, 1, 2, 3, RESTART_INDEX, 4, 5, 6, 7]);
        assert_eq!(a.faces().len(), 4);
    }

    #[test]
    fn merge_rejects_topology_mismatch() {
        let mut a = quad_strip();
        let b = Mesh::new(Topology::TriangleList);
        assert!(a.merge(&b).is_err());
        assert_eq!(a.vertex_count(), 4);
    }

    #[test]
    fn color_from_bytes() {
        assert!((Rgb::from_u8(255, 0, 51).r - 1.0).abs() < f32::EPSILON);
        assert!((Rgb::from_u8(255, 0, 51).b - 0.2).abs() < 1e-6);
    }
}
