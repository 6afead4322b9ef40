use crate::error::{Result, TessellationError};
use crate::math::Point3;

use super::{Mesh, Rgb, Topology};

/// Corner positions before projection onto the sphere, with
/// `t = (1 + sqrt(5)) / 2`.
const CORNERS: [(f64, f64, f64); 12] = {
    const T: f64 = 1.618_033_988_749_895;
    [
        (-1.0, T, 0.0),
        (1.0, T, 0.0),
        (-1.0, -T, 0.0),
        (1.0, -T, 0.0),
        (0.0, -1.0, T),
        (0.0, 1.0, T),
        (0.0, -1.0, -T),
        (0.0, 1.0, -T),
        (T, 0.0, -1.0),
        (T, 0.0, 1.0),
        (-T, 0.0, -1.0),
        (-T, 0.0, 1.0),
    ]
};

/// Counter-clockwise (outward) faces.
const FACES: [u32; 60] = [
    0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, //
    1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1, 8, //
    3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, //
    4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
];

/// Builds a regular icosahedron centered at the origin as a triangle list.
#[derive(Debug, Clone, Copy)]
pub struct TessellateIcosahedron {
    radius: f64,
    color: Rgb,
}

impl TessellateIcosahedron {
    /// Creates a new icosahedron tessellation.
    #[must_use]
    pub fn new(radius: f64, color: Rgb) -> Self {
        Self { radius, color }
    }

    /// Executes the tessellation.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive and finite.
    pub fn execute(&self) -> Result<Mesh> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(TessellationError::InvalidParameters(
                "icosahedron radius must be positive".to_owned(),
            )
            .into());
        }

        let mut mesh = Mesh::new(Topology::TriangleList);
        mesh.positions = CORNERS
            .iter()
            .map(|&(x, y, z)| Point3::from(Point3::new(x, y, z).coords.normalize() * self.radius))
            .collect();
        mesh.indices = FACES.to_vec();
        mesh.colors = vec![self.color; mesh.positions.len()];
        mesh.compute_normals();
        Ok(mesh)
    }
}
