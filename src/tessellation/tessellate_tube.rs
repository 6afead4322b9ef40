use std::f64::consts::TAU;

use crate::error::{Result, TessellationError};
use crate::geometry::curve::{Curve, Frame};

use super::{Mesh, Rgb, Topology, RESTART_INDEX};

/// Sampling parameters of a tube sweep.
#[derive(Debug, Clone, Copy)]
pub struct TubeParams {
    segment_count: u32,
    radial_segment_count: u32,
    draw_caps: bool,
}

impl TubeParams {
    /// Creates new tube parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `segment_count` or `radial_segment_count` is zero.
    pub fn new(segment_count: u32, radial_segment_count: u32, draw_caps: bool) -> Result<Self> {
        if segment_count == 0 {
            return Err(TessellationError::InvalidParameters(
                "tube needs at least 1 segment".to_owned(),
            )
            .into());
        }
        if radial_segment_count == 0 {
            return Err(TessellationError::InvalidParameters(
                "tube needs at least 1 radial segment".to_owned(),
            )
            .into());
        }
        Ok(Self {
            segment_count,
            radial_segment_count,
            draw_caps,
        })
    }

    /// Returns the number of segments along the curve.
    #[must_use]
    pub fn segment_count(&self) -> u32 {
        self.segment_count
    }

    /// Returns the number of vertices per ring.
    #[must_use]
    pub fn radial_segment_count(&self) -> u32 {
        self.radial_segment_count
    }

    /// Returns whether both ends are closed with a disc.
    #[must_use]
    pub fn draw_caps(&self) -> bool {
        self.draw_caps
    }
}

impl Default for TubeParams {
    fn default() -> Self {
        Self {
            segment_count: 15,
            radial_segment_count: 8,
            draw_caps: true,
        }
    }
}

/// Sweeps a circular cross-section along a curve into a triangle-strip mesh.
///
/// Vertex layout: `segment_count + 1` rings of `radial_segment_count`
/// vertices (ring `i` starts at `i * radial_segment_count`), followed by
/// the start and end cap centers when caps are drawn.
///
/// Index layout: one strip per pair of adjacent rings, each closed by
/// repeating the first pair, then one strip per cap. Strips are separated
/// by [`RESTART_INDEX`].
pub struct TessellateTube<'a, C: Curve + ?Sized> {
    curve: &'a C,
    params: TubeParams,
    radius_begin: f64,
    radius_end: f64,
    color: Rgb,
}

impl<'a, C: Curve + ?Sized> TessellateTube<'a, C> {
    /// Creates a new tube tessellation with unit radius.
    #[must_use]
    pub fn new(curve: &'a C, params: TubeParams) -> Self {
        Self {
            curve,
            params,
            radius_begin: 1.0,
            radius_end: 1.0,
            color: Rgb::WHITE,
        }
    }

    /// Sets the radius at both ends; intermediate rings interpolate linearly.
    #[must_use]
    pub fn with_radii(mut self, radius_begin: f64, radius_end: f64) -> Self {
        self.radius_begin = radius_begin;
        self.radius_end = radius_end;
        self
    }

    /// Sets the color shared by every vertex.
    #[must_use]
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Executes the tessellation.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::InvalidParameters`] for negative or
    /// non-finite radii or a vertex count beyond the index range, and any
    /// error raised while sampling the curve or its frames.
    pub fn execute(&self) -> Result<Mesh> {
        for radius in [self.radius_begin, self.radius_end] {
            if !radius.is_finite() || radius < 0.0 {
                return Err(TessellationError::InvalidParameters(format!(
                    "tube radius must be finite and non-negative, got {radius}"
                ))
                .into());
            }
        }

        let segments = self.params.segment_count;
        let radial = self.params.radial_segment_count;
        let vertex_count = (u64::from(segments) + 1) * u64::from(radial) + 2;
        if vertex_count >= u64::from(RESTART_INDEX) {
            return Err(TessellationError::InvalidParameters(format!(
                "tube would need {vertex_count} vertices"
            ))
            .into());
        }

        let mut mesh = Mesh::new(Topology::TriangleStrip);
        self.push_rings(&mut mesh)?;

        for i in 1..=segments {
            let before = (i - 1) * radial;
            let current = i * radial;
            begin_strip(&mut mesh.indices);
            for j in 0..radial {
                mesh.indices.push(before + j);
                mesh.indices.push(current + j);
            }
            mesh.indices.push(before);
            mesh.indices.push(current);
        }

        if self.params.draw_caps {
            self.push_caps(&mut mesh)?;
        }

        mesh.colors = vec![self.color; mesh.positions.len()];
        mesh.compute_normals();
        Ok(mesh)
    }

    /// Appends one vertex ring per sample along the curve.
    fn push_rings(&self, mesh: &mut Mesh) -> Result<()> {
        let segments = f64::from(self.params.segment_count);
        let radial = self.params.radial_segment_count;
        let angle_step = TAU / f64::from(radial);

        for i in 0..=self.params.segment_count {
            let x = f64::from(i) / segments;
            let radius = self.radius_begin + (self.radius_end - self.radius_begin) * x;
            let center = self.curve.point(x)?;
            let frame = Frame::at(self.curve, x)?;

            for j in 0..radial {
                let angle = angle_step * f64::from(j);
                mesh.positions.push(
                    center
                        + frame.binormal * (angle.cos() * radius)
                        + frame.normal * (angle.sin() * radius),
                );
            }
        }
        Ok(())
    }

    /// Appends a center vertex and a disc strip at both ends.
    ///
    /// The start disc uses ring 0 and the end disc the last ring, at
    /// `segment_count * radial_segment_count`.
    #[allow(clippy::cast_possible_truncation)]
    fn push_caps(&self, mesh: &mut Mesh) -> Result<()> {
        let radial = self.params.radial_segment_count;

        let first_ring = 0;
        let first_center = mesh.positions.len() as u32;
        mesh.positions.push(self.curve.point(0.0)?);
        begin_strip(&mut mesh.indices);
        for j in 0..radial {
            mesh.indices.push(first_center);
            mesh.indices.push(first_ring + j);
        }
        mesh.indices.push(first_ring);

        let last_ring = self.params.segment_count * radial;
        let last_center = mesh.positions.len() as u32;
        mesh.positions.push(self.curve.point(1.0)?);
        begin_strip(&mut mesh.indices);
        for j in 0..radial {
            mesh.indices.push(last_ring + j);
            mesh.indices.push(last_center);
        }
        mesh.indices.push(last_ring);
        Ok(())
    }
}

/// Separates a new strip from the previous one.
fn begin_strip(indices: &mut Vec<u32>) {
    if !indices.is_empty() {
        indices.push(RESTART_INDEX);
    }
}
