use crate::math::{angle_between, Point3, Vector3, TOLERANCE};

/// Angle-weighted vertex normals.
///
/// Each face contributes its unit normal (right-hand rule over the given
/// winding) scaled by the corner angle at the vertex. Zero-area faces are
/// ignored. Vertices touched by no face get a zero normal.
pub(super) fn vertex_normals(positions: &[Point3], faces: &[[u32; 3]]) -> Vec<Vector3> {
    let mut normals = vec![Vector3::zeros(); positions.len()];

    for face in faces {
        let [i0, i1, i2] = face.map(|i| i as usize);
        let (Some(p0), Some(p1), Some(p2)) = (positions.get(i0), positions.get(i1), positions.get(i2))
        else {
            continue;
        };

        let Some(face_normal) = (p1 - p0).cross(&(p2 - p0)).try_normalize(TOLERANCE) else {
            continue;
        };

        normals[i0] += face_normal * angle_between(&(p1 - p0), &(p2 - p0));
        normals[i1] += face_normal * angle_between(&(p2 - p1), &(p0 - p1));
        normals[i2] += face_normal * angle_between(&(p0 - p2), &(p1 - p2));
    }

    for normal in &mut normals {
        *normal = normal.try_normalize(TOLERANCE).unwrap_or_else(Vector3::zeros);
    }
    normals
}
