mod config;
mod generator;

pub use config::GeneratorConfig;
pub use generator::{TreeGenerator, TreeParams};

use slotmap::SlotMap;

use crate::error::{Result, SceneError};
use crate::math::Vector3;
use crate::tessellation::{Mesh, Topology};

slotmap::new_key_type! {
    /// Unique identifier for a mesh in a [`MeshStore`].
    pub struct MeshId;
}

/// Arena that owns every mesh of a generated tree.
///
/// Objects refer to meshes by [`MeshId`], so one mesh (the leaf) can be
/// shared by many objects.
#[derive(Debug, Default)]
pub struct MeshStore {
    meshes: SlotMap<MeshId, Mesh>,
}

impl MeshStore {
    /// Creates a new, empty mesh store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a mesh and returns its ID.
    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.insert(mesh)
    }

    /// Returns a reference to the mesh, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::MeshNotFound`] if the ID is not in the store.
    pub fn mesh(&self, id: MeshId) -> Result<&Mesh> {
        self.meshes
            .get(id)
            .ok_or_else(|| SceneError::MeshNotFound.into())
    }

    /// Returns the number of stored meshes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Returns `true` if the store holds no mesh.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

/// Placement of an object relative to its parent.
///
/// Plain data: the renderer composes it as translate, then rotate about
/// X, Y and Z in that order, then scale uniformly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Translation.
    pub translation: Vector3,
    /// Euler angles in radians, applied about X, then Y, then Z.
    pub rotation: Vector3,
    /// Uniform scale factor.
    pub scale: f64,
}

impl Placement {
    /// The identity placement.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: 1.0,
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}

/// What a scene object represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// Tube mesh of one skeleton branch.
    Branch,
    /// Leaf instance at a branch tip.
    Leaf,
}

/// A mesh placed in the tree.
#[derive(Debug, Clone, Copy)]
pub struct SceneObject {
    /// Mesh drawn by this object.
    pub mesh: MeshId,
    /// Placement relative to the tree root.
    pub placement: Placement,
    /// Object role.
    pub kind: ObjectKind,
}

/// A complete generated tree, ready to hand to a renderer.
#[derive(Debug)]
pub struct TreeModel {
    meshes: MeshStore,
    objects: Vec<SceneObject>,
    placement: Placement,
    leaf_mesh: MeshId,
}

impl TreeModel {
    /// Creates an empty tree whose leaves will share `leaf_mesh`.
    #[must_use]
    pub fn new(leaf_mesh: Mesh) -> Self {
        let mut meshes = MeshStore::new();
        let leaf_mesh = meshes.add_mesh(leaf_mesh);
        Self {
            meshes,
            objects: Vec::new(),
            placement: Placement::identity(),
            leaf_mesh,
        }
    }

    /// Adds a branch tube at the tree origin.
    pub fn add_branch(&mut self, mesh: Mesh) -> MeshId {
        let id = self.meshes.add_mesh(mesh);
        self.objects.push(SceneObject {
            mesh: id,
            placement: Placement::identity(),
            kind: ObjectKind::Branch,
        });
        id
    }

    /// Adds an instance of the shared leaf mesh.
    pub fn add_leaf(&mut self, placement: Placement) {
        self.objects.push(SceneObject {
            mesh: self.leaf_mesh,
            placement,
            kind: ObjectKind::Leaf,
        });
    }

    /// Returns the mesh arena.
    #[must_use]
    pub fn meshes(&self) -> &MeshStore {
        &self.meshes
    }

    /// Returns every placed object.
    #[must_use]
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Returns the placement of the whole tree.
    #[must_use]
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Sets the placement of the whole tree.
    pub fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }

    /// Returns the ID of the shared leaf mesh.
    #[must_use]
    pub fn leaf_mesh(&self) -> MeshId {
        self.leaf_mesh
    }

    /// Number of objects of the given kind.
    #[must_use]
    pub fn count(&self, kind: ObjectKind) -> usize {
        self.objects.iter().filter(|o| o.kind == kind).count()
    }

    /// Concatenates every branch tube into a single strip mesh.
    ///
    /// Branch objects all sit at the tree origin, so their vertices can be
    /// merged without transformation.
    ///
    /// # Errors
    ///
    /// Returns an error if a mesh is missing or the merged mesh overflows
    /// the index range.
    pub fn merged_bark(&self) -> Result<Mesh> {
        let mut merged = Mesh::new(Topology::TriangleStrip);
        for object in self.objects.iter().filter(|o| o.kind == ObjectKind::Branch) {
            merged.merge(self.meshes.mesh(object.mesh)?)?;
        }
        Ok(merged)
    }
}
