use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::{Result, SceneError};
use crate::geometry::curve::{CatmullRom, Curve};
use crate::grammar::LSystem;
use crate::math::Vector3;
use crate::tessellation::{TessellateIcosahedron, TessellateTube, TubeParams};
use crate::turtle::{Branch, Interpret, Turtle, TurtleParams};

use super::{GeneratorConfig, Placement, TreeModel};

/// Leaves are at least this many times the radius of their branch tip.
const LEAF_MIN_SCALE: f64 = 1.5;

/// Parameters drawn for one regeneration.
#[derive(Debug, Clone)]
pub struct TreeParams {
    /// Chosen axiom.
    pub axiom: String,
    /// Derivation iterations.
    pub derivations: u32,
    /// Initial turtle state.
    pub turtle: TurtleParams,
    /// Vertices per tube ring.
    pub radial_segments: u32,
    /// Upper bound of the random leaf size bonus.
    pub leaf_scale_multiplier: f64,
}

/// Builds complete trees from a [`GeneratorConfig`] and one random stream.
///
/// The stream is seeded once when the generator is created; successive
/// calls to [`TreeGenerator::regenerate`] keep drawing from it.
#[derive(Debug)]
pub struct TreeGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl TreeGenerator {
    /// Creates a generator drawing from `rng`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: GeneratorConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    /// Creates a reproducible generator.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_seed(config: GeneratorConfig, seed: u64) -> Result<Self> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    /// Creates a generator seeded from operating-system entropy.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_entropy(config: GeneratorConfig) -> Result<Self> {
        Self::new(config, StdRng::from_entropy())
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Draws the parameters of the next tree.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidConfig`] if there is no axiom to pick.
    pub fn sample_params(&mut self) -> Result<TreeParams> {
        let config = &self.config;
        let rng = &mut self.rng;

        let axiom = config
            .axioms
            .choose(rng)
            .cloned()
            .ok_or_else(|| SceneError::InvalidConfig("axioms must not be empty".to_owned()))?;
        let derivations = rng.gen_range(config.derivations.clone());
        let turtle = TurtleParams {
            angle: rng.gen_range(config.angle_degrees.clone()).to_radians(),
            step_length: rng.gen_range(config.step_length.clone()),
            radius: rng.gen_range(config.radius.clone()),
            length_decay: rng.gen_range(config.length_decay.clone()),
            radius_decay: rng.gen_range(config.radius_decay.clone()),
        };
        let radial_segments = rng.gen_range(config.radial_segments.clone());
        let leaf_scale_multiplier =
            rng.gen_range(0.0..=config.leaf_scale_budget / f64::from(derivations.max(1)));

        Ok(TreeParams {
            axiom,
            derivations,
            turtle,
            radial_segments,
            leaf_scale_multiplier,
        })
    }

    /// Builds a brand-new tree from fresh random draws.
    ///
    /// Each non-degenerate branch becomes a bark tube along a Catmull-Rom
    /// curve through its skeleton, with one randomly sized and oriented leaf
    /// at its tip. Degenerate branches are skipped but their forks are
    /// still visited. The tree is centered vertically on its skeleton.
    ///
    /// # Errors
    ///
    /// Returns an error if the derived sentence contains an unknown symbol
    /// or a branch cannot be tessellated.
    pub fn regenerate(&mut self) -> Result<TreeModel> {
        let params = self.sample_params()?;
        let lsystem = LSystem::new(params.axiom.clone(), self.config.rule_map()?);
        let sentence = lsystem.derive(params.derivations, &mut self.rng);
        let root = Interpret::new(&sentence, Turtle::new(params.turtle)).execute()?;
        self.build_model(&root, &params)
    }

    /// Turns a branch tree into meshes and placements.
    ///
    /// # Errors
    ///
    /// Returns an error if a branch cannot be tessellated.
    pub fn build_model(&mut self, root: &Branch, params: &TreeParams) -> Result<TreeModel> {
        let tube = TubeParams::new(self.config.segment_count, params.radial_segments, true)?;
        let leaf = TessellateIcosahedron::new(1.0, self.config.foliage_color).execute()?;
        let mut model = TreeModel::new(leaf);

        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        let mut skipped = 0_usize;

        let mut stack = vec![root];
        while let Some(branch) = stack.pop() {
            stack.extend(branch.forks.iter());

            if branch.is_degenerate() {
                skipped += 1;
                continue;
            }

            for point in &branch.points {
                min_y = min_y.min(point.y);
                max_y = max_y.max(point.y);
            }

            let curve = CatmullRom::new(branch.points.clone())?;
            let mesh = TessellateTube::new(&curve, tube)
                .with_radii(branch.radius_begin, branch.radius_end)
                .with_color(self.config.bark_color)
                .execute()?;
            model.add_branch(mesh);

            let min_scale = branch.radius_end * LEAF_MIN_SCALE;
            let bonus = self.rng.gen_range(0.0..=params.leaf_scale_multiplier);
            let rotation = Vector3::new(
                self.rng.gen_range(0.0..TAU),
                self.rng.gen_range(0.0..TAU),
                self.rng.gen_range(0.0..TAU),
            );
            model.add_leaf(Placement {
                translation: curve.point(1.0)?.coords,
                rotation,
                scale: min_scale + min_scale * bonus,
            });
        }

        if skipped > 0 {
            tracing::warn!(skipped, "skipped degenerate branches");
        }
        if min_y <= max_y {
            model.set_placement(Placement {
                translation: Vector3::new(0.0, -(min_y + max_y) / 2.0, 0.0),
                ..Placement::identity()
            });
        }

        tracing::info!(
            axiom = %params.axiom,
            derivations = params.derivations,
            meshes = model.meshes().len(),
            objects = model.objects().len(),
            "regenerated tree"
        );
        Ok(model)
    }
}
