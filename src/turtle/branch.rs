use crate::math::Point3;

/// A skeleton branch: a polyline, its radii, and its sub-branches.
///
/// Points are recorded only where the turtle changes direction, so a
/// straight run of forward steps contributes a single segment.
#[derive(Debug, Clone, Default)]
pub struct Branch {
    /// Skeleton polyline.
    pub points: Vec<Point3>,
    /// Sub-branches opened with `[`, in sentence order.
    pub forks: Vec<Branch>,
    /// Radius at the first point.
    pub radius_begin: f64,
    /// Radius at the last point.
    pub radius_end: f64,
}

impl Branch {
    /// Returns `true` if the branch has fewer than 2 points and cannot
    /// carry a curve. Its forks may still be valid.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2
    }

    /// Total number of forks below this branch, at any depth.
    #[must_use]
    pub fn fork_count(&self) -> usize {
        self.iter().count() - 1
    }

    /// Number of levels in the tree rooted here (a leaf branch has depth 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((branch, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(branch.forks.iter().map(|fork| (fork, depth + 1)));
        }
        deepest
    }

    /// Iterates depth-first over this branch and every fork below it.
    pub fn iter(&self) -> impl Iterator<Item = &Branch> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let branch = stack.pop()?;
            stack.extend(branch.forks.iter().rev());
            Some(branch)
        })
    }
}
