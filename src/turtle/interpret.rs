use crate::error::{Result, TurtleError};
use crate::math::TOLERANCE;

use super::{Branch, Rotation, Turtle};

/// A branch under construction together with the turtle drawing it.
struct Frame {
    branch: Branch,
    turtle: Turtle,
}

impl Frame {
    fn open(turtle: Turtle) -> Self {
        Self {
            branch: Branch {
                points: vec![*turtle.position()],
                forks: Vec::new(),
                radius_begin: turtle.radius(),
                radius_end: turtle.radius(),
            },
            turtle,
        }
    }

    /// Appends the turtle position if it moved since the last recorded point.
    fn record_position(&mut self) {
        let position = *self.turtle.position();
        let moved = self
            .branch
            .points
            .last()
            .is_none_or(|last| (position - last).norm() > TOLERANCE);
        if moved {
            self.branch.points.push(position);
        }
    }

    fn close(mut self) -> Branch {
        self.record_position();
        self.branch.radius_end = self.turtle.radius();
        self.branch
    }
}

/// Interprets a derived sentence with a turtle, producing a branch tree.
///
/// Symbols:
/// - `A`..=`Z`: step forward, then decay step length and radius
/// - `+` `-`: yaw, `/` `\`: roll, `^` `_`: pitch
/// - `[`: open a fork with a copy of the current turtle
/// - `]`: close the current fork
///
/// Sub-branches are tracked on an explicit stack, so nesting depth is
/// bounded only by memory.
#[derive(Debug)]
pub struct Interpret<'a> {
    sentence: &'a str,
    turtle: Turtle,
}

impl<'a> Interpret<'a> {
    /// Creates a new interpretation of `sentence` starting from `turtle`.
    #[must_use]
    pub fn new(sentence: &'a str, turtle: Turtle) -> Self {
        Self { sentence, turtle }
    }

    /// Executes the interpretation, returning the root branch.
    ///
    /// Forks left open at the end of the sentence are closed implicitly.
    /// A `]` without a matching `[` ends the interpretation; the rest of
    /// the sentence is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TurtleError::UnknownSymbol`] on the first symbol that is
    /// neither a move, a rotation nor a bracket.
    pub fn execute(&self) -> Result<Branch> {
        let mut open: Vec<Frame> = Vec::new();
        let mut current = Frame::open(self.turtle);

        for (position, symbol) in self.sentence.chars().enumerate() {
            match symbol {
                'A'..='Z' => current.turtle.advance(),
                '[' => {
                    let fork = Frame::open(current.turtle);
                    open.push(std::mem::replace(&mut current, fork));
                }
                ']' => {
                    let Some(parent) = open.pop() else {
                        tracing::warn!(position, "unmatched ']' ends interpretation");
                        break;
                    };
                    let fork = std::mem::replace(&mut current, parent).close();
                    current.branch.forks.push(fork);
                }
                _ => {
                    let rotation = Rotation::from_symbol(symbol)
                        .ok_or(TurtleError::UnknownSymbol { symbol, position })?;
                    current.record_position();
                    current.turtle.rotate(rotation);
                }
            }
        }

        let mut branch = current.close();
        while let Some(mut parent) = open.pop() {
            parent.branch.forks.push(branch);
            branch = parent.close();
        }

        tracing::debug!(
            branches = branch.fork_count() + 1,
            depth = branch.depth(),
            "interpreted sentence"
        );
        Ok(branch)
    }
}
