use std::ops::RangeInclusive;

use crate::error::{Result, SceneError};
use crate::grammar::RuleMap;
use crate::tessellation::Rgb;

/// Ranges from which every regeneration draws its tree parameters.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Candidate axioms, picked uniformly.
    pub axioms: Vec<String>,
    /// Rewriting rules as `(symbol, alternatives)` pairs.
    pub rules: Vec<(char, Vec<String>)>,
    /// Number of derivation iterations.
    pub derivations: RangeInclusive<u32>,
    /// Turtle rotation angle, in degrees.
    pub angle_degrees: RangeInclusive<f64>,
    /// Initial step length.
    pub step_length: RangeInclusive<f64>,
    /// Trunk radius.
    pub radius: RangeInclusive<f64>,
    /// Step length multiplier per forward move.
    pub length_decay: RangeInclusive<f64>,
    /// Radius multiplier per forward move.
    pub radius_decay: RangeInclusive<f64>,
    /// Vertices per tube ring.
    pub radial_segments: RangeInclusive<u32>,
    /// Rings per branch, minus one.
    pub segment_count: u32,
    /// Leaf size is drawn up to `leaf_scale_budget / derivations` times the
    /// minimum size, so deeper trees get smaller leaves.
    pub leaf_scale_budget: f64,
    /// Color of branch tubes.
    pub bark_color: Rgb,
    /// Color of leaves.
    pub foliage_color: Rgb,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let strings = |values: &[&str]| values.iter().map(|&s| s.to_owned()).collect::<Vec<_>>();
        Self {
            axioms: strings(&["BBA", "BBBBA", "BBBBA", "BBBBBA"]),
            rules: vec![
                (
                    'A',
                    strings(&["[++BB[--C][++C][__C][^^C]A]/////+BBB[--C][++C][__C][^^C]A"]),
                ),
                ('B', strings(&["\\B", "B"])),
            ],
            derivations: 4..=7,
            angle_degrees: 10.0..=22.0,
            step_length: 0.9..=1.0,
            radius: 0.2..=0.8,
            length_decay: 0.95..=0.99,
            radius_decay: 0.9..=1.0,
            radial_segments: 4..=10,
            segment_count: 15,
            leaf_scale_budget: 12.0,
            bark_color: Rgb::BARK,
            foliage_color: Rgb::FOLIAGE,
        }
    }
}

impl GeneratorConfig {
    /// Checks that every range is non-empty and every choice has a candidate.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.axioms.is_empty() {
            return Err(invalid("axioms must not be empty"));
        }
        if self.derivations.is_empty() {
            return Err(invalid("derivations range is empty"));
        }
        if self.radial_segments.is_empty() || *self.radial_segments.start() == 0 {
            return Err(invalid("radial_segments must be a non-empty range above zero"));
        }
        if self.segment_count == 0 {
            return Err(invalid("segment_count must be positive"));
        }
        let ranges = [
            ("angle_degrees", &self.angle_degrees),
            ("step_length", &self.step_length),
            ("radius", &self.radius),
            ("length_decay", &self.length_decay),
            ("radius_decay", &self.radius_decay),
        ];
        for (name, range) in ranges {
            if !(range.start().is_finite() && range.end().is_finite()) || range.is_empty() {
                return Err(invalid(&format!("{name} range is empty or not finite")));
            }
        }
        if *self.radius.start() < 0.0 {
            return Err(invalid("radius must be non-negative"));
        }
        if !self.leaf_scale_budget.is_finite() || self.leaf_scale_budget < 0.0 {
            return Err(invalid("leaf_scale_budget must be non-negative"));
        }
        self.rule_map()?;
        Ok(())
    }

    /// Builds the rule map.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule has no alternatives.
    pub fn rule_map(&self) -> Result<RuleMap> {
        let mut rules = RuleMap::new();
        for (symbol, alternatives) in &self.rules {
            rules.insert(*symbol, alternatives.iter().cloned())?;
        }
        Ok(rules)
    }
}

fn invalid(message: &str) -> crate::error::ArborError {
    SceneError::InvalidConfig(message.to_owned()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn default_rules() {
        let rules = GeneratorConfig::default().rule_map().unwrap_or_default();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.get('B').map(<[String]>::len), Some(2));
    }

    #[test]
    fn empty_axioms_rejected() {
        let config = GeneratorConfig {
            axioms: Vec::new(),
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    #[allow(clippy::reversed_empty_ranges)]
    fn reversed_range_rejected() {
        let config = GeneratorConfig {
            radius: 0.8..=0.2,
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_rule_rejected() {
        let config = GeneratorConfig {
            rules: vec![('A', Vec::new())],
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_radial_segments_rejected() {
        let config = GeneratorConfig {
            radial_segments: 0..=4,
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
