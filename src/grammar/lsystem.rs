use rand::Rng;

use super::RuleMap;

/// A stochastic L-system: an axiom plus per-symbol rewriting rules.
#[derive(Debug, Clone)]
pub struct LSystem {
    axiom: String,
    rules: RuleMap,
}

impl LSystem {
    /// Creates a new L-system.
    #[must_use]
    pub fn new(axiom: impl Into<String>, rules: RuleMap) -> Self {
        Self {
            axiom: axiom.into(),
            rules,
        }
    }

    /// Returns the axiom.
    #[must_use]
    pub fn axiom(&self) -> &str {
        &self.axiom
    }

    /// Returns the rewriting rules.
    #[must_use]
    pub fn rules(&self) -> &RuleMap {
        &self.rules
    }

    /// Rewrites the axiom `iterations` times.
    pub fn derive<R: Rng + ?Sized>(&self, iterations: u32, rng: &mut R) -> String {
        self.derive_from(&self.axiom, iterations, rng)
    }

    /// Rewrites `sentence` `iterations` times.
    ///
    /// Every symbol is replaced in parallel within one iteration. Symbols
    /// without a rule are copied unchanged. A rule with a single
    /// alternative never draws from `rng`.
    pub fn derive_from<R: Rng + ?Sized>(&self, sentence: &str, iterations: u32, rng: &mut R) -> String {
        let mut current = sentence.to_owned();
        for iteration in 0..iterations {
            current = self.rewrite(&current, rng);
            tracing::debug!(iteration, length = current.len(), "derived sentence");
        }
        current
    }

    /// Applies one parallel rewriting step.
    fn rewrite<R: Rng + ?Sized>(&self, sentence: &str, rng: &mut R) -> String {
        let mut next = String::with_capacity(sentence.len() * 2);
        for symbol in sentence.chars() {
            match self.rules.get(symbol) {
                None => next.push(symbol),
                Some([single]) => next.push_str(single),
                Some(alternatives) => {
                    let pick = rng.gen_range(0..alternatives.len());
                    next.push_str(&alternatives[pick]);
                }
            }
        }
        next
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn branching() -> LSystem {
        LSystem::new("A", RuleMap::new().with_rule('A', ["F[+A][-A]"]).unwrap())
    }

    fn stochastic() -> LSystem {
        LSystem::new("B", RuleMap::new().with_rule('B', ["B", "\\B"]).unwrap())
    }

    #[test]
    fn zero_iterations_returns_input() {
        let mut rng = StdRng::seed_from_u64(1);
        let lsystem = branching();
        assert_eq!(lsystem.derive(0, &mut rng), "A");
        assert_eq!(lsystem.derive_from("X+Y[A]", 0, &mut rng), "X+Y[A]");
    }

    #[test]
    fn single_iteration() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(branching().derive(1, &mut rng), "F[+A][-A]");
    }

    #[test]
    fn two_iterations() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            branching().derive(2, &mut rng),
            "F[+F[+A][-A]][-F[+A][-A]]"
        );
    }

    #[test]
    fn unmapped_symbols_pass_through() {
        let mut rng = StdRng::seed_from_u64(7);
        let lsystem = branching();
        let input = "XA+Y-AZ";
        let output = lsystem.derive_from(input, 3, &mut rng);
        for symbol in ['X', 'Y', 'Z'] {
            let before = input.chars().filter(|&c| c == symbol).count();
            let after = output.chars().filter(|&c| c == symbol).count();
            assert_eq!(before, after, "count of {symbol} changed");
        }
    }

    #[test]
    fn output_only_contains_known_symbols() {
        let mut rng = StdRng::seed_from_u64(3);
        let rules = RuleMap::new()
            .with_rule('A', ["[+A]B", "-A"])
            .unwrap()
            .with_rule('B', ["BB"])
            .unwrap();
        let lsystem = LSystem::new("AX", rules);
        let output = lsystem.derive(6, &mut rng);
        for symbol in output.chars() {
            assert!("AB[]+-X".contains(symbol), "unexpected symbol {symbol}");
        }
    }

    #[test]
    fn stochastic_derivation_is_reproducible() {
        let lsystem = stochastic();
        let first = lsystem.derive(50, &mut StdRng::seed_from_u64(42));
        let second = lsystem.derive(50, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
        assert_eq!(first.chars().filter(|&c| c == 'B').count(), 1);
        assert!(first.ends_with('B'));
        assert!(first.chars().all(|c| c == 'B' || c == '\\'));
    }

    #[test]
    fn stochastic_derivation_uses_both_alternatives() {
        let output = stochastic().derive(50, &mut StdRng::seed_from_u64(42));
        // 50 fair draws all landing on "B" is astronomically unlikely.
        assert!(output.len() > 1);
        assert!(output.len() <= 51);
    }
}
