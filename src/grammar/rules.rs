use std::collections::HashMap;

use crate::error::{GrammarError, Result};

/// Rewriting rules keyed by symbol.
///
/// Each symbol maps to one or more replacement strings. A symbol with
/// several alternatives is rewritten to one of them, chosen uniformly at
/// random on every occurrence. Symbols without a rule pass through.
#[derive(Debug, Clone, Default)]
pub struct RuleMap {
    rules: HashMap<char, Vec<String>>,
}

impl RuleMap {
    /// Creates an empty rule map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the rule for `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::EmptyRule`] if `alternatives` is empty.
    pub fn insert<I, S>(&mut self, symbol: char, alternatives: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let alternatives: Vec<String> = alternatives.into_iter().map(Into::into).collect();
        if alternatives.is_empty() {
            return Err(GrammarError::EmptyRule { symbol }.into());
        }
        self.rules.insert(symbol, alternatives);
        Ok(())
    }

    /// Builder form of [`RuleMap::insert`].
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::EmptyRule`] if `alternatives` is empty.
    pub fn with_rule<I, S>(mut self, symbol: char, alternatives: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(symbol, alternatives)?;
        Ok(self)
    }

    /// Returns the alternatives for `symbol`, if a rule exists.
    #[must_use]
    pub fn get(&self, symbol: char) -> Option<&[String]> {
        self.rules.get(&symbol).map(Vec::as_slice)
    }

    /// Returns the number of symbols that have a rule.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rules are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
