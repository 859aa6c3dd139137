//! Literals and solver outcomes.

/// Zero-based propositional variable index.
pub type Var = usize;

/// A propositional literal: a variable with a polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lit {
    pub var: Var,
    pub positive: bool,
}

impl Lit {
    /// Positive literal for `var`.
    pub fn pos(var: Var) -> Self {
        Self {
            var,
            positive: true,
        }
    }

    /// Negative literal for `var`.
    pub fn neg(var: Var) -> Self {
        Self {
            var,
            positive: false,
        }
    }

    /// The same variable with the opposite polarity.
    pub fn negated(self) -> Self {
        Self {
            var: self.var,
            positive: !self.positive,
        }
    }

    /// Whether this literal is true under the given variable value.
    pub fn satisfied_by(self, value: bool) -> bool {
        self.positive == value
    }
}

/// Outcome of a satisfiability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SatOutcome {
    Satisfiable,
    Unsatisfiable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_polarity() {
        let lit = Lit::pos(3);
        assert!(lit.satisfied_by(true));
        assert!(!lit.satisfied_by(false));

        let neg = lit.negated();
        assert_eq!(neg.var, 3);
        assert!(neg.satisfied_by(false));
        assert_eq!(neg.negated(), lit);
    }
}
