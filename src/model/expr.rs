//! Required-value expressions.
//!
//! Recipe parameters and capability constraints carry their numeric
//! requirement as text, e.g. `">=20"`, `"< 5"` or plain `"80"`. The grammar
//! is an optional comparison operator followed by a non-negative decimal
//! number; `,` is accepted as decimal separator. Anything else fails to
//! parse and the surrounding candidate simply does not match.

use super::capability::PropertyValue;

/// Comparison operator of a required-value expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `=` (also the default when no operator is written).
    Eq,
    /// `>=`
    Ge,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `<`
    Lt,
}

/// Parsed form of a required-value expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRequirement {
    pub op: CompareOp,
    pub value: f64,
}

impl ValueRequirement {
    /// Parses an expression like `">=20"`, `"<5"`, `"= 7"` or `"2,5"`.
    ///
    /// Returns `None` for anything outside the grammar (empty text,
    /// negative numbers, stray characters, multiple decimal points).
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let (op, rest) = if let Some(r) = trimmed.strip_prefix(">=") {
            (CompareOp::Ge, r)
        } else if let Some(r) = trimmed.strip_prefix("<=") {
            (CompareOp::Le, r)
        } else if let Some(r) = trimmed.strip_prefix('>') {
            (CompareOp::Gt, r)
        } else if let Some(r) = trimmed.strip_prefix('<') {
            (CompareOp::Lt, r)
        } else if let Some(r) = trimmed.strip_prefix('=') {
            (CompareOp::Eq, r)
        } else {
            (CompareOp::Eq, trimmed)
        };

        let number = rest.trim();
        if number.is_empty()
            || !number
                .chars()
                .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
        {
            return None;
        }
        let value: f64 = number.replace(',', ".").parse().ok()?;
        Some(Self { op, value })
    }

    /// Whether a concrete value (e.g. a material quantity) satisfies this
    /// requirement.
    pub fn holds_for(&self, actual: f64) -> bool {
        match self.op {
            CompareOp::Eq => actual == self.value,
            CompareOp::Ge => actual >= self.value,
            CompareOp::Gt => actual > self.value,
            CompareOp::Le => actual <= self.value,
            CompareOp::Lt => actual < self.value,
        }
    }

    /// Whether a property's value representation can satisfy this
    /// requirement.
    ///
    /// A range admits the requirement when some value inside the bounds
    /// satisfies it; a discrete set when some element does; an unspecified
    /// representation admits everything.
    pub fn admits(&self, value: &PropertyValue) -> bool {
        match value {
            PropertyValue::Unspecified => true,
            PropertyValue::Exact { value } => self.holds_for(*value),
            PropertyValue::DiscreteSet { values } => values.iter().any(|&v| self.holds_for(v)),
            PropertyValue::Range { min, max } => match self.op {
                CompareOp::Eq => {
                    min.is_none_or(|m| self.value >= m) && max.is_none_or(|m| self.value <= m)
                }
                CompareOp::Ge => max.is_none_or(|m| m >= self.value),
                CompareOp::Gt => max.is_none_or(|m| m > self.value),
                CompareOp::Le => min.is_none_or(|m| m <= self.value),
                CompareOp::Lt => min.is_none_or(|m| m < self.value),
            },
        }
    }
}
