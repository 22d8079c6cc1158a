//! Variable declaration with builder pattern.

/// Domain of a continuous decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Domain {
    /// x >= 0
    #[default]
    NonNegative,
    /// Unrestricted.
    Free,
}

impl Domain {
    /// Lower bound implied by the domain.
    pub fn lower_bound(self) -> Option<f64> {
        match self {
            Domain::NonNegative => Some(0.0),
            Domain::Free => None,
        }
    }
}

/// A declared variable: a name for reporting and a domain.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub name: String,
    pub domain: Domain,
}

/// Builder for declaring variables.
#[derive(Default)]
pub struct VariableBuilder {
    name: Option<String>,
    domain: Domain,
}

impl VariableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name of the variable.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Constrain the variable to be non-negative (x >= 0).
    pub fn nonneg(mut self) -> Self {
        self.domain = Domain::NonNegative;
        self
    }

    /// Leave the variable unrestricted in sign.
    pub fn free(mut self) -> Self {
        self.domain = Domain::Free;
        self
    }

    /// Build the declaration. Unnamed variables get an empty name.
    pub fn build(self) -> VariableDecl {
        VariableDecl {
            name: self.name.unwrap_or_default(),
            domain: self.domain,
        }
    }
}

/// Declare a named non-negative variable.
pub fn nonneg_variable(name: impl Into<String>) -> VariableDecl {
    VariableBuilder::new().name(name).nonneg().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_builder() {
        let x = VariableBuilder::new().name("x").free().build();
        assert_eq!(x.name, "x");
        assert_eq!(x.domain, Domain::Free);
        assert_eq!(x.domain.lower_bound(), None);
    }

    #[test]
    fn test_nonneg_variable() {
        let x = nonneg_variable("ship");
        assert_eq!(x.domain, Domain::NonNegative);
        assert_eq!(x.domain.lower_bound(), Some(0.0));
    }
}
