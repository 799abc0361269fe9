use serde::Serialize;

/// Comparison operators a filter can apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Operator {
    /// Equal (`=`, `is`)
    EqualTo,
    /// Membership in an array (`in`)
    In,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterThanOrEqualTo,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessThanOrEqualTo,
    /// Negation of the inner operator (`<>`, `!=`, `is not`)
    Not(Box<Operator>),
}

impl Operator {
    /// Looks up the operator for its query text. Matching is case-sensitive.
    pub fn from_name(name: &str) -> Option<Operator> {
        let operator = match name {
            "=" | "is" => Operator::EqualTo,
            "in" => Operator::In,
            "<>" | "!=" => Operator::EqualTo.negate(),
            ">" => Operator::GreaterThan,
            ">=" => Operator::GreaterThanOrEqualTo,
            "<" => Operator::LessThan,
            "<=" => Operator::LessThanOrEqualTo,
            _ => return None,
        };
        Some(operator)
    }

    pub fn negate(self) -> Operator {
        Operator::Not(Box::new(self))
    }

    /// Query text for this operator.
    pub fn symbol(&self) -> String {
        match self {
            Operator::EqualTo => "=".to_string(),
            Operator::In => "in".to_string(),
            Operator::GreaterThan => ">".to_string(),
            Operator::GreaterThanOrEqualTo => ">=".to_string(),
            Operator::LessThan => "<".to_string(),
            Operator::LessThanOrEqualTo => "<=".to_string(),
            Operator::Not(inner) if **inner == Operator::EqualTo => "!=".to_string(),
            Operator::Not(inner) => format!("not {}", inner.symbol()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_table() {
        assert_eq!(Operator::from_name("="), Some(Operator::EqualTo));
        assert_eq!(Operator::from_name("is"), Some(Operator::EqualTo));
        assert_eq!(Operator::from_name("in"), Some(Operator::In));
        assert_eq!(
            Operator::from_name("<>"),
            Some(Operator::Not(Box::new(Operator::EqualTo)))
        );
        assert_eq!(Operator::from_name("!="), Operator::from_name("<>"));
        assert_eq!(Operator::from_name(">="), Some(Operator::GreaterThanOrEqualTo));
        assert_eq!(Operator::from_name("IS"), None);
        assert_eq!(Operator::from_name("=="), None);
    }
}
