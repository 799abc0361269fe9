use crate::{
    ast::{CosmosColumnReference, CosmosQueryFilter, Operator, Token},
    error::ParseError,
};

/// A `where` filter still being read.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterAccumulator {
    column_name: String,
    operator: Option<String>,
    value: Option<Token>,
    not_operator: bool,
}

impl FilterAccumulator {
    pub fn new(column_name: impl Into<String>) -> Self {
        FilterAccumulator {
            column_name: column_name.into(),
            operator: None,
            value: None,
            not_operator: false,
        }
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    pub fn has_operator(&self) -> bool {
        self.operator.is_some()
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Records the operator. Only `is` may be followed by a second operator, `not`.
    pub fn set_operator(&mut self, operator: &str) -> Result<(), ParseError> {
        match self.operator.as_deref() {
            None => {
                self.operator = Some(operator.to_string());
                Ok(())
            }
            Some("is") if operator == "not" && !self.not_operator => {
                self.not_operator = true;
                Ok(())
            }
            Some(first) => Err(ParseError::State(format!(
                "Operator for '{}' is already set to '{}', cannot add '{}'",
                self.column_name, first, operator
            ))),
        }
    }

    pub fn set_value(&mut self, value: Token) -> Result<(), ParseError> {
        if self.operator.is_none() {
            return Err(ParseError::State(format!(
                "Filter on '{}' has no operator before value '{}'",
                self.column_name, value.content
            )));
        }
        if let Some(existing) = &self.value {
            return Err(ParseError::State(format!(
                "Value for '{}' is already set to '{}'",
                self.column_name, existing.content
            )));
        }
        self.value = Some(value);
        Ok(())
    }

    pub fn build<T>(self) -> Result<CosmosQueryFilter<T>, ParseError> {
        let Some(name) = self.operator else {
            return Err(ParseError::State(format!(
                "Filter on '{}' has no operator",
                self.column_name
            )));
        };
        let Some(value) = self.value else {
            return Err(ParseError::State(format!(
                "Filter on '{}' has no value",
                self.column_name
            )));
        };

        let mut operator = Operator::from_name(&name)
            .ok_or_else(|| ParseError::NotSupported(format!("Operator '{}' is not supported", name)))?;
        if self.not_operator {
            operator = operator.negate();
        }

        Ok(CosmosQueryFilter::new(
            CosmosColumnReference::parse(&self.column_name),
            operator,
            value,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::TokenKind, error::ErrorKind};

    #[test]
    fn test_is_not() {
        let mut acc = FilterAccumulator::new("c.name");
        acc.set_operator("is").unwrap();
        acc.set_operator("not").unwrap();
        acc.set_value(Token::new("foo", TokenKind::Text)).unwrap();

        let filter = acc.build::<()>().unwrap();
        assert_eq!(filter.operator, Operator::EqualTo.negate());
        assert_eq!(filter.column_name.table_alias.as_deref(), Some("c"));
    }

    #[test]
    fn test_second_operator_rejected() {
        let mut acc = FilterAccumulator::new("x");
        acc.set_operator("=").unwrap();
        let err = acc.set_operator(">").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);

        let mut acc = FilterAccumulator::new("x");
        acc.set_operator("is").unwrap();
        acc.set_operator("not").unwrap();
        assert!(acc.set_operator("not").is_err());
    }

    #[test]
    fn test_value_set_twice() {
        let mut acc = FilterAccumulator::new("x");
        acc.set_operator("=").unwrap();
        acc.set_value(Token::new("1", TokenKind::Number)).unwrap();
        let err = acc.set_value(Token::new("2", TokenKind::Number)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
    }

    #[test]
    fn test_unknown_operator() {
        let mut acc = FilterAccumulator::new("x");
        acc.set_operator("=>").unwrap();
        acc.set_value(Token::new("1", TokenKind::Number)).unwrap();
        let err = acc.build::<()>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotSupported);
    }
}
