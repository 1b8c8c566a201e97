//! Common types used across CLI modules

/// A record reference given on the command line: a numeric id or a name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdOrName {
    /// Numeric primary key
    Id(i64),
    /// Name that should uniquely identify a record (case-insensitive)
    Name(String),
}

impl IdOrName {
    /// Parse a string into an IdOrName
    ///
    /// Anything that parses as an integer is an id.
    pub fn parse(input: &str) -> Self {
        match input.trim().parse::<i64>() {
            Ok(id) => IdOrName::Id(id),
            Err(_) => IdOrName::Name(input.trim().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(IdOrName::parse("42"), IdOrName::Id(42));
        assert_eq!(IdOrName::parse(" 7 "), IdOrName::Id(7));
        assert_eq!(
            IdOrName::parse("web-servers"),
            IdOrName::Name("web-servers".to_string())
        );
        assert_eq!(IdOrName::parse("42a"), IdOrName::Name("42a".to_string()));
    }
}
