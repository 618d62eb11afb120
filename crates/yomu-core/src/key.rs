use std::fmt;

use crate::error::KeyError;

/// Remote resource a query key addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Tokenize,
    DictionaryEntries,
    DefinitionTags,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Tokenize => "tokenize",
            Resource::DictionaryEntries => "dictionaryEntries",
            Resource::DefinitionTags => "definitionTags",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cache key for one remote query: the resource plus its single argument.
///
/// Compared by value, so two requests for the same sentence or expression
/// share one cache slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: Resource,
    argument: String,
}

impl QueryKey {
    /// Fails on an empty argument; the services reject those anyway.
    pub fn new(resource: Resource, argument: impl Into<String>) -> Result<Self, KeyError> {
        let argument = argument.into();
        if argument.is_empty() {
            return Err(KeyError::EmptyArgument(resource));
        }
        Ok(Self { resource, argument })
    }

    pub fn tokenize(sentence: &str) -> Result<Self, KeyError> {
        Self::new(Resource::Tokenize, sentence)
    }

    pub fn dictionary_entries(expression: &str) -> Result<Self, KeyError> {
        Self::new(Resource::DictionaryEntries, expression)
    }

    pub fn definition_tags(name: &str) -> Result<Self, KeyError> {
        Self::new(Resource::DefinitionTags, name)
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn argument(&self) -> &str {
        &self.argument
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {:?}]", self.resource, self.argument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_compare_by_value() {
        let a = QueryKey::dictionary_entries("食べる").unwrap();
        let b = QueryKey::new(Resource::DictionaryEntries, String::from("食べる")).unwrap();
        let c = QueryKey::tokenize("食べる").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_string(), r#"[dictionaryEntries, "食べる"]"#);
    }

    #[test]
    fn test_empty_argument_rejected() {
        assert_eq!(
            QueryKey::definition_tags(""),
            Err(KeyError::EmptyArgument(Resource::DefinitionTags))
        );
    }
}
