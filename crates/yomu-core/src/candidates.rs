use serde::Serialize;

/// Ordered, duplicate-free lookup expressions for one pointer position.
///
/// The first occurrence of a string wins; empty strings are never added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CandidateSet(Vec<String>);

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `candidate` unless it is empty or already present. Returns
    /// whether it was added.
    pub fn push(&mut self, candidate: impl Into<String>) -> bool {
        let candidate = candidate.into();
        if candidate.is_empty() || self.0.contains(&candidate) {
            return false;
        }
        self.0.push(candidate);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<S: Into<String>> FromIterator<S> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for candidate in iter {
            set.push(candidate);
        }
        set
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
