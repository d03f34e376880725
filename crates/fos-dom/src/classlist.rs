//! DOMTokenList (classList)
//!
//! Implements classList for CSS class manipulation.

/// Space-separated class tokens of an element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Create empty token list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from space-separated string
    pub fn from_string(s: &str) -> Self {
        let mut list = Self::new();
        for token in s.split_whitespace() {
            list.add(token);
        }
        list
    }

    /// Get number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Check if token exists
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add a token. Empty strings and whitespace-bearing names are ignored.
    pub fn add(&mut self, token: &str) {
        if token.is_empty() || token.contains(char::is_whitespace) || self.contains(token) {
            return;
        }
        self.tokens.push(token.to_string());
    }

    /// Remove a token
    pub fn remove(&mut self, token: &str) {
        self.tokens.retain(|t| t != token);
    }

    /// Toggle token, returns new state
    pub fn toggle(&mut self, token: &str, force: Option<bool>) -> bool {
        let on = force.unwrap_or(!self.contains(token));
        if on {
            self.add(token);
        } else {
            self.remove(token);
        }
        on
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Get value as string
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_dedup() {
        let mut list = ClassList::from_string("a  b a");
        assert_eq!(list.len(), 2);
        list.add("b");
        list.add("");
        list.add("c d");
        assert_eq!(list.value(), "a b");
    }

    #[test]
    fn test_toggle() {
        let mut list = ClassList::new();
        assert!(list.toggle("is-open", None));
        assert!(list.contains("is-open"));
        assert!(!list.toggle("is-open", None));
        assert!(list.toggle("is-open", Some(true)));
        assert!(list.toggle("is-open", Some(true)));
        assert_eq!(list.len(), 1);
        assert!(!list.toggle("is-open", Some(false)));
        assert!(list.is_empty());
    }
}
