//! Form-encoded field access
//!
//! Shared by query strings and `application/x-www-form-urlencoded` bodies.

/// Decoded key/value pairs in their original order
#[derive(Debug, Default, Clone)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn parse(raw: &str) -> Self {
        Self {
            pairs: url::form_urlencoded::parse(raw.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// Parse the query component of a URI; an absent query yields no fields
    pub fn from_query(query: Option<&str>) -> Self {
        query.map(Self::parse).unwrap_or_default()
    }

    /// First value for `key`
    pub fn first(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, in order
    pub fn all(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_keys_keep_order() {
        let fields = FormFields::parse("option=i&input=b&option=g&input=a");
        assert_eq!(fields.all("option"), vec!["i", "g"]);
        assert_eq!(fields.all("input"), vec!["b", "a"]);
        assert!(fields.all("missing").is_empty());
    }

    #[test]
    fn test_decoding_and_first() {
        let fields = FormFields::parse("regex=a%2Bb&regex=zzz&replacement=x+y");
        assert_eq!(fields.first("regex"), Some("a+b"));
        assert_eq!(fields.first("replacement"), Some("x y"));
        assert_eq!(fields.first("nope"), None);
    }

    #[test]
    fn test_absent_query() {
        let fields = FormFields::from_query(None);
        assert_eq!(fields.first("callback"), None);
    }
}
