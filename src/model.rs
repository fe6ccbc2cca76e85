use serde::{Deserialize, Serialize};

/// Complete parsed result of one scrape. Replaces any prior snapshot wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub version: String,
    pub categories: Vec<Category>,
}

/// One section of the documentation page: a named group of generator methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub api_url: String,
    pub methods: Vec<MethodEntry>,
}

/// One invocable generator method with its page-derived deprecation flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodEntry {
    pub name: String,
    pub api_url: String,
    pub css_class: String,
    pub deprecated: bool,
}

impl DocumentSnapshot {
    pub fn method_count(&self) -> usize {
        self.categories.iter().map(|c| c.methods.len()).sum()
    }

    pub fn deprecated_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| &c.methods)
            .filter(|m| m.deprecated)
            .count()
    }

    /// Look up a method by its `category.method` path. Category names are
    /// matched case-insensitively ("Person" on the page, "person" in paths).
    pub fn find_method(&self, path: &str) -> Option<(&Category, &MethodEntry)> {
        let (category, method) = path.split_once('.')?;
        let cat = self
            .categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(category))?;
        let entry = cat.methods.iter().find(|m| m.name == method)?;
        Some((cat, entry))
    }
}

impl Category {
    /// Path prefix used when invoking methods of this category.
    pub fn path_name(&self) -> String {
        self.name.to_lowercase()
    }

    /// Methods shown in the list. Deprecated `constructor` entries are hidden.
    pub fn visible_methods(&self) -> impl Iterator<Item = &MethodEntry> {
        self.methods
            .iter()
            .filter(|m| m.name != "constructor" || !m.deprecated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DocumentSnapshot {
        DocumentSnapshot {
            version: "v9.0.0".into(),
            categories: vec![Category {
                name: "Person".into(),
                api_url: "/api/person.html".into(),
                methods: vec![
                    MethodEntry {
                        name: "firstName".into(),
                        api_url: "/api/person.html#firstname".into(),
                        css_class: String::new(),
                        deprecated: false,
                    },
                    MethodEntry {
                        name: "constructor".into(),
                        api_url: "/api/person.html#constructor".into(),
                        css_class: "deprecated".into(),
                        deprecated: true,
                    },
                ],
            }],
        }
    }

    #[test]
    fn find_method_is_case_insensitive_on_category() {
        let snap = sample();
        let (cat, entry) = snap.find_method("person.firstName").unwrap();
        assert_eq!(cat.name, "Person");
        assert_eq!(entry.name, "firstName");
    }

    #[test]
    fn find_method_misses() {
        let snap = sample();
        assert!(snap.find_method("person.lastName").is_none());
        assert!(snap.find_method("nothere.firstName").is_none());
        assert!(snap.find_method("no-dot").is_none());
    }

    #[test]
    fn deprecated_constructor_is_hidden() {
        let snap = sample();
        let visible: Vec<_> = snap.categories[0].visible_methods().collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "firstName");
    }

    #[test]
    fn counts() {
        let snap = sample();
        assert_eq!(snap.method_count(), 2);
        assert_eq!(snap.deprecated_count(), 1);
    }

    #[test]
    fn snapshot_roundtrips_through_json() {
        let snap = sample();
        let json = serde_json::to_string(&snap).unwrap();
        let back: DocumentSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, back);
    }
}
