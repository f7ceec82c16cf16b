use indexmap::IndexMap;
use urlencoding::encode;

// A URL-encoded form payload.
//
// Field order is preserved and a repeated name replaces the earlier value in
// place, the same way a browser serialises a PeopleSoft form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form(IndexMap<String, String>);

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    // Returns a copy of this form with `overrides` applied on top.
    pub fn with<K, V>(&self, overrides: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields = self.0.clone();
        for (name, value) in overrides {
            fields.insert(name.into(), value.into());
        }
        Self(fields)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    // Renders the form as `application/x-www-form-urlencoded` text.
    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for Form
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new().with(iter)
    }
}
