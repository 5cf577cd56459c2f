use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// Harvester metadata.
// Known quality signals are named; everything else is carried verbatim.
// Values are kept as written and resolve to defaults at the read site, so a
// mistyped signal never rejects the record and serialization reproduces
// exactly what came in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pageviews: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Value>,

    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page views, `0` when absent or not a number.
    pub fn pageviews_or_default(&self) -> f64 {
        self.pageviews.as_ref().and_then(Value::as_f64).unwrap_or(0.0)
    }

    /// Downloads, `0` when absent or not a number.
    pub fn downloads_or_default(&self) -> f64 {
        self.downloads.as_ref().and_then(Value::as_f64).unwrap_or(0.0)
    }

    /// Number of listed authors, `0` unless `authors` is an array.
    pub fn author_count(&self) -> usize {
        match &self.authors {
            Some(Value::Array(authors)) => authors.len(),
            _ => 0,
        }
    }

    pub fn with_pageviews(mut self, n: u64) -> Self {
        self.pageviews = Some(n.into());
        self
    }

    pub fn with_downloads(mut self, n: u64) -> Self {
        self.downloads = Some(n.into());
        self
    }

    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = Some(Value::Array(
            authors.into_iter().map(|a| Value::String(a.into())).collect(),
        ));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.extra.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    pub fn extra(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.extra.iter()
    }
}
