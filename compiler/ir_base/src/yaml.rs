//! Structured debug output.
//!
//! Stores describe themselves as an [`OutputMapping`], an insertion-ordered
//! tree of string keys and scalar leaves. `Display` hands it to the `saphyr`
//! emitter as block-style YAML; with the `serde` feature the same tree
//! serializes to any serde format for tooling that prefers JSON.

use std::borrow::Cow;
use std::fmt;

use saphyr::{Mapping, Scalar, Yaml, YamlEmitter};

/// Types that can describe their contents as a YAML mapping.
pub trait OutputYaml {
    /// Build the mapping. Called on demand; nothing is cached.
    fn output_yaml(&self) -> OutputMapping;
}

/// A leaf value, held as its display text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputScalar(String);

impl OutputScalar {
    pub fn new(value: impl fmt::Display) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Either a scalar leaf or a nested mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum YamlValue {
    Scalar(OutputScalar),
    Mapping(OutputMapping),
}

impl From<OutputScalar> for YamlValue {
    fn from(scalar: OutputScalar) -> Self {
        YamlValue::Scalar(scalar)
    }
}

impl From<OutputMapping> for YamlValue {
    fn from(mapping: OutputMapping) -> Self {
        YamlValue::Mapping(mapping)
    }
}

/// An ordered mapping from keys to values.
///
/// Keys keep insertion order; adding a key twice keeps both entries, the
/// caller is responsible for uniqueness.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputMapping {
    entries: Vec<(String, YamlValue)>,
}

impl OutputMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping by filling it in a closure.
    pub fn build(fill: impl FnOnce(&mut OutputMapping)) -> Self {
        let mut mapping = Self::new();
        fill(&mut mapping);
        mapping
    }

    /// Append an entry.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<YamlValue>) -> &mut Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&YamlValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &YamlValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert to a borrowed `saphyr` document for emission.
    ///
    /// Every scalar becomes a YAML string, so the emitter quotes any text
    /// that would otherwise read back as a null, bool or number.
    pub fn to_yaml(&self) -> Yaml<'_> {
        let mut mapping = Mapping::new();
        for (key, value) in self.entries() {
            mapping.insert(string(key), value.to_yaml());
        }
        Yaml::Mapping(mapping)
    }
}

impl YamlValue {
    fn to_yaml(&self) -> Yaml<'_> {
        match self {
            YamlValue::Scalar(scalar) => string(scalar.as_str()),
            YamlValue::Mapping(mapping) => mapping.to_yaml(),
        }
    }
}

fn string(text: &str) -> Yaml<'_> {
    Yaml::Value(Scalar::String(Cow::Borrowed(text)))
}

/// Renders a YAML document (`---` header, block style, two-space indent).
///
/// Duplicate keys collapse to the last value, since a YAML mapping cannot
/// hold them.
impl fmt::Display for OutputMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        YamlEmitter::new(&mut out)
            .dump(&self.to_yaml())
            .map_err(|_| fmt::Error)?;
        f.write_str(&out)
    }
}

#[cfg(feature = "serde")]
mod serialize {
    use serde::ser::{Serialize, SerializeMap, Serializer};

    use super::{OutputMapping, OutputScalar, YamlValue};

    impl Serialize for OutputScalar {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.as_str())
        }
    }

    impl Serialize for YamlValue {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                YamlValue::Scalar(scalar) => scalar.serialize(serializer),
                YamlValue::Mapping(mapping) => mapping.serialize(serializer),
            }
        }
    }

    impl Serialize for OutputMapping {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in self.entries() {
                map.serialize_entry(key, value)?;
            }
            map.end()
        }
    }
}
