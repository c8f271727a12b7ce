//! Core types for locscan.
//! The extractor decodes source text into these; resource writers consume them.

use std::{fmt::Display, io::BufRead, io::Write, str::FromStr};

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// The broad kind of an extracted resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A plain string resource.
    String,
    /// A plural resource with singular/other forms.
    Plural,
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::String => write!(f, "string"),
            ResourceKind::Plural => write!(f, "plural"),
        }
    }
}

/// The source text of a resource: a single string, or a singular/other pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum ResourceValue {
    /// A single source string.
    Singular(String),

    /// Source plural forms. Only the two forms present in source code are
    /// carried; other categories are a translation-time concern.
    Plural { one: String, other: String },
}

impl ResourceValue {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceValue::Singular(_) => ResourceKind::String,
            ResourceValue::Plural { .. } => ResourceKind::Plural,
        }
    }

    /// The primary source text: the string itself, or the singular form.
    pub fn source_text(&self) -> &str {
        match self {
            ResourceValue::Singular(value) => value,
            ResourceValue::Plural { one, .. } => one,
        }
    }
}

impl Display for ResourceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source_text())
    }
}

/// One extracted translatable unit.
///
/// Immutable once built; owned by the [`TranslationSet`] it was inserted into.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Resource {
    /// The canonical resource key: explicit caller-supplied id, cleaned source
    /// text, or a hashed form of it, depending on the call family.
    pub key: String,

    /// Decoded source text (single string or singular/other pair).
    pub value: ResourceValue,

    /// Free-form disambiguation context. Part of the resource identity, but
    /// never a key.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub context: Option<String>,

    /// Translator comment found next to the call, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub comment: Option<String>,

    /// Path of the source file this resource was extracted from.
    pub path: String,

    /// The source locale, echoed from the extraction options. Opaque here.
    pub source_locale: String,

    /// The project identifier, echoed from the extraction options.
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(default)]
    pub project: String,

    /// Data type tag for downstream resource writers (e.g. "python").
    pub datatype: String,

    /// Optional build flavor this file belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub flavor: Option<String>,

    /// True when the key was derived from the source text rather than
    /// supplied explicitly.
    pub auto_key: bool,

    /// Do-not-translate: inventoried, but never sent for translation.
    pub dnt: bool,

    /// Discovery index within one extraction pass.
    pub index: usize,
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        self.value.kind()
    }

    /// Parses the source locale as a BCP-47 identifier, if it is one.
    pub fn source_locale_id(&self) -> Option<LanguageIdentifier> {
        self.source_locale.parse().ok()
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Resource {{ key: {}, source: {}, kind: {} }}",
            self.key,
            self.value,
            self.kind()
        )
    }
}

/// The ordered, identity-deduplicated set of resources from one extraction
/// pass.
///
/// Identity is `(key, context)`. Insertion is append-only and the first
/// occurrence of an identity wins; later duplicates are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TranslationSet {
    /// The source locale shared by every resource in this set.
    pub source_locale: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    resources: Vec<Resource>,
}

impl TranslationSet {
    pub fn new(source_locale: impl Into<String>) -> Self {
        TranslationSet {
            source_locale: source_locale.into(),
            resources: Vec::new(),
        }
    }

    /// Adds a resource, keeping the first insertion on identity collision.
    /// Returns whether the resource was actually inserted.
    pub fn add(&mut self, resource: Resource) -> bool {
        if self
            .get(&resource.key, resource.context.as_deref())
            .is_some()
        {
            return false;
        }
        self.resources.push(resource);
        true
    }

    /// Looks up a resource by its `(key, context)` identity.
    pub fn get(&self, key: &str, context: Option<&str>) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|r| r.key == key && r.context.as_deref() == context)
    }

    /// Looks up an auto-keyed resource by its source text. Resources with an
    /// explicit key are not matched; they are addressed by key only.
    pub fn get_by_source(&self, source: &str) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|r| r.auto_key && r.value.source_text() == source)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Resource> {
        self.resources.iter()
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Writes the set as JSON to any writer (file, memory, etc.).
    pub fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer(&mut writer, self).map_err(Error::Parse)
    }

    /// Reads a set back from JSON.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }
}

impl<'a> IntoIterator for &'a TranslationSet {
    type Item = &'a Resource;
    type IntoIter = std::slice::Iter<'a, Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.iter()
    }
}

/// The kind of a misuse finding from the diagnostics scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A string literal argument directly followed by `+`.
    ConcatAfterLiteral,
    /// A non-literal argument concatenated with a trailing string literal.
    ConcatBeforeLiteral,
    /// An argument list with no string literal at all.
    NonStringArgument,
}

impl DiagnosticKind {
    /// Human-readable explanation used when reporting the diagnostic.
    pub fn message(&self) -> &'static str {
        match self {
            DiagnosticKind::ConcatAfterLiteral | DiagnosticKind::ConcatBeforeLiteral => {
                "string concatenation is not allowed in getString() parameters"
            }
            DiagnosticKind::NonStringArgument => {
                "non-string arguments are not allowed in getString() parameters"
            }
        }
    }
}

impl FromStr for DiagnosticKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CONCAT_AFTER_LITERAL" => Ok(DiagnosticKind::ConcatAfterLiteral),
            "CONCAT_BEFORE_LITERAL" => Ok(DiagnosticKind::ConcatBeforeLiteral),
            "NON_STRING_ARGUMENT" => Ok(DiagnosticKind::NonStringArgument),
            _ => Err(format!("Unknown diagnostic kind: {}", s)),
        }
    }
}

/// One non-fatal misuse finding. Reporting only; never alters extraction
/// results.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,

    /// Path of the source file the finding was made in.
    pub path: String,

    /// The offending call text.
    pub snippet: String,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}: ... {} ...",
            self.path,
            self.kind.message(),
            self.snippet
        )
    }
}
