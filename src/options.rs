//! Options controlling one extraction pass.

use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// Per-file extraction options.
///
/// Everything here is echoed into the extracted resources; the extractor
/// itself only ever reads the path for reporting. The source locale is
/// opaque to extraction, but [`ExtractOptions::validate`] lets callers check
/// it up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Path of the file being extracted, relative to the project root.
    pub path: String,
    /// Locale of the source strings.
    pub source_locale: String,
    /// Project identifier for downstream resource writers.
    pub project: String,
    /// Data type tag for downstream resource writers.
    pub datatype: String,
    /// Build flavor this file belongs to, when the project uses flavors.
    pub flavor: Option<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            path: String::new(),
            // "no linguistic content" placeholder used when the project does
            // not say otherwise
            source_locale: "zxx-XX".to_string(),
            project: String::new(),
            datatype: "python".to_string(),
            flavor: None,
        }
    }
}

impl ExtractOptions {
    /// Creates default extraction options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source file path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the source locale.
    pub fn with_source_locale(mut self, source_locale: impl Into<String>) -> Self {
        self.source_locale = source_locale.into();
        self
    }

    /// Sets the project identifier.
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    /// Sets the data type tag.
    pub fn with_datatype(mut self, datatype: impl Into<String>) -> Self {
        self.datatype = datatype.into();
        self
    }

    /// Sets the build flavor. The conventional "main" flavor means no
    /// flavor at all.
    pub fn with_flavor(mut self, flavor: Option<String>) -> Self {
        self.flavor = flavor.filter(|f| f != "main");
        self
    }

    /// Checks that the source locale is a well-formed BCP-47 identifier.
    pub fn validate(&self) -> Result<(), Error> {
        self.source_locale
            .parse::<LanguageIdentifier>()
            .map(|_| ())
            .map_err(|_| {
                Error::validation_error(format!(
                    "source locale is not a valid language identifier: {}",
                    self.source_locale
                ))
            })
    }
}
