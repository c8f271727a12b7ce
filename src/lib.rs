#![forbid(unsafe_code)]
//! Translatable-string extraction for localization pipelines.
//!
//! Scans source text for gettext-style and resource-bundle translation calls,
//! decodes the string literals they carry, derives canonical resource keys,
//! picks up adjacent translator comments, and flags common misuse. The result
//! is an ordered, deduplicated [`TranslationSet`] plus a list of
//! [`Diagnostic`]s, both meant to be consumed by external resource writers
//! and loggers.
//!
//! # Quick Start
//!
//! ```rust
//! use locscan::{ExtractOptions, SourceFile};
//!
//! let mut file = SourceFile::new(
//!     ExtractOptions::new()
//!         .with_path("app/views.py")
//!         .with_source_locale("en-US")
//!         .with_project("webapp"),
//! );
//!
//! file.parse(r#"label = _("Sign in") // i18n: button label"#);
//!
//! let resource = file.translation_set().get_by_source("Sign in").unwrap();
//! assert_eq!(resource.key, "Sign in");
//! assert_eq!(resource.comment.as_deref(), Some("button label"));
//! ```
//!
//! # Recognized call shapes
//!
//! - `_("...")`, `gettext("...")`, `gettext_lazy("...")`: plain strings
//! - `gettext_noop("...")`: inventoried but marked do-not-translate
//! - `RB.getString("...")` / `RB.getString("...", "id")`: resource-bundle
//!   strings with hashed or explicit keys
//! - `pgettext("...", "context")`: strings with disambiguation context
//! - `ngettext("one", "other", n)` and `npgettext(ctx, "one", "other", n)`:
//!   plurals
//!
//! Matching is pattern-based over raw text, deliberately not an AST; see the
//! `scan` module for the accepted limitations that buys.

pub mod comment;
pub mod diagnostics;
pub mod error;
pub mod escape;
pub mod key;
pub mod options;
pub mod scan;
pub mod source_file;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    key::KeyScheme,
    options::ExtractOptions,
    scan::CallShape,
    source_file::{SourceFile, read_source},
    types::{
        Diagnostic, DiagnosticKind, Resource, ResourceKind, ResourceValue, TranslationSet,
    },
};
