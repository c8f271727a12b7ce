//! Extraction orchestration for one source file.

use std::io::Read;
use std::path::Path;

use crate::error::Error;
use crate::options::ExtractOptions;
use crate::scan::{self, CallMatch, CallShape};
use crate::types::{Diagnostic, Resource, ResourceValue, TranslationSet};
use crate::{comment, diagnostics, escape, key};

/// Comment prefix marking inventoried-but-untranslated strings.
const DO_NOT_TRANSLATE: &str = "DO NOT TRANSLATE";

/// One source file being extracted.
///
/// Owns the [`TranslationSet`] and diagnostics for its extraction pass.
/// Instances are independent; a multi-file pipeline can run many in
/// parallel without coordination.
#[derive(Debug)]
pub struct SourceFile {
    options: ExtractOptions,
    set: TranslationSet,
    diagnostics: Vec<Diagnostic>,
    next_index: usize,
}

impl SourceFile {
    pub fn new(options: ExtractOptions) -> Self {
        let set = TranslationSet::new(options.source_locale.clone());
        SourceFile {
            options,
            set,
            diagnostics: Vec::new(),
            next_index: 0,
        }
    }

    /// Scans one text buffer for localizable strings and adds them to this
    /// file's translation set, then records misuse diagnostics.
    ///
    /// Never fails: text with no recognized calls simply leaves the set
    /// empty.
    pub fn parse(&mut self, text: &str) {
        tracing::debug!("Extracting strings from {}", self.options.path);
        self.next_index = 0;

        for shape in CallShape::ALL {
            let mut pos = 0;
            while let Some(found) = scan::next_match(text, pos, shape) {
                pos = found.end;
                self.handle_match(text, &found);
            }
        }

        self.diagnostics
            .extend(diagnostics::scan(text, &self.options.path));
    }

    /// Reads the configured file and parses it. An unreadable or missing
    /// file is logged and leaves the set empty; it is never an error here.
    pub fn extract(&mut self) {
        if self.options.path.is_empty() {
            return;
        }
        match read_source(&self.options.path) {
            Ok(data) if !data.is_empty() => self.parse(&data),
            Ok(_) => {}
            Err(err) => {
                tracing::warn!("Could not read file: {}: {}", self.options.path, err);
            }
        }
    }

    /// The set of resources found in this file so far.
    pub fn translation_set(&self) -> &TranslationSet {
        &self.set
    }

    /// Consumes the file and returns its translation set.
    pub fn into_translation_set(self) -> TranslationSet {
        self.set
    }

    /// The misuse findings recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    fn handle_match(&mut self, text: &str, found: &CallMatch<'_>) {
        let literals = found.literals.as_slice();
        let (source, plural_other, context, explicit) = match (found.shape, literals) {
            (CallShape::Simple | CallShape::NoOp | CallShape::Bundle, [source]) => {
                (source, None, None, None)
            }
            (CallShape::BundleKeyed, [source, id]) => (source, None, None, Some(id)),
            (CallShape::Context, [source, ctx]) => (source, None, Some(ctx), None),
            (CallShape::Plural, [one, other]) => (one, Some(other), None, None),
            (CallShape::ContextPlural, [ctx, one, other]) => (one, Some(other), Some(ctx), None),
            _ => return, // matcher arity makes this unreachable
        };

        let decoded = escape::unescape(source.text, source.modifiers);
        let stored = escape::trim_escaped(&decoded);
        let cleaned = escape::clean(source.text, source.modifiers);
        if stored.is_empty() || cleaned.is_empty() {
            tracing::trace!("ignoring empty source string at offset {}", found.start);
            return;
        }

        let (resource_key, auto_key) = key::derive_key(
            found.shape.key_scheme(),
            &cleaned,
            explicit.map(|id| id.text),
        );

        let mut comment = comment::associate(text, found.start, found.end);
        let dnt = found.shape == CallShape::NoOp;
        if dnt {
            comment = Some(match comment {
                Some(existing) => format!("{DO_NOT_TRANSLATE} {existing}"),
                None => DO_NOT_TRANSLATE.to_string(),
            });
        }

        let value = match plural_other {
            Some(other) => {
                let other_decoded = escape::unescape(other.text, other.modifiers);
                ResourceValue::Plural {
                    one: stored.to_string(),
                    other: escape::trim_escaped(&other_decoded).to_string(),
                }
            }
            None => ResourceValue::Singular(stored.to_string()),
        };

        let index = self.next_index;
        self.next_index += 1;

        tracing::trace!("Found string key: {}, string: '{}'", resource_key, stored);
        self.set.add(Resource {
            key: resource_key,
            value,
            context: context.map(|ctx| escape::unescape(ctx.text, ctx.modifiers)),
            comment,
            path: self.options.path.clone(),
            source_locale: self.options.source_locale.clone(),
            project: self.options.project.clone(),
            datatype: self.options.datatype.clone(),
            flavor: self.options.flavor.clone(),
            auto_key,
            dnt,
            index,
        });
    }
}

/// Reads a source file to a string, decoding a UTF-16 or UTF-8 BOM when one
/// is present.
pub fn read_source<P: AsRef<Path>>(path: P) -> Result<String, Error> {
    let file = std::fs::File::open(path).map_err(Error::Io)?;
    let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
        .bom_override(true)
        .build(file);

    let mut decoded = String::new();
    decoder.read_to_string(&mut decoded).map_err(Error::Io)?;
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResourceKind;

    fn source_file() -> SourceFile {
        SourceFile::new(
            ExtractOptions::new()
                .with_path("python/t1.py")
                .with_source_locale("en-US")
                .with_project("webapp"),
        )
    }

    #[test]
    fn test_parse_fills_resource_metadata() {
        let mut file = source_file();
        file.parse(r#"RB.getString("This is a test")"#);

        let set = file.translation_set();
        assert_eq!(set.len(), 1);

        let resource = set.get_by_source("This is a test").unwrap();
        assert_eq!(resource.key, "r654479252");
        assert_eq!(resource.kind(), ResourceKind::String);
        assert_eq!(resource.path, "python/t1.py");
        assert_eq!(resource.source_locale, "en-US");
        assert_eq!(resource.project, "webapp");
        assert_eq!(resource.datatype, "python");
        assert!(resource.auto_key);
        assert!(!resource.dnt);
    }

    #[test]
    fn test_parse_never_fails_on_arbitrary_text() {
        let mut file = source_file();
        file.parse("");
        file.parse("no calls in here");
        file.parse("_(((((\"");
        assert!(file.translation_set().is_empty());
    }

    #[test]
    fn test_noop_sets_dnt_and_comment_prefix() {
        let mut file = source_file();
        file.parse("gettext_noop(\"internal name\") // i18n: internal\n");

        let resource = file
            .translation_set()
            .get_by_source("internal name")
            .unwrap();
        assert!(resource.dnt);
        assert_eq!(resource.comment.as_deref(), Some("DO NOT TRANSLATE internal"));
    }

    #[test]
    fn test_noop_without_comment_still_marked() {
        let mut file = source_file();
        file.parse("gettext_noop(\"internal name\")");

        let resource = file
            .translation_set()
            .get_by_source("internal name")
            .unwrap();
        assert!(resource.dnt);
        assert_eq!(resource.comment.as_deref(), Some("DO NOT TRANSLATE"));
    }

    #[test]
    fn test_discovery_index_increases() {
        let mut file = source_file();
        file.parse("_(\"alpha\"); _(\"beta\"); _(\"gamma\")");

        let indexes: Vec<_> = file.translation_set().iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
    }

    #[test]
    fn test_extract_missing_file_yields_empty_set() {
        let mut file = SourceFile::new(
            ExtractOptions::new().with_path("python/does_not_exist.py"),
        );
        file.extract();
        assert!(file.translation_set().is_empty());

        let mut no_path = SourceFile::new(ExtractOptions::new());
        no_path.extract();
        assert!(no_path.translation_set().is_empty());
    }

    #[test]
    fn test_extract_reads_real_file() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t1.py");
        let mut handle = std::fs::File::create(&path).unwrap();
        writeln!(handle, "title = _(\"This is a test\")").unwrap();

        let mut file = SourceFile::new(
            ExtractOptions::new().with_path(path.to_string_lossy().into_owned()),
        );
        file.extract();

        assert_eq!(file.translation_set().len(), 1);
        assert!(file.translation_set().get_by_source("This is a test").is_some());
    }

    #[test]
    fn test_read_source_decodes_utf16_bom() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("utf16.py");
        let mut bytes: Vec<u8> = vec![0xFF, 0xFE];
        for unit in "_(\"Bonjour\")".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        std::fs::File::create(&path)
            .unwrap()
            .write_all(&bytes)
            .unwrap();

        let decoded = read_source(&path).unwrap();
        assert_eq!(decoded, "_(\"Bonjour\")");
    }
}
