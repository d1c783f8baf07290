//! Parser configuration with builder-style options
//!
//! All options have defaults; [`ParseOptions`] resolves into a fully
//! populated internal configuration when a parser is constructed. The
//! escape character defaults to the quote character, selecting the
//! doubled-quote escaping convention.

/// How rows are bound to field names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderMode {
    /// Adopt the first data row as the header (default)
    Auto,
    /// Use the given ordered field names; every row is a data row
    Explicit(Vec<String>),
    /// No header; records keep their positional field order
    None,
}

/// Options for constructing a parser (builder pattern)
///
/// # Examples
///
/// ```
/// use csvstream::{ParseOptions, HeaderMode};
///
/// let options = ParseOptions::new()
///     .newline("\n")
///     .delimiter(';')
///     .header(HeaderMode::None)
///     .comment_prefix("#");
/// ```
pub struct ParseOptions {
    pub(crate) header: HeaderMode,
    pub(crate) newline: String,
    pub(crate) delimiter: char,
    pub(crate) quote: char,
    pub(crate) escape: Option<char>,
    pub(crate) empty_field_value: String,
    pub(crate) coerce_field: Box<dyn Fn(String) -> String>,
    pub(crate) comment_prefix: Option<String>,
    pub(crate) error_on_comment: bool,
    pub(crate) error_on_empty_line: bool,
    pub(crate) error_on_fields_mismatch: bool,
    pub(crate) chunk_size: usize,
    pub(crate) collect_records: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            header: HeaderMode::Auto,
            newline: "\r\n".to_string(),
            delimiter: ',',
            quote: '"',
            escape: None,
            empty_field_value: String::new(),
            coerce_field: Box::new(|field| field),
            comment_prefix: None,
            error_on_comment: true,
            error_on_empty_line: true,
            error_on_fields_mismatch: true,
            chunk_size: 64 * 1024 * 1024,
            collect_records: true,
        }
    }
}

impl ParseOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header mode (builder pattern)
    pub fn header(mut self, mode: HeaderMode) -> Self {
        self.header = mode;
        self
    }

    /// Set the line terminator, 1 or 2 characters (builder pattern)
    ///
    /// Defaults to `"\r\n"`.
    pub fn newline(mut self, newline: &str) -> Self {
        self.newline = newline.to_string();
        self
    }

    /// Set the field delimiter (builder pattern)
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the field-quoting character (builder pattern)
    pub fn quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    /// Set the escape character used inside quoted fields (builder pattern)
    ///
    /// When not set, the quote character itself escapes by doubling.
    pub fn escape(mut self, escape: char) -> Self {
        self.escape = Some(escape);
        self
    }

    /// Set the value substituted for empty raw field text (builder pattern)
    pub fn empty_field_value(mut self, value: &str) -> Self {
        self.empty_field_value = value.to_string();
        self
    }

    /// Set the field-coercion hook applied to every field (builder pattern)
    ///
    /// Runs after empty-field replacement.
    pub fn coerce_field<F>(mut self, coerce: F) -> Self
    where
        F: Fn(String) -> String + 'static,
    {
        self.coerce_field = Box::new(coerce);
        self
    }

    /// Enable comment detection with the given literal prefix (builder pattern)
    pub fn comment_prefix(mut self, prefix: &str) -> Self {
        self.comment_prefix = Some(prefix.to_string());
        self
    }

    /// Toggle `CommentExists` error events for skipped comment lines
    pub fn error_on_comment(mut self, enabled: bool) -> Self {
        self.error_on_comment = enabled;
        self
    }

    /// Toggle `EmptyLineExists` error events for skipped empty lines
    pub fn error_on_empty_line(mut self, enabled: bool) -> Self {
        self.error_on_empty_line = enabled;
        self
    }

    /// Toggle mismatch error events for rows whose field count differs
    /// from the header (the row is dropped either way)
    pub fn error_on_fields_mismatch(mut self, enabled: bool) -> Self {
        self.error_on_fields_mismatch = enabled;
        self
    }

    /// Set the driver window size in bytes (convenience entry point only)
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Toggle collection of successful records into the returned sequence
    /// (convenience entry point only)
    pub fn collect_records(mut self, enabled: bool) -> Self {
        self.collect_records = enabled;
        self
    }

    /// Fill unset options with defaults and derive secondary values
    ///
    /// # Panics
    ///
    /// Panics if the line terminator is not 1 or 2 characters long.
    pub(crate) fn resolve(self) -> ResolvedOptions {
        let newline_chars = self.newline.chars().count();
        assert!(
            (1..=2).contains(&newline_chars),
            "line terminator must be 1 or 2 characters, got {}",
            newline_chars
        );

        let escape = self.escape.unwrap_or(self.quote);
        let mut escaped_quote = String::with_capacity(escape.len_utf8() + self.quote.len_utf8());
        escaped_quote.push(escape);
        escaped_quote.push(self.quote);

        ResolvedOptions {
            header: self.header,
            newline: self.newline,
            delimiter: self.delimiter,
            quote: self.quote,
            escape,
            escape_is_quote: escape == self.quote,
            escaped_quote,
            quote_str: self.quote.to_string(),
            empty_field_value: self.empty_field_value,
            coerce_field: self.coerce_field,
            comment_prefix: self.comment_prefix.filter(|p| !p.is_empty()),
            error_on_comment: self.error_on_comment,
            error_on_empty_line: self.error_on_empty_line,
            error_on_fields_mismatch: self.error_on_fields_mismatch,
            chunk_size: self.chunk_size,
            collect_records: self.collect_records,
        }
    }
}

/// Fully resolved configuration, immutable for the lifetime of a parser
pub(crate) struct ResolvedOptions {
    pub(crate) header: HeaderMode,
    pub(crate) newline: String,
    pub(crate) delimiter: char,
    pub(crate) quote: char,
    pub(crate) escape: char,
    /// Derived once so the scanning hot loop stays branch-predictable
    pub(crate) escape_is_quote: bool,
    /// Precomputed escape + quote sequence as it appears in raw text
    pub(crate) escaped_quote: String,
    pub(crate) quote_str: String,
    pub(crate) empty_field_value: String,
    pub(crate) coerce_field: Box<dyn Fn(String) -> String>,
    pub(crate) comment_prefix: Option<String>,
    pub(crate) error_on_comment: bool,
    pub(crate) error_on_empty_line: bool,
    pub(crate) error_on_fields_mismatch: bool,
    pub(crate) chunk_size: usize,
    pub(crate) collect_records: bool,
}

impl ResolvedOptions {
    /// Replace empty raw text with the configured value, then coerce
    ///
    /// Applied uniformly by both tokenizers.
    pub(crate) fn transform_field(&self, field: String) -> String {
        let field = if field.is_empty() {
            self.empty_field_value.clone()
        } else {
            field
        };
        (self.coerce_field)(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ParseOptions::new().resolve();
        assert_eq!(opts.header, HeaderMode::Auto);
        assert_eq!(opts.newline, "\r\n");
        assert_eq!(opts.delimiter, ',');
        assert_eq!(opts.quote, '"');
        assert_eq!(opts.comment_prefix, None);
        assert!(opts.error_on_comment);
        assert!(opts.error_on_empty_line);
        assert!(opts.error_on_fields_mismatch);
        assert!(opts.collect_records);
    }

    #[test]
    fn test_escape_defaults_to_quote() {
        let opts = ParseOptions::new().resolve();
        assert_eq!(opts.escape, '"');
        assert!(opts.escape_is_quote);
        assert_eq!(opts.escaped_quote, "\"\"");
    }

    #[test]
    fn test_explicit_escape() {
        let opts = ParseOptions::new().escape('\\').resolve();
        assert_eq!(opts.escape, '\\');
        assert!(!opts.escape_is_quote);
        assert_eq!(opts.escaped_quote, "\\\"");
    }

    #[test]
    fn test_builder_chain() {
        let opts = ParseOptions::new()
            .newline("\n")
            .delimiter('\t')
            .quote('\'')
            .comment_prefix("//")
            .error_on_empty_line(false)
            .chunk_size(1024)
            .resolve();
        assert_eq!(opts.newline, "\n");
        assert_eq!(opts.delimiter, '\t');
        assert_eq!(opts.quote, '\'');
        assert_eq!(opts.comment_prefix.as_deref(), Some("//"));
        assert!(!opts.error_on_empty_line);
        assert_eq!(opts.chunk_size, 1024);
    }

    #[test]
    fn test_empty_comment_prefix_disables_detection() {
        let opts = ParseOptions::new().comment_prefix("").resolve();
        assert_eq!(opts.comment_prefix, None);
    }

    #[test]
    fn test_transform_field_replaces_empty_then_coerces() {
        let opts = ParseOptions::new()
            .empty_field_value("N/A")
            .coerce_field(|f| f.to_uppercase())
            .resolve();
        assert_eq!(opts.transform_field(String::new()), "N/A");
        assert_eq!(opts.transform_field("abc".to_string()), "ABC");
    }

    #[test]
    #[should_panic(expected = "line terminator")]
    fn test_newline_too_long_panics() {
        let _ = ParseOptions::new().newline("\r\n\n").resolve();
    }
}
