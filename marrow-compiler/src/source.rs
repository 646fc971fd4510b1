//! Source text handed to the front end.

/// Display name used when the source is an in-memory string.
pub const STRING_SOURCE_NAME: &str = "<string>";

/// A named buffer of source text.
///
/// Tokens and every expression derived from them borrow this buffer for
/// the lifetime of the pipeline; the text is never copied per token. The
/// embedding application is responsible for reading files; the core only
/// ever sees this buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    name: String,
    contents: String,
}

impl SourceFile {
    /// Create a source from a display name and its text.
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Create a source from a literal string, named [`STRING_SOURCE_NAME`].
    pub fn from_string(contents: impl Into<String>) -> Self {
        Self::new(STRING_SOURCE_NAME, contents)
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full source text.
    pub fn contents(&self) -> &str {
        &self.contents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_sources_get_the_placeholder_name() {
        let source = SourceFile::from_string("1 + 2");
        assert_eq!(source.name(), "<string>");
        assert_eq!(source.contents(), "1 + 2");
    }
}
