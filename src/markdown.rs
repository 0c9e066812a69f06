//! Converts markdown entries to HTML fragments.

use pulldown_cmark::{html, Options, Parser};
use std::fmt;
use std::str::Utf8Error;

/// Converts the raw bytes of a markdown file into an HTML fragment. Fails
/// only if `markdown` isn't valid UTF-8.
pub fn to_html(markdown: &[u8]) -> Result<String, Error> {
    let markdown = std::str::from_utf8(markdown)?;

    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, Parser::new_ext(markdown, options));
    Ok(out)
}

/// Represents an error converting markdown to HTML.
#[derive(Debug)]
pub enum Error {
    /// Returned when the source isn't valid UTF-8.
    InvalidUtf8(Utf8Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidUtf8(err) => write!(f, "markdown is not valid UTF-8: {}", err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidUtf8(err) => Some(err),
        }
    }
}

impl From<Utf8Error> for Error {
    /// Converts a [`Utf8Error`] into an [`Error`]. It allows us to use the
    /// `?` operator on [`std::str::from_utf8`].
    fn from(err: Utf8Error) -> Error {
        Error::InvalidUtf8(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_heading() -> Result<(), Error> {
        assert_eq!("<h1>Hi</h1>\n", to_html(b"# Hi")?);
        Ok(())
    }

    #[test]
    fn test_extensions() -> Result<(), Error> {
        let html = to_html(b"~~gone~~\n\n- [x] done\n")?;
        assert!(html.contains("<del>gone</del>"), "{}", html);
        assert!(html.contains(r#"type="checkbox""#), "{}", html);
        Ok(())
    }

    #[test]
    fn test_invalid_utf8() {
        assert!(matches!(
            to_html(&[b'#', b' ', 0xff, 0xfe]),
            Err(Error::InvalidUtf8(_))
        ));
    }
}
