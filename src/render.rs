//! Applies templates to posts and projects and writes the result to disk.
//! Templates use Go's `text/template` syntax (via [`gtmpl`]).

use gtmpl::{Context, Template, Value};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// The template applied to the project to produce `index.html`.
pub const INDEX_TEMPLATE: &str = "index.html.tmpl";

/// The template applied to each post.
pub const POST_TEMPLATE: &str = "post.html.tmpl";

/// The markdown skeleton copied into new entries.
pub const CONTENT_TEMPLATE: &str = "content.md.tmpl";

/// Renders named templates from a template directory. Templates are read and
/// parsed on every call; nothing is cached between renders.
pub struct Renderer<'a> {
    pub template_dir: &'a Path,
}

impl Renderer<'_> {
    /// Loads the template `name`, executes it against `value`, and writes the
    /// result to `dest` (created if absent, truncated if present).
    pub fn render(&self, name: &str, value: Value, dest: &Path) -> Result<()> {
        let template_path = self.template_dir.join(name);
        let template = load_template(&template_path)?;
        let context = Context::from(value).map_err(|err| Error::Execute {
            path: template_path.clone(),
            err: err.to_string(),
        })?;

        let file = File::create(dest).map_err(|err| Error::Write {
            path: dest.to_owned(),
            err,
        })?;
        let mut w = BufWriter::new(file);
        template
            .execute(&mut w, &context)
            .map_err(|err| Error::Execute {
                path: template_path,
                err: err.to_string(),
            })?;
        w.flush().map_err(|err| Error::Write {
            path: dest.to_owned(),
            err,
        })
    }
}

/// Reads and parses a template file.
pub fn load_template(path: &Path) -> Result<Template> {
    let contents = std::fs::read_to_string(path).map_err(|err| Error::OpenTemplateFile {
        path: path.to_owned(),
        err,
    })?;
    let mut template = Template::default();
    template
        .parse(&contents)
        .map_err(|err| Error::ParseTemplate {
            path: path.to_owned(),
            err: err.to_string(),
        })?;
    Ok(template)
}

/// The result of a fallible render operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading, executing, or writing a template.
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O problems while reading template files.
    OpenTemplateFile { path: PathBuf, err: io::Error },

    /// Returned for errors parsing template files.
    ParseTemplate { path: PathBuf, err: String },

    /// Returned for errors executing a template against its data.
    Execute { path: PathBuf, err: String },

    /// Returned for I/O problems while writing the output file.
    Write { path: PathBuf, err: io::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::OpenTemplateFile { path, err } => {
                write!(f, "opening template file '{}': {}", path.display(), err)
            }
            Error::ParseTemplate { path, err } => {
                write!(f, "parsing template file '{}': {}", path.display(), err)
            }
            Error::Execute { path, err } => {
                write!(f, "executing template '{}': {}", path.display(), err)
            }
            Error::Write { path, err } => {
                write!(f, "writing '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::OpenTemplateFile { err, .. } => Some(err),
            Error::ParseTemplate { .. } => None,
            Error::Execute { .. } => None,
            Error::Write { err, .. } => Some(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn value(pairs: &[(&str, Value)]) -> Value {
        let m: HashMap<String, Value> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect();
        Value::Object(m)
    }

    #[test]
    fn test_render() -> Result<()> {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("page.tmpl"),
            "<title>{{ .Title }}</title>{{ .Body }}",
        )
        .unwrap();
        let dest = tmp.path().join("page.html");
        let renderer = Renderer {
            template_dir: tmp.path(),
        };
        renderer.render(
            "page.tmpl",
            value(&[
                ("Title", Value::from("05-18")),
                ("Body", Value::from("<p>hi</p>")),
            ]),
            &dest,
        )?;
        assert_eq!(
            "<title>05-18</title><p>hi</p>",
            std::fs::read_to_string(&dest).unwrap()
        );
        Ok(())
    }

    #[test]
    fn test_render_truncates() -> Result<()> {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("page.tmpl"), "{{ .Title }}").unwrap();
        let dest = tmp.path().join("page.html");
        std::fs::write(&dest, "a much longer previous rendering").unwrap();
        let renderer = Renderer {
            template_dir: tmp.path(),
        };
        renderer.render("page.tmpl", value(&[("Title", Value::from("new"))]), &dest)?;
        assert_eq!("new", std::fs::read_to_string(&dest).unwrap());
        Ok(())
    }

    #[test]
    fn test_range() -> Result<()> {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("index.tmpl"),
            "{{ range .Posts }}[{{ .Title }}]{{ end }}",
        )
        .unwrap();
        let dest = tmp.path().join("index.html");
        let posts = Value::Array(vec![
            value(&[("Title", Value::from("b"))]),
            value(&[("Title", Value::from("a"))]),
        ]);
        Renderer {
            template_dir: tmp.path(),
        }
        .render("index.tmpl", value(&[("Posts", posts)]), &dest)?;
        assert_eq!("[b][a]", std::fs::read_to_string(&dest).unwrap());
        Ok(())
    }

    #[test]
    fn test_missing_template() {
        let tmp = TempDir::new().unwrap();
        let renderer = Renderer {
            template_dir: tmp.path(),
        };
        let result = renderer.render("nope.tmpl", Value::Nil, &tmp.path().join("out.html"));
        assert!(matches!(result, Err(Error::OpenTemplateFile { .. })));
        assert!(!tmp.path().join("out.html").exists());
    }

    #[test]
    fn test_malformed_template() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.tmpl");
        std::fs::write(&path, "{{ if .Title }}unterminated").unwrap();
        assert!(matches!(
            load_template(&path),
            Err(Error::ParseTemplate { .. })
        ));
    }
}
