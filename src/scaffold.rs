//! Creates the directory layout of a new journal:
//!
//! ```text
//! <project>/
//!   config.yaml
//!   content/
//!   public/
//!   static/styles.css
//!   template/index.html.tmpl, post.html.tmpl, content.md.tmpl
//! ```

use crate::cadence::Cadence;
use crate::config::{self, CONFIG_FILE_NAME};
use crate::render::{CONTENT_TEMPLATE, INDEX_TEMPLATE, POST_TEMPLATE};
use crate::util::write_new;
use log::info;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const DIRS: [&str; 4] = ["public", "content", "static", "template"];

const INDEX: &str = include_str!("../theme/index.html.tmpl");
const POST: &str = include_str!("../theme/post.html.tmpl");
const CONTENT: &str = include_str!("../theme/content.md.tmpl");
const STYLES: &str = include_str!("../theme/styles.css");

/// Scaffolds a new project at `dir`. `dir` may be missing or an empty
/// directory; anything else fails before a single file is written.
pub fn create(dir: &Path, cadence: Cadence) -> Result<()> {
    if dir.exists() {
        let is_empty = dir.is_dir()
            && fs::read_dir(dir).map_err(io_err(dir))?.next().is_none();
        if !is_empty {
            return Err(Error::NotEmpty(dir.to_owned()));
        }
    }

    fs::create_dir_all(dir).map_err(io_err(dir))?;
    let wd = fs::canonicalize(dir).map_err(io_err(dir))?;
    for sub in DIRS.iter() {
        let path = wd.join(sub);
        fs::create_dir(&path).map_err(io_err(&path))?;
    }

    let config = config::scaffold_yaml(cadence, &wd).map_err(Error::Config)?;
    let files = [
        (Path::new("template").join(INDEX_TEMPLATE), INDEX),
        (Path::new("template").join(POST_TEMPLATE), POST),
        (Path::new("template").join(CONTENT_TEMPLATE), CONTENT),
        (Path::new("static").join("styles.css"), STYLES),
        (PathBuf::from(CONFIG_FILE_NAME), config.as_str()),
    ];
    for (relative, contents) in files.iter() {
        let path = wd.join(relative);
        write_new(&path, contents.as_bytes()).map_err(io_err(&path))?;
    }

    info!("created {} project at '{}'", cadence, wd.display());
    Ok(())
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> Error {
    let path = path.to_owned();
    move |err| Error::Io { path, err }
}

/// The result of scaffolding a project.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem scaffolding a project.
#[derive(Debug)]
pub enum Error {
    /// Returned when the target exists and is a file or a non-empty
    /// directory.
    NotEmpty(PathBuf),

    /// Returned when the generated configuration can't be serialized.
    Config(serde_yaml::Error),

    /// Returned for I/O problems creating directories or files.
    Io { path: PathBuf, err: io::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NotEmpty(path) => write!(
                f,
                "'{}' already exists and is not an empty directory",
                path.display()
            ),
            Error::Config(err) => write!(f, "generating config: {}", err),
            Error::Io { path, err } => write!(f, "creating '{}': {}", path.display(), err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::NotEmpty(_) => None,
            Error::Config(err) => Some(err),
            Error::Io { err, .. } => Some(err),
        }
    }
}
