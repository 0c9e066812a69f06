//! Creates new journal entries from the content skeleton template.

use crate::config::Config;
use crate::layout;
use crate::render::CONTENT_TEMPLATE;
use crate::util::write_new;
use chrono::NaiveDate;
use log::info;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Creates the entry covering `today`, copying the content template into it.
/// `template` names a file in the template directory and defaults to
/// `content.md.tmpl`. Returns the path of the new entry.
///
/// An existing entry is never overwritten: if today's (or this week's, or
/// this month's) entry already exists, [`Error::AlreadyPosted`] is returned.
pub fn create(config: &Config, today: NaiveDate, template: Option<&str>) -> Result<PathBuf> {
    let template_path = config
        .template_dir
        .join(template.unwrap_or(CONTENT_TEMPLATE));
    let skeleton = fs::read(&template_path).map_err(|err| Error::Template {
        path: template_path.clone(),
        err,
    })?;

    let path = config
        .content_dir
        .join(layout::entry_path(config.cadence, today));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }
    write_new(&path, &skeleton).map_err(|err| match err.kind() {
        io::ErrorKind::AlreadyExists => Error::AlreadyPosted(path.clone()),
        _ => Error::Io {
            path: path.clone(),
            err,
        },
    })?;

    info!("created '{}'", path.display());
    Ok(path)
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> Error {
    let path = path.to_owned();
    move |err| Error::Io { path, err }
}

/// The result of creating an entry.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem creating an entry.
#[derive(Debug)]
pub enum Error {
    /// Returned when the entry for the current period already exists.
    AlreadyPosted(PathBuf),

    /// Returned when the content template can't be read.
    Template { path: PathBuf, err: io::Error },

    /// Returned for other I/O errors.
    Io { path: PathBuf, err: io::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::AlreadyPosted(path) => {
                write!(f, "already posted: '{}' exists", path.display())
            }
            Error::Template { path, err } => {
                write!(f, "reading content template '{}': {}", path.display(), err)
            }
            Error::Io { path, err } => write!(f, "'{}': {}", path.display(), err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::AlreadyPosted(_) => None,
            Error::Template { err, .. } => Some(err),
            Error::Io { err, .. } => Some(err),
        }
    }
}
