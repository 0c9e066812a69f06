//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the output site: walking the content tree and rendering
//! a page per post ([`build`]), copying the static assets, and rendering the
//! index page.
//!
//! The content tree is walked depth-first in lexical order. Directories are
//! mirrored into the destination before any of their files are visited, and
//! posts are collected in walk order then reversed so the newest comes first.
//! This relies on zero-padded file names (see [`crate::layout`]).

use crate::config::Config;
use crate::layout::{self, Error as LayoutError};
use crate::markdown::{self, Error as MarkdownError};
use crate::post::Post;
use crate::project::Project;
use crate::render::{Error as RenderError, Renderer, INDEX_TEMPLATE, POST_TEMPLATE};
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// The name of the static asset directory inside the destination root.
pub const STATIC_DIR_NAME: &str = "static";

/// Builds the whole site into `dest`: every post page, the static assets, and
/// `index.html`. Returns the project the index was rendered from.
pub fn build_site(config: &Config, dest: &Path) -> Result<Project> {
    let project = build(config, dest)?;
    Renderer {
        template_dir: &config.template_dir,
    }
    .render(INDEX_TEMPLATE, project.to_value(), &dest.join("index.html"))?;
    info!(
        "built {} post(s) into '{}'",
        project.posts.len(),
        dest.display()
    );
    Ok(project)
}

/// Walks the content directory, writing a page per post into `dest`, and
/// copies the static directory to `{dest}/static`. The first error aborts the
/// build; pages written before it stay on disk.
pub fn build(config: &Config, dest: &Path) -> Result<Project> {
    fs::create_dir_all(dest).map_err(io_err(dest))?;

    let renderer = Renderer {
        template_dir: &config.template_dir,
    };
    let base_link = dest.display().to_string();
    let mut posts = Vec::new();

    let walker = WalkDir::new(&config.content_dir)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()))
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));
    for result in walker {
        let entry = result?;
        if entry.depth() == 0 {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(&config.content_dir)
            .map_err(|_| LayoutError::InvalidFileName(entry.path().to_owned()))?;

        if entry.file_type().is_dir() {
            let dir = dest.join(layout::mirror_dir(config.cadence, relative)?);
            create_dir_if_missing(&dir)?;
        } else {
            let post = build_post(config, &entry, relative, &base_link)?;
            let output = dest.join(&post.placement.output_path);
            renderer.render(POST_TEMPLATE, post.to_value(), &output)?;
            debug!("wrote '{}'", output.display());
            posts.push(post);
        }
    }
    posts.reverse();

    let static_dest = dest.join(STATIC_DIR_NAME);
    copy_dir(&config.static_dir, &static_dest)?;

    Ok(Project {
        name: config.name.clone(),
        description: config.description.clone(),
        cadence: config.cadence,
        posts,
    })
}

fn build_post(config: &Config, entry: &DirEntry, relative: &Path, base_link: &str) -> Result<Post> {
    let path = entry.path();
    let placement = layout::place_file(config.cadence, relative)?;
    let source = fs::read(path).map_err(io_err(path))?;
    let body = markdown::to_html(&source).map_err(|err| Error::Markdown {
        path: path.to_owned(),
        err,
    })?;
    let modified = entry.metadata()?.modified().map_err(io_err(path))?;

    Ok(Post {
        source_path: path.to_owned(),
        placement,
        body,
        base_link: base_link.to_owned(),
        updated_at: DateTime::<Utc>::from(modified),
    })
}

fn is_hidden(entry: &DirEntry) -> bool {
    let hidden = entry
        .file_name()
        .to_str()
        .map_or(false, |name| name.starts_with('.'));
    if hidden {
        debug!("skipping hidden entry '{}'", entry.path().display());
    }
    hidden
}

fn create_dir_if_missing(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(io_err(dir))
}

// Copies `src` into `dst` recursively, creating `dst` if needed and
// overwriting files that already exist.
fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    create_dir_if_missing(dst)?;
    for entry in fs::read_dir(src).map_err(io_err(src))? {
        let entry = entry.map_err(io_err(src))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        if entry.file_type().map_err(io_err(&from))?.is_dir() {
            copy_dir(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(io_err(&to))?;
        }
    }
    Ok(())
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> Error {
    let path = path.to_owned();
    move |err| Error::Io { path, err }
}

/// The result of a fallible build operation.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site.
#[derive(Debug)]
pub enum Error {
    /// Returned when the content tree can't be traversed.
    Walk(walkdir::Error),

    /// Returned when a content path doesn't fit the project's cadence.
    Layout(LayoutError),

    /// Returned when a content file can't be converted to HTML.
    Markdown { path: PathBuf, err: MarkdownError },

    /// Returned for errors rendering post or index pages.
    Render(RenderError),

    /// Returned for other I/O errors.
    Io { path: PathBuf, err: io::Error },
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Walk(err) => write!(f, "walking content directory: {}", err),
            Error::Layout(err) => err.fmt(f),
            Error::Markdown { path, err } => {
                write!(f, "converting '{}': {}", path.display(), err)
            }
            Error::Render(err) => err.fmt(f),
            Error::Io { path, err } => write!(f, "'{}': {}", path.display(), err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Walk(err) => Some(err),
            Error::Layout(err) => Some(err),
            Error::Markdown { err, .. } => Some(err),
            Error::Render(err) => Some(err),
            Error::Io { err, .. } => Some(err),
        }
    }
}

impl From<walkdir::Error> for Error {
    /// Converts [`walkdir::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator while walking the content tree.
    fn from(err: walkdir::Error) -> Error {
        Error::Walk(err)
    }
}

impl From<LayoutError> for Error {
    /// Converts [`LayoutError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: LayoutError) -> Error {
        Error::Layout(err)
    }
}

impl From<RenderError> for Error {
    /// Converts [`RenderError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: RenderError) -> Error {
        Error::Render(err)
    }
}
