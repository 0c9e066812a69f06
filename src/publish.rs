//! Publishes the site to the configured publish directory, or builds it into
//! a temporary directory and serves it locally for preview.

use crate::build::{build_site, Error as BuildError};
use crate::config::Config;
use crate::project::Project;
use actix_files::Files;
use actix_web::{App, HttpServer};
use log::info;
use std::fmt;
use std::io;
use std::path::Path;

/// The address the preview server listens on by default.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Builds the site into `config.publish_dir`. Existing files are overwritten;
/// files with no counterpart in the current build are left alone.
pub fn publish(config: &Config) -> Result<Project> {
    let project = build_site(config, &config.publish_dir)?;
    info!("published to '{}'", config.publish_dir.display());
    Ok(project)
}

/// Builds the site into a fresh temporary directory and serves it at `addr`
/// until the server stops (SIGINT/SIGTERM trigger a graceful shutdown) or
/// fails. The temporary directory is removed before returning.
pub fn serve(config: &Config, addr: &str) -> Result<()> {
    serve_in(config, &std::env::temp_dir(), addr)
}

/// Like [`serve`], but creates the temporary directory under `parent`. The
/// directory is removed whether the server stops cleanly or not.
pub fn serve_in(config: &Config, parent: &Path, addr: &str) -> Result<()> {
    let dir = tempfile::Builder::new()
        .prefix("jotter-")
        .tempdir_in(parent)
        .map_err(Error::TempDir)?;
    build_site(config, dir.path())?;

    let root = dir.path().to_owned();
    info!("serving '{}' at http://{}/", root.display(), addr);
    actix_web::rt::System::new()
        .block_on(async move {
            HttpServer::new(move || {
                App::new().service(Files::new("/", root.clone()).index_file("index.html"))
            })
            .workers(1)
            .bind(addr)?
            .run()
            .await
        })
        .map_err(Error::Server)?;

    info!("server stopped; removing '{}'", dir.path().display());
    dir.close().map_err(Error::TempDir)
}

/// The result of publishing or serving.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem publishing or serving the site.
#[derive(Debug)]
pub enum Error {
    /// Returned when the site fails to build.
    Build(BuildError),

    /// Returned when the temporary preview directory can't be created or
    /// removed.
    TempDir(io::Error),

    /// Returned when the preview server can't bind or fails while running.
    Server(io::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Build(err) => err.fmt(f),
            Error::TempDir(err) => write!(f, "preview directory: {}", err),
            Error::Server(err) => write!(f, "preview server: {}", err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Build(err) => Some(err),
            Error::TempDir(err) => Some(err),
            Error::Server(err) => Some(err),
        }
    }
}

impl From<BuildError> for Error {
    /// Converts [`BuildError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: BuildError) -> Error {
        Error::Build(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cadence::Cadence;
    use crate::{entry, scaffold};
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn scaffolded(cadence: Cadence) -> (TempDir, Config) {
        let tmp = TempDir::new().unwrap();
        scaffold::create(tmp.path(), cadence).unwrap();
        let config = Config::from_directory(tmp.path()).unwrap();
        (tmp, config)
    }

    #[test]
    fn test_publish_weekly() -> Result<()> {
        let (_tmp, config) = scaffolded(Cadence::Weekly);
        let today = NaiveDate::from_ymd_opt(2020, 5, 20).unwrap();
        entry::create(&config, today, None).unwrap();
        let project = publish(&config)?;

        assert_eq!(1, project.posts.len());
        let page = fs::read_to_string(config.publish_dir.join("2020/05-18.html")).unwrap();
        assert!(page.contains("The weekly report from 05-18 to 05-24"), "{}", page);
        assert!(page.contains(r#"href="../static/styles.css""#), "{}", page);
        assert!(page.contains("<h2>Title</h2>"), "{}", page);

        let index = fs::read_to_string(config.publish_dir.join("index.html")).unwrap();
        assert!(index.contains(r#"<a href="./2020/05-18.html">Week 21</a>"#), "{}", index);
        assert!(config.publish_dir.join("static/styles.css").is_file());
        Ok(())
    }

    #[test]
    fn test_publish_daily() -> Result<()> {
        let (_tmp, config) = scaffolded(Cadence::Daily);
        for day in &[23, 24] {
            let today = NaiveDate::from_ymd_opt(2020, 5, *day).unwrap();
            entry::create(&config, today, None).unwrap();
        }
        let project = publish(&config)?;

        let titles: Vec<&str> = project
            .posts
            .iter()
            .map(|post| post.placement.title.as_str())
            .collect();
        assert_eq!(vec!["24", "23"], titles);
        let index = fs::read_to_string(config.publish_dir.join("index.html")).unwrap();
        assert!(index.contains(r#"<a href="./2020/05/24.html">24</a>"#), "{}", index);
        Ok(())
    }

    #[test]
    fn test_publish_year_headers() -> Result<()> {
        let (_tmp, config) = scaffolded(Cadence::Daily);
        for (year, month, day) in &[(2019, 12, 31), (2020, 1, 1)] {
            let today = NaiveDate::from_ymd_opt(*year, *month, *day).unwrap();
            entry::create(&config, today, None).unwrap();
        }
        publish(&config)?;

        let index = fs::read_to_string(config.publish_dir.join("index.html")).unwrap();
        let newer = index.find("<h2>2020</h2>").expect("2020 header");
        let older = index.find("<h2>2019</h2>").expect("2019 header");
        assert!(newer < older, "{}", index);
        assert_eq!(2, index.matches("<h2>").count(), "{}", index);
        Ok(())
    }

    #[test]
    fn test_serve_address_in_use() {
        let (_tmp, config) = scaffolded(Cadence::Weekly);
        let parent = TempDir::new().unwrap();
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let result = serve_in(&config, parent.path(), &addr);
        assert!(matches!(result, Err(Error::Server(_))), "{:?}", result);
        assert_eq!(0, fs::read_dir(parent.path()).unwrap().count());
    }

    #[test]
    fn test_serve_invalid_address() {
        let (_tmp, config) = scaffolded(Cadence::Weekly);
        let parent = TempDir::new().unwrap();
        let result = serve_in(&config, parent.path(), "not an address");
        assert!(matches!(result, Err(Error::Server(_))), "{:?}", result);
        assert_eq!(0, fs::read_dir(parent.path()).unwrap().count());
    }

    #[test]
    fn test_serve_build_failure() {
        let (_tmp, config) = scaffolded(Cadence::Weekly);
        fs::write(config.content_dir.join("notes.md"), "stray").unwrap();
        let parent = TempDir::new().unwrap();
        let result = serve_in(&config, parent.path(), DEFAULT_ADDR);
        assert!(matches!(result, Err(Error::Build(_))), "{:?}", result);
        assert_eq!(0, fs::read_dir(parent.path()).unwrap().count());
    }

    #[test]
    fn test_publish_empty_journal() -> Result<()> {
        let (_tmp, config) = scaffolded(Cadence::Monthly);
        let project = publish(&config)?;
        assert!(project.posts.is_empty());
        assert!(config.publish_dir.join("index.html").is_file());
        Ok(())
    }
}
