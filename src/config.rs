//! Loads the project configuration (`config.yaml`). The configuration is an
//! explicit [`Config`] value handed to every operation that needs it.

use crate::cadence::Cadence;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// The name of the configuration file at the project root.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// The on-disk shape of `config.yaml`.
#[derive(Deserialize, Serialize)]
struct ProjectFile {
    #[serde(default)]
    name: String,

    #[serde(default)]
    description: String,

    #[serde(default)]
    typestr: Cadence,

    #[serde(default)]
    wd: PathBuf,

    #[serde(default, rename = "contentDir", skip_serializing_if = "Option::is_none")]
    content_dir: Option<PathBuf>,

    #[serde(default, rename = "templateDir", skip_serializing_if = "Option::is_none")]
    template_dir: Option<PathBuf>,

    #[serde(default, rename = "staticDir", skip_serializing_if = "Option::is_none")]
    static_dir: Option<PathBuf>,

    #[serde(default, rename = "publishDir", skip_serializing_if = "Option::is_none")]
    publish_dir: Option<PathBuf>,
}

/// A loaded project configuration with every directory resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub name: String,
    pub description: String,
    pub cadence: Cadence,

    /// The project root, i.e. the directory holding `config.yaml`.
    pub wd: PathBuf,

    /// The markdown sources. Defaults to `{wd}/content`.
    pub content_dir: PathBuf,

    /// The templates. Defaults to `{wd}/template`.
    pub template_dir: PathBuf,

    /// The static assets. Defaults to `{wd}/static`.
    pub static_dir: PathBuf,

    /// The publish destination. Defaults to `{wd}/public`.
    pub publish_dir: PathBuf,
}

impl Config {
    /// Searches `dir` and its ancestors for `config.yaml` and loads the first
    /// one found.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        for ancestor in dir.ancestors() {
            let path = ancestor.join(CONFIG_FILE_NAME);
            if path.is_file() {
                return Config::from_project_file(&path);
            }
        }
        Err(Error::NotFound(dir.to_owned()))
    }

    /// Loads a configuration file. The project root (`wd`) is the file's
    /// parent directory regardless of the `wd` value stored in the file.
    pub fn from_project_file(path: &Path) -> Result<Config> {
        let file = File::open(path).map_err(|err| Error::Open {
            path: path.to_owned(),
            err,
        })?;
        let project: ProjectFile = serde_yaml::from_reader(file).map_err(|err| Error::Yaml {
            path: path.to_owned(),
            err,
        })?;

        let wd = match path.parent() {
            Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
            Some(parent) => parent.to_owned(),
            None => return Err(Error::NotFound(path.to_owned())),
        };
        let resolve = |dir: Option<PathBuf>, default: &str| match dir {
            Some(dir) if !dir.as_os_str().is_empty() => wd.join(dir),
            _ => wd.join(default),
        };

        Ok(Config {
            name: project.name,
            description: project.description,
            cadence: project.typestr,
            content_dir: resolve(project.content_dir, "content"),
            template_dir: resolve(project.template_dir, "template"),
            static_dir: resolve(project.static_dir, "static"),
            publish_dir: resolve(project.publish_dir, "public"),
            wd,
        })
    }
}

/// Renders the `config.yaml` written into a freshly scaffolded project.
pub fn scaffold_yaml(
    cadence: Cadence,
    wd: &Path,
) -> std::result::Result<String, serde_yaml::Error> {
    serde_yaml::to_string(&ProjectFile {
        name: String::from("your project name"),
        description: String::from("your project description"),
        typestr: cadence,
        wd: wd.to_owned(),
        content_dir: None,
        template_dir: None,
        static_dir: None,
        publish_dir: None,
    })
}

/// The result of loading a [`Config`].
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem loading the configuration.
#[derive(Debug)]
pub enum Error {
    /// Returned when no `config.yaml` exists in the directory or any parent.
    NotFound(PathBuf),

    /// Returned when the configuration file can't be opened.
    Open { path: PathBuf, err: io::Error },

    /// Returned when the configuration file isn't valid YAML.
    Yaml { path: PathBuf, err: serde_yaml::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NotFound(dir) => write!(
                f,
                "could not find `{}` in '{}' or any parent directory",
                CONFIG_FILE_NAME,
                dir.display()
            ),
            Error::Open { path, err } => {
                write!(f, "opening config file '{}': {}", path.display(), err)
            }
            Error::Yaml { path, err } => {
                write!(f, "parsing config file '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::NotFound(_) => None,
            Error::Open { err, .. } => Some(err),
            Error::Yaml { err, .. } => Some(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() -> Result<()> {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            "name: diary\ndescription: notes\ntypestr: TypeWeekly\nwd: /somewhere/else\n",
        );
        let config = Config::from_project_file(&path)?;
        assert_eq!("diary", config.name);
        assert_eq!("notes", config.description);
        assert_eq!(Cadence::Weekly, config.cadence);
        assert_eq!(tmp.path(), config.wd);
        assert_eq!(tmp.path().join("content"), config.content_dir);
        assert_eq!(tmp.path().join("template"), config.template_dir);
        assert_eq!(tmp.path().join("static"), config.static_dir);
        assert_eq!(tmp.path().join("public"), config.publish_dir);
        Ok(())
    }

    #[test]
    fn test_overrides() -> Result<()> {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            "typestr: TypeMonthly\ncontentDir: entries\npublishDir: /srv/www\nstaticDir: \"\"\n",
        );
        let config = Config::from_project_file(&path)?;
        assert_eq!(Cadence::Monthly, config.cadence);
        assert_eq!(tmp.path().join("entries"), config.content_dir);
        assert_eq!(PathBuf::from("/srv/www"), config.publish_dir);
        assert_eq!(tmp.path().join("static"), config.static_dir);
        Ok(())
    }

    #[test]
    fn test_unknown_cadence_is_daily() -> Result<()> {
        let tmp = TempDir::new().unwrap();
        let path = write_config(tmp.path(), "name: x\ntypestr: Fortnightly\n");
        assert_eq!(Cadence::Daily, Config::from_project_file(&path)?.cadence);
        Ok(())
    }

    #[test]
    fn test_from_subdirectory() -> Result<()> {
        let tmp = TempDir::new().unwrap();
        write_config(tmp.path(), "name: diary\ntypestr: TypeDaily\n");
        let nested = tmp.path().join("content").join("2020");
        std::fs::create_dir_all(&nested).unwrap();
        let config = Config::from_directory(&nested)?;
        assert_eq!(tmp.path(), config.wd);
        Ok(())
    }

    #[test]
    fn test_not_found() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        assert!(matches!(
            Config::from_project_file(&path),
            Err(Error::Open { .. })
        ));
    }

    #[test]
    fn test_malformed_yaml() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(tmp.path(), "name: [unclosed\n");
        assert!(matches!(
            Config::from_project_file(&path),
            Err(Error::Yaml { .. })
        ));
    }

    #[test]
    fn test_scaffold_yaml_loads() -> Result<()> {
        let tmp = TempDir::new().unwrap();
        let yaml = scaffold_yaml(Cadence::Monthly, tmp.path()).unwrap();
        assert!(yaml.contains("typestr: TypeMonthly"), "{}", yaml);
        let config = Config::from_project_file(&write_config(tmp.path(), &yaml))?;
        assert_eq!("your project name", config.name);
        assert_eq!(Cadence::Monthly, config.cadence);
        Ok(())
    }
}
