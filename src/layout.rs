//! Maps content files to output files. Each [`Cadence`] fixes the shape of
//! the content tree:
//!
//! | Cadence   | Content file                 | Output file                    |
//! |-----------|------------------------------|--------------------------------|
//! | Monthly   | `content/<YYYY><MM>.md`      | `<dest>/<YYYY><MM>.html`       |
//! | Weekly    | `content/<YYYY>/<MM>-<DD>.md`| `<dest>/<YYYY>/<MM>-<DD>.html` |
//! | Daily     | `content/<YYYY>/<MM>/<DD>.md`| `<dest>/<YYYY>/<MM>/<DD>.html` |
//!
//! Paths are handled as segments relative to the content root. Every segment
//! is validated, and a tree that doesn't match the cadence produces an
//! [`Error`] naming the offending path rather than a bogus output location.
//!
//! All date components are zero-padded. The index lists posts in reverse
//! walk order, which is only chronological because of that padding.

use crate::cadence::Cadence;
use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;
use std::path::{Component, Path, PathBuf};

const MARKDOWN_EXTENSION: &str = "md";
const HTML_EXTENSION: &str = "html";

/// Where a content file goes and the date fields derived from its path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    /// The file stem, e.g. `05-18` for `content/2020/05-18.md`.
    pub title: String,

    /// The output file path relative to the destination root.
    pub output_path: PathBuf,

    /// The link to the output file relative to the index page, e.g.
    /// `./2020/05-18.html`.
    pub link: String,

    /// The stylesheet path relative to the output file.
    pub css_path: String,

    /// The 4-digit year.
    pub year: String,

    /// The 2-digit month.
    pub month: String,

    pub dates: Dates,
}

/// The cadence-specific date fields of a [`Placement`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dates {
    /// Daily and monthly posts carry a single date string (the file stem).
    Single { post_date: String },

    /// Weekly posts span Monday (`from_date`) through Sunday (`to_date`),
    /// both formatted `MM-DD`.
    Week {
        from_date: String,
        to_date: String,
        week_num: u32,
        is_last_week: bool,
    },
}

/// Derives the [`Placement`] of a content file. `relative_path` is the path
/// of the file relative to the content root.
pub fn place_file(cadence: Cadence, relative_path: &Path) -> Result<Placement> {
    let segments = segments(relative_path)?;
    let shape_error = || Error::Shape {
        path: relative_path.to_owned(),
        cadence,
        expected: file_shape(cadence),
    };

    match (cadence, segments.as_slice()) {
        (Cadence::Monthly, [file_name]) => {
            let stem = markdown_stem(relative_path, file_name)?;
            let (year, month) = match (stem.get(..4), stem.get(4..)) {
                (Some(year), Some(month)) => (year, month),
                _ => return Err(shape_error()),
            };
            let date = parse_date(relative_path, year, month, "01")?;
            Ok(Placement {
                title: stem.to_owned(),
                output_path: PathBuf::from(html_name(stem)),
                link: format!("./{}", html_name(stem)),
                css_path: css_path(0),
                year: format!("{:04}", date.year()),
                month: format!("{:02}", date.month()),
                dates: Dates::Single {
                    post_date: stem.to_owned(),
                },
            })
        }
        (Cadence::Weekly, [year, file_name]) => {
            let stem = markdown_stem(relative_path, file_name)?;
            let (month, day) = match stem.split_once('-') {
                Some(parts) => parts,
                None => return Err(shape_error()),
            };
            let monday = parse_date(relative_path, year, month, day)?;
            let week_num = monday.iso_week().week();
            Ok(Placement {
                title: stem.to_owned(),
                output_path: Path::new(year).join(html_name(stem)),
                link: format!("./{}/{}", year, html_name(stem)),
                css_path: css_path(1),
                year: (*year).to_owned(),
                month: month.to_owned(),
                dates: Dates::Week {
                    from_date: stem.to_owned(),
                    to_date: week_end(monday).format("%m-%d").to_string(),
                    week_num,
                    is_last_week: is_last_week(week_num),
                },
            })
        }
        (Cadence::Daily, [year, month, file_name]) => {
            let stem = markdown_stem(relative_path, file_name)?;
            parse_date(relative_path, year, month, stem)?;
            Ok(Placement {
                title: stem.to_owned(),
                output_path: Path::new(year).join(month).join(html_name(stem)),
                link: format!("./{}/{}/{}", year, month, html_name(stem)),
                css_path: css_path(2),
                year: (*year).to_owned(),
                month: (*month).to_owned(),
                dates: Dates::Single {
                    post_date: stem.to_owned(),
                },
            })
        }
        _ => Err(shape_error()),
    }
}

/// Derives the output directory (relative to the destination root) that
/// mirrors a content directory. `relative_path` is the path of the directory
/// relative to the content root and must not be empty.
pub fn mirror_dir(cadence: Cadence, relative_path: &Path) -> Result<PathBuf> {
    let segments = segments(relative_path)?;
    let valid = match (cadence, segments.as_slice()) {
        (Cadence::Weekly, [year]) | (Cadence::Daily, [year]) => {
            check_segment(relative_path, year, 4, "a 4-digit year")?;
            true
        }
        (Cadence::Daily, [year, month]) => {
            check_segment(relative_path, year, 4, "a 4-digit year")?;
            check_segment(relative_path, month, 2, "a 2-digit month")?;
            true
        }
        _ => false,
    };
    match valid {
        true => Ok(segments.iter().collect()),
        false => Err(Error::Shape {
            path: relative_path.to_owned(),
            cadence,
            expected: dir_shape(cadence),
        }),
    }
}

/// Returns the content file path (relative to the content root) for the
/// entry covering `today`.
pub fn entry_path(cadence: Cadence, today: NaiveDate) -> PathBuf {
    match cadence {
        Cadence::Monthly => PathBuf::from(format!("{}.md", today.format("%Y%m"))),
        Cadence::Weekly => {
            // The year directory belongs to the Monday, which can fall in the
            // previous December.
            let monday = week_start(today);
            PathBuf::from(format!("{:04}", monday.year()))
                .join(format!("{}.md", monday.format("%m-%d")))
        }
        Cadence::Daily => PathBuf::from(format!("{:04}", today.year()))
            .join(format!("{:02}", today.month()))
            .join(format!("{:02}.md", today.day())),
    }
}

/// Returns the Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Returns the Sunday ending the week that starts on `monday`.
pub fn week_end(monday: NaiveDate) -> NaiveDate {
    monday + Duration::days(6)
}

/// Reports whether an ISO week number marks the last week of its year. This
/// is `week >= 52`, which also flags week 52 in years that have a week 53.
pub fn is_last_week(week_num: u32) -> bool {
    week_num >= 52
}

fn file_shape(cadence: Cadence) -> &'static str {
    match cadence {
        Cadence::Monthly => "<YYYY><MM>.md",
        Cadence::Weekly => "<YYYY>/<MM>-<DD>.md",
        Cadence::Daily => "<YYYY>/<MM>/<DD>.md",
    }
}

fn dir_shape(cadence: Cadence) -> &'static str {
    match cadence {
        Cadence::Monthly => "no subdirectories",
        Cadence::Weekly => "<YYYY>",
        Cadence::Daily => "<YYYY> or <YYYY>/<MM>",
    }
}

fn html_name(stem: &str) -> String {
    format!("{}.{}", stem, HTML_EXTENSION)
}

fn css_path(depth: usize) -> String {
    match depth {
        0 => String::from("./static/styles.css"),
        _ => format!("{}static/styles.css", "../".repeat(depth)),
    }
}

// Splits a relative path into its UTF-8 segments, rejecting anything that
// isn't a plain name (roots, `..`, etc).
fn segments(relative_path: &Path) -> Result<Vec<&str>> {
    relative_path
        .components()
        .map(|component| match component {
            Component::Normal(name) => name
                .to_str()
                .ok_or_else(|| Error::InvalidFileName(relative_path.to_owned())),
            _ => Err(Error::InvalidFileName(relative_path.to_owned())),
        })
        .collect()
}

fn markdown_stem<'a>(relative_path: &Path, file_name: &'a str) -> Result<&'a str> {
    let path = Path::new(file_name);
    match (path.file_stem(), path.extension()) {
        (Some(_), Some(ext)) if ext == MARKDOWN_EXTENSION => {
            Ok(&file_name[..file_name.len() - MARKDOWN_EXTENSION.len() - 1])
        }
        _ => Err(Error::NotMarkdown(relative_path.to_owned())),
    }
}

fn check_segment(
    relative_path: &Path,
    segment: &str,
    len: usize,
    expected: &'static str,
) -> Result<u32> {
    match segment.len() == len && segment.bytes().all(|b| b.is_ascii_digit()) {
        true => segment.parse().map_err(|_| Error::Segment {
            path: relative_path.to_owned(),
            segment: segment.to_owned(),
            expected,
        }),
        false => Err(Error::Segment {
            path: relative_path.to_owned(),
            segment: segment.to_owned(),
            expected,
        }),
    }
}

fn parse_date(relative_path: &Path, year: &str, month: &str, day: &str) -> Result<NaiveDate> {
    let y = check_segment(relative_path, year, 4, "a 4-digit year")?;
    let m = check_segment(relative_path, month, 2, "a 2-digit month")?;
    let d = check_segment(relative_path, day, 2, "a 2-digit day")?;
    NaiveDate::from_ymd_opt(y as i32, m, d).ok_or_else(|| Error::InvalidDate {
        path: relative_path.to_owned(),
        date: format!("{}-{}-{}", year, month, day),
    })
}

/// The result of a fallible layout operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a content path that doesn't fit the project's [`Cadence`].
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// Returned when the number of path segments doesn't match the cadence.
    Shape {
        path: PathBuf,
        cadence: Cadence,
        expected: &'static str,
    },

    /// Returned when a path segment isn't the expected run of digits.
    Segment {
        path: PathBuf,
        segment: String,
        expected: &'static str,
    },

    /// Returned when the path names a date that doesn't exist (e.g. 02-30).
    InvalidDate { path: PathBuf, date: String },

    /// Returned when a content file doesn't have the `.md` extension.
    NotMarkdown(PathBuf),

    /// Returned when a path isn't a plain, UTF-8 relative path.
    InvalidFileName(PathBuf),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Shape {
                path,
                cadence,
                expected,
            } => write!(
                f,
                "content path '{}' doesn't match {} layout: expected {}",
                path.display(),
                cadence,
                expected
            ),
            Error::Segment {
                path,
                segment,
                expected,
            } => write!(
                f,
                "content path '{}': '{}' is not {}",
                path.display(),
                segment,
                expected
            ),
            Error::InvalidDate { path, date } => write!(
                f,
                "content path '{}': {} is not a valid date",
                path.display(),
                date
            ),
            Error::NotMarkdown(path) => {
                write!(f, "content file '{}' is not a `.md` file", path.display())
            }
            Error::InvalidFileName(path) => {
                write!(f, "invalid content path: {:?}", path)
            }
        }
    }
}

impl std::error::Error for Error {}
