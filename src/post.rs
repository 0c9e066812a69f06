//! Defines the [`Post`] type. Posts are never stored; they're rebuilt from
//! the content tree on every build (see [`crate::build`]).

use crate::layout::{Dates, Placement};
use chrono::{DateTime, SecondsFormat, Utc};
use gtmpl_value::Value;
use std::collections::HashMap;
use std::path::PathBuf;

/// A single journal entry. A post's identity is its `source_path`.
#[derive(Clone, Debug, PartialEq)]
pub struct Post {
    /// The markdown file the post was built from.
    pub source_path: PathBuf,

    /// The output location and date fields derived from `source_path`.
    pub placement: Placement,

    /// The rendered HTML fragment.
    pub body: String,

    /// The destination root the post was written under.
    pub base_link: String,

    /// The modification time of the source file.
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Converts a [`Post`] into a [`Value`] for templating. Field names
    /// follow the journal's template conventions (`.Title`, `.Body`,
    /// `.FromDate`, ...); fields that don't apply to the cadence are empty
    /// strings, `0`, or `false`.
    pub fn to_value(&self) -> Value {
        let p = &self.placement;
        let (post_date, from_date, to_date, week_num, is_last_week) = match &p.dates {
            Dates::Single { post_date } => (post_date.as_str(), "", "", 0, false),
            Dates::Week {
                from_date,
                to_date,
                week_num,
                is_last_week,
            } => ("", from_date.as_str(), to_date.as_str(), *week_num, *is_last_week),
        };

        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("Title".to_owned(), Value::String(p.title.clone()));
        m.insert("Body".to_owned(), Value::String(self.body.clone()));
        m.insert("PostYear".to_owned(), Value::String(p.year.clone()));
        m.insert("PostMonth".to_owned(), Value::String(p.month.clone()));
        m.insert("PostDate".to_owned(), Value::String(post_date.to_owned()));
        m.insert("FromDate".to_owned(), Value::String(from_date.to_owned()));
        m.insert("ToDate".to_owned(), Value::String(to_date.to_owned()));
        m.insert("WeekNum".to_owned(), Value::from(week_num));
        m.insert("IsLastWeek".to_owned(), Value::Bool(is_last_week));
        m.insert("BaseLink".to_owned(), Value::String(self.base_link.clone()));
        m.insert("CSSPath".to_owned(), Value::String(p.css_path.clone()));
        m.insert("Link".to_owned(), Value::String(p.link.clone()));
        m.insert(
            "UpdatedAt".to_owned(),
            Value::String(self.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        Value::Object(m)
    }
}
