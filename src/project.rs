//! Defines the [`Project`] type, the value the index template is executed
//! against.

use crate::cadence::Cadence;
use crate::post::Post;
use gtmpl_value::Value;
use std::collections::HashMap;

/// A journal and its posts, newest first.
#[derive(Clone, Debug, PartialEq)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub cadence: Cadence,
    pub posts: Vec<Post>,
}

impl Project {
    /// Converts a [`Project`] into a [`Value`] with fields `Name`,
    /// `Description`, `TypeStr`, and `Posts` (see [`Post::to_value`]). Each
    /// post additionally carries `IsFirstOfYear`, set on the first post
    /// listed under its `PostYear`, so index templates can print one year
    /// header per year whatever the cadence.
    pub fn to_value(&self) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("Name".to_owned(), Value::String(self.name.clone()));
        m.insert(
            "Description".to_owned(),
            Value::String(self.description.clone()),
        );
        m.insert(
            "TypeStr".to_owned(),
            Value::String(self.cadence.to_symbol().to_owned()),
        );
        m.insert(
            "Posts".to_owned(),
            Value::Array(self.post_values()),
        );
        Value::Object(m)
    }

    fn post_values(&self) -> Vec<Value> {
        let mut previous_year: Option<&str> = None;
        self.posts
            .iter()
            .map(|post| {
                let year = post.placement.year.as_str();
                let first_of_year = previous_year != Some(year);
                previous_year = Some(year);
                match post.to_value() {
                    Value::Object(mut m) => {
                        m.insert("IsFirstOfYear".to_owned(), Value::Bool(first_of_year));
                        Value::Object(m)
                    }
                    value => value,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::layout::place_file;
    use chrono::{TimeZone, Utc};
    use std::path::Path;

    fn project(cadence: Cadence, relatives: &[&str]) -> Project {
        let posts = relatives
            .iter()
            .map(|relative| Post {
                source_path: Path::new("content").join(relative),
                placement: place_file(cadence, Path::new(relative)).unwrap(),
                body: String::new(),
                base_link: String::from("/tmp/site"),
                updated_at: Utc.with_ymd_and_hms(2020, 5, 24, 0, 0, 0).unwrap(),
            })
            .collect();
        Project {
            name: String::from("diary"),
            description: String::new(),
            cadence,
            posts,
        }
    }

    fn first_of_year_flags(value: &Value) -> Vec<bool> {
        let posts = match value {
            Value::Object(m) => match m.get("Posts") {
                Some(Value::Array(posts)) => posts,
                other => panic!("wanted Posts array, got {:?}", other),
            },
            other => panic!("wanted object, got {:?}", other),
        };
        posts
            .iter()
            .map(|post| match post {
                Value::Object(m) => match m.get("IsFirstOfYear") {
                    Some(Value::Bool(flag)) => *flag,
                    other => panic!("wanted IsFirstOfYear bool, got {:?}", other),
                },
                other => panic!("wanted object, got {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_first_of_year_daily() {
        let project = project(
            Cadence::Daily,
            &["2020/01/02.md", "2020/01/01.md", "2019/12/31.md", "2019/12/30.md"],
        );
        assert_eq!(
            vec![true, false, true, false],
            first_of_year_flags(&project.to_value())
        );
    }

    #[test]
    fn test_first_of_year_monthly() {
        let project = project(Cadence::Monthly, &["202101.md", "202012.md", "202011.md"]);
        assert_eq!(
            vec![true, true, false],
            first_of_year_flags(&project.to_value())
        );
    }

    #[test]
    fn test_first_of_year_weekly_week_53() {
        let project = project(
            Cadence::Weekly,
            &["2021/01-04.md", "2020/12-28.md", "2020/12-21.md"],
        );
        assert_eq!(
            vec![true, true, false],
            first_of_year_flags(&project.to_value())
        );
    }

    #[test]
    fn test_project_fields() {
        let value = project(Cadence::Weekly, &[]).to_value();
        match value {
            Value::Object(m) => {
                assert_eq!(Some(&Value::String(String::from("diary"))), m.get("Name"));
                assert_eq!(
                    Some(&Value::String(String::from("TypeWeekly"))),
                    m.get("TypeStr")
                );
                assert_eq!(Some(&Value::Array(Vec::new())), m.get("Posts"));
            }
            other => panic!("wanted object, got {:?}", other),
        }
    }
}
