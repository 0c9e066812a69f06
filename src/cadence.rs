//! Defines the [`Cadence`] type, the posting frequency of a journal. The
//! cadence is fixed when the project is created and persisted in
//! `config.yaml` under its symbolic name (e.g., `TypeWeekly`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The posting frequency of a journal. It determines both the directory depth
/// and the file name shape of content files (see [`crate::layout`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cadence {
    /// One entry per day at `content/<YYYY>/<MM>/<DD>.md`.
    Daily,

    /// One entry per ISO week at `content/<YYYY>/<MM>-<DD>.md`, named for
    /// the Monday that starts the week.
    Weekly,

    /// One entry per month at `content/<YYYY><MM>.md`.
    Monthly,
}

const DAILY: &str = "TypeDaily";
const WEEKLY: &str = "TypeWeekly";
const MONTHLY: &str = "TypeMonthly";

impl Default for Cadence {
    fn default() -> Self {
        Cadence::Daily
    }
}

impl Cadence {
    /// Returns the symbolic name under which the cadence is persisted.
    pub fn to_symbol(self) -> &'static str {
        match self {
            Cadence::Daily => DAILY,
            Cadence::Weekly => WEEKLY,
            Cadence::Monthly => MONTHLY,
        }
    }

    /// Parses a symbolic name. Unrecognized names map to
    /// [`Cadence::default`] rather than failing, so an old or hand-edited
    /// config still loads.
    pub fn from_symbol(symbol: &str) -> Cadence {
        match symbol {
            DAILY => Cadence::Daily,
            WEEKLY => Cadence::Weekly,
            MONTHLY => Cadence::Monthly,
            _ => Cadence::default(),
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.to_symbol())
    }
}

impl Serialize for Cadence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_symbol())
    }
}

impl<'de> Deserialize<'de> for Cadence {
    fn deserialize<D>(deserializer: D) -> Result<Cadence, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Cadence::from_symbol(&String::deserialize(deserializer)?))
    }
}
