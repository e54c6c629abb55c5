use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of columns in the weekly habit grid.
pub const DAYS_IN_WEEK: usize = 7;

/// Day headers for the weekly grid, Monday first.
pub const DAY_LABELS: [&str; DAYS_IN_WEEK] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Per-day completion marks for one habit, Monday at index 0.
///
/// The API has shipped two shapes for this field: a plain boolean array and
/// an object keyed by day. Both decode here; encoding always produces the array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMarks", into = "Vec<bool>")]
pub struct WeekMarks([bool; DAYS_IN_WEEK]);

impl WeekMarks {
    pub fn new(marks: [bool; DAYS_IN_WEEK]) -> Self {
        Self(marks)
    }

    pub fn get(&self, day: usize) -> Option<bool> {
        self.0.get(day).copied()
    }

    /// Flip one day. Returns the new value, or `None` if `day` is out of range.
    pub fn toggle(&mut self, day: usize) -> Option<bool> {
        let slot = self.0.get_mut(day)?;
        *slot = !*slot;
        Some(*slot)
    }

    pub fn completed_days(&self) -> usize {
        self.0.iter().filter(|m| **m).count()
    }

    pub fn as_array(&self) -> &[bool; DAYS_IN_WEEK] {
        &self.0
    }
}

impl From<WeekMarks> for Vec<bool> {
    fn from(marks: WeekMarks) -> Self {
        marks.0.to_vec()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMarks {
    /// `null`, read as no marks
    Null,
    List(Vec<bool>),
    Keyed(HashMap<String, bool>),
}

impl TryFrom<RawMarks> for WeekMarks {
    type Error = String;

    fn try_from(raw: RawMarks) -> Result<Self, Self::Error> {
        let mut marks = [false; DAYS_IN_WEEK];
        match raw {
            RawMarks::Null => {}
            RawMarks::List(list) => {
                if list.len() > DAYS_IN_WEEK {
                    return Err(format!("expected at most {} day marks, got {}", DAYS_IN_WEEK, list.len()));
                }
                marks[..list.len()].copy_from_slice(&list);
            }
            RawMarks::Keyed(map) => {
                for (key, value) in map {
                    let day = day_index(&key).ok_or_else(|| format!("unknown day key '{}'", key))?;
                    marks[day] = value;
                }
            }
        }
        Ok(Self(marks))
    }
}

/// Map a day key to its grid column. English, Portuguese and numeric keys are accepted.
fn day_index(key: &str) -> Option<usize> {
    let key = key.trim().to_lowercase();
    if let Ok(n) = key.parse::<usize>() {
        return (n < DAYS_IN_WEEK).then_some(n);
    }
    let idx = match key.as_str() {
        "mon" | "monday" | "seg" => 0,
        "tue" | "tuesday" | "ter" => 1,
        "wed" | "wednesday" | "qua" => 2,
        "thu" | "thursday" | "qui" => 3,
        "fri" | "friday" | "sex" => 4,
        "sat" | "saturday" | "sab" | "sáb" => 5,
        "sun" | "sunday" | "dom" => 6,
        _ => return None,
    };
    Some(idx)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "weekData", alias = "days", default)]
    pub week_data: WeekMarks,
}
