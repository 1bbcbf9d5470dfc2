use crate::date;
use crate::errors::LedgerError;
use chrono::{Duration, NaiveDate};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Days a client may record ahead of the server's UTC today. One day covers
/// clients whose local calendar has already rolled over.
pub const CLOCK_SKEW_DAYS: i64 = 1;

/// The set of days on which one user recorded a completion. Sparse: absent
/// days mean "not completed", never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionLedger {
    days: BTreeSet<NaiveDate>,
}

impl CompletionLedger {
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.days.contains(&day)
    }

    /// Records a completion. Idempotent: returns `Ok(false)` when the day was
    /// already present. Days beyond `today + CLOCK_SKEW_DAYS` are rejected.
    pub fn insert(&mut self, day: NaiveDate, today: NaiveDate) -> Result<bool, LedgerError> {
        if day > today + Duration::days(CLOCK_SKEW_DAYS) {
            return Err(LedgerError::FutureDay(day));
        }
        Ok(self.days.insert(day))
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl FromIterator<NaiveDate> for CompletionLedger {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

impl Serialize for CompletionLedger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.days.iter().map(|day| date::format_day(*day)))
    }
}

/// On-disk ledger encodings seen in historical data: the canonical flat array
/// of `YYYY-MM-DD` strings, and an older `"YYYY-MM" -> [day-of-month]` map.
/// Both normalize to the same set here; serialization only ever emits the
/// flat form, so the month map disappears on the next write.
#[derive(Deserialize)]
#[serde(untagged)]
enum LedgerEncoding {
    Days(Vec<String>),
    MonthSets(BTreeMap<String, Vec<u32>>),
}

impl<'de> Deserialize<'de> for CompletionLedger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut days = BTreeSet::new();
        match LedgerEncoding::deserialize(deserializer)? {
            LedgerEncoding::Days(values) => {
                for value in values {
                    days.insert(date::parse_day(&value).map_err(de::Error::custom)?);
                }
            }
            LedgerEncoding::MonthSets(months) => {
                for (month, numbers) in months {
                    let (year, month_number) = parse_month(&month).map_err(de::Error::custom)?;
                    for number in numbers {
                        let day = NaiveDate::from_ymd_opt(year, month_number, number).ok_or_else(
                            || de::Error::custom(format!("invalid day {number} in month {month}")),
                        )?;
                        days.insert(day);
                    }
                }
            }
        }
        Ok(Self { days })
    }
}

fn parse_month(value: &str) -> Result<(i32, u32), LedgerError> {
    let invalid = || LedgerError::InvalidDay(value.to_string());
    let (year, month) = value.split_once('-').ok_or_else(invalid)?;
    let year = year.parse().map_err(|_| invalid())?;
    let month = month.parse().ok().filter(|m| (1..=12).contains(m)).ok_or_else(invalid)?;
    Ok((year, month))
}
