use rusqlite::Row;
use rusqlite::types::Type;
use std::error::Error as StdError;
use std::str::FromStr;
use taskdeck_core::{Task, TaskId, User, UserId};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::Result;

/// Column list shared by every task `SELECT`.
macro_rules! select_tasks {
    ($tail:literal) => {
        concat!(
            "SELECT id, title, description, status, priority, due_date, assignee, category, created_at, updated_at FROM tasks ",
            $tail
        )
    };
}
pub(crate) use select_tasks;

macro_rules! select_users {
    ($tail:literal) => {
        concat!("SELECT id, name, email, is_active, created_at FROM users ", $tail)
    };
}
pub(crate) use select_users;

pub(crate) fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: TaskId(row.get(0)?),
        title: row.get(1)?,
        description: row.get(2)?,
        status: parsed(row, 3)?,
        priority: parsed(row, 4)?,
        due_date: row
            .get::<_, Option<String>>(5)?
            .map(|text| parse_date(5, &text))
            .transpose()?,
        assignee: row.get(6)?,
        category: row.get(7)?,
        created_at: parse_timestamp(8, &row.get::<_, String>(8)?)?,
        updated_at: row
            .get::<_, Option<String>>(9)?
            .map(|text| parse_timestamp(9, &text))
            .transpose()?,
    })
}

pub(crate) fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: UserId(row.get(0)?),
        name: row.get(1)?,
        email: row.get(2)?,
        is_active: row.get(3)?,
        created_at: parse_timestamp(4, &row.get::<_, String>(4)?)?,
    })
}

pub(crate) fn format_timestamp(at: OffsetDateTime) -> Result<String> {
    Ok(at.format(&Rfc3339)?)
}

pub(crate) fn format_date(date: Date) -> Result<String> {
    Ok(date.format(format_description!("[year]-[month]-[day]"))?)
}

fn parsed<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    let text: String = row.get(idx)?;
    text.parse().map_err(|err| conversion_error(idx, err))
}

/// Older databases stored full timestamps in `due_date`; only the day is kept.
fn parse_date(idx: usize, text: &str) -> rusqlite::Result<Date> {
    let day = text.get(..10).unwrap_or(text);
    Date::parse(day, format_description!("[year]-[month]-[day]")).map_err(|err| conversion_error(idx, err))
}

/// RFC 3339, falling back to an offset-less ISO timestamp read as UTC.
fn parse_timestamp(idx: usize, text: &str) -> rusqlite::Result<OffsetDateTime> {
    OffsetDateTime::parse(text, &Rfc3339).or_else(|err| {
        PrimitiveDateTime::parse(
            text,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"),
        )
            .map(PrimitiveDateTime::assume_utc)
            .map_err(|_| conversion_error(idx, err))
    })
}

fn conversion_error(idx: usize, err: impl StdError + Send + Sync + 'static) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}
