//! Tabular export of task lists.

use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, XlsxError};
use taskdeck_core::Task;
use thiserror::Error;
use time::OffsetDateTime;
use time::macros::format_description;

/// Column headings, in output order.
pub const HEADERS: [&str; 9] = [
    "ID",
    "Title",
    "Description",
    "Status",
    "Assignee",
    "Priority",
    "Due Date",
    "Category",
    "Created At",
];

const SHEET_NAME: &str = "Tasks";
const HEADER_FILL: u32 = 0x00D3_D3D3;

/// Output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Office Open XML workbook.
    Xlsx,
    /// Comma-separated values with a header line.
    Csv,
}

impl ExportFormat {
    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }

    /// MIME type for the encoded bytes.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Csv => "text/csv; charset=utf-8",
        }
    }
}

/// Encoded export ready to be sent as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// Suggested download name, e.g. `tasks_export_20250131_093000.xlsx`.
    pub file_name: String,
    /// Encoding of `bytes`.
    pub format: ExportFormat,
    /// File content.
    pub bytes: Vec<u8>,
}

/// Failures while encoding an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Workbook generation failed.
    #[error("xlsx export failed: {0}")]
    Xlsx(#[from] XlsxError),
    /// CSV generation failed.
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    /// Flushing the CSV buffer failed.
    #[error("csv export failed: {0}")]
    Io(#[from] std::io::Error),
    /// A date could not be rendered.
    #[error("date formatting failed: {0}")]
    Format(#[from] time::error::Format),
}

/// Encode `tasks` in `format`, naming the file after `now`.
///
/// # Errors
/// Returns [`ExportError`] when encoding fails.
pub fn export_tasks(tasks: &[Task], format: ExportFormat, now: OffsetDateTime) -> Result<ExportFile, ExportError> {
    let bytes = match format {
        ExportFormat::Xlsx => to_xlsx(tasks)?,
        ExportFormat::Csv => to_csv(tasks)?,
    };
    Ok(ExportFile {
        file_name: file_name(format, now)?,
        format,
        bytes,
    })
}

fn file_name(format: ExportFormat, now: OffsetDateTime) -> Result<String, ExportError> {
    let stamp = now.format(format_description!(
        "[year][month][day]_[hour][minute][second]"
    ))?;
    Ok(format!("tasks_export_{stamp}.{}", format.extension()))
}

/// One task rendered as the nine text cells of a row (the id stays numeric
/// in the workbook).
fn cells(task: &Task) -> Result<[String; 9], ExportError> {
    let due = task
        .due_date
        .map(|date| date.format(format_description!("[year]-[month]-[day]")))
        .transpose()?
        .unwrap_or_default();
    let created = task.created_at.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))?;
    Ok([
        task.id.to_string(),
        task.title.clone(),
        task.description.clone().unwrap_or_default(),
        task.status.to_string(),
        task.assignee.clone().unwrap_or_default(),
        task.priority.to_string(),
        due,
        task.category.clone().unwrap_or_default(),
        created,
    ])
}

fn to_xlsx(tasks: &[Task]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center);
    for (col, title) in (0u16..).zip(HEADERS) {
        sheet.write_string_with_format(0, col, title, &header)?;
    }

    for (row, task) in (1u32..).zip(tasks) {
        let values = cells(task)?;
        match i32::try_from(task.id.get()) {
            Ok(id) => sheet.write_number(row, 0, id)?,
            Err(_) => sheet.write_string(row, 0, &values[0])?,
        };
        for (col, value) in (1u16..).zip(values.iter().skip(1)) {
            sheet.write_string(row, col, value)?;
        }
    }

    sheet.autofit();
    Ok(workbook.save_to_buffer()?)
}

fn to_csv(tasks: &[Task]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS)?;
    for task in tasks {
        writer.write_record(cells(task)?)?;
    }
    writer.into_inner().map_err(|err| ExportError::Io(err.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_core::{Priority, TaskId, TaskStatus};
    use time::macros::{date, datetime};

    fn sample() -> Task {
        Task {
            id: TaskId(7),
            due_date: Some(date!(2025 - 03 - 09)),
            assignee: Some("alice".into()),
            created_at: datetime!(2025-01-02 03:04:05 UTC),
            ..Task::new("Write, then \"ship\"")
                .with_status(TaskStatus::InProgress)
                .with_priority(Priority::High)
        }
    }

    #[test]
    fn file_name_carries_timestamp_and_extension() -> Result<(), ExportError> {
        let now = datetime!(2025-01-31 09:30:00 UTC);
        assert_eq!(file_name(ExportFormat::Xlsx, now)?, "tasks_export_20250131_093000.xlsx");
        assert_eq!(file_name(ExportFormat::Csv, now)?, "tasks_export_20250131_093000.csv");
        Ok(())
    }

    #[test]
    fn csv_has_header_and_quoted_cells() -> Result<(), ExportError> {
        let file = export_tasks(&[sample()], ExportFormat::Csv, OffsetDateTime::now_utc())?;
        let text = String::from_utf8_lossy(&file.bytes);
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("ID,Title,Description,Status,Assignee,Priority,Due Date,Category,Created At")
        );
        assert_eq!(
            lines.next(),
            Some("7,\"Write, then \"\"ship\"\"\",,InProgress,alice,High,2025-03-09,,2025-01-02 03:04:05")
        );
        assert_eq!(lines.next(), None);
        Ok(())
    }

    #[test]
    fn empty_csv_still_has_header() -> Result<(), ExportError> {
        let file = export_tasks(&[], ExportFormat::Csv, OffsetDateTime::now_utc())?;
        assert_eq!(file.bytes.iter().filter(|b| **b == b'\n').count(), 1);
        Ok(())
    }

    #[test]
    fn xlsx_is_a_zip_container() -> Result<(), ExportError> {
        let file = export_tasks(&[sample(), Task::new("second")], ExportFormat::Xlsx, OffsetDateTime::now_utc())?;
        assert!(file.bytes.starts_with(b"PK"));
        assert_eq!(file.format.content_type(), ExportFormat::Xlsx.content_type());
        Ok(())
    }
}
