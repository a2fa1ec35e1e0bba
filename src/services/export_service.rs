use std::io::Cursor;

use crate::{db::entities::question, error::AppError};

pub const EXPORT_HEADERS: [&str; 8] = [
    "Question",
    "Subject",
    "Topic",
    "Sub Topic",
    "Micro Topic",
    "Difficulty",
    "Answer",
    "Explanation",
];

const SHEET_NAME: &str = "Questions";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("csv") => ExportFormat::Csv,
            _ => ExportFormat::Xlsx,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Csv => "text/csv",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

/// One flat spreadsheet row.
#[derive(Debug, Clone)]
pub struct ExportRow {
    pub question: String,
    pub subject: String,
    pub topic: String,
    pub sub_topic: String,
    pub micro_topic: String,
    pub difficulty: String,
    pub answer: String,
    pub explanation: String,
}

impl ExportRow {
    fn cells(&self) -> [&str; 8] {
        [
            &self.question,
            &self.subject,
            &self.topic,
            &self.sub_topic,
            &self.micro_topic,
            &self.difficulty,
            &self.answer,
            &self.explanation,
        ]
    }
}

impl From<&question::Model> for ExportRow {
    fn from(model: &question::Model) -> Self {
        Self {
            question: model.text.clone(),
            subject: model.subject.clone(),
            topic: or_na(&model.topic),
            sub_topic: model.sub_topic.clone().unwrap_or_default(),
            micro_topic: model.micro_topic.clone().unwrap_or_default(),
            difficulty: or_default(&model.difficulty_level, "Medium"),
            answer: model.answer.clone(),
            explanation: model
                .explanation
                .clone()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| "N/A".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExportMeta {
    pub test_name: Option<String>,
    pub batch: Option<String>,
    pub date: Option<String>,
}

impl ExportMeta {
    fn is_empty(&self) -> bool {
        self.test_name.is_none() && self.batch.is_none() && self.date.is_none()
    }

    fn as_row(&self) -> ExportRow {
        ExportRow {
            question: format!("Test: {}", self.test_name.as_deref().unwrap_or("Untitled")),
            subject: format!("Batch: {}", self.batch.as_deref().unwrap_or("N/A")),
            topic: format!("Date: {}", self.date.as_deref().unwrap_or("N/A")),
            sub_topic: String::new(),
            micro_topic: String::new(),
            difficulty: String::new(),
            answer: String::new(),
            explanation: String::new(),
        }
    }
}

/// Builds the single-sheet workbook in memory. An empty row list yields a
/// header-only sheet.
pub fn build_workbook(rows: &[ExportRow], meta: &ExportMeta) -> Result<Vec<u8>, AppError> {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book
        .get_sheet_mut(&0)
        .ok_or_else(|| AppError::internal("Workbook has no default sheet"))?;
    sheet.set_name(SHEET_NAME);

    for (col_idx, header) in EXPORT_HEADERS.iter().enumerate() {
        let cell = sheet.get_cell_mut(((col_idx as u32) + 1, 1));
        cell.set_value(*header);
        cell.get_style_mut().get_font_mut().set_bold(true);
    }

    let mut row_num: u32 = 2;
    for row in export_rows(rows, meta) {
        for (col_idx, value) in row.cells().iter().enumerate() {
            sheet
                .get_cell_mut(((col_idx as u32) + 1, row_num))
                .set_value(*value);
        }
        row_num += 1;
    }

    let mut buf = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut buf)
        .map_err(|err| AppError::internal_with_source("Workbook serialization failed", err))?;
    Ok(buf.into_inner())
}

pub fn build_csv(rows: &[ExportRow], meta: &ExportMeta) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(EXPORT_HEADERS)
        .map_err(|err| AppError::internal_with_source("CSV serialization failed", err))?;
    for row in export_rows(rows, meta) {
        writer
            .write_record(row.cells())
            .map_err(|err| AppError::internal_with_source("CSV serialization failed", err))?;
    }
    writer
        .into_inner()
        .map_err(|err| AppError::internal_with_source("CSV serialization failed", err))
}

pub fn build(format: ExportFormat, rows: &[ExportRow], meta: &ExportMeta) -> Result<Vec<u8>, AppError> {
    match format {
        ExportFormat::Xlsx => build_workbook(rows, meta),
        ExportFormat::Csv => build_csv(rows, meta),
    }
}

pub fn file_name(test_id: Option<&str>, format: ExportFormat) -> String {
    format!(
        "test_questions_{}.{}",
        test_id.unwrap_or("export"),
        format.extension()
    )
}

fn export_rows<'a>(
    rows: &'a [ExportRow],
    meta: &ExportMeta,
) -> impl Iterator<Item = ExportRow> + 'a {
    let meta_row = (!meta.is_empty()).then(|| meta.as_row());
    meta_row.into_iter().chain(rows.iter().cloned())
}

fn or_na(value: &str) -> String {
    if value.trim().is_empty() {
        "N/A".to_string()
    } else {
        value.to_string()
    }
}

fn or_default(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{
        EXPORT_HEADERS, ExportFormat, ExportMeta, ExportRow, build_csv, build_workbook, file_name,
    };

    fn row(question: &str) -> ExportRow {
        ExportRow {
            question: question.to_string(),
            subject: "History".to_string(),
            topic: "Ancient History".to_string(),
            sub_topic: "Mauryan Empire".to_string(),
            micro_topic: String::new(),
            difficulty: "Medium".to_string(),
            answer: "Ashoka".to_string(),
            explanation: "N/A".to_string(),
        }
    }

    fn read_back(bytes: &[u8]) -> umya_spreadsheet::Spreadsheet {
        umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes.to_vec()), true)
            .expect("workbook should parse")
    }

    #[test]
    fn empty_export_has_a_header_row_only() {
        let bytes =
            build_workbook(&[], &ExportMeta::default()).expect("empty export should build");
        let book = read_back(&bytes);
        let sheet = book
            .get_sheet_by_name("Questions")
            .expect("sheet should exist");

        assert_eq!(sheet.get_value((1, 1)), "Question");
        assert_eq!(sheet.get_value((8, 1)), "Explanation");
        assert_eq!(sheet.get_value((1, 2)), "");
    }

    #[test]
    fn rows_land_under_the_header() {
        let rows = [row("Who issued the edicts?"), row("Second question")];
        let bytes = build_workbook(&rows, &ExportMeta::default()).expect("export should build");
        let sheet = read_back(&bytes);
        let sheet = sheet
            .get_sheet_by_name("Questions")
            .expect("sheet should exist");

        assert_eq!(sheet.get_value((1, 2)), "Who issued the edicts?");
        assert_eq!(sheet.get_value((2, 2)), "History");
        assert_eq!(sheet.get_value((1, 3)), "Second question");
    }

    #[test]
    fn metadata_row_precedes_question_rows() {
        let meta = ExportMeta {
            test_name: Some("Midterm".to_string()),
            batch: Some("2026A".to_string()),
            date: None,
        };
        let rows = [row("First")];
        let bytes = build_workbook(&rows, &meta).expect("export should build");
        let sheet = read_back(&bytes);
        let sheet = sheet
            .get_sheet_by_name("Questions")
            .expect("sheet should exist");

        assert_eq!(sheet.get_value((1, 2)), "Test: Midterm");
        assert_eq!(sheet.get_value((2, 2)), "Batch: 2026A");
        assert_eq!(sheet.get_value((3, 2)), "Date: N/A");
        assert_eq!(sheet.get_value((1, 3)), "First");
    }

    #[test]
    fn csv_export_carries_headers_and_rows() {
        let bytes =
            build_csv(&[row("Q1")], &ExportMeta::default()).expect("csv export should build");
        let text = String::from_utf8(bytes).expect("csv should be utf-8");
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some(EXPORT_HEADERS.join(",").as_str()));
        let data_line = lines.next().expect("one data line");
        assert!(data_line.starts_with("Q1,History"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn csv_export_of_nothing_is_just_the_header() {
        let bytes = build_csv(&[], &ExportMeta::default()).expect("csv export should build");
        let text = String::from_utf8(bytes).expect("csv should be utf-8");
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn format_parsing_defaults_to_xlsx() {
        assert_eq!(ExportFormat::parse(None), ExportFormat::Xlsx);
        assert_eq!(ExportFormat::parse(Some("CSV")), ExportFormat::Csv);
        assert_eq!(ExportFormat::parse(Some("pdf")), ExportFormat::Xlsx);
    }

    #[test]
    fn file_names_follow_the_test_id() {
        assert_eq!(
            file_name(Some("test_abc"), ExportFormat::Xlsx),
            "test_questions_test_abc.xlsx"
        );
        assert_eq!(
            file_name(None, ExportFormat::Csv),
            "test_questions_export.csv"
        );
    }
}
