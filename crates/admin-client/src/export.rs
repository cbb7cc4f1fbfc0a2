use chrono::NaiveDate;

pub const CSV_MIME: &str = "text/csv";
pub const PDF_MIME: &str = "application/pdf";

/// A downloaded blob ready to hand to the browser or write to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// `{entity}-export-{YYYY-MM-DD}.csv`
    pub fn csv(entity: &str, date: NaiveDate, bytes: Vec<u8>) -> Self {
        Self {
            filename: export_filename(entity, date, "csv"),
            mime: CSV_MIME,
            bytes,
        }
    }

    pub fn escrow_report(account_id: &str, bytes: Vec<u8>) -> Self {
        Self {
            filename: shared_types::escrow_report_filename(account_id),
            mime: PDF_MIME,
            bytes,
        }
    }
}

pub fn export_filename(entity: &str, date: NaiveDate, ext: &str) -> String {
    format!("{entity}-export-{}.{ext}", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_names_use_iso_date() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(export_filename("users", day, "csv"), "users-export-2026-03-07.csv");
        let file = ExportFile::csv("transactions", day, b"id\n".to_vec());
        assert_eq!(file.filename, "transactions-export-2026-03-07.csv");
        assert_eq!(file.mime, "text/csv");
    }

    #[test]
    fn escrow_report_is_pdf() {
        let file = ExportFile::escrow_report("esc-9", vec![1, 2]);
        assert_eq!(file.filename, "escrow-report-esc-9.pdf");
        assert_eq!(file.mime, PDF_MIME);
    }
}
