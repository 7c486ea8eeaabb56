use thiserror::Error;

/// Errors produced by the sample catalog services.
#[derive(Error, Debug)]
pub enum SampleError {
    #[error("Sample not found: {0}")]
    NotFound(i32),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SampleResult<T> = Result<T, SampleError>;

impl SampleError {
    /// True when the caller sent a bad request rather than the server failing.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SampleError::NotFound(_) | SampleError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SampleError::NotFound(_))
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            SampleError::NotFound(_) => "NOT_FOUND",
            SampleError::Validation(_) => "VALIDATION_FAILED",
            SampleError::Database(_) => "DATABASE_ERROR",
            SampleError::ExportFailed(_) => "EXPORT_FAILED",
            SampleError::Csv(_) => "CSV_ERROR",
            SampleError::Json(_) => "JSON_ERROR",
            SampleError::Xlsx(_) => "XLSX_ERROR",
            SampleError::Xml(_) => "XML_ERROR",
            SampleError::Zip(_) => "ZIP_ERROR",
            SampleError::Io(_) => "IO_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_client_error() {
        let err = SampleError::NotFound(42);
        assert!(err.is_client_error());
        assert!(err.is_not_found());
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "Sample not found: 42");
    }

    #[test]
    fn validation_is_client_error() {
        let err = SampleError::Validation("name must not be empty".to_string());
        assert!(err.is_client_error());
        assert!(!err.is_not_found());
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
    }

    #[test]
    fn database_is_server_error() {
        let err = SampleError::Database(sea_orm::DbErr::Custom("boom".to_string()));
        assert!(!err.is_client_error());
        assert_eq!(err.error_code(), "DATABASE_ERROR");
    }
}
