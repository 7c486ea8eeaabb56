pub mod export_service;
pub mod import_service;
pub mod init_service;
pub mod sample_service;
pub mod search_service;
pub mod tag_service;

pub use export_service::{ExportFile, ExportForm, ExportFormat, ExportService};
pub use import_service::{AlertLevel, ImportReport, ImportReportItem, ImportService};
pub use init_service::InitService;
pub use sample_service::SampleService;
pub use search_service::SearchService;
pub use tag_service::TagService;
