use std::io::{Cursor, Write};

use chrono::Utc;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use rust_xlsxwriter::{Format, Workbook};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::errors::SampleResult;
use crate::models::SampleModel;
use crate::search::SearchRequest;
use crate::services::{SampleService, SearchService};

const CSV_HEADER: [&str; 8] = [
    "ID",
    "Name",
    "Description",
    "Active",
    "CreatedAt",
    "CreatedBy",
    "UpdatedAt",
    "UpdatedBy",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Xml,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Xml => "xml",
            ExportFormat::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Csv => "text/csv",
            ExportFormat::Xml => "application/xml",
            ExportFormat::Json => "application/json",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportForm {
    pub format: ExportFormat,
    #[serde(default)]
    pub zip: bool,
    #[serde(default)]
    pub search_request: Option<SearchRequest>,
}

#[derive(Debug, Clone)]
pub struct ExportFile {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

/// Renders the sample catalog to a downloadable document.
#[derive(Clone)]
pub struct ExportService {
    sample_service: SampleService,
    search_service: SearchService,
}

impl ExportService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            sample_service: SampleService::new(db.clone()),
            search_service: SearchService::new(db),
        }
    }

    pub async fn export(&self, form: &ExportForm) -> SampleResult<ExportFile> {
        let rows = match &form.search_request {
            Some(request) => self.search_service.fetch_filtered(request).await?,
            None => self.sample_service.list_all().await?,
        };

        let bytes = match form.format {
            ExportFormat::Json => render_json(&rows)?,
            ExportFormat::Xml => render_xml(&rows)?,
            ExportFormat::Csv => render_csv(&rows)?,
            ExportFormat::Xlsx => render_xlsx(&rows)?,
        };

        let stamp = Utc::now().format("%Y%m%d_%H%M%S");
        let filename = format!("{}_samples.{}", stamp, form.format.extension());

        if form.zip {
            let zipped = wrap_zip(&filename, &bytes)?;
            return Ok(ExportFile {
                bytes: zipped,
                filename: format!("{}_samples.zip", stamp),
                content_type: "application/zip".to_string(),
            });
        }

        Ok(ExportFile {
            bytes,
            filename,
            content_type: form.format.content_type().to_string(),
        })
    }
}

fn render_json(rows: &[SampleModel]) -> SampleResult<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(rows)?)
}

fn render_csv(rows: &[SampleModel]) -> SampleResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.write_record([
            row.id.to_string(),
            row.name.clone(),
            row.description.clone().unwrap_or_default(),
            row.active.to_string(),
            row.created_at.to_rfc3339(),
            row.created_by.clone().unwrap_or_default(),
            row.updated_at.to_rfc3339(),
            row.updated_by.clone().unwrap_or_default(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| crate::errors::SampleError::ExportFailed(e.to_string()))
}

fn render_xml(rows: &[SampleModel]) -> SampleResult<Vec<u8>> {
    let mut writer = quick_xml::Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("samples")))?;
    for row in rows {
        writer.write_event(Event::Start(BytesStart::new("sample")))?;
        write_text_element(&mut writer, "id", &row.id.to_string())?;
        write_text_element(&mut writer, "name", &row.name)?;
        write_text_element(&mut writer, "description", row.description.as_deref().unwrap_or(""))?;
        write_text_element(&mut writer, "active", &row.active.to_string())?;
        write_text_element(&mut writer, "createdAt", &row.created_at.to_rfc3339())?;
        write_text_element(&mut writer, "createdBy", row.created_by.as_deref().unwrap_or(""))?;
        write_text_element(&mut writer, "updatedAt", &row.updated_at.to_rfc3339())?;
        write_text_element(&mut writer, "updatedBy", row.updated_by.as_deref().unwrap_or(""))?;
        writer.write_event(Event::End(BytesEnd::new("sample")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("samples")))?;
    Ok(writer.into_inner().into_inner())
}

fn write_text_element(
    writer: &mut quick_xml::Writer<Cursor<Vec<u8>>>,
    name: &str,
    value: &str,
) -> SampleResult<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn render_xlsx(rows: &[SampleModel]) -> SampleResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Samples")?;

    let bold = Format::new().set_bold();
    for (col, header) in CSV_HEADER.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_number(r, 0, row.id as f64)?;
        worksheet.write_string(r, 1, &row.name)?;
        worksheet.write_string(r, 2, row.description.as_deref().unwrap_or(""))?;
        worksheet.write_boolean(r, 3, row.active)?;
        worksheet.write_string(r, 4, row.created_at.to_rfc3339())?;
        worksheet.write_string(r, 5, row.created_by.as_deref().unwrap_or(""))?;
        worksheet.write_string(r, 6, row.updated_at.to_rfc3339())?;
        worksheet.write_string(r, 7, row.updated_by.as_deref().unwrap_or(""))?;
    }

    worksheet.autofit();
    Ok(workbook.save_to_buffer()?)
}

fn wrap_zip(inner_filename: &str, bytes: &[u8]) -> SampleResult<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut archive = ZipWriter::new(&mut cursor);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        archive.start_file(inner_filename, options)?;
        archive.write_all(bytes)?;
        archive.finish()?;
    }
    Ok(cursor.into_inner())
}
