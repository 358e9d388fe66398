//! XLSX rendering adapter implementing the `RecordExporter` port.
//!
//! Produces a single-sheet workbook named "Mantenimiento" with a bold header
//! row followed by one row per record. An empty record set still yields a
//! valid workbook containing just the header.

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::domain::ports::{ExportError, RecordExporter};
use crate::domain::ExportRecord;

const SHEET_NAME: &str = "Mantenimiento";

const HEADERS: [&str; 11] = [
    "Id",
    "Sede",
    "Fecha",
    "Area",
    "Equipo",
    "Tipo de equipo",
    "Marca",
    "Modelo",
    "Serial",
    "Observaciones",
    "Tecnico",
];

/// `RecordExporter` implementation built on `rust_xlsxwriter`.
#[derive(Debug, Clone, Default)]
pub struct XlsxRecordExporter;

impl XlsxRecordExporter {
    /// Create a new exporter.
    pub fn new() -> Self {
        Self
    }
}

fn render(records: &[ExportRecord]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (column, header) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, u16::try_from(column).unwrap_or(0), *header, &header_format)?;
    }

    for (index, entry) in records.iter().enumerate() {
        let row = u32::try_from(index).unwrap_or(u32::MAX).saturating_add(1);
        let record = &entry.record;
        sheet.write_string(row, 0, record.id().to_string())?;
        sheet.write_string(row, 1, record.site().as_ref())?;
        sheet.write_string(row, 2, record.performed_on().format("%Y-%m-%d").to_string())?;
        sheet.write_string(row, 3, record.area())?;
        sheet.write_string(row, 4, record.equipment())?;
        sheet.write_string(row, 5, record.equipment_type())?;
        sheet.write_string(row, 6, record.brand())?;
        sheet.write_string(row, 7, record.model())?;
        sheet.write_string(row, 8, record.serial())?;
        sheet.write_string(row, 9, record.notes())?;
        sheet.write_string(row, 10, entry.technician.as_str())?;
    }

    workbook.save_to_buffer()
}

impl RecordExporter for XlsxRecordExporter {
    fn export(&self, records: &[ExportRecord]) -> Result<Vec<u8>, ExportError> {
        render(records).map_err(|err| ExportError::render(err.to_string()))
    }
}
