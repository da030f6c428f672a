//! Spreadsheet export of registrations.
//!
//! Produces an `.xlsx` workbook with a fixed set of Polish column headers,
//! one row per registration joined with its camp. Every cell is written as
//! text; dates and amounts are pre-formatted the way the admin views show
//! them.

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use domain::formatting::{format_amount, format_date, format_datetime};
use domain::models::registration::RegistrationWithCamp;

use crate::error::ApiError;

/// Worksheet name in the exported workbook.
pub const EXPORT_SHEET_NAME: &str = "Zgłoszenia";

/// Column headers, in the exact order they appear in the sheet.
const COLUMNS: [&str; 18] = [
    "Imię",
    "Nazwisko",
    "PESEL",
    "Data urodzenia",
    "Email",
    "Telefon",
    "Adres",
    "Miasto",
    "Kod pocztowy",
    "Status ZHP",
    "Obóz",
    "Data rozpoczęcia",
    "Data zakończenia",
    "Cena",
    "Status zgłoszenia",
    "Status płatności",
    "Data zgłoszenia",
    "Uwagi",
];

impl From<XlsxError> for ApiError {
    fn from(err: XlsxError) -> Self {
        ApiError::Internal(format!("Spreadsheet error: {}", err))
    }
}

/// Builds the export workbook and returns the serialized `.xlsx` bytes.
pub fn build_workbook(rows: &[RegistrationWithCamp]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, entry) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, value) in row_values(entry).iter().enumerate() {
            worksheet.write_string(row, col as u16, value)?;
        }
    }

    workbook.save_to_buffer()
}

/// Projects one registration into its 18 export cells.
fn row_values(entry: &RegistrationWithCamp) -> [String; 18] {
    let registration = &entry.registration;
    let camp = &entry.camp;

    [
        registration.first_name.clone(),
        registration.last_name.clone(),
        registration.pesel.clone(),
        format_date(registration.birth_date),
        registration.email.clone(),
        registration.phone.clone(),
        registration.address.clone(),
        registration.city.clone(),
        registration.postal_code.clone(),
        registration
            .zhp_status
            .clone()
            .unwrap_or_else(|| "Brak".to_string()),
        camp.name.clone(),
        format_date(camp.start_date),
        format_date(camp.end_date),
        format!("{} PLN", format_amount(camp.price)),
        registration.registration_status.to_string(),
        registration.payment_status.to_string(),
        format_datetime(registration.created_at),
        registration.notes.clone().unwrap_or_default(),
    ]
}

/// Builds the download file name: `registrations_<camp-or-all>_<yyyy-MM-dd>.xlsx`.
///
/// The camp slug is the name lowercased with whitespace collapsed to
/// underscores; exports across all camps use `all`.
pub fn export_file_name(camp_name: Option<&str>, today: NaiveDate) -> String {
    let slug = match camp_name {
        Some(name) => {
            let slug = name
                .to_lowercase()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("_");
            if slug.is_empty() {
                "oboz".to_string()
            } else {
                slug
            }
        }
        None => "all".to_string(),
    };

    format!("registrations_{}_{}.xlsx", slug, today.format("%Y-%m-%d"))
}
