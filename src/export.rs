use crate::csv_store::FIELDNAMES;
use crate::errors::ExportError;
use crate::types::Booking;
use printpdf::{BuiltinFont, Mm, PdfDocument};

const PAGE_WIDTH: Mm = Mm(297.0);
const PAGE_HEIGHT: Mm = Mm(210.0);
const TOP_MARGIN: Mm = Mm(196.0);
const BOTTOM_MARGIN: Mm = Mm(14.0);

const TITLE: &str = "Lab Bookings Export";
const COLUMN_LABELS: [&str; 9] = [
    "ID", "Name", "Email", "Lab", "Location", "Date", "Timeslot", "Purpose", "Created",
];
const COLUMN_X: [Mm; 9] = [
    Mm(14.0),
    Mm(35.0),
    Mm(78.0),
    Mm(127.0),
    Mm(148.0),
    Mm(176.0),
    Mm(198.0),
    Mm(226.0),
    Mm(275.0),
];
const MAX_CELL_CHARS: usize = 45;

/// Renders the full record set as a comma-delimited text dump: fixed header
/// line, one line per record, fields quoted and escaped as needed. Parsing
/// the output recovers the same records in the same order.
pub fn bookings_to_csv(bookings: &[Booking]) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&mut buffer);
        writer.write_record(FIELDNAMES)?;
        for booking in bookings {
            writer.serialize(booking)?;
        }
        writer.flush().map_err(csv::Error::from)?;
    }
    Ok(buffer)
}

/// Renders the full record set as a landscape A4 table: bold title, header
/// row of human-readable labels, one row per record at fixed column offsets.
/// Cells are truncated to 45 characters; when the cursor would fall below
/// the bottom margin a new page starts and the cursor resets to the top.
/// Title and header appear once only.
pub fn bookings_to_pdf(bookings: &[Booking]) -> Result<Vec<u8>, ExportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(TITLE, PAGE_WIDTH, PAGE_HEIGHT, "table");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    layer.use_text(TITLE, 16.0, COLUMN_X[0], TOP_MARGIN, &bold);

    let mut y = Mm(TOP_MARGIN.0 - 11.0);
    for (label, x) in COLUMN_LABELS.iter().zip(COLUMN_X) {
        layer.use_text(*label, 10.0, x, y, &regular);
    }
    y.0 -= 6.5;

    for booking in bookings {
        if y.0 < BOTTOM_MARGIN.0 {
            let (page, page_layer) = doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "table");
            layer = doc.get_page(page).get_layer(page_layer);
            y = TOP_MARGIN;
        }
        let cells = [
            &booking.id,
            &booking.name,
            &booking.email,
            &booking.lab,
            &booking.location,
            &booking.date,
            &booking.timeslot,
            &booking.purpose,
            &booking.created_at,
        ];
        for (cell, x) in cells.into_iter().zip(COLUMN_X) {
            layer.use_text(truncate_cell(cell), 10.0, x, y, &regular);
        }
        y.0 -= 5.6;
    }

    Ok(doc.save_to_bytes()?)
}

fn truncate_cell(value: &str) -> String {
    value.chars().take(MAX_CELL_CHARS).collect()
}
