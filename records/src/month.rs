//! FILENAME: records/src/month.rs
//! PURPOSE: Calendar ordering for the free-text `month` field.
//! CONTEXT: Months arrive as display names chosen at upload time, so sorting
//! them alphabetically would put "Abril" before "Janeiro". Charts order them
//! by position in a configured calendar instead.

/// Month names offered by the upload form, in calendar order.
pub const MONTH_NAMES_PT: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Returns the 0-based calendar position of `month` within `order`,
/// matching case-insensitively. `None` for names outside the calendar.
pub fn calendar_position<S: AsRef<str>>(month: &str, order: &[S]) -> Option<usize> {
    let month = month.trim().to_lowercase();
    order
        .iter()
        .position(|name| name.as_ref().to_lowercase() == month)
}

/// The default calendar as owned strings (for serde-configurable orders).
pub fn default_month_order() -> Vec<String> {
    MONTH_NAMES_PT.iter().map(|m| m.to_string()).collect()
}
