//! Output format dispatch

use super::console::ConsoleFormatter;
use exambank_domain::OutputFormat;
use serde::Serialize;

/// Render `value` as a table with `table`, or as pretty JSON.
pub fn render<T, F>(format: OutputFormat, value: &T, table: F) -> String
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Table => table(value),
        OutputFormat::Json => ConsoleFormatter::json(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatches_on_format() {
        let value = vec![1, 2];
        let table = |v: &Vec<i32>| format!("{} rows", v.len());
        assert_eq!(render(OutputFormat::Table, &value, table), "2 rows");
        assert!(render(OutputFormat::Json, &value, table).starts_with('['));
    }
}
