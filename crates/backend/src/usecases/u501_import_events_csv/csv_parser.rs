use contracts::usecases::u501_import_events_csv::ParsedRow;
use csv::ReaderBuilder;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub rows: Vec<ParsedRow>,
}

#[derive(Debug, Error)]
pub enum CsvParseError {
    #[error("No headers found")]
    NoHeaders,

    #[error("Malformed CSV: {0}")]
    Malformed(#[from] csv::Error),
}

/// Parses CSV text: first record is the header line, the rest are data rows.
///
/// Fields use `"` quoting with `""` as an escaped quote. Short records are
/// padded with empty cells, extra cells are dropped, lines with only empty
/// cells are skipped.
pub fn parse_csv(text: &str) -> Result<ParsedCsv, CsvParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(CsvParseError::NoHeaders);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let row: ParsedRow = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.is_empty())
            .map(|(idx, h)| (h.clone(), record.get(idx).unwrap_or("").to_string()))
            .collect();
        rows.push(row);
    }

    Ok(ParsedCsv { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_comma_stays_in_field() {
        let parsed = parse_csv("Company,Date\n\"Acme, Inc\",2025-06-01\n").unwrap();
        assert_eq!(parsed.headers, vec!["Company", "Date"]);
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0]["Company"], "Acme, Inc");
        assert_eq!(parsed.rows[0]["Date"], "2025-06-01");
    }

    #[test]
    fn test_doubled_quotes_collapse() {
        let parsed = parse_csv("quote,flag\n\"She said \"\"hi\"\"\",ok").unwrap();
        assert_eq!(parsed.rows[0]["quote"], "She said \"hi\"");
        assert_eq!(parsed.rows[0]["flag"], "ok");
    }

    #[test]
    fn test_empty_input_has_no_headers() {
        assert!(matches!(parse_csv(""), Err(CsvParseError::NoHeaders)));
        assert!(matches!(parse_csv("  \n"), Err(CsvParseError::NoHeaders)));
        assert_eq!(CsvParseError::NoHeaders.to_string(), "No headers found");
    }

    #[test]
    fn test_bom_short_records_and_blank_lines() {
        let text = "\u{feff}name,location,notes\r\nFOSDEM,Brussels\r\n\r\n,,\r\nDevConf,Brno,yearly\r\n";
        let parsed = parse_csv(text).unwrap();
        assert_eq!(parsed.headers[0], "name");
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0]["notes"], "");
        assert_eq!(parsed.rows[1]["notes"], "yearly");
    }

    #[test]
    fn test_quoted_newline_is_part_of_field() {
        let parsed = parse_csv("name,notes\nKubeCon,\"line one\nline two\"\n").unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0]["notes"], "line one\nline two");
    }
}
