//! Reading the backing file into a [`Table`].
//!
//! Header cells are normalized, column types are inferred from their
//! non-missing cells, and missing cells are filled with zero. A failed read
//! never aborts startup: it becomes [`LoadOutcome::Failed`].

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::error::{LoadError, ParseError, Result};
use super::record::{normalize_column, DISTRICT, TOTAL_CRIMES, YEAR};
use super::table::Table;
use super::value::{is_missing, Value};

/// Result of the one-time load.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Table),
    Failed { path: PathBuf, reason: String },
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded(_))
    }

    /// Failure reason, if the load failed.
    pub fn failure(&self) -> Option<&str> {
        match self {
            LoadOutcome::Loaded(_) => None,
            LoadOutcome::Failed { reason, .. } => Some(reason),
        }
    }

    /// The table to serve; a failure serves the empty table.
    pub fn into_table(self) -> Table {
        match self {
            LoadOutcome::Loaded(table) => table,
            LoadOutcome::Failed { .. } => Table::empty(),
        }
    }
}

/// Inferred storage kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Text,
}

impl ColumnKind {
    fn infer<'a>(cells: impl Iterator<Item = &'a str>) -> Self {
        let mut kind = ColumnKind::Int;
        for cell in cells.filter(|c| !is_missing(c)) {
            if kind == ColumnKind::Int && Value::parse_int(cell).is_none() {
                kind = ColumnKind::Float;
            }
            if kind == ColumnKind::Float && Value::parse_float(cell).is_none() {
                return ColumnKind::Text;
            }
        }
        kind
    }

    fn convert(self, cell: Option<&str>) -> Value {
        let cell = match cell {
            Some(c) if !is_missing(c) => c,
            _ if self == ColumnKind::Float => return Value::Float(0.0),
            _ => return Value::ZERO,
        };
        match self {
            ColumnKind::Int => Value::parse_int(cell).map_or(Value::ZERO, Value::Int),
            ColumnKind::Float => Value::parse_float(cell).map_or(Value::Float(0.0), Value::Float),
            ColumnKind::Text => Value::Text(cell.to_string()),
        }
    }
}

/// Loads delimited files into tables.
#[derive(Debug, Clone)]
pub struct TableLoader {
    delimiter: u8,
}

impl Default for TableLoader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl TableLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Load `path`, logging the outcome.
    pub fn load(&self, path: &Path) -> LoadOutcome {
        match self.read(path) {
            Ok(table) => {
                tracing::info!(
                    path = %path.display(),
                    records = table.len(),
                    columns = table.columns().len(),
                    "Loaded crime data"
                );
                for required in [DISTRICT, YEAR, TOTAL_CRIMES] {
                    if !table.columns().contains(required) {
                        tracing::warn!(column = required, "Dataset is missing expected column");
                    }
                }
                LoadOutcome::Loaded(table)
            }
            Err(e) => {
                tracing::error!(path = %path.display(), "Error loading data: {}", e);
                LoadOutcome::Failed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Read `path` into a table.
    pub fn read(&self, path: &Path) -> Result<Table> {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(file).map_err(|e| e.at(path))
    }

    /// Parse delimited text with a header row.
    pub fn parse<R: Read>(&self, mut reader: R) -> std::result::Result<Table, ParseError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        if ends_in_open_quote(&data, self.delimiter) {
            return Err(ParseError::UnterminatedQuote);
        }

        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(data.as_slice());

        let headers = rdr.headers()?.clone();
        if headers.is_empty() {
            return Err(ParseError::NoHeader);
        }
        let names = column_names(headers.iter());
        let width = names.len();

        let mut raw_rows = Vec::new();
        for result in rdr.records() {
            let row = result?;
            if row.len() > width {
                return Err(ParseError::RowWidth {
                    line: row.position().map_or(0, |p| p.line()),
                    expected: width,
                    found: row.len(),
                });
            }
            raw_rows.push(row);
        }

        let kinds: Vec<ColumnKind> = (0..width)
            .map(|i| ColumnKind::infer(raw_rows.iter().filter_map(|row| row.get(i))))
            .collect();

        let rows = raw_rows
            .iter()
            .map(|row| {
                kinds
                    .iter()
                    .enumerate()
                    .map(|(i, kind)| kind.convert(row.get(i)))
                    .collect()
            })
            .collect();

        Ok(Table::from_rows(names, rows))
    }
}

/// Whether `data` ends inside a quoted field.
///
/// Quotes only open a field at its start; `""` inside a quoted field is an
/// escaped quote. The reader itself accepts an open quote at end of input.
fn ends_in_open_quote(data: &[u8], delimiter: u8) -> bool {
    let data = data.strip_prefix(b"\xef\xbb\xbf").unwrap_or(data);
    let mut quoted = false;
    let mut field_start = true;
    let mut bytes = data.iter().copied().peekable();
    while let Some(b) = bytes.next() {
        if quoted {
            if b == b'"' {
                if bytes.peek() == Some(&b'"') {
                    bytes.next();
                } else {
                    quoted = false;
                }
            }
        } else if b == b'"' && field_start {
            quoted = true;
            field_start = false;
        } else {
            field_start = b == delimiter || b == b'\n' || b == b'\r';
        }
    }
    quoted
}

/// Normalize header cells, naming blanks and de-duplicating collisions.
fn column_names<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (i, raw) in headers.enumerate() {
        let mut name = normalize_column(raw);
        if name.is_empty() {
            name = format!("unnamed:_{}", i);
        }
        if names.contains(&name) {
            let base = name;
            let mut n = 1;
            name = format!("{}.{}", base, n);
            while names.contains(&name) {
                n += 1;
                name = format!("{}.{}", base, n);
            }
            tracing::warn!(column = %base, renamed = %name, "Duplicate column renamed");
        }
        names.push(name);
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn parse(data: &str) -> Table {
        TableLoader::new().parse(data.as_bytes()).unwrap()
    }

    #[test]
    fn test_headers_are_normalized() {
        let table = parse(" District ,Year,Total Crimes\nBelagavi,2020,12\n");
        assert_eq!(table.columns().names(), ["district", "year", "total_crimes"]);
    }

    #[test]
    fn test_missing_cells_are_zero_filled() {
        let table = parse("district,year,total_crimes,rate\nMandya,2020,,1.5\nHassan,,8,NA\n,2021,3\n");
        let rows = table.records();
        assert_eq!(rows[0].total_crimes(), Some(&Value::Int(0)));
        assert_eq!(rows[1].year(), Some(0));
        assert_eq!(rows[1].get("rate"), Some(&Value::Float(0.0)));
        assert_eq!(rows[2].get("district"), Some(&Value::Int(0)));
        // short row
        assert_eq!(rows[2].get("rate"), Some(&Value::Float(0.0)));
    }

    #[test]
    fn test_column_types_are_inferred() {
        let table = parse("district,year,total_crimes,code\nA,2020,1,7\nB,2021,2.5,X1\n");
        let rows = table.records();
        assert_eq!(rows[0].get("year"), Some(&Value::Int(2020)));
        assert_eq!(rows[0].total_crimes(), Some(&Value::Float(1.0)));
        assert_eq!(rows[0].get("code"), Some(&Value::Text("7".into())));
    }

    #[test]
    fn test_duplicate_and_blank_columns() {
        let table = parse("District,district,,x\n1,2,3,4\n");
        assert_eq!(
            table.columns().names(),
            ["district", "district.1", "unnamed:_2", "x"]
        );
    }

    #[test]
    fn test_row_wider_than_header_is_error() {
        let err = TableLoader::new()
            .parse("a,b\n1,2,3\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, ParseError::RowWidth { expected: 2, found: 3, .. }));
    }

    #[test]
    fn test_custom_delimiter() {
        let table = TableLoader::new()
            .with_delimiter(b';')
            .parse("district;year;total_crimes\nKolar;2019;5\n".as_bytes())
            .unwrap();
        assert_eq!(table.records()[0].district().as_deref(), Some("Kolar"));
    }

    #[test]
    fn test_missing_file_fails_to_empty_table() {
        let dir = tempdir().unwrap();
        let outcome = TableLoader::new().load(&dir.path().join("absent.csv"));
        assert!(!outcome.is_loaded());
        assert!(outcome.failure().unwrap().contains("absent.csv"));
        assert!(outcome.into_table().is_empty());
    }

    #[test]
    fn test_empty_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        File::create(&path).unwrap();
        assert!(!TableLoader::new().load(&path).is_loaded());
    }

    #[test]
    fn test_malformed_file_fails_to_empty_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbled.csv");
        std::fs::write(&path, b"district,year\n\xff\xfe,2020\n").unwrap();

        let outcome = TableLoader::new().load(&path);
        assert!(!outcome.is_loaded());
        assert!(outcome.failure().unwrap().contains("garbled.csv"));
        assert!(outcome.into_table().is_empty());
    }

    #[test]
    fn test_wide_row_error_names_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide.csv");
        std::fs::write(&path, "a,b\n1,2,3\n").unwrap();

        let err = TableLoader::new().read(&path).unwrap_err();
        assert!(matches!(err, LoadError::RowWidth { line: 2, .. }));
        assert!(err.to_string().contains("wide.csv"));
    }

    #[test]
    fn test_unterminated_quote_fails() {
        let err = TableLoader::new()
            .parse("district,year,total_crimes\n\"A,2020,3\nB,2021,4\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedQuote));

        let dir = tempdir().unwrap();
        let path = dir.path().join("open_quote.csv");
        std::fs::write(&path, "district,year\n\"Udupi,2020\n").unwrap();
        assert!(TableLoader::new().load(&path).into_table().is_empty());
    }

    #[test]
    fn test_quoted_fields_still_parse() {
        let table = parse("district,remarks\n\"Bengaluru, Urban\",\"said \"\"no\"\"\"\nHassan,5\" rain\n");
        let rows = table.records();
        assert_eq!(rows[0].district().as_deref(), Some("Bengaluru, Urban"));
        assert_eq!(rows[0].get("remarks"), Some(&Value::Text("said \"no\"".into())));
        assert_eq!(rows[1].get("remarks"), Some(&Value::Text("5\" rain".into())));
    }

    #[test]
    fn test_load_is_deterministic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crimes.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "district,year,total_crimes\nTumakuru,2020,3\nUdupi,2021,4").unwrap();

        let loader = TableLoader::new();
        let first = loader.load(&path).into_table();
        let second = loader.load(&path).into_table();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
