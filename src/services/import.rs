//! Spreadsheet and backup import
//!
//! A spreadsheet import reads the first sheet of a workbook (xlsx, xls, ods)
//! or a CSV file, one month per row, and appends a new month record per row;
//! existing records are never merged or replaced. A backup import replaces
//! the whole store. Both run under the store's import lock, start from the
//! blob on disk and leave the store untouched when the file cannot be read.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::Datelike;
use csv::ReaderBuilder;
use tracing::{debug, info, warn};

use crate::error::{FinanceError, FinanceResult};
use crate::export::import_from_json;
use crate::models::{MonthName, MonthRecord, Money};
use crate::storage::Storage;

/// Extensions read as workbooks; anything else is treated as CSV
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// What a spreadsheet column feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Month,
    Year,
    Expense(&'static str),
    Income(&'static str),
}

impl Column {
    /// Recognise a header cell, ignoring case, surrounding blanks and accents
    fn from_header(header: &str) -> Option<Self> {
        let column = match normalize_header(header).as_str() {
            "mes" => Self::Month,
            "ano" => Self::Year,
            "inter" => Self::Expense("inter"),
            "nubank" => Self::Expense("nubank"),
            "mpago" => Self::Expense("m_pago"),
            "agua" => Self::Expense("agua"),
            "energia" => Self::Expense("energia"),
            "outros_gastos" => Self::Expense("outros"),
            "pix" => Self::Expense("pix"),
            "salario" => Self::Income("salario"),
            "bonus" => Self::Income("bonus"),
            "outros_ganhos" => Self::Income("outros"),
            "recargapay" => Self::Income("recarga_pay"),
            _ => return None,
        };
        Some(column)
    }
}

fn normalize_header(header: &str) -> String {
    header
        .trim()
        .trim_start_matches('\u{feff}')
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

/// Map a header row to columns; a sheet with none recognised is refused
fn header_columns<'h>(
    headers: impl IntoIterator<Item = &'h str>,
) -> FinanceResult<Vec<Option<Column>>> {
    let columns: Vec<Option<Column>> = headers.into_iter().map(Column::from_header).collect();
    if !columns.is_empty() && columns.iter().all(Option::is_none) {
        return Err(FinanceError::Import(
            "Spreadsheet has no recognised columns (expected Mes, Ano, Inter, Salario, ...)".into(),
        ));
    }
    Ok(columns)
}

/// Pick `;` or `,` from whichever is more frequent on the header line
pub fn detect_delimiter(contents: &str) -> u8 {
    let header = contents.lines().next().unwrap_or_default();
    let semicolons = header.matches(';').count();
    let commas = header.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

/// Parse CSV rows into new month records
///
/// Unknown columns are ignored. Missing or non-numeric cells are zero, a
/// missing or unknown month is Janeiro and a missing year is the current one.
/// When two columns feed the same field (`Salario` and `Salário`), the first
/// non-empty cell wins.
pub fn parse_spreadsheet(contents: &str) -> FinanceResult<Vec<MonthRecord>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(detect_delimiter(contents))
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| FinanceError::Import(format!("Could not read spreadsheet header: {}", e)))?
        .clone();
    let columns = header_columns(headers.iter())?;

    let current_year = chrono::Local::now().year();
    let mut months = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| FinanceError::Import(format!("Error reading row {}: {}", row + 1, e)))?;
        months.push(parse_row(record.iter(), &columns, current_year));
    }
    Ok(months)
}

/// Parse the first sheet of a workbook into new month records
///
/// The first row holds the headers; cells are read with the same rules as
/// [`parse_spreadsheet`].
pub fn parse_workbook(path: &Path) -> FinanceResult<Vec<MonthRecord>> {
    let import_error = |e: calamine::Error| {
        FinanceError::Import(format!("Could not read {}: {}", path.display(), e))
    };

    let mut workbook = open_workbook_auto(path).map_err(import_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| FinanceError::Import(format!("{} has no sheets", path.display())))?
        .map_err(import_error)?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());
    let Some(headers) = rows.next() else {
        return Ok(Vec::new());
    };
    let columns = header_columns(headers.iter().map(String::as_str))?;

    let current_year = chrono::Local::now().year();
    Ok(rows
        .map(|row| parse_row(row.iter().map(|cell| cell.trim()), &columns, current_year))
        .collect())
}

/// Text of a workbook cell as the CSV reader would have seen it
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => format!("{:.2}", f),
        other => other.to_string(),
    }
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| WORKBOOK_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Read a spreadsheet file, choosing the reader by extension
pub fn read_spreadsheet(path: &Path) -> FinanceResult<Vec<MonthRecord>> {
    if is_workbook(path) {
        debug!(path = %path.display(), "reading first sheet of workbook");
        parse_workbook(path)
    } else {
        parse_spreadsheet(&read_file(path)?)
    }
}

fn parse_row<'c>(
    cells: impl IntoIterator<Item = &'c str>,
    columns: &[Option<Column>],
    current_year: i32,
) -> MonthRecord {
    let mut month = MonthRecord::new(MonthName::Janeiro, current_year);
    let mut filled: Vec<Column> = Vec::new();

    for (cell, column) in cells.into_iter().zip(columns) {
        let Some(column) = *column else { continue };
        if cell.is_empty() || filled.contains(&column) {
            continue;
        }
        filled.push(column);

        match column {
            Column::Month => match MonthName::parse(cell) {
                Some(label) => month.month = label,
                None => warn!(cell, "unknown month in spreadsheet, using Janeiro"),
            },
            Column::Year => {
                month.year = cell.parse().ok().filter(|y| *y != 0).unwrap_or(current_year);
            }
            Column::Expense(field) => {
                month.expenses.set(field, Money::parse_or_zero(cell));
            }
            Column::Income(field) => {
                month.income.set(field, Money::parse_or_zero(cell));
            }
        }
    }
    month
}

fn read_file(path: &Path) -> FinanceResult<String> {
    let mut contents = String::new();
    File::open(path)
        .and_then(|mut file| file.read_to_string(&mut contents))
        .map_err(|e| FinanceError::Import(format!("Could not read {}: {}", path.display(), e)))?;
    Ok(contents)
}

/// Service for importing files into the store
pub struct ImportService<'a> {
    storage: &'a mut Storage,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Append one month record per spreadsheet row; returns how many
    pub fn import_spreadsheet(&mut self, path: &Path) -> FinanceResult<usize> {
        let _guard = self.storage.begin_import()?;
        self.storage.reload()?;

        let months = read_spreadsheet(path)?;
        let count = months.len();
        self.storage.state_mut().months.extend(months);
        self.storage.save()?;

        info!(path = %path.display(), count, "spreadsheet imported");
        Ok(count)
    }

    /// Replace the store with the contents of a backup file
    pub fn import_backup(&mut self, path: &Path) -> FinanceResult<usize> {
        let _guard = self.storage.begin_import()?;
        self.storage.reload()?;

        let state = import_from_json(&read_file(path)?)?;
        let count = state.counts().total();
        self.storage.replace(state);
        self.storage.save()?;

        info!(path = %path.display(), count, "backup restored");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinancePaths;
    use crate::export::export_full_json;
    use crate::models::{AppState, Loan};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_parse_spreadsheet_rows() {
        let csv = "Mês,Ano,Inter,Nubank,MPago,Água,Energia,Outros_Gastos,Pix,Salário,Bônus,Outros_Ganhos,RecargaPay,Notas\n\
                   Março,2024,100,50.5,,20,abc,5,1,3000,200,10,7,ignored\n\
                   ,,1,,,,,,,,,,,\n";
        let months = parse_spreadsheet(csv).unwrap();
        assert_eq!(months.len(), 2);

        let first = &months[0];
        assert_eq!(first.month, MonthName::Marco);
        assert_eq!(first.year, 2024);
        assert_eq!(first.expenses.inter.cents(), 10000);
        assert_eq!(first.expenses.nubank.cents(), 5050);
        assert!(first.expenses.m_pago.is_zero());
        assert!(first.expenses.energia.is_zero());
        assert_eq!(first.expenses.outros.cents(), 500);
        assert_eq!(first.income.salario.cents(), 300000);
        assert_eq!(first.income.outros.cents(), 1000);
        assert_eq!(first.income.recarga_pay.cents(), 700);

        let second = &months[1];
        assert_eq!(second.month, MonthName::Janeiro);
        assert_eq!(second.year, chrono::Local::now().year());
        assert_eq!(second.expenses.inter.cents(), 100);
    }

    #[test]
    fn test_semicolon_delimiter() {
        let csv = "Mes;Ano;Salario\nabril;2025;1234,56\n";
        assert_eq!(detect_delimiter(csv), b';');
        let months = parse_spreadsheet(csv).unwrap();
        assert_eq!(months[0].month, MonthName::Abril);
        assert_eq!(months[0].income.salario.cents(), 123456);
    }

    #[test]
    fn test_duplicate_columns_keep_first_non_empty() {
        let csv = "Mes,Salario,Salário,Bonus,Bônus\n\
                   Maio,3000,,,150\n\
                   Junho,,2500,80,90\n";
        let months = parse_spreadsheet(csv).unwrap();

        assert_eq!(months[0].income.salario.cents(), 300000);
        assert_eq!(months[0].income.bonus.cents(), 15000);
        assert_eq!(months[1].income.salario.cents(), 250000);
        assert_eq!(months[1].income.bonus.cents(), 8000);
    }

    #[test]
    fn test_unrecognised_sheet_is_rejected() {
        let err = parse_spreadsheet("date,amount\n2025-01-01,10\n").unwrap_err();
        assert!(matches!(err, FinanceError::Import(_)));
    }

    #[test]
    fn test_import_appends_months() {
        let (temp_dir, mut storage) = create_test_storage();
        storage.state_mut().months.push(MonthRecord::new(MonthName::Janeiro, 2025));
        storage.save().unwrap();
        let path = temp_dir.path().join("planilha.csv");
        std::fs::write(&path, "Mes,Ano\nFevereiro,2025\nMarço,2025\n").unwrap();

        let count = ImportService::new(&mut storage).import_spreadsheet(&path).unwrap();

        assert_eq!(count, 2);
        assert_eq!(storage.state().months.len(), 3);
        assert!(!storage.paths().import_lock_file().exists());
    }

    #[test]
    fn test_failed_import_leaves_store_untouched() {
        let (temp_dir, mut storage) = create_test_storage();
        storage.state_mut().loans.push(Loan::default());
        storage.save().unwrap();
        let before = storage.state().clone();

        let missing = temp_dir.path().join("missing.csv");
        assert!(ImportService::new(&mut storage).import_spreadsheet(&missing).is_err());

        let garbage = temp_dir.path().join("backup.json");
        std::fs::write(&garbage, "{ broken").unwrap();
        assert!(ImportService::new(&mut storage).import_backup(&garbage).is_err());

        assert_eq!(storage.state(), &before);
        assert!(!storage.paths().import_lock_file().exists());
    }

    #[test]
    fn test_concurrent_import_is_refused() {
        let (temp_dir, mut storage) = create_test_storage();
        let path = temp_dir.path().join("planilha.csv");
        std::fs::write(&path, "Mes\nMaio\n").unwrap();

        let _held = storage.begin_import().unwrap();
        let err = ImportService::new(&mut storage).import_spreadsheet(&path).unwrap_err();
        assert!(err.to_string().contains("import already in progress"));
        assert!(storage.state().months.is_empty());
    }

    #[test]
    fn test_overlapping_imports_keep_both() {
        let (temp_dir, mut first) = create_test_storage();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut second = Storage::open(paths.clone()).unwrap();

        let maio = temp_dir.path().join("maio.csv");
        std::fs::write(&maio, "Mes,Ano\nMaio,2025\n").unwrap();
        let junho = temp_dir.path().join("junho.csv");
        std::fs::write(&junho, "Mes,Ano\nJunho,2025\n").unwrap();

        ImportService::new(&mut first).import_spreadsheet(&maio).unwrap();
        ImportService::new(&mut second).import_spreadsheet(&junho).unwrap();

        let reopened = Storage::open(paths).unwrap();
        let labels: Vec<MonthName> = reopened.state().months.iter().map(|m| m.month).collect();
        assert_eq!(labels, vec![MonthName::Maio, MonthName::Junho]);
    }

    fn write_workbook(path: &Path) {
        use rust_xlsxwriter::Workbook;

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let headers = ["Mês", "Ano", "Inter", "Água", "Salário", "Notas"];
        for (col, header) in headers.iter().enumerate() {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        sheet.write_string(1, 0, "Março").unwrap();
        sheet.write_number(1, 1, 2024.0).unwrap();
        sheet.write_number(1, 2, 120.5).unwrap();
        sheet.write_string(1, 3, "45,90").unwrap();
        sheet.write_number(1, 4, 3000.0).unwrap();
        sheet.write_string(1, 5, "ignored").unwrap();
        sheet.write_string(2, 0, "abril").unwrap();
        sheet.write_number(2, 2, 0.1 + 0.2).unwrap();

        let other = workbook.add_worksheet();
        other.write_string(0, 0, "Mes").unwrap();
        other.write_string(1, 0, "Dezembro").unwrap();

        workbook.save(path).unwrap();
    }

    #[test]
    fn test_workbook_first_sheet_is_imported() {
        let (temp_dir, mut storage) = create_test_storage();
        let path = temp_dir.path().join("planilha.xlsx");
        write_workbook(&path);

        let count = ImportService::new(&mut storage).import_spreadsheet(&path).unwrap();
        assert_eq!(count, 2);

        let months = &storage.state().months;
        assert_eq!(months[0].month, MonthName::Marco);
        assert_eq!(months[0].year, 2024);
        assert_eq!(months[0].expenses.inter.cents(), 12050);
        assert_eq!(months[0].expenses.agua.cents(), 4590);
        assert_eq!(months[0].income.salario.cents(), 300000);

        assert_eq!(months[1].month, MonthName::Abril);
        assert_eq!(months[1].year, chrono::Local::now().year());
        assert_eq!(months[1].expenses.inter.cents(), 30);
        assert!(months[1].income.salario.is_zero());
    }

    #[test]
    fn test_unreadable_workbook_is_an_import_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("planilha.xlsx");
        std::fs::write(&path, "Mes,Ano\nMaio,2025\n").unwrap();

        let err = read_spreadsheet(&path).unwrap_err();
        assert!(matches!(err, FinanceError::Import(_)));
    }

    #[test]
    fn test_backup_import_replaces_store() {
        let (temp_dir, mut storage) = create_test_storage();
        storage.state_mut().loans.push(Loan::default());

        let mut backup_state = AppState::default();
        backup_state.months.push(MonthRecord::new(MonthName::Julho, 2024));
        let path = temp_dir.path().join("backup.json");
        let mut file = File::create(&path).unwrap();
        export_full_json(&backup_state, &mut file, true).unwrap();

        let count = ImportService::new(&mut storage).import_backup(&path).unwrap();
        assert_eq!(count, 1);
        assert_eq!(storage.state(), &backup_state);
    }
}
