use super::error::IngestError;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::NaiveDate;
use std::io::Cursor;

/// Conteúdo tabular normalizado de um arquivo importado: cabeçalho + linhas
/// de células já convertidas para texto. A primeira planilha não vazia é a
/// usada nos .xlsx.
#[derive(Debug, Clone)]
pub struct SheetData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetData {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Lê o arquivo pelo nome/extensão: .xlsx/.xls via calamine, .csv via csv.
pub fn read_tabular(file_name: &str, bytes: &[u8]) -> Result<SheetData, IngestError> {
    let lower = file_name.to_lowercase();
    if lower.ends_with(".xlsx") || lower.ends_with(".xls") {
        read_spreadsheet(bytes)
    } else if lower.ends_with(".csv") {
        read_csv(bytes)
    } else {
        Err(IngestError::UnsupportedFormat(file_name.to_string()))
    }
}

fn read_spreadsheet(bytes: &[u8]) -> Result<SheetData, IngestError> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = open_workbook_auto_from_rs(cursor)
        .map_err(|e| IngestError::Unreadable(format!("planilha: {}", e)))?;

    let sheet_names = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(IngestError::Unreadable("planilha sem abas".into()));
    }

    for sheet_name in &sheet_names {
        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| IngestError::Unreadable(format!("aba '{}': {}", sheet_name, e)))?;

        let mut iter = range.rows();
        let headers = match iter.next() {
            Some(row) => row.iter().map(cell_to_string).collect::<Vec<_>>(),
            None => continue,
        };

        let rows: Vec<Vec<String>> = iter
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();

        return Ok(SheetData { headers, rows });
    }

    Err(IngestError::Unreadable("todas as abas estão vazias".into()))
}

fn read_csv(bytes: &[u8]) -> Result<SheetData, IngestError> {
    let delimiter = sniff_delimiter(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| IngestError::Unreadable(format!("csv: {}", e)))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for record in reader.records() {
        // registro ilegível é problema de linha, não de arquivo
        let record = match record {
            Ok(r) => r,
            Err(_) => {
                rows.push(Vec::new());
                continue;
            }
        };
        rows.push(record.iter().map(|c| c.trim().to_string()).collect());
    }

    Ok(SheetData { headers, rows })
}

/// Relatórios brasileiros alternam entre vírgula e ponto-e-vírgula; decide
/// pelo que aparece mais na primeira linha
fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let first_line: &[u8] = bytes.split(|b| *b == b'\n').next().unwrap_or(bytes);
    let semicolons = first_line.iter().filter(|b| **b == b';').count();
    let commas = first_line.iter().filter(|b| **b == b',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => format!("{}", b),
        Data::Error(e) => format!("#{:?}", e),
        Data::DateTime(dt) => excel_serial_to_date_string(dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Serial Excel (dias desde 30/12/1899) → "dd/mm/aaaa", para cair no mesmo
/// caminho de parse das células de texto
fn excel_serial_to_date_string(serial: f64) -> String {
    let base = NaiveDate::from_ymd_opt(1899, 12, 30).expect("data base válida");
    match base.checked_add_days(chrono::Days::new(serial.floor() as u64)) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => format!("{}", serial),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_comma() {
        let bytes = b"data,sku,quantidade\n15/03/2024,ABC,2\n16/03/2024,DEF,1\n";
        let sheet = read_tabular("vendas.csv", bytes).unwrap();
        assert_eq!(sheet.headers, vec!["data", "sku", "quantidade"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0][1], "ABC");
    }

    #[test]
    fn test_read_csv_semicolon() {
        let bytes = b"data;sku;valor\n15/03/2024;ABC;R$ 10,50\n";
        let sheet = read_tabular("vendas.csv", bytes).unwrap();
        assert_eq!(sheet.headers.len(), 3);
        assert_eq!(sheet.rows[0][2], "R$ 10,50");
    }

    #[test]
    fn test_unsupported_extension() {
        let err = read_tabular("vendas.pdf", b"whatever").unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_excel_serial_to_date() {
        // 45366 = 15/03/2024
        assert_eq!(excel_serial_to_date_string(45366.0), "15/03/2024");
    }
}
