//! BOM CSV reader

use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::core::error::CogsError;
use crate::entities::LineItem;

/// Header names of the BOM columns the pipeline reads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pub part_number: String,
    /// Empty or `None` means the BOM carries no manufacturer
    pub manufacturer: Option<String>,
    pub quantity: String,
}

impl ColumnMapping {
    pub fn new(part_number: &str, manufacturer: Option<&str>, quantity: &str) -> Self {
        Self {
            part_number: part_number.trim().to_string(),
            manufacturer: manufacturer
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string),
            quantity: quantity.trim().to_string(),
        }
    }

    pub fn uses_manufacturer(&self) -> bool {
        self.manufacturer.is_some()
    }

    /// Check the required column names are present at all
    pub fn validate(&self) -> Result<(), CogsError> {
        if self.part_number.is_empty() {
            return Err(CogsError::config_with_help(
                "BOM part number column needs to be specified",
                "Pass --bom-part-number-column with the header of the part number column",
            ));
        }
        if self.quantity.is_empty() {
            return Err(CogsError::config_with_help(
                "BOM quantity column needs to be specified",
                "Pass --bom-quantity-column with the header of the quantity column",
            ));
        }
        Ok(())
    }
}

/// Column indices resolved against an actual header row
struct ColumnIndices {
    part_number: usize,
    manufacturer: Option<usize>,
    quantity: usize,
}

/// Build a map from header name to column index
fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .map(|(i, h)| (h.trim().to_string(), i))
        .collect()
}

impl ColumnIndices {
    fn resolve(mapping: &ColumnMapping, headers: &StringRecord) -> Result<Self, CogsError> {
        let header_map = build_header_map(headers);
        let find = |name: &str, flag: &str| {
            header_map.get(name).copied().ok_or_else(|| {
                let available: Vec<&str> = headers.iter().map(str::trim).collect();
                CogsError::config_with_help(
                    format!("Column '{}' not found in BOM header", name),
                    format!("Check {}. Available columns: {}", flag, available.join(", ")),
                )
            })
        };

        Ok(Self {
            part_number: find(&mapping.part_number, "--bom-part-number-column")?,
            manufacturer: mapping
                .manufacturer
                .as_deref()
                .map(|m| find(m, "--bom-manufacturer-column"))
                .transpose()?,
            quantity: find(&mapping.quantity, "--bom-quantity-column")?,
        })
    }
}

/// Read line items from a BOM file
pub fn read_bom(path: &Path, mapping: &ColumnMapping) -> Result<Vec<LineItem>, CogsError> {
    let file = File::open(path).map_err(|e| CogsError::io(path, e))?;
    parse_bom(BufReader::new(file), mapping)
}

/// Parse line items from BOM CSV content.
///
/// Rows are returned in file order. Blank rows and rows with an empty part
/// number are skipped.
pub fn parse_bom<R: Read>(reader: R, mapping: &ColumnMapping) -> Result<Vec<LineItem>, CogsError> {
    mapping.validate()?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = ColumnIndices::resolve(mapping, &headers)?;

    let mut items = Vec::new();
    for (row_idx, result) in rdr.records().enumerate() {
        // Header is row 1; prefer the reader's line so skipped blank lines still count
        let record = result
            .map_err(|e| CogsError::data(row_idx + 2, format!("CSV parse error: {}", e)))?;
        let row_num = record
            .position()
            .map_or(row_idx + 2, |pos| pos.line() as usize);

        let part_number = record.get(columns.part_number).unwrap_or_default();
        if part_number.is_empty() {
            tracing::debug!("Skipping row {} with no part number", row_num);
            continue;
        }

        let manufacturer = columns
            .manufacturer
            .and_then(|idx| record.get(idx))
            .unwrap_or_default();

        let qty_cell = record.get(columns.quantity).unwrap_or_default();
        let qty_per_board = parse_quantity(qty_cell)
            .map_err(|msg| CogsError::data(row_num, format!("{} (part {})", msg, part_number)))?;

        items.push(LineItem::new(part_number, manufacturer, qty_per_board));
    }

    Ok(items)
}

fn parse_quantity(cell: &str) -> Result<u64, String> {
    if cell.is_empty() {
        return Err("missing quantity".to_string());
    }
    match cell.parse::<u64>() {
        Ok(0) => Err("quantity must be positive, got 0".to_string()),
        Ok(qty) => Ok(qty),
        Err(_) => Err(format!("quantity '{}' is not a positive integer", cell)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> ColumnMapping {
        ColumnMapping::new("Part Number", Some("Manufacturer"), "Qty")
    }

    #[test]
    fn test_parse_rows_in_order() {
        let csv = "Part Number,Manufacturer,Qty,Designator\n\
                   R1,Acme,2,R1 R2\n\
                   C7,Globex,10,C1-C10\n\
                   R1,Acme,1,R9\n";

        let items = parse_bom(csv.as_bytes(), &mapping()).unwrap();
        assert_eq!(
            items,
            vec![
                LineItem::new("R1", "Acme", 2),
                LineItem::new("C7", "Globex", 10),
                LineItem::new("R1", "Acme", 1),
            ]
        );
    }

    #[test]
    fn test_blank_rows_and_empty_part_numbers_skipped() {
        let csv = "Part Number,Manufacturer,Qty\n\
                   \n\
                   R1,Acme,2\n\
                   ,,\n\
                   ,Acme,5\n";

        let items = parse_bom(csv.as_bytes(), &mapping()).unwrap();
        assert_eq!(items, vec![LineItem::new("R1", "Acme", 2)]);
    }

    #[test]
    fn test_without_manufacturer_column() {
        let csv = "Part Number,Manufacturer,Qty\nR1,Acme,2\n";
        let mapping = ColumnMapping::new("Part Number", None, "Qty");

        let items = parse_bom(csv.as_bytes(), &mapping).unwrap();
        assert_eq!(items, vec![LineItem::new("R1", "", 2)]);
    }

    #[test]
    fn test_headers_are_trimmed() {
        let csv = " Part Number , Qty \nR1, 3 \n";
        let mapping = ColumnMapping::new("Part Number", Some(""), "Qty");

        let items = parse_bom(csv.as_bytes(), &mapping).unwrap();
        assert_eq!(items, vec![LineItem::new("R1", "", 3)]);
    }

    #[test]
    fn test_missing_part_number_column_name() {
        let mapping = ColumnMapping::new("", None, "Qty");
        let err = parse_bom("Part Number,Qty\nR1,1\n".as_bytes(), &mapping).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("part number column"));
    }

    #[test]
    fn test_missing_quantity_column_name() {
        let mapping = ColumnMapping::new("Part Number", None, "  ");
        let err = parse_bom("Part Number,Qty\nR1,1\n".as_bytes(), &mapping).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("quantity column"));
    }

    #[test]
    fn test_unknown_header_is_configuration_error() {
        let mapping = ColumnMapping::new("MPN", None, "Qty");
        let err = parse_bom("Part Number,Qty\nR1,1\n".as_bytes(), &mapping).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("'MPN'"));
    }

    #[test]
    fn test_unknown_manufacturer_header_is_configuration_error() {
        let mapping = ColumnMapping::new("Part Number", Some("Mfr"), "Qty");
        let err = parse_bom("Part Number,Qty\nR1,1\n".as_bytes(), &mapping).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_bad_quantity_is_data_error_with_row() {
        let csv = "Part Number,Manufacturer,Qty\nR1,Acme,2\nC1,Acme,two\n";
        let err = parse_bom(csv.as_bytes(), &mapping()).unwrap_err();
        match err {
            CogsError::Data { row, message } => {
                assert_eq!(row, 3);
                assert!(message.contains("'two'"));
                assert!(message.contains("C1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_data_error_row_counts_blank_lines() {
        let csv = "Part Number,Manufacturer,Qty\n\nR1,Acme,x\n";
        let err = parse_bom(csv.as_bytes(), &mapping()).unwrap_err();
        assert!(matches!(err, CogsError::Data { row: 3, .. }));
    }

    #[test]
    fn test_zero_and_missing_quantities_rejected() {
        for csv in [
            "Part Number,Manufacturer,Qty\nR1,Acme,0\n",
            "Part Number,Manufacturer,Qty\nR1,Acme,\n",
            "Part Number,Manufacturer,Qty\nR1,Acme\n",
            "Part Number,Manufacturer,Qty\nR1,Acme,-3\n",
        ] {
            let err = parse_bom(csv.as_bytes(), &mapping()).unwrap_err();
            assert!(matches!(err, CogsError::Data { row: 2, .. }), "{csv:?}");
        }
    }

    #[test]
    fn test_header_only_bom_is_empty() {
        let items = parse_bom("Part Number,Manufacturer,Qty\n".as_bytes(), &mapping()).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_read_bom_missing_file() {
        let err = read_bom(Path::new("/nonexistent/bom.csv"), &mapping()).unwrap_err();
        assert!(matches!(err, CogsError::Io { .. }));
    }
}
