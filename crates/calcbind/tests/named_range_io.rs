//! End-to-end tests for named-range classification and typed range I/O,
//! driven through an in-memory engine that stores raw cell text and
//! evaluates SUM formulas on recalculation.

use std::collections::HashMap;

use calcbind::{
    letters_to_column, parse_reference, DefinedName, Error, RangeGeometry, RangeRole, RangeValue,
    ScalarValue, SpreadsheetEngine, WorkbookBinding, WriteValue,
};

/// Minimal spreadsheet engine: literal cells plus `=SUM(Sheet!A1:B2)`
/// formulas, recalculated on demand. Anything else evaluates to `#NAME?`.
#[derive(Default)]
struct FakeEngine {
    sheets: Vec<String>,
    raw: HashMap<(usize, u32, u16), String>,
    display: HashMap<(usize, u32, u16), String>,
    names: Vec<DefinedName>,
}

impl FakeEngine {
    fn new(sheets: &[&str]) -> Self {
        Self {
            sheets: sheets.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    fn define(&mut self, name: &str, formula: &str) {
        self.names.push(DefinedName {
            name: name.to_string(),
            formula: formula.to_string(),
            scope: None,
        });
    }

    /// Seed a cell through an A1-style reference like "Input!D7"
    fn seed(&mut self, reference: &str, text: &str) {
        let parsed = parse_reference(reference).unwrap();
        let sheet = self.sheet_index(parsed.sheet.as_deref().unwrap()).unwrap();
        let col = letters_to_column(&parsed.start_column_letters).unwrap();
        self.raw
            .insert((sheet, parsed.start_row, col), text.to_string());
    }

    fn raw_at(&self, reference: &str) -> String {
        let parsed = parse_reference(reference).unwrap();
        let sheet = self.sheet_index(parsed.sheet.as_deref().unwrap()).unwrap();
        let col = letters_to_column(&parsed.start_column_letters).unwrap();
        self.raw
            .get(&(sheet, parsed.start_row, col))
            .cloned()
            .unwrap_or_default()
    }

    fn eval(&self, text: &str) -> String {
        let body = text.trim_start_matches('=');
        if let Some(range) = body.strip_prefix("SUM(").and_then(|s| s.strip_suffix(')')) {
            if let Some(parsed) = parse_reference(range) {
                let sheet = parsed
                    .sheet
                    .as_deref()
                    .and_then(|s| self.sheet_index(s))
                    .unwrap_or(0);
                let start_col = letters_to_column(&parsed.start_column_letters).unwrap();
                let end_col = letters_to_column(&parsed.end_column_letters).unwrap();

                let mut total = 0.0;
                for row in parsed.start_row..=parsed.end_row {
                    for col in start_col..=end_col {
                        let raw = self.raw.get(&(sheet, row, col));
                        total += raw.and_then(|r| r.trim().parse::<f64>().ok()).unwrap_or(0.0);
                    }
                }
                return format!("{}", total);
            }
        }
        "#NAME?".to_string()
    }
}

impl SpreadsheetEngine for FakeEngine {
    fn defined_names(&self) -> Vec<DefinedName> {
        self.names.clone()
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheets.clone()
    }

    fn raw_cell_content(&self, sheet: usize, row: u32, col: u16) -> String {
        self.raw.get(&(sheet, row, col)).cloned().unwrap_or_default()
    }

    fn display_cell_value(&self, sheet: usize, row: u32, col: u16) -> String {
        let raw = self.raw_cell_content(sheet, row, col);
        if raw.starts_with('=') {
            self.display
                .get(&(sheet, row, col))
                .cloned()
                .unwrap_or_default()
        } else {
            raw
        }
    }

    fn set_cell_input(&mut self, sheet: usize, row: u32, col: u16, text: &str) {
        if text.is_empty() {
            self.raw.remove(&(sheet, row, col));
        } else {
            self.raw.insert((sheet, row, col), text.to_string());
        }
    }

    fn recalculate(&mut self) {
        let formulas: Vec<_> = self
            .raw
            .iter()
            .filter(|(_, text)| text.starts_with('='))
            .map(|(key, text)| (*key, text.clone()))
            .collect();
        for (key, text) in formulas {
            let result = self.eval(&text);
            self.display.insert(key, result);
        }
    }
}

/// A small DSCR-style workbook: scalar and array inputs on "Input",
/// formula outputs and a results table on "API_Output".
fn dscr_workbook() -> FakeEngine {
    let mut engine = FakeEngine::new(&["Input", "API_Output"]);

    engine.define("LoanAmount", "Input!$D$7");
    engine.define("MonthlyRents", "Input!$B$2:$E$2");
    engine.define("OperatingCosts", "Input!$C$60:$C$63");
    engine.define("TotalIncome", "API_Output!$B$3");
    engine.define("ResultTable", "API_Output!$G$5:$AK$32");
    engine.define("BadRef", "OFFSET(A1,1,1)");
    engine.define("GhostSheet", "Missing!$A$1");

    engine.seed("Input!D7", "250000");
    engine.seed("API_Output!B3", "=SUM(Input!B2:E2)");

    engine
}

#[test]
fn test_classification_partitions() {
    let mut binding = WorkbookBinding::new(dscr_workbook());
    let set = binding.classification(false);

    let names = |records: &[calcbind::NamedRangeRecord]| -> Vec<String> {
        let mut names: Vec<String> = records.iter().map(|r| r.name.clone()).collect();
        names.sort();
        names
    };

    assert_eq!(
        names(&set.inputs),
        vec!["LoanAmount", "MonthlyRents", "OperatingCosts"]
    );
    assert_eq!(names(&set.outputs), vec!["ResultTable", "TotalIncome"]);
    assert_eq!(names(&set.unknown), vec!["BadRef", "GhostSheet"]);
    assert_eq!(set.len(), 7);

    // TABLE geometry never lands in the inputs partition
    assert!(set.inputs.iter().all(|r| r.geometry != RangeGeometry::Table));

    let table = set.find_output("ResultTable").unwrap();
    assert_eq!(table.geometry, RangeGeometry::Table);
    assert_eq!(table.role, RangeRole::Output);
    assert_eq!(table.row_count, 28);
    assert_eq!(table.column_count, 31);

    let costs = set.find_input("OperatingCosts").unwrap();
    assert_eq!(costs.geometry, RangeGeometry::Vertical);
    assert_eq!(costs.row_count, 4);
    assert_eq!(costs.column_count, 1);
}

#[test]
fn test_scalar_write_and_read() {
    let mut binding = WorkbookBinding::new(dscr_workbook());

    binding.set_input("LoanAmount", 300000.0).unwrap();
    let value = binding.read_input("LoanAmount").unwrap();
    assert_eq!(value, RangeValue::Scalar(ScalarValue::Number(300000.0)));

    binding.set_input("LoanAmount", true).unwrap();
    assert_eq!(binding.engine().raw_at("Input!D7"), "TRUE");
    let value = binding.read_input("LoanAmount").unwrap();
    assert_eq!(value, RangeValue::Scalar(ScalarValue::Boolean(true)));
}

#[test]
fn test_array_write_pads_with_empty() {
    let mut binding = WorkbookBinding::new(dscr_workbook());

    // Three values into the four-cell row B2:E2; E2 is written empty
    binding
        .set_input("MonthlyRents", vec![100.0, 200.0, 300.0])
        .unwrap();
    binding.recalculate();

    let total = binding.read_output("TotalIncome").unwrap();
    assert_eq!(total, RangeValue::Scalar(ScalarValue::Number(600.0)));

    let rents = binding.read_input("MonthlyRents").unwrap();
    assert_eq!(
        rents,
        RangeValue::Sequence(vec![
            ScalarValue::Number(100.0),
            ScalarValue::Number(200.0),
            ScalarValue::Number(300.0),
            ScalarValue::Null,
        ])
    );
}

#[test]
fn test_array_write_truncates_extra_values() {
    let mut binding = WorkbookBinding::new(dscr_workbook());

    binding
        .set_input("MonthlyRents", vec![1.0, 2.0, 3.0, 4.0, 5.0])
        .unwrap();
    binding.recalculate();

    // The fifth value never lands anywhere
    assert_eq!(binding.engine().raw_at("Input!F2"), "");

    let total = binding.read_output("TotalIncome").unwrap();
    assert_eq!(total, RangeValue::Scalar(ScalarValue::Number(10.0)));
}

#[test]
fn test_vertical_write_and_read() {
    let mut binding = WorkbookBinding::new(dscr_workbook());

    binding
        .set_input("OperatingCosts", vec![10.0, 20.0])
        .unwrap();

    let costs = binding.read_input("OperatingCosts").unwrap();
    assert_eq!(
        costs,
        RangeValue::Sequence(vec![
            ScalarValue::Number(10.0),
            ScalarValue::Number(20.0),
            ScalarValue::Null,
            ScalarValue::Null,
        ])
    );
    assert_eq!(binding.engine().raw_at("Input!C60"), "10");
    assert_eq!(binding.engine().raw_at("Input!C61"), "20");
}

#[test]
fn test_write_does_not_recalculate() {
    let mut binding = WorkbookBinding::new(dscr_workbook());

    binding
        .set_input("MonthlyRents", vec![100.0, 200.0, 300.0])
        .unwrap();

    // No recalculation yet: the formula has never been evaluated
    let total = binding.read_output("TotalIncome").unwrap();
    assert_eq!(total, RangeValue::Scalar(ScalarValue::Null));

    binding.recalculate();
    let total = binding.read_output("TotalIncome").unwrap();
    assert_eq!(total, RangeValue::Scalar(ScalarValue::Number(600.0)));
}

#[test]
fn test_table_read_shape() {
    let mut engine = dscr_workbook();
    engine.seed("API_Output!G5", "Period");
    engine.seed("API_Output!H5", "NOI");
    engine.seed("API_Output!G6", "1");
    engine.seed("API_Output!H6", "1250.5");

    let mut binding = WorkbookBinding::new(engine);
    let set = binding.classification(false);
    let record = set.find_output("ResultTable").unwrap().clone();

    let value = calcbind::read_range(binding.engine(), &record);
    let table = value.as_table().unwrap();

    assert_eq!(table.data_row_count, 27);
    assert_eq!(table.column_count, 31);
    assert_eq!(table.headers.len(), 31);
    assert_eq!(table.data.len(), 27);
    assert!(table.data.iter().all(|row| row.len() == 31));

    assert_eq!(table.headers[0], ScalarValue::Text("Period".into()));
    assert_eq!(table.headers[1], ScalarValue::Text("NOI".into()));
    assert_eq!(table.headers[2], ScalarValue::Null);
    assert_eq!(table.data[0][0], ScalarValue::Number(1.0));
    assert_eq!(table.data[0][1], ScalarValue::Number(1250.5));
}

#[test]
fn test_formula_errors_read_as_null() {
    let mut engine = dscr_workbook();
    engine.seed("API_Output!B3", "=BOGUS()");

    let mut binding = WorkbookBinding::new(engine);
    binding.recalculate();

    // The fake engine displays "#NAME?" for formulas it cannot evaluate;
    // the sentinel coerces to Null rather than surfacing as an error
    let total = binding.read_output("TotalIncome").unwrap();
    assert_eq!(total, RangeValue::Scalar(ScalarValue::Null));
}

#[test]
fn test_shape_mismatch_errors() {
    let mut binding = WorkbookBinding::new(dscr_workbook());

    // Sequence into a single cell
    let err = binding
        .set_input("LoanAmount", vec![1.0, 2.0])
        .unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { ref name, .. } if name == "LoanAmount"));

    // Scalar into a row range
    let err = binding.set_input("MonthlyRents", 100.0).unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { ref name, .. } if name == "MonthlyRents"));

    // Scalar into a column range
    let err = binding.set_input("OperatingCosts", 5.0).unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { .. }));

    // Nothing was written by the failed attempts
    assert_eq!(binding.engine().raw_at("Input!D7"), "250000");
    assert_eq!(binding.engine().raw_at("Input!B2"), "");
}

#[test]
fn test_named_input_not_found() {
    let mut binding = WorkbookBinding::new(dscr_workbook());

    let err = binding.set_input("NoSuchName", 1.0).unwrap_err();
    assert!(matches!(err, Error::InputNotFound(ref name) if name == "NoSuchName"));

    // Outputs are not writable inputs
    let err = binding.set_input("TotalIncome", 1.0).unwrap_err();
    assert!(matches!(err, Error::InputNotFound(_)));

    // A batch stops at the unknown name
    let err = binding
        .set_inputs([("LoanAmount", 1.0), ("NoSuchName", 2.0)])
        .unwrap_err();
    assert!(matches!(err, Error::InputNotFound(_)));
}

#[test]
fn test_output_lookup_errors() {
    let mut binding = WorkbookBinding::new(dscr_workbook());

    let err = binding.read_output("NoSuchName").unwrap_err();
    assert!(matches!(err, Error::OutputNotFound(ref name) if name == "NoSuchName"));

    // Inputs are not in the outputs partition
    let err = binding.read_output("LoanAmount").unwrap_err();
    assert!(matches!(err, Error::OutputNotFound(_)));
}

#[test]
fn test_batch_set_inputs() {
    let mut binding = WorkbookBinding::new(dscr_workbook());

    binding
        .set_inputs([
            ("LoanAmount", WriteValue::from(275000.0)),
            ("MonthlyRents", WriteValue::from(vec![100.0, 200.0, 300.0, 400.0])),
        ])
        .unwrap();
    binding.recalculate();

    let total = binding.read_output("TotalIncome").unwrap();
    assert_eq!(total, RangeValue::Scalar(ScalarValue::Number(1000.0)));
    let loan = binding.read_input("LoanAmount").unwrap();
    assert_eq!(loan, RangeValue::Scalar(ScalarValue::Number(275000.0)));
}

#[test]
fn test_classification_is_cached_until_invalidated() {
    let mut binding = WorkbookBinding::new(dscr_workbook());
    binding.classification(false);

    // Define a new name behind the cache's back
    binding.engine_mut().define("NewInput", "Input!$D$8");

    // Stale: the cache still answers from the first classification
    assert!(matches!(
        binding.set_input("NewInput", 1.0),
        Err(Error::InputNotFound(_))
    ));

    binding.invalidate_classification();
    binding.set_input("NewInput", 1.0).unwrap();
    assert_eq!(binding.engine().raw_at("Input!D8"), "1");
}

#[cfg(feature = "serde")]
#[test]
fn test_records_serialize() {
    let mut binding = WorkbookBinding::new(dscr_workbook());
    let set = binding.classification(false);

    let json = serde_json::to_value(set).unwrap();
    assert!(json["inputs"].is_array());
    assert!(json["outputs"].is_array());
    assert!(json["unknown"].is_array());
}
