//! The spreadsheet engine interface
//!
//! Everything calcbind needs from the underlying formula engine is behind
//! [`SpreadsheetEngine`]: defined-name discovery, sheet lookup, string-typed
//! cell reads/writes, and an explicit recalculation step. The engine owns
//! cell storage, the dependency graph, and formula evaluation; calcbind
//! never evaluates formulas itself.
//!
//! Rows and columns at this boundary are 1-based.

/// A defined name as reported by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefinedName {
    /// The name (e.g. "LoanAmount", "DSCR_Table")
    pub name: String,
    /// The reference text the name is bound to (e.g. "Input!$D$7")
    pub formula: String,
    /// Sheet index for sheet-scoped names, `None` for workbook scope
    pub scope: Option<usize>,
}

/// Capabilities consumed from the spreadsheet engine collaborator
pub trait SpreadsheetEngine {
    /// List all defined names in the workbook
    fn defined_names(&self) -> Vec<DefinedName>;

    /// List sheet names, ordered by sheet index
    fn sheet_names(&self) -> Vec<String>;

    /// Raw cell content; formulas begin with `=`, literals do not
    fn raw_cell_content(&self, sheet: usize, row: u32, col: u16) -> String;

    /// The calculated/display string form of a cell, always a string even
    /// for numeric or boolean results
    fn display_cell_value(&self, sheet: usize, row: u32, col: u16) -> String;

    /// Set literal or formula content; does not trigger recalculation
    fn set_cell_input(&mut self, sheet: usize, row: u32, col: u16, text: &str);

    /// Evaluate all formulas; must be called after a write batch and before
    /// reading outputs that depend on the written cells
    fn recalculate(&mut self);

    /// Resolve a sheet name to its index (first exact match)
    fn sheet_index(&self, name: &str) -> Option<usize> {
        self.sheet_names().iter().position(|s| s == name)
    }

    /// Whether a cell holds a formula (raw content begins with `=`)
    fn is_formula_cell(&self, sheet: usize, row: u32, col: u16) -> bool {
        self.raw_cell_content(sheet, row, col).starts_with('=')
    }
}
