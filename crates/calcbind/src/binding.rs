//! Workbook-session binding
//!
//! [`WorkbookBinding`] ties one engine instance to one classification cache
//! and exposes the name-level operations callers actually want: set inputs
//! by name, recalculate, read outputs by name. One binding per workbook
//! instance; sharing a binding across independent workbooks is a
//! correctness bug.

use crate::cache::ClassificationCache;
use crate::classify::{ClassificationSet, NamedRangeRecord};
use crate::engine::SpreadsheetEngine;
use crate::error::{Error, Result};
use crate::io::{read_range, write_range, RangeValue, WriteValue};

/// One workbook session: an engine plus its classification cache
#[derive(Debug)]
pub struct WorkbookBinding<E: SpreadsheetEngine> {
    engine: E,
    cache: ClassificationCache,
}

impl<E: SpreadsheetEngine> WorkbookBinding<E> {
    /// Bind an engine instance
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            cache: ClassificationCache::new(),
        }
    }

    /// Borrow the underlying engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutably borrow the underlying engine
    ///
    /// Callers that mutate defined names through this borrow must call
    /// [`invalidate_classification`](Self::invalidate_classification)
    /// afterwards.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Unwrap the binding back into the engine
    pub fn into_engine(self) -> E {
        self.engine
    }

    /// The workbook classification, memoized; pass `force_refresh` to
    /// recompute unconditionally
    pub fn classification(&mut self, force_refresh: bool) -> &ClassificationSet {
        self.cache.get_or_classify(&self.engine, force_refresh)
    }

    /// Discard the cached classification
    pub fn invalidate_classification(&mut self) {
        self.cache.invalidate();
    }

    /// Write one named input
    ///
    /// The name must be in the inputs partition; the value must fit the
    /// record's geometry (scalar for a single cell, sequence for a row or
    /// column, with pad/truncate semantics).
    pub fn set_input(&mut self, name: &str, value: impl Into<WriteValue>) -> Result<()> {
        let record = self.input_record(name)?;
        write_range(&mut self.engine, &record, &value.into())
    }

    /// Write a batch of named inputs, each through the single-write contract
    ///
    /// Stops at the first failure. Does not recalculate; call
    /// [`recalculate`](Self::recalculate) after the batch.
    pub fn set_inputs<I, S, V>(&mut self, inputs: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, V)>,
        S: AsRef<str>,
        V: Into<WriteValue>,
    {
        for (name, value) in inputs {
            self.set_input(name.as_ref(), value)?;
        }
        Ok(())
    }

    /// Read a named input's current value
    pub fn read_input(&mut self, name: &str) -> Result<RangeValue> {
        let record = self.input_record(name)?;
        Ok(read_range(&self.engine, &record))
    }

    /// Read a named output's current value
    ///
    /// Outputs reflect the last recalculation; write inputs and call
    /// [`recalculate`](Self::recalculate) first.
    pub fn read_output(&mut self, name: &str) -> Result<RangeValue> {
        let set = self.cache.get_or_classify(&self.engine, false);
        let record = set
            .find_output(name)
            .cloned()
            .ok_or_else(|| Error::OutputNotFound(name.to_string()))?;
        Ok(read_range(&self.engine, &record))
    }

    /// Evaluate all formulas, the explicit step between writes and reads
    pub fn recalculate(&mut self) {
        self.engine.recalculate();
    }

    fn input_record(&mut self, name: &str) -> Result<NamedRangeRecord> {
        let set = self.cache.get_or_classify(&self.engine, false);
        set.find_input(name)
            .cloned()
            .ok_or_else(|| Error::InputNotFound(name.to_string()))
    }
}
