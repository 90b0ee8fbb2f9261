//! FILENAME: core/engine/src/context.rs
//! PURPOSE: Runtime memory that expressions evaluate against.
//! CONTEXT: A `Context` owns a sparse map of numbered cells and a table of
//! context-local functions. Both live behind one mutex taken once per operation, so
//! a context can be shared between threads by reference. Optional byte streams for
//! the I/O built-ins sit behind their own lock so a blocking read never holds up
//! cell access.

use crate::cell::{CellAddress, CellValue};
use crate::function::Function;
use crate::range::{span_len, step, walk, CellRange};
use crate::registry;
use log::debug;
use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// Where READ_LINE takes its lines from.
pub enum InputStream {
    /// The process standard input, read through the shared stdin buffer.
    Stdin,
    Reader(Box<dyn BufRead + Send>),
}

/// Optional byte streams attached to a context.
#[derive(Default)]
pub struct ContextStreams {
    input: Option<InputStream>,
    output: Option<Box<dyn Write + Send>>,
    error: Option<Box<dyn Write + Send>>,
}

impl ContextStreams {
    /// Standard input, output and error of the process.
    pub fn stdio() -> Self {
        ContextStreams {
            input: Some(InputStream::Stdin),
            output: Some(Box::new(std::io::stdout())),
            error: Some(Box::new(std::io::stderr())),
        }
    }

    pub fn input(mut self, reader: impl BufRead + Send + 'static) -> Self {
        self.input = Some(InputStream::Reader(Box::new(reader)));
        self
    }

    pub fn output(mut self, writer: impl Write + Send + 'static) -> Self {
        self.output = Some(Box::new(writer));
        self
    }

    pub fn error(mut self, writer: impl Write + Send + 'static) -> Self {
        self.error = Some(Box::new(writer));
        self
    }
}

#[derive(Default)]
struct State {
    cells: HashMap<CellAddress, CellValue>,
    /// Keyed by upper-cased name.
    functions: HashMap<String, Arc<dyn Function>>,
}

/// Cell memory and function table for one evaluation session.
#[derive(Default)]
pub struct Context {
    state: Mutex<State>,
    streams: Mutex<ContextStreams>,
}

impl State {
    /// Occupied cells between `low` and `high` inclusive. Scans whichever is
    /// smaller: the span or the cell map.
    fn occupied_in(&self, low: CellAddress, high: CellAddress) -> Vec<(CellAddress, CellValue)> {
        if span_len(low, high) <= self.cells.len() as u64 {
            (low..=high)
                .filter_map(|addr| self.cells.get(&addr).map(|v| (addr, v.clone())))
                .collect()
        } else {
            self.cells
                .iter()
                .filter(|(addr, _)| (low..=high).contains(*addr))
                .map(|(addr, v)| (*addr, v.clone()))
                .collect()
        }
    }

    fn clear(&mut self, low: CellAddress, high: CellAddress) {
        if span_len(low, high) <= self.cells.len() as u64 {
            for addr in low..=high {
                self.cells.remove(&addr);
            }
        } else {
            self.cells.retain(|addr, _| !(low..=high).contains(addr));
        }
    }
}

impl Context {
    /// Creates an empty context with no streams attached.
    pub fn new() -> Self {
        Context::default()
    }

    pub fn with_streams(streams: ContextStreams) -> Self {
        Context {
            state: Mutex::default(),
            streams: Mutex::new(streams),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn streams(&self) -> MutexGuard<'_, ContextStreams> {
        self.streams.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns the value at `address`, `Empty` when unset.
    pub fn get(&self, address: CellAddress) -> CellValue {
        self.state().cells.get(&address).cloned().unwrap_or_default()
    }

    /// Stores a value. Storing `Empty` removes the entry.
    pub fn set(&self, address: CellAddress, value: CellValue) {
        let mut state = self.state();
        if value.is_empty() {
            state.cells.remove(&address);
        } else {
            state.cells.insert(address, value);
        }
    }

    /// Returns the cells from `start` to `end` inclusive. The range walks from
    /// `start` toward `end`, so `get_range(5, 2)` yields addresses 5, 4, 3, 2.
    pub fn get_range(&self, start: CellAddress, end: CellAddress) -> CellRange {
        let occupied = self.state().occupied_in(start.min(end), start.max(end));
        CellRange::new(start, end, occupied)
    }

    /// Assigns `value` to every address between `start` and `end` inclusive.
    /// Filling touches every address in the span; clearing only touches set cells.
    pub fn set_range(&self, start: CellAddress, end: CellAddress, value: CellValue) {
        let (low, high) = (start.min(end), start.max(end));
        let mut state = self.state();
        if value.is_empty() {
            state.clear(low, high);
            return;
        }
        for addr in low..=high {
            state.cells.insert(addr, value.clone());
        }
    }

    /// Copies the source range across the destination range, repeating the source
    /// when the destination is longer. The source is read in full before any write,
    /// so overlapping ranges copy the original values.
    pub fn copy_range(
        &self,
        src_start: CellAddress,
        src_end: CellAddress,
        dst_start: CellAddress,
        dst_end: CellAddress,
    ) {
        // Without a limit the copy cannot be refused.
        let _ = self.copy_range_limited(src_start, src_end, dst_start, dst_end, u64::MAX);
    }

    /// Like `copy_range`, but refuses to fill more than `max_fill` destination
    /// cells from a source that holds any value. The refusal returns the
    /// destination size and leaves every cell untouched.
    pub fn copy_range_limited(
        &self,
        src_start: CellAddress,
        src_end: CellAddress,
        dst_start: CellAddress,
        dst_end: CellAddress,
        max_fill: u64,
    ) -> Result<(), u64> {
        let mut state = self.state();
        let (low, high) = (src_start.min(src_end), src_start.max(src_end));
        let snapshot = CellRange::new(src_start, src_end, state.occupied_in(low, high));
        if snapshot.is_blank() {
            state.clear(dst_start.min(dst_end), dst_start.max(dst_end));
            return Ok(());
        }
        let dst_len = span_len(dst_start, dst_end);
        if dst_len > max_fill {
            return Err(dst_len);
        }

        let src_len = snapshot.span();
        for (i, addr) in walk(dst_start, dst_end).enumerate() {
            // Bounded by the source span, which fits a cell address.
            let offset = (i as u64 % src_len) as u32;
            match snapshot.get(step(src_start, src_end, offset)) {
                CellValue::Empty => state.cells.remove(&addr),
                value => state.cells.insert(addr, value),
            };
        }
        Ok(())
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.state().cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds a function by name, ignoring case. Context-local functions shadow
    /// the global built-ins.
    pub fn lookup_function(&self, name: &str) -> Option<Arc<dyn Function>> {
        let key = name.to_uppercase();
        let local = self.state().functions.get(&key).cloned();
        local.or_else(|| registry::lookup(&key))
    }

    /// Adds or replaces a context-local function.
    pub fn register_function(&self, function: Arc<dyn Function>) {
        let key = function.name().to_uppercase();
        debug!("CONTEXT registering local function {}", key);
        self.state().functions.insert(key, function);
    }

    /// Writes text to the output stream. Returns `Ok(false)` when none is attached.
    pub fn write_output(&self, text: &str) -> std::io::Result<bool> {
        let mut streams = self.streams();
        match streams.output.as_mut() {
            Some(out) => {
                out.write_all(text.as_bytes())?;
                out.flush()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Writes one line to the error stream, if any.
    pub fn write_error(&self, message: &str) -> std::io::Result<bool> {
        let mut streams = self.streams();
        match streams.error.as_mut() {
            Some(err) => {
                writeln!(err, "{}", message)?;
                err.flush()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Reads one line from the input stream without its terminator.
    /// `None` at end of input or when no input stream is attached.
    pub fn read_line(&self) -> std::io::Result<Option<String>> {
        let mut streams = self.streams();
        let mut line = String::new();
        let read = match streams.input.as_mut() {
            Some(InputStream::Stdin) => std::io::stdin().read_line(&mut line)?,
            Some(InputStream::Reader(reader)) => reader.read_line(&mut line)?,
            None => return Ok(None),
        };
        if read == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("Context")
            .field("cells", &state.cells)
            .field("functions", &state.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn unset_cells_read_empty() {
        let ctx = Context::new();
        assert_eq!(ctx.get(42), CellValue::Empty);
        assert!(ctx.is_empty());
    }

    #[test]
    fn setting_empty_removes_the_entry() {
        let ctx = Context::new();
        ctx.set(1, CellValue::Number(3.0));
        assert_eq!(ctx.len(), 1);
        ctx.set(1, CellValue::Empty);
        assert_eq!(ctx.len(), 0);
        assert_eq!(ctx.get(1), CellValue::Empty);
    }

    #[test]
    fn get_range_walks_in_either_direction() {
        let ctx = Context::new();
        for addr in 2..=5 {
            ctx.set(addr, CellValue::Number(addr as f64));
        }
        let forward: Vec<_> = ctx.get_range(2, 5).cells().collect();
        let mut backward: Vec<_> = ctx.get_range(5, 2).cells().collect();
        assert_eq!(forward.len(), 4);
        assert_eq!(forward[0], (2, CellValue::Number(2.0)));
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn get_range_of_one_cell() {
        let ctx = Context::new();
        let range = ctx.get_range(7, 7);
        assert_eq!(range.span(), 1);
        assert!(range.is_blank());
        assert_eq!(range.cells().collect::<Vec<_>>(), vec![(7, CellValue::Empty)]);
    }

    #[test]
    fn get_range_over_the_whole_address_space() {
        let ctx = Context::new();
        ctx.set(0, CellValue::Number(1.0));
        ctx.set(500_000_000, CellValue::from("mid"));
        ctx.set(999_999_999, CellValue::Boolean(true));

        let range = ctx.get_range(999_999_999, 0);
        assert_eq!(range.span(), 1_000_000_000);
        assert_eq!(
            range.occupied(),
            &[
                (0, CellValue::Number(1.0)),
                (500_000_000, CellValue::from("mid")),
                (999_999_999, CellValue::Boolean(true)),
            ]
        );
        assert!(ctx.get_range(1, 499_999_999).is_blank());
    }

    #[test]
    fn set_range_normalizes_order() {
        let ctx = Context::new();
        ctx.set_range(6, 4, CellValue::Boolean(true));
        assert_eq!(ctx.len(), 3);
        assert_eq!(ctx.get(5), CellValue::Boolean(true));

        ctx.set_range(4, 6, CellValue::Empty);
        assert!(ctx.is_empty());
    }

    #[test]
    fn clearing_a_huge_range_only_touches_set_cells() {
        let ctx = Context::new();
        ctx.set(3, CellValue::Number(3.0));
        ctx.set(700_000_000, CellValue::Number(7.0));
        ctx.set_range(999_999_999, 5, CellValue::Empty);
        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.get(3), CellValue::Number(3.0));
    }

    #[test]
    fn copy_range_cycles_the_source() {
        let ctx = Context::new();
        ctx.set(10, CellValue::from("A"));
        ctx.set(11, CellValue::from("B"));
        ctx.copy_range(10, 11, 20, 23);
        let copied: Vec<CellValue> = ctx.get_range(20, 23).cells().map(|(_, v)| v).collect();
        assert_eq!(
            copied,
            vec![
                CellValue::from("A"),
                CellValue::from("B"),
                CellValue::from("A"),
                CellValue::from("B"),
            ]
        );
    }

    #[test]
    fn copy_range_reads_source_before_writing() {
        let ctx = Context::new();
        ctx.set(1, CellValue::Number(1.0));
        ctx.set(2, CellValue::Number(2.0));
        // Destination overlaps the source.
        ctx.copy_range(1, 2, 2, 3);
        assert_eq!(ctx.get(1), CellValue::Number(1.0));
        assert_eq!(ctx.get(2), CellValue::Number(1.0));
        assert_eq!(ctx.get(3), CellValue::Number(2.0));
    }

    #[test]
    fn copy_range_with_empty_source_cells_clears_destination() {
        let ctx = Context::new();
        ctx.set(31, CellValue::Number(9.0));
        ctx.copy_range(0, 0, 30, 31);
        assert!(ctx.is_empty());
    }

    #[test]
    fn copy_range_keeps_gaps_of_a_sparse_source() {
        let ctx = Context::new();
        ctx.set(12, CellValue::from("x"));
        ctx.set(41, CellValue::Number(0.0));
        // Source walks 12, 11, 10.
        ctx.copy_range(12, 10, 40, 45);
        let copied: Vec<CellValue> = ctx.get_range(40, 45).cells().map(|(_, v)| v).collect();
        assert_eq!(
            copied,
            vec![
                CellValue::from("x"),
                CellValue::Empty,
                CellValue::Empty,
                CellValue::from("x"),
                CellValue::Empty,
                CellValue::Empty,
            ]
        );
    }

    #[test]
    fn copy_range_limited_refuses_large_fills() {
        let ctx = Context::new();
        ctx.set(1, CellValue::Number(1.0));
        assert_eq!(ctx.copy_range_limited(1, 2, 10, 19, 9), Err(10));
        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.copy_range_limited(1, 2, 10, 19, 10), Ok(()));
        assert_eq!(ctx.len(), 6);
        // A blank source only clears, whatever the limit.
        assert_eq!(ctx.copy_range_limited(3, 4, 0, 999_999_999, 0), Ok(()));
        assert!(ctx.is_empty());
    }

    #[test]
    fn copy_range_from_a_huge_blank_source_clears_sparsely() {
        let ctx = Context::new();
        ctx.set(5, CellValue::Number(5.0));
        ctx.set(900_000_000, CellValue::Number(9.0));
        ctx.copy_range(10, 99, 999_999_999, 6);
        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.get(5), CellValue::Number(5.0));
    }

    #[test]
    fn builtins_resolve_case_insensitively() {
        let ctx = Context::new();
        assert!(ctx.lookup_function("add").is_some());
        assert!(ctx.lookup_function("Get_Cell").is_some());
        assert!(ctx.lookup_function("nope").is_none());
    }

    #[test]
    fn streams_are_optional() {
        let ctx = Context::new();
        assert_eq!(ctx.write_output("x").unwrap(), false);
        assert_eq!(ctx.write_error("x").unwrap(), false);
        assert_eq!(ctx.read_line().unwrap(), None);
    }

    #[test]
    fn read_line_strips_terminators() {
        let ctx = Context::with_streams(ContextStreams::default().input(Cursor::new("one\r\ntwo")));
        assert_eq!(ctx.read_line().unwrap(), Some("one".to_string()));
        assert_eq!(ctx.read_line().unwrap(), Some("two".to_string()));
        assert_eq!(ctx.read_line().unwrap(), None);
    }
}
