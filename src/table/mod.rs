//! # Live State Table
//!
//! The single-line view of every philosopher's current state, redrawn in place:
//!
//! ```text
//! [ 0: Thinking | 1: Hungry   | 2: Eating   | 3: Thinking | 4: Hungry   | ]
//! ```
//!
//! ## Consistency Model
//!
//! - Each philosopher owns one cell and is its only writer. Cells are plain atomics;
//!   a render may see a slightly stale value but never a torn one.
//! - The render itself, which reads every cell and writes one line, runs under a
//!   single output lock. Two philosophers publishing at the same time produce two
//!   complete lines, never a mix of both.
//! - Banners written through [`StateTable::announce`] take the same lock, so they
//!   cannot land in the middle of a redraw either.
//!
//! This is a best-effort live view: only the latest state per philosopher is kept.

use crate::domain::PhilosopherState;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Width the state names are padded to, so the line never changes length.
const STATE_WIDTH: usize = 8;

/// Receives every state transition of every philosopher.
///
/// The philosopher only talks to this trait, which keeps the agent loop testable
/// with a recording sink.
pub trait StateSink: Send + Sync {
    /// Records that philosopher `id` has entered `state`.
    fn publish(&self, id: usize, state: PhilosopherState);
}

/// The production [`StateSink`]: atomic cells plus a lock-guarded writer.
pub struct StateTable {
    cells: Vec<AtomicU8>,
    out: Mutex<Box<dyn Write + Send>>,
    frozen: AtomicBool,
}

impl StateTable {
    /// Creates a table of `len` philosophers, all `Thinking`, drawing to `writer`.
    pub fn new(len: usize, writer: impl Write + Send + 'static) -> Self {
        Self {
            cells: (0..len)
                .map(|_| AtomicU8::new(PhilosopherState::Thinking.to_u8()))
                .collect(),
            out: Mutex::new(Box::new(writer)),
            frozen: AtomicBool::new(false),
        }
    }

    /// A table drawing to standard output.
    pub fn stdout(len: usize) -> Self {
        Self::new(len, io::stdout())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Latest known state of every philosopher, in index order.
    pub fn snapshot(&self) -> Vec<PhilosopherState> {
        self.cells
            .iter()
            .map(|cell| PhilosopherState::from_u8(cell.load(Ordering::Acquire)))
            .collect()
    }

    /// Builds the carriage-return line for the current cells.
    pub fn render_line(&self) -> String {
        let mut line = String::from("\r[ ");
        for (id, state) in self.snapshot().into_iter().enumerate() {
            line.push_str(&format!("{id}: {state:<width$} | ", width = STATE_WIDTH));
        }
        line.push_str("]  ");
        line
    }

    /// Writes `text` as a block on the display, under the output lock.
    pub fn announce(&self, text: &str) {
        let mut out = self.lock_output();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            debug!(error = %e, "Failed to write banner");
        }
    }

    /// Stops redrawing. Cells keep being updated, but once this returns no
    /// further line reaches the writer.
    pub fn freeze(&self) {
        let _out = self.lock_output();
        self.frozen.store(true, Ordering::Release);
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    fn render(&self) {
        let mut out = self.lock_output();
        // Checked under the lock so nothing slips in after `freeze` returns.
        if self.is_frozen() {
            return;
        }
        let line = self.render_line();
        if let Err(e) = out.write_all(line.as_bytes()).and_then(|_| out.flush()) {
            debug!(error = %e, "Failed to redraw state table");
        }
    }

    fn lock_output(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        // A panic while drawing leaves nothing half-updated worth refusing over.
        self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StateSink for StateTable {
    fn publish(&self, id: usize, state: PhilosopherState) {
        self.cells[id].store(state.to_u8(), Ordering::Release);
        self.render();
    }
}

impl std::fmt::Debug for StateTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateTable")
            .field("cells", &self.snapshot())
            .field("frozen", &self.is_frozen())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// A writer the test can read back.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_new_table_is_all_thinking() {
        let table = StateTable::new(3, io::sink());
        assert_eq!(table.snapshot(), vec![PhilosopherState::Thinking; 3]);
        assert_eq!(
            table.render_line(),
            "\r[ 0: Thinking | 1: Thinking | 2: Thinking | ]  "
        );
    }

    #[test]
    fn test_publish_updates_cell_and_redraws() {
        let buffer = SharedBuffer::default();
        let table = StateTable::new(3, buffer.clone());

        table.publish(1, PhilosopherState::Hungry);
        table.publish(2, PhilosopherState::Eating);

        assert_eq!(
            table.snapshot(),
            vec![
                PhilosopherState::Thinking,
                PhilosopherState::Hungry,
                PhilosopherState::Eating
            ]
        );
        assert_eq!(
            buffer.contents(),
            "\r[ 0: Thinking | 1: Hungry   | 2: Thinking | ]  \
             \r[ 0: Thinking | 1: Hungry   | 2: Eating   | ]  "
        );
    }

    #[test]
    fn test_frozen_table_records_but_does_not_draw() {
        let buffer = SharedBuffer::default();
        let table = StateTable::new(2, buffer.clone());

        table.freeze();
        table.publish(0, PhilosopherState::Eating);

        assert!(table.is_frozen());
        assert_eq!(table.snapshot()[0], PhilosopherState::Eating);
        assert_eq!(buffer.contents(), "");

        table.announce("done\n");
        assert_eq!(buffer.contents(), "done\n");
    }

    #[test]
    fn test_concurrent_publishes_never_interleave() {
        let buffer = SharedBuffer::default();
        let table = Arc::new(StateTable::new(4, buffer.clone()));

        let handles: Vec<_> = (0..4)
            .map(|id| {
                let table = Arc::clone(&table);
                std::thread::spawn(move || {
                    for round in 0..200 {
                        let state = match round % 3 {
                            0 => PhilosopherState::Hungry,
                            1 => PhilosopherState::Eating,
                            _ => PhilosopherState::Thinking,
                        };
                        table.publish(id, state);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let output = buffer.contents();
        let lines: Vec<&str> = output.split('\r').skip(1).collect();
        assert_eq!(lines.len(), 4 * 200);

        let expected_len = table.render_line().len() - 1;
        for line in lines {
            assert!(line.starts_with("[ 0: ") && line.ends_with("]  "), "torn line: {line:?}");
            assert_eq!(line.len(), expected_len, "torn line: {line:?}");
        }
    }
}
