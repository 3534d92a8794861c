//! Console output shared between concurrent reporters.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// A mutex-guarded output sink.
///
/// Clones share the same writer. [`Console::write_block`] holds the lock
/// for all of its lines, so blocks from different workers never interleave.
#[derive(Clone)]
pub struct Console {
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Console {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Write one line.
    pub fn line(&self, line: impl AsRef<str>) -> io::Result<()> {
        self.write_block(&[line])
    }

    /// Write `lines` as one contiguous block and flush.
    pub fn write_block<S: AsRef<str>>(&self, lines: &[S]) -> io::Result<()> {
        // A poisoned lock only means another reporter panicked mid-write.
        let mut sink = self.sink.lock().unwrap_or_else(|e| e.into_inner());
        for line in lines {
            writeln!(sink, "{}", line.as_ref())?;
        }
        sink.flush()
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}
