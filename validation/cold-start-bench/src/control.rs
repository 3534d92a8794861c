//! Operator control channel.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::info;

use crate::console::Console;
use crate::error::BenchResult;

pub const QUIT_TOKEN: &str = "q";
const PROMPT: &str = "Type 'q' to quit.";

/// Block until the operator enters `q`.
///
/// Anything else re-prompts. End of input also counts as a stop, so a
/// closed stdin cannot leave the harness running forever.
pub async fn wait_for_quit<R>(reader: R, console: &Console) -> BenchResult<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        console.line(PROMPT)?;
        match lines.next_line().await? {
            Some(line) if line.trim() == QUIT_TOKEN => {
                info!("Quit requested");
                return Ok(());
            }
            Some(_) => continue,
            None => {
                info!("Control input closed");
                return Ok(());
            }
        }
    }
}
