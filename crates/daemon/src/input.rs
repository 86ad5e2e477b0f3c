//! Line input for the resolver
//!
//! Lines are read on a detached OS thread. A blocking read cannot be
//! cancelled, and `tokio::io::stdin` parks it on the runtime's blocking pool,
//! which the runtime waits for on exit. A detached thread does not hold the
//! process open after `main` returns.

use std::io::BufRead;
use tokio::sync::mpsc;
use tracing::warn;

/// Lines buffered between the reader thread and the feeder
const LINE_BUFFER: usize = 64;

/// Start reading `reader` line by line. The channel closes at end of input,
/// on a read error, and the thread stops once the receiver is dropped.
pub fn spawn_line_reader<R>(reader: R) -> std::io::Result<mpsc::Receiver<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(LINE_BUFFER);
    std::thread::Builder::new()
        .name("line-reader".to_string())
        .spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to read input. Stopping intake");
                        break;
                    }
                }
            }
        })?;
    Ok(rx)
}
