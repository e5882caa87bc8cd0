//! One console session: read a line, dispatch it, write the reply, repeat.
//!
//! Lifecycle:
//! - prompt is written on open and after every reply
//! - blank lines only re-prompt
//! - unknown names get a fixed reply and the session continues
//! - `quit` writes its farewell, shuts the write half, and stops; lines
//!   already buffered behind it are dropped
//! - EOF, read errors and write errors end only this session
//!
//! The store lock is taken inside `Command::execute` and released before any
//! socket write, so a slow client never stalls ingestion or other sessions.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use tally_core::error::Result;
use tally_core::protocol::{CommandLine, LineDecoder};

use crate::app_state::ConsoleState;
use crate::dispatch::{Reply, UNRECOGNIZED};

/// Drive a session over any byte stream until it closes.
pub async fn run_session<S>(state: ConsoleState, mut stream: S) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut decoder = LineDecoder::new();
    write_out(&state, &mut stream, state.prompt()).await?;

    loop {
        while let Some(line) = decoder.next_line() {
            match handle_line(&state, &line) {
                Reply::Continue(mut text) => {
                    text.push_str(state.prompt());
                    write_out(&state, &mut stream, &text).await?;
                }
                Reply::Close(text) => {
                    write_out(&state, &mut stream, &text).await?;
                    stream.shutdown().await?;
                    tracing::debug!(discarded = decoder.pending(), "client quit");
                    return Ok(());
                }
            }
        }

        let n = stream.read_buf(decoder.buffer_mut()).await?;
        if n == 0 {
            if decoder.pending() > 0 {
                tracing::debug!(bytes = decoder.pending(), "dropping unterminated line at eof");
            }
            return Ok(());
        }
    }
}

/// Parse and dispatch one line. Never fails; every outcome is reply text.
pub fn handle_line(state: &ConsoleState, line: &str) -> Reply {
    let Some(cl) = CommandLine::parse(line) else {
        return Reply::Continue(String::new());
    };

    let Some(cmd) = state.commands().lookup(&cl.name) else {
        state.metrics().unrecognized_commands.inc(&[]);
        tracing::debug!(command = %cl.name, "unrecognized command");
        return Reply::Continue(UNRECOGNIZED.to_string());
    };

    state.metrics().commands.inc(&[("command", cmd.name())]);
    if cmd.is_destructive() {
        tracing::info!(command = cmd.name(), args = cl.args.len(), "delete requested");
    } else {
        tracing::trace!(command = cmd.name(), "dispatch");
    }
    cmd.execute(&cl.args, state.store())
}

async fn write_out<S>(state: &ConsoleState, stream: &mut S, text: &str) -> Result<()>
where
    S: AsyncWrite + Unpin,
{
    stream.write_all(text.as_bytes()).await?;
    stream.flush().await?;
    state.metrics().bytes_written.add(&[], text.len() as u64);
    Ok(())
}
