use std::time::Instant;

use tokio::io::{self, AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;
use tokio::task;

use lispy::rep;

const INVALID_UTF8: &str = "Error: invalid UTF-8 input";
const LINE_TOO_LONG: &str = "Error: input line too long";

/// Longest input line, in bytes, a session buffers before giving up on it.
pub const MAX_LINE: usize = 4096;

async fn reply(output: &mut OwnedWriteHalf, line: &[u8]) -> io::Result<()> {
    if line.len() > MAX_LINE {
        return write_line(output, LINE_TOO_LONG).await;
    }

    let response = match std::str::from_utf8(line) {
        Ok(src) => {
            let src = src.trim_end_matches(&['\n', '\r'][..]);
            task::block_in_place(move || {
                let start = Instant::now();
                let res = rep(src);
                tracing::debug!(elapsed = ?start.elapsed(), "evaluated");
                res
            })
        }
        Err(err) => {
            tracing::debug!(%err, "rejected input line");
            INVALID_UTF8.to_string()
        }
    };

    write_line(output, &response).await
}

async fn write_line(output: &mut OwnedWriteHalf, line: &str) -> io::Result<()> {
    output.write_all(line.as_bytes()).await?;
    output.write_all(b"\n").await
}

/// Serves one connection: one result per input line until the peer closes.
pub async fn start_repl(stream: TcpStream, prompt: &str) -> io::Result<()> {
    let (mut input, mut output) = stream.into_split();

    let mut buf = [0; 1024];
    let mut pending = Vec::<u8>::with_capacity(1024);
    // Set once an overlong line has been answered; input is dropped up to its newline.
    let mut discarding = false;

    output.write_all(prompt.as_bytes()).await?;
    output.flush().await?;

    loop {
        let n = match input.read(&mut buf[..]).await {
            Ok(0) => {
                if !pending.is_empty() {
                    reply(&mut output, &pending).await?;
                }
                return Ok(());
            }
            Ok(n) => n,
            Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => {
                continue;
            }
            Err(e) => {
                return Err(e);
            }
        };

        let mut chunk = &buf[..n];
        if discarding {
            match chunk.iter().position(|b| *b == b'\n') {
                Some(end) => {
                    discarding = false;
                    chunk = &chunk[end + 1..];
                }
                None => continue,
            }
        }

        pending.extend_from_slice(chunk);

        while let Some(end) = pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = pending.drain(..=end).collect();
            reply(&mut output, &line).await?;
            output.write_all(prompt.as_bytes()).await?;
        }

        if pending.len() > MAX_LINE {
            tracing::debug!(len = pending.len(), "dropping overlong input line");
            pending.clear();
            discarding = true;
            write_line(&mut output, LINE_TOO_LONG).await?;
            output.write_all(prompt.as_bytes()).await?;
        }
        output.flush().await?;
    }
}
