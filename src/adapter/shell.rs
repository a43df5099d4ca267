//! Line based adapter for local use.
//!
//! Every non-blank line read from the input is a message from the `Shell`
//! user in the `Shell` room. Everything the bot sends is written to the
//! output, one message after the other.

use log::{debug, error};
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Lines, Stdin, Stdout},
    sync::Mutex,
};

use crate::adapter::{Adapter, Envelope, Message, User};

/// Room and user name of every shell message
const SHELL_NAME: &str = "Shell";
/// User identifier of every shell message
const SHELL_USER_ID: &str = "1";

/// Adapter reading messages from a reader and writing replies to a writer.
///
/// [`ShellAdapter::new`] uses the process standard input and output.
pub struct ShellAdapter<R, W> {
    /// Inbound lines
    lines: Mutex<Lines<BufReader<R>>>,
    /// Outbound text sink
    output: Mutex<W>,
}

impl ShellAdapter<Stdin, Stdout> {
    /// Creates a shell adapter over standard input and output.
    pub fn new() -> Self {
        Self::with_io(tokio::io::stdin(), tokio::io::stdout())
    }
}

impl<R, W> ShellAdapter<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a shell adapter over any reader and writer.
    pub fn with_io(reader: R, writer: W) -> Self {
        ShellAdapter {
            lines: Mutex::new(BufReader::new(reader).lines()),
            output: Mutex::new(writer),
        }
    }

    /// Consumes the adapter and returns its writer.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output.into_inner()
    }

    fn envelope() -> Envelope {
        Envelope {
            room: SHELL_NAME.to_owned(),
            user: User {
                id: Some(SHELL_USER_ID.to_owned()),
                name: Some(SHELL_NAME.to_owned()),
            },
        }
    }

    async fn write(&self, text: &str) {
        let mut output = self.output.lock().await;
        let line = format!("{}\n", text);

        if let Err(e) = output.write_all(line.as_bytes()).await {
            error!("failed to write shell output: {}", e);
            return;
        }
        if let Err(e) = output.flush().await {
            error!("failed to flush shell output: {}", e);
        }
    }
}

impl<R, W> Adapter for ShellAdapter<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    fn name(&self) -> String {
        "shell".to_owned()
    }

    async fn receive(&self) -> Option<Message> {
        let mut lines = self.lines.lock().await;

        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => {
                    return Some(Message {
                        envelope: Self::envelope(),
                        text: line,
                    });
                }
                Ok(None) => return None,
                Err(e) => {
                    error!("failed to read shell input: {}", e);
                    return None;
                }
            }
        }
    }

    async fn send(&self, room: &str, text: &str) {
        debug!("send to {}", room);
        self.write(text).await;
    }

    async fn reply(&self, envelope: &Envelope, text: &str) {
        match envelope.user.name.as_deref() {
            Some(name) => self.write(&format!("{}: {}", name, text)).await,
            None => self.write(text).await,
        }
    }
}
