use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::warn;

use crate::ChatContext;

use super::super::Container;

const PROMPT: &str = "you> ";

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Read-eval loop: one message per input line until EOF or `/quit`.
    ///
    /// All turns share a single [`ChatContext`]. A failed turn is reported and
    /// the conversation continues.
    pub async fn chat<R, W>(&self, input: R, output: &mut W) -> Result<ChatContext>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let use_case = self.container.chat_use_case();
        let mut context = ChatContext::new();
        let mut lines = input.lines();

        output
            .write_all(b"Health chat. Type a question, or /quit to exit.\n")
            .await?;

        loop {
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let message = line.trim();
            if message == "/quit" {
                break;
            }
            if message.is_empty() {
                continue;
            }

            match use_case.execute(message, &mut context).await {
                Ok(reply) => {
                    output
                        .write_all(format!("assistant> {}\n", reply.response).as_bytes())
                        .await?;
                }
                Err(e) => {
                    warn!("Chat turn failed: {}", e);
                    output.write_all(format!("error> {}\n", e).as_bytes()).await?;
                }
            }
        }

        output.flush().await?;
        Ok(context)
    }
}
