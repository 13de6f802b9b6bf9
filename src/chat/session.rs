//! Interactive chat loop.

use log::debug;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::error_handling::ChatError;

use super::client::ChatClient;

const EXIT_COMMANDS: &[&str] = &["exit", "quit"];

/// Prompts for an API key on `output` and reads it from `input`.
///
/// # Errors
///
/// Returns `ChatError::MissingApiKey` if the entered key is blank or input ends.
pub async fn prompt_api_key<R, W>(input: &mut R, output: &mut W) -> Result<String, ChatError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(b"Enter your OpenAI API key: ").await?;
    output.flush().await?;

    let mut line = String::new();
    input.read_line(&mut line).await?;
    let key = line.trim();
    if key.is_empty() {
        return Err(ChatError::MissingApiKey);
    }
    Ok(key.to_string())
}

/// Runs the chat loop until the user types `exit`/`quit` or input ends.
///
/// Each non-blank line is sent as a single user message and the reply is
/// printed as `AI: <reply>`. Returns the number of answered turns.
///
/// # Errors
///
/// Any chat or terminal error ends the session.
pub async fn run_session<R, W>(
    client: &ChatClient,
    input: &mut R,
    output: &mut W,
) -> Result<usize, ChatError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output
        .write_all("\n✅ Chat ready! Type 'exit' to quit.\n\n".as_bytes())
        .await?;

    let mut turns = 0;
    let mut line = String::new();
    loop {
        output.write_all(b"You: ").await?;
        output.flush().await?;

        line.clear();
        if input.read_line(&mut line).await? == 0 {
            break;
        }
        let prompt = line.trim();
        if prompt.is_empty() {
            continue;
        }
        if EXIT_COMMANDS
            .iter()
            .any(|cmd| prompt.eq_ignore_ascii_case(cmd))
        {
            break;
        }

        let answer = client.ask(prompt).await?;
        turns += 1;
        debug!("turn {turns}: {} chars in, {} chars out", prompt.len(), answer.len());

        output
            .write_all(format!("AI: {answer}\n\n").as_bytes())
            .await?;
    }

    output.flush().await?;
    Ok(turns)
}
