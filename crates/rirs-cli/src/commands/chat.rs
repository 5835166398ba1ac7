//! Chat command - send a message or a web search through the gateway.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::io::{self, BufRead};
use std::time::Duration;

use crate::output::{self, CommandResult, OutputFormat};
use rirs_sdk::{ChatClient, ChatRequest, Error, ProviderKind};

/// Arguments for the chat command.
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Text to send (if not provided, reads from stdin)
    pub text: Option<String>,

    /// Send the text to the web-search provider instead of text generation
    #[arg(short, long)]
    pub web: bool,

    /// Provider tag (gemini, deepseek, brave)
    #[arg(short, long, conflicts_with = "web")]
    pub provider: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "90")]
    pub timeout: u64,
}

/// Chat response for output.
#[derive(Debug, Serialize)]
pub struct ChatOutput {
    pub provider: String,
    pub reply: String,
}

/// Execute the chat command.
pub async fn execute(args: ChatArgs, base_url: &str, json: bool) -> Result<()> {
    let format = OutputFormat::from_json_flag(json);

    let text = match read_text(args.text.as_deref())? {
        Some(text) => text,
        None => {
            let field = if args.web { "query" } else { "message" };
            let result: CommandResult<ChatOutput> =
                CommandResult::failure(format!("No {} provided", field));
            result.print(format)?;
            return Ok(());
        }
    };

    let client = ChatClient::builder()
        .base_url(base_url)
        .timeout(Duration::from_secs(args.timeout))
        .build()?;

    let request = build_request(&text, args.web, args.provider.as_deref());
    let provider_tag = request
        .provider
        .clone()
        .unwrap_or_else(|| ProviderKind::default().as_str().to_string());

    if !matches!(format, OutputFormat::Json) {
        let spinner = output::spinner("Thinking...");
        let result = client.send(&request).await;
        spinner.finish_and_clear();

        match result {
            Ok(reply) => println!("{}", reply.reply),
            Err(e) => output::error(&error_text(&e)),
        }
    } else {
        match client.send(&request).await {
            Ok(reply) => {
                let result = CommandResult::success(ChatOutput {
                    provider: provider_tag,
                    reply: reply.reply,
                });
                result.print(format)?;
            }
            Err(e) => {
                let result: CommandResult<ChatOutput> = CommandResult::failure(error_text(&e));
                result.print(format)?;
            }
        }
    }

    Ok(())
}

/// Get the text from the argument or stdin.
fn read_text(arg: Option<&str>) -> Result<Option<String>> {
    let text = match arg {
        Some(text) => text.trim().to_string(),
        None => {
            let mut input = String::new();
            io::stdin().lock().read_line(&mut input)?;
            input.trim().to_string()
        }
    };
    Ok((!text.is_empty()).then_some(text))
}

/// Shape the wire request from the search toggle and the provider tag.
///
/// `--web` puts the text in `query` and pins the request to the search
/// provider, the same shape the browser UI sends when its toggle is on.
/// A tag that resolves to the search provider gets the same treatment;
/// any other tag is forwarded untouched so the gateway stays the single
/// validator.
fn build_request(text: &str, web: bool, provider: Option<&str>) -> ChatRequest {
    if web {
        return ChatRequest::with_query(text).provider(ProviderKind::Brave);
    }

    match provider {
        Some(tag) if matches!(tag.parse::<ProviderKind>(), Ok(ProviderKind::Brave)) => {
            ChatRequest::with_query(text).provider(ProviderKind::Brave)
        }
        Some(tag) => {
            let mut request = ChatRequest::with_message(text);
            request.provider = Some(tag.to_string());
            request
        }
        None => ChatRequest::with_message(text),
    }
}

/// The line shown when a request fails.
///
/// A gateway envelope message is shown bare, the way the browser UI
/// surfaces it; transport failures fall back to the SDK error text.
fn error_text(err: &Error) -> String {
    match err.api_message() {
        Some(message) => message.to_string(),
        None => err.to_string(),
    }
}
