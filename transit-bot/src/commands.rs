//! Gateway-facing command handlers. This is the last line of defense: any
//! error escaping the pipeline is logged here and replaced by a fixed
//! apology reply.

use std::sync::Arc;

use teloxide::{prelude::*, types::InputFile, utils::command::BotCommands};
use tracing::error;
use transit_core::RequestPipeline;

use crate::{stats::SharedStats, status};

const ERROR_REPLY: &str = "An error occurred. Please try again.";
const STATUS_ERROR_REPLY: &str = "Could not generate status report. Please try again.";

/// These commands are supported:
#[derive(Clone, BotCommands)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    /// Greet the bot.
    Hello,
    /// Get optimal route based on weather conditions.
    Route(String),
    /// Display bot status dashboard.
    Status,
}

/// Run the gateway dispatcher until shutdown.
pub async fn dispatch(
    bot: Bot,
    pipeline: Arc<RequestPipeline>,
    stats: SharedStats,
    home_city: String,
) {
    let handler = Update::filter_message()
        .filter_command::<Command>()
        .endpoint(handle_command);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![pipeline, stats, home_city])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    pipeline: Arc<RequestPipeline>,
    stats: SharedStats,
    home_city: String,
) -> ResponseResult<()> {
    stats.record_command(msg.from().map(|user| user.id.0));

    match cmd {
        Command::Hello => {
            let name = msg
                .from()
                .map(|user| user.first_name.clone())
                .unwrap_or_else(|| "there".to_string());
            bot.send_message(msg.chat.id, format!("Hello {name}!")).await?;
        }
        Command::Route(query) => {
            let reply = match pipeline.handle(&query, &home_city).await {
                Ok(reply) => reply,
                Err(err) => {
                    error!("route command failed: {:#}", err);
                    ERROR_REPLY.to_string()
                }
            };
            bot.send_message(msg.chat.id, reply).await?;
        }
        Command::Status => match status::render_status_file(stats.snapshot()) {
            Ok(path) => {
                bot.send_document(msg.chat.id, InputFile::file(path)).await?;
            }
            Err(err) => {
                error!("status command failed: {:#}", err);
                bot.send_message(msg.chat.id, STATUS_ERROR_REPLY).await?;
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_from_gateway_text() {
        let cmd = Command::parse("/route How do I get to the airport?", "transit_bot").unwrap();
        assert!(matches!(cmd, Command::Route(query) if query == "How do I get to the airport?"));

        assert!(matches!(
            Command::parse("/status", "transit_bot").unwrap(),
            Command::Status
        ));
        assert!(Command::parse("/unknown", "transit_bot").is_err());
    }
}
