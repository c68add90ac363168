//! Chat command handler

use anyhow::Result;
use bca_client::BcaClient;
use bca_core::domain::chat::{ChatMessage, Conversation, Sender};
use bca_core::domain::session::Session;
use colored::*;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

use crate::config::Config;

/// Answer one question, or run an interactive prompt until EOF or `/quit`
pub async fn handle_chat(config: &Config, session: &Session, question: Option<String>) -> Result<()> {
    let client = config.client()?;
    let mut conversation = Conversation::new();

    if let Some(question) = question {
        exchange(&client, &mut conversation, &question).await;
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "Chatting as {} (session {}). Type /quit to leave.",
            session.display_name(),
            conversation.session_id()
        )
        .dimmed()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", format!("{}>", session.display_name()).cyan());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim() == "/quit" {
            break;
        }
        exchange(&client, &mut conversation, &line).await;
    }

    Ok(())
}

/// Sends one question and prints the reply; failures become an apology
async fn exchange(client: &BcaClient, conversation: &mut Conversation, question: &str) {
    if conversation.push_user(question).is_none() {
        return;
    }

    let reply = match client.ask(conversation.session_id(), question).await {
        Ok(answer) => conversation.push_bot(answer),
        Err(e) => {
            error!("Failed to fetch chat response: {}", e);
            conversation.push_failure()
        }
    };
    print_message(reply);
}

fn print_message(message: &ChatMessage) {
    let who = match message.sender {
        Sender::User => "You".cyan(),
        Sender::Bot => "BCA".green(),
    };
    println!(
        "{} {} {}",
        message.timestamp.format("%H:%M").to_string().dimmed(),
        who.bold(),
        message.text
    );
}
