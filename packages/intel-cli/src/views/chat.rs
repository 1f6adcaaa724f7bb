//! Chat assistant view: converse about the selected company.

use anyhow::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};

use company_intel::{analyst_prompt, ChatProvider, ChatTurn, Role};

use crate::session::SessionState;

pub async fn run(
    state: &mut SessionState,
    chat_provider: Option<&dyn ChatProvider>,
) -> Result<()> {
    let Some(company) = state.current_company.clone() else {
        println!(
            "{}",
            "Please select a company in the Company Explorer view first.".yellow()
        );
        return Ok(());
    };

    let Some(provider) = chat_provider else {
        println!(
            "{}",
            "Chat is disabled — set GEMINI_API_KEY to enable it.".yellow()
        );
        return Ok(());
    };

    if state.chat.is_none() {
        state.chat = Some(provider.session(&analyst_prompt(&company)));
        state.chat_history.clear();
    }

    println!();
    println!(
        "{}",
        format!("Chatting about {} — empty line to go back", company.name).bright_cyan()
    );
    for turn in &state.chat_history {
        print_turn(turn);
    }

    loop {
        let question: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Ask about this company")
            .allow_empty(true)
            .interact_text()?;

        if question.trim().is_empty() {
            break;
        }

        let Some(chat) = state.chat.as_mut() else {
            break;
        };

        match chat.send(&question).await {
            Ok(reply) => {
                state.chat_history.push(ChatTurn::user(question.as_str()));
                let turn = ChatTurn::assistant(reply);
                print_turn(&turn);
                state.chat_history.push(turn);
            }
            Err(e) => {
                // The session survives a failed turn; the user can retry.
                println!("{}", format!("Error getting response: {e}").red());
            }
        }
    }

    Ok(())
}

fn print_turn(turn: &ChatTurn) {
    match turn.role {
        Role::User => println!("{} {}", "you:".bold(), turn.content),
        Role::Assistant => println!("{} {}", "assistant:".bright_green().bold(), turn.content),
    }
}
