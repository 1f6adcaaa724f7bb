//! Company explorer view: inspect a record, re-fetch its website
//! content, hand off to the chat assistant.

use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Select};

use company_intel::{
    analyst_prompt, ChatProvider, CompanyRecord, ContentExtractor, ExtractError,
};

use crate::session::SessionState;
use crate::AppPipeline;

/// Timeout for the interactive single-record extraction, deliberately
/// longer than the batch pipeline's.
const RESCRAPE_TIMEOUT: Duration = Duration::from_secs(60);

/// Description preview length in the detail display.
const DESCRIPTION_PREVIEW: usize = 1000;

pub async fn run(
    pipeline: &AppPipeline,
    state: &mut SessionState,
    chat_provider: Option<&dyn ChatProvider>,
) -> Result<()> {
    let Some(dataset) = state.current_dataset.clone() else {
        println!(
            "{}",
            "Please select or collect a dataset first in the Data Collection view.".yellow()
        );
        return Ok(());
    };

    let mut companies = pipeline.store().load(&dataset);
    if companies.is_empty() {
        println!(
            "{}",
            "Selected dataset is empty or could not be loaded.".yellow()
        );
        return Ok(());
    }

    let names: Vec<String> = companies.iter().map(|c| c.name.clone()).collect();
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Companies in dataset '{dataset}'"))
        .items(&names)
        .default(0)
        .interact()?;

    if state
        .current_company
        .as_ref()
        .is_none_or(|c| c.name != companies[index].name)
    {
        // Selection changed: any open chat is about the wrong company.
        state.reset_chat();
    }
    state.current_company = Some(companies[index].clone());
    print_company(&companies[index]);

    let mut options = vec!["↩️  Back"];
    if companies[index].has_website() {
        options.insert(0, "🔍 Find more information on the company website");
    }
    if companies[index].has_description() {
        options.insert(options.len() - 1, "💬 Chat about this company");
    }

    let action = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Actions")
        .items(&options)
        .default(0)
        .interact()?;

    match options[action] {
        "🔍 Find more information on the company website" => {
            rescrape(pipeline, state, &dataset, &mut companies, index).await?;
        }
        "💬 Chat about this company" => {
            start_chat(state, chat_provider, &companies[index]);
        }
        _ => {}
    }

    Ok(())
}

fn print_company(company: &CompanyRecord) {
    println!();
    println!("{}", format!("### {}", company.name).bright_cyan().bold());
    println!(
        "{} {} {}",
        "Address:".bold(),
        company.street_address.as_deref().unwrap_or(""),
        company.postal_code.as_deref().unwrap_or(""),
    );
    println!(
        "{} {}",
        "Phone:".bold(),
        company.phone.as_deref().unwrap_or("N/A")
    );
    println!(
        "{} {}",
        "Country:".bold(),
        company.country.as_deref().unwrap_or("N/A")
    );
    println!(
        "{} {}",
        "Website:".bold(),
        company.website.as_deref().filter(|w| !w.is_empty()).unwrap_or("N/A")
    );

    match company.description.as_deref() {
        Some(description) if !description.is_empty() => {
            println!();
            println!("{}", "Company description (from website):".bold());
            if description.len() > DESCRIPTION_PREVIEW {
                let cut = description
                    .char_indices()
                    .map(|(i, _)| i)
                    .take_while(|&i| i <= DESCRIPTION_PREVIEW)
                    .last()
                    .unwrap_or(0);
                println!("{}...", &description[..cut]);
            } else {
                println!("{description}");
            }
        }
        _ if company.has_website() => {
            println!();
            println!(
                "{}",
                "No website content has been retrieved yet. Use 'Find more information' to obtain it.".yellow()
            );
        }
        _ => {
            println!();
            println!("{}", "⚠️  This company doesn't have a website listed.".yellow());
        }
    }
    println!();
}

/// Re-run content extraction for one company and rewrite the dataset.
///
/// Failures are classified for the user: a timeout, an unreachable
/// extraction service, and everything else each get their own message.
async fn rescrape(
    pipeline: &AppPipeline,
    state: &mut SessionState,
    dataset: &str,
    companies: &mut [CompanyRecord],
    index: usize,
) -> Result<()> {
    let Some(website) = companies[index].website.clone().filter(|w| !w.is_empty()) else {
        return Ok(());
    };

    println!(
        "{}",
        format!("Finding more information from {website}...").yellow()
    );

    match pipeline
        .extractor()
        .extract_text_with_timeout(&website, RESCRAPE_TIMEOUT)
        .await
    {
        Ok(text) if text.trim().is_empty() => {
            println!(
                "{}",
                "⛔ No relevant information could be extracted from the website. It might have special formatting or anti-scraping measures.".red()
            );
        }
        Ok(text) => {
            companies[index].description = Some(text.clone());
            if let Some(current) = state.current_company.as_mut() {
                current.description = Some(text);
            }
            pipeline.store().save(companies, Some(dataset))?;
            println!(
                "{}",
                "✅ Successfully gathered more information from the website!".bright_green()
            );
        }
        Err(ExtractError::Timeout { .. }) => {
            println!(
                "{}",
                "⏱️  Request to the extraction service timed out. The website might be slow or unresponsive.".red()
            );
        }
        Err(ExtractError::Connection(_)) => {
            println!(
                "{}",
                "🔌 Connection to the extraction service failed. Please check that it is running.".red()
            );
        }
        Err(e) => {
            println!("{}", format!("❌ An error occurred: {e}").red());
        }
    }

    Ok(())
}

fn start_chat(
    state: &mut SessionState,
    chat_provider: Option<&dyn ChatProvider>,
    company: &CompanyRecord,
) {
    let Some(provider) = chat_provider else {
        println!(
            "{}",
            "Chat is disabled — set GEMINI_API_KEY to enable it.".yellow()
        );
        return;
    };

    state.chat = Some(provider.session(&analyst_prompt(company)));
    state.chat_history.clear();
    println!(
        "{}",
        "Chat initialized! Open the Chat Assistant view to ask questions.".bright_green()
    );
}
