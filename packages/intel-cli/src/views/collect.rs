//! Data collection view: run the pipeline, pick saved datasets.

use anyhow::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::session::SessionState;
use crate::AppPipeline;

pub async fn run(
    pipeline: &AppPipeline,
    state: &mut SessionState,
    page_limit: u32,
) -> Result<()> {
    let options = vec![
        "🔍 Start data collection",
        "📂 Load a saved dataset",
        "↩️  Back",
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Collect company data")
        .items(&options)
        .default(0)
        .interact()?;

    match selection {
        0 => collect(pipeline, state, page_limit).await,
        1 => load(pipeline, state),
        _ => Ok(()),
    }
}

async fn collect(
    pipeline: &AppPipeline,
    state: &mut SessionState,
    page_limit: u32,
) -> Result<()> {
    let query: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Search query (e.g. 'IT Software', 'Banking Jakarta')")
        .interact_text()?;

    if query.trim().is_empty() {
        println!("{}", "Nothing to search for.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        "Collecting company data... this may take several minutes".yellow()
    );

    match pipeline.run(&query, page_limit).await {
        Ok(dataset) => {
            state.current_dataset = Some(dataset.clone());
            println!(
                "{}",
                format!("✅ Data collection completed! Saved dataset '{dataset}'").bright_green()
            );
        }
        Err(e) => {
            println!("{}", format!("❌ Data collection failed: {e}").red());
        }
    }

    Ok(())
}

fn load(pipeline: &AppPipeline, state: &mut SessionState) -> Result<()> {
    let datasets = pipeline.store().list()?;
    if datasets.is_empty() {
        println!(
            "{}",
            "No saved datasets found. Run data collection to create one.".yellow()
        );
        return Ok(());
    }

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select a dataset to load")
        .items(&datasets)
        .default(0)
        .interact()?;

    let dataset = datasets[selection].clone();
    println!("{}", format!("Loaded dataset: {dataset}").bright_green());
    state.current_dataset = Some(dataset);

    Ok(())
}
