//! Terminal output formatting for repository listings.

use comfy_table::{Attribute, Cell, Table};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::browser::BrowserState;
use crate::models::Repository;

/// Check if stdout is a terminal.
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// Build a table of repositories for terminal display.
pub fn repo_table(repos: &[Repository]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec![
        Cell::new("Name").add_attribute(Attribute::Bold),
        Cell::new("Description").add_attribute(Attribute::Bold),
        Cell::new("Language").add_attribute(Attribute::Bold),
        Cell::new("Stars").add_attribute(Attribute::Bold),
        Cell::new("Forks").add_attribute(Attribute::Bold),
    ]);

    for repo in repos {
        table.add_row(vec![
            repo.name.clone(),
            truncate(repo.description.as_deref().unwrap_or("-"), 50),
            repo.language.clone().unwrap_or_else(|| "-".to_string()),
            repo.stargazers_count.to_string(),
            repo.forks_count.to_string(),
        ]);
    }

    table
}

/// Print the detail view for a single repository.
pub fn print_repo_detail(repo: &Repository) {
    println!("{}", repo.full_name().bold());
    if let Some(description) = &repo.description {
        println!("  {}", description);
    }
    println!(
        "  {} {}   {} {}",
        "★".yellow(),
        repo.stargazers_count,
        "⑂".cyan(),
        repo.forks_count
    );
    if let Some(language) = &repo.language {
        println!("  language: {}", language);
    }
    if let Some(url) = &repo.html_url {
        println!("  {}", url.dimmed());
    }
}

/// Print a one-line summary of the current browser state.
pub fn print_state(state: &BrowserState) {
    match state {
        BrowserState::Idle => println!("{} no search issued", "○".dimmed()),
        BrowserState::Loading => println!("{} loading...", "◐".cyan()),
        BrowserState::Success {
            repos,
            is_fetching_more,
        } => {
            if *is_fetching_more {
                println!(
                    "{} {} repositories (fetching more...)",
                    "◐".cyan(),
                    repos.len()
                );
            } else {
                println!("{} {} repositories", "✓".green().bold(), repos.len());
            }
        }
        BrowserState::Error { message } => {
            println!("{} {}", "✗".red().bold(), message);
        }
    }
}
