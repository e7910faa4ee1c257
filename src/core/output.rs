//! Terminal formatting shared by the CLI commands.
//!
//! Errors are red, headers white, secondary details bright black, links blue.
//! [`repository_line`] and [`code_line_row`] return plain `String`s so they can be
//! asserted on in tests with colors disabled.

use crate::core::repository::{CodeLinePoint, Repository};
use colored::*;

pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

/// One summary line: name, branch, comparison against base, or the failure
pub fn repository_line(repo: &Repository) -> String {
    if let Some(error) = &repo.error_message {
        return format!("{} {} {}", "✕".red(), repo.name.white(), error.red());
    }

    let branch = repo.current_branch.as_deref().unwrap_or("-none-");
    let mut line = format!("{} {} {}", "•".bright_black(), repo.name.white(), branch.blue());

    match (repo.base_ref.as_deref(), repo.compare_ref()) {
        (Some(base), Some(head)) if base != head => {
            line.push_str(&format!(
                " {} {}{}{}",
                format!("{head} → {base}").bright_black(),
                "(+".bright_black(),
                repo.ahead_count().to_string().white(),
                ")".bright_black()
            ));
        }
        (None, _) => line.push_str(&format!(" {}", "(no main/master)".bright_black())),
        _ => {}
    }

    line
}

pub fn code_line_row(point: &CodeLinePoint) -> String {
    let delta = if point.delta > 0 {
        format!("+{}", point.delta).green()
    } else if point.delta < 0 {
        point.delta.to_string().red()
    } else {
        "0".bright_black()
    };
    format!(
        "{} {} {:>8} {:>7}  {}",
        point.short_hash.bright_black(),
        point.timestamp.format("%Y-%m-%d"),
        point.total_lines,
        delta,
        point.subject
    )
}
