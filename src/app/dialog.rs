use crate::core::engine::Report;
use crate::utils::error::SeeFoodError;
use std::io::{self, Write};

/// Writes a framed error box, the terminal stand-in for a modal error dialog.
pub fn show_error<W: Write>(mut out: W, error: &SeeFoodError) -> io::Result<()> {
    let message = error.user_friendly_message();
    let suggestion = format!("💡 {}", error.recovery_suggestion());
    let width = message
        .chars()
        .count()
        .max(suggestion.chars().count())
        .max(5);
    let rule = "─".repeat(width + 2);

    writeln!(out, "┌{}┐", rule)?;
    writeln!(out, "│ {:<width$} │", "Error", width = width)?;
    writeln!(out, "├{}┤", rule)?;
    writeln!(out, "│ {:<width$} │", message, width = width)?;
    writeln!(out, "│ {:<width$} │", suggestion, width = width)?;
    writeln!(out, "└{}┘", rule)?;
    out.flush()
}

/// Prints the verdict and where the annotated image went.
pub fn show_report<W: Write>(mut out: W, report: &Report) -> io::Result<()> {
    let marker = if report.verdict.is_hot_dog() { "🌭" } else { "❌" };
    writeln!(out, "{} {}", marker, report.verdict)?;
    writeln!(out, "📁 Annotated image saved to: {}", report.output_path.display())?;
    Ok(())
}
