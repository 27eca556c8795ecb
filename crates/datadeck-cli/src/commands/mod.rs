pub mod auth;
pub mod datasets;
pub mod upload;

use std::io::Write;

/// Prints `label: ` and reads one trimmed line from stdin.
pub(crate) fn prompt(label: &str) -> std::io::Result<String> {
    print!("{label}: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Asks a yes/no question; anything other than y/yes is a no.
pub(crate) fn confirm(question: &str) -> std::io::Result<bool> {
    let answer = prompt(&format!("{question} [y/N]"))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}
