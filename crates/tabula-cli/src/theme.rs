use console::{style, StyledObject};

/// Prints a section heading followed by a blank line.
pub(crate) fn heading(title: &str) {
    println!();
    println!("  {}", style(title).cyan().bold().underlined());
    println!();
}

pub(crate) fn arrow() -> StyledObject<&'static str> {
    style("→").cyan()
}

pub(crate) fn check() -> StyledObject<&'static str> {
    style("✓").green().bold()
}

pub(crate) fn warning() -> StyledObject<&'static str> {
    style("!").yellow().bold()
}
