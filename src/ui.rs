use colored::Colorize;

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning message
pub fn warn(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Category description and advice for the first neutron error in `err`'s chain.
pub fn neutron_advice(err: &anyhow::Error) -> Option<(&'static str, &'static str)> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<neutronkit::Error>())
        .map(|e| {
            let category = e.category();
            (category.description(), category.advice())
        })
}

/// Print what kind of failure `err` is and how to fix it, when known.
pub fn error_advice(err: &anyhow::Error) {
    if let Some((description, advice)) = neutron_advice(err) {
        error(description);
        eprintln!("  {}", advice.dimmed());
    }
}

/// Print a dim/muted message
pub fn dim(msg: &str) {
    println!("  {}", msg.dimmed());
}

/// Print a header/title
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

/// Pad `value` to `width` display columns, truncating with "…" when longer.
pub fn fit(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len <= width {
        format!("{value}{}", " ".repeat(width - len))
    } else if width == 0 {
        String::new()
    } else {
        let kept: String = value.chars().take(width - 1).collect();
        format!("{kept}…")
    }
}
