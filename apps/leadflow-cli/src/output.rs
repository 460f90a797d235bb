//! Output formatting utilities

use colored::Colorize;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print a key-value pair
pub fn key_value(key: &str, value: &str) {
    println!("{}: {}", key.bold(), value);
}
