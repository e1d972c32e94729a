use std::fmt;

use colored::Colorize;

/// Prints a multi-line report block to stdout unstyled.
pub fn report(message: impl fmt::Display) {
    println!("{}", message);
}

pub fn info(message: impl fmt::Display) {
    println!("{}", message);
}

pub fn success(message: impl fmt::Display) {
    println!("{}", message.to_string().green());
}

pub fn warning(message: impl fmt::Display) {
    eprintln!("{}", message.to_string().yellow());
}

pub fn error(message: impl fmt::Display) {
    eprintln!("{}", format!("Error: {}", message).red());
}
