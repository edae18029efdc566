use colored::Colorize;
use std::fmt;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
        MessageKind::Info => format!("INFO: {text}"),
        MessageKind::Success => format!("SUCCESS: {text}").green().to_string(),
        MessageKind::Warning => format!("WARNING: {text}").yellow().to_string(),
        MessageKind::Error => format!("ERROR: {text}").red().to_string(),
    }
}

/// Warnings and errors go to stderr so stdout stays pipeable JSON.
pub fn emit(kind: MessageKind, message: impl fmt::Display) {
    let line = apply_style(kind, message);
    match kind {
        MessageKind::Warning | MessageKind::Error => eprintln!("{line}"),
        _ => println!("{line}"),
    }
}

pub fn info(message: impl fmt::Display) {
    emit(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    emit(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    emit(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    emit(MessageKind::Error, message);
}

pub fn section(message: impl fmt::Display) {
    emit(MessageKind::Section, message);
}
