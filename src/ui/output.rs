//! Status line writers.
//!
//! Every writer takes the destination and theme explicitly so the shell can
//! render into any `Write` (a terminal, or a buffer under test).

use crate::student::StudentRecord;
use crate::ui::{Icons, Theme};
use owo_colors::OwoColorize;
use std::io::{self, Write};

pub fn success(out: &mut impl Write, theme: &Theme, label: &str) -> io::Result<()> {
    writeln!(out, "{} {}", Icons::CHECK, label.style(theme.success.clone()))
}

pub fn error(out: &mut impl Write, theme: &Theme, label: &str) -> io::Result<()> {
    writeln!(out, "{} {}", Icons::CROSS, label.style(theme.error.clone()))
}

pub fn warn(out: &mut impl Write, theme: &Theme, label: &str) -> io::Result<()> {
    writeln!(out, "{} {}", Icons::WARN, label.style(theme.warn.clone()))
}

pub fn info(out: &mut impl Write, theme: &Theme, label: &str, value: &str) -> io::Result<()> {
    writeln!(
        out,
        "{} {}: {}",
        Icons::INFO.style(theme.info.clone()),
        label.style(theme.field.clone()),
        value
    )
}

/// Section title, e.g. `--- All Students ---`
pub fn heading(out: &mut impl Write, theme: &Theme, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", format!("--- {} ---", title).style(theme.title.clone()))
}

pub fn record_line(out: &mut impl Write, theme: &Theme, record: &StudentRecord) -> io::Result<()> {
    writeln!(
        out,
        "{} {} {} {} {} {}",
        "ID:".style(theme.field.clone()),
        record.id,
        "| Name:".style(theme.field.clone()),
        record.name,
        "| Age:".style(theme.field.clone()),
        record.age
    )
}
