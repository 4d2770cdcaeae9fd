//! Output mode selection and the machine-readable envelope

use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Human,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Human }
    }

    pub fn is_human(self) -> bool {
        self == Self::Human
    }
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    ok: bool,
    command: &'a str,
    data: T,
}

/// Write `{"ok":true,"command":...,"data":...}` followed by a newline
pub fn write_success<W: Write, T: Serialize>(out: &mut W, command: &str, data: T) -> anyhow::Result<()> {
    let envelope = Envelope {
        ok: true,
        command,
        data,
    };
    serde_json::to_writer(&mut *out, &envelope)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let mut buf = Vec::new();
        write_success(&mut buf, "delete", serde_json::json!({"deleted": 2})).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(value, serde_json::json!({"ok": true, "command": "delete", "data": {"deleted": 2}}));
    }

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(OutputMode::from_json_flag(true), OutputMode::Json);
        assert!(OutputMode::from_json_flag(false).is_human());
    }
}
