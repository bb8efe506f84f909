//! Edit notification decoding.
//!
//! The caller sends one JSON object on stdin describing the tool call that
//! just modified a file. Only the edited path and the working directory are
//! read; everything else in the payload is ignored.

use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A decoded edit notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditEvent {
    /// Path of the edited file as reported by the caller. Empty when absent.
    pub file_path: String,

    /// Directory relative paths are resolved against.
    pub working_directory: PathBuf,

    /// Name of the tool that performed the edit, if reported.
    pub tool_name: Option<String>,
}

/// Raw notification payload (subset of fields we need).
#[derive(Debug, Default, Deserialize)]
struct HookPayload {
    #[serde(default)]
    tool_name: Option<String>,
    #[serde(default)]
    tool_input: Option<ToolInput>,
    #[serde(default)]
    file_path: Option<String>,
    #[serde(default)]
    cwd: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ToolInput {
    #[serde(default)]
    file_path: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    notebook_path: Option<String>,
}

impl HookPayload {
    fn edited_path(self) -> Option<String> {
        let from_input = self
            .tool_input
            .and_then(|input| input.file_path.or(input.path).or(input.notebook_path));
        from_input.or(self.file_path)
    }
}

impl EditEvent {
    /// An event with no target; the pipeline treats it as nothing to do.
    pub fn empty(working_directory: &Path) -> Self {
        Self {
            file_path: String::new(),
            working_directory: working_directory.to_path_buf(),
            tool_name: None,
        }
    }

    /// Strictly parse a notification.
    ///
    /// `default_cwd` is used when the payload carries no (or an empty) `cwd`.
    pub fn parse(raw: &str, default_cwd: &Path) -> Result<Self> {
        let payload: HookPayload = serde_json::from_str(raw)?;

        let working_directory = match payload.cwd.as_deref() {
            Some(cwd) if !cwd.is_empty() => PathBuf::from(cwd),
            _ => default_cwd.to_path_buf(),
        };
        let tool_name = payload.tool_name.clone();
        let file_path = payload.edited_path().unwrap_or_default();

        Ok(Self {
            file_path,
            working_directory,
            tool_name,
        })
    }

    /// Decode a notification, degrading any parse failure to an empty event.
    pub fn decode(raw: &str, default_cwd: &Path) -> Self {
        match Self::parse(raw, default_cwd) {
            Ok(event) => event,
            Err(e) => {
                debug!(error = %e, "Ignoring undecodable edit notification");
                Self::empty(default_cwd)
            }
        }
    }

    /// Whether the event names a file at all.
    pub fn has_target(&self) -> bool {
        !self.file_path.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cwd() -> PathBuf {
        PathBuf::from("/work")
    }

    #[test]
    fn decodes_tool_input_file_path() {
        let json = r#"{"session_id":"abc","tool_name":"Edit","tool_input":{"file_path":"/repo/src/app.py","old_string":"a","new_string":"b"},"cwd":"/repo"}"#;
        let event = EditEvent::decode(json, &cwd());
        assert_eq!(event.file_path, "/repo/src/app.py");
        assert_eq!(event.working_directory, PathBuf::from("/repo"));
        assert_eq!(event.tool_name.as_deref(), Some("Edit"));
        assert!(event.has_target());
    }

    #[test]
    fn falls_back_to_alternate_path_fields() {
        let json = r#"{"tool_input":{"notebook_path":"nb.ipynb"}}"#;
        assert_eq!(EditEvent::decode(json, &cwd()).file_path, "nb.ipynb");

        let json = r#"{"tool_input":{"path":"lib/x.ts"}}"#;
        assert_eq!(EditEvent::decode(json, &cwd()).file_path, "lib/x.ts");

        let json = r#"{"file_path":"top.js"}"#;
        assert_eq!(EditEvent::decode(json, &cwd()).file_path, "top.js");
    }

    #[test]
    fn missing_cwd_uses_default() {
        let json = r#"{"tool_input":{"file_path":"a.py"},"cwd":""}"#;
        let event = EditEvent::decode(json, &cwd());
        assert_eq!(event.working_directory, cwd());
    }

    #[test]
    fn missing_fields_yield_empty_path() {
        let event = EditEvent::decode("{}", &cwd());
        assert!(event.file_path.is_empty());
        assert!(!event.has_target());
    }

    #[test]
    fn malformed_json_yields_empty_event() {
        let event = EditEvent::decode("not json at all", &cwd());
        assert_eq!(event, EditEvent::empty(&cwd()));
    }

    #[test]
    fn wrong_field_type_yields_empty_event() {
        let event = EditEvent::decode(r#"{"tool_input":{"file_path":42}}"#, &cwd());
        assert!(!event.has_target());
    }

    #[test]
    fn strict_parse_reports_errors() {
        assert!(EditEvent::parse("[", &cwd()).is_err());
    }
}
