//! Session inputs: section files and recorded reviewer actions

use anyhow::Context;
use std::fs;
use std::path::Path;
use tuneset_model::Section;
use tuneset_session::{Action, SessionStore};

/// Read a JSON array of sections
///
/// # Errors
/// Returns error if the file cannot be read or parsed
pub fn load_sections(path: &Path) -> anyhow::Result<Vec<Section>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read sections {}", path.display()))?;
    let sections: Vec<Section> = serde_json::from_str(&text)
        .with_context(|| format!("invalid sections file {}", path.display()))?;
    tracing::info!(path = %path.display(), sections = sections.len(), "loaded sections");
    Ok(sections)
}

/// Read a JSON array of session actions
///
/// # Errors
/// Returns error if the file cannot be read or parsed
pub fn load_actions(path: &Path) -> anyhow::Result<Vec<Action>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read actions {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid actions file {}", path.display()))
}

/// Build the session: sections from `sections` (demo seed if absent),
/// then replay `actions`
///
/// # Errors
/// Returns error if an input cannot be loaded or an action is rejected
pub fn open_session(sections: Option<&Path>, actions: Option<&Path>) -> anyhow::Result<SessionStore> {
    let mut store = match sections {
        Some(path) => SessionStore::new(load_sections(path)?),
        None => SessionStore::from_demo(),
    };
    if let Some(path) = actions {
        let actions = load_actions(path)?;
        let total = actions.len();
        let applied = store.dispatch_all(actions).with_context(|| {
            format!("while replaying actions from {}", path.display())
        })?;
        tracing::info!(applied, total, "replayed session actions");
    }
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn demo_when_no_sections_file() {
        let store = open_session(None, None).unwrap();
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn rejected_action_names_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"action": "update_section", "id": "wash", "patch": {{"accepted": true}}}}]"#
        )
        .unwrap();

        let err = open_session(None, Some(file.path())).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("while replaying actions"));
        assert!(message.contains("cannot edit"));
    }

    #[test]
    fn malformed_sections_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();
        assert!(load_sections(file.path()).is_err());
    }
}
