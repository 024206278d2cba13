//! `crestgate view` — compose a render-ready view from files.

use anyhow::{Context, Result};
use crestgate_core::authz::ViewComposer;
use crestgate_core::config::CrestgateConfig;
use crestgate_core::resource::ResourceKind;
use crestgate_core::session::SessionClaims;
use std::path::Path;
use std::sync::Arc;

pub fn run(config: &CrestgateConfig, session: &Path, resource: &str, records: &Path) -> Result<()> {
    let registry = Arc::new(config.build_registry()?);
    let composer = ViewComposer::new(registry);

    let raw = std::fs::read_to_string(session)
        .with_context(|| format!("failed to read session file {}", session.display()))?;
    let claims: SessionClaims = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse session file {}", session.display()))?;

    let kind: ResourceKind = resource.parse()?;
    let records = super::load_records(records)?;

    // Unknown roles come out as an empty deny-all view, not an error.
    let view = composer.compose_for_claims(&claims, kind, &records);
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_view_from_files() {
        let session = write_temp(r#"{"user_id": "u-1", "role": "member", "chapter": "Beta"}"#);
        let records = write_temp(
            r#"[{"id": "d-1", "kind": "dues_record", "chapter_owner": "Beta",
                "name": "Madison Taylor", "amount": 450, "total_collected": 5175}]"#,
        );

        let config = CrestgateConfig::default();
        let result = run(&config, session.path(), "dues_record", records.path());
        assert!(result.is_ok());
    }

    #[test]
    fn test_unknown_kind_is_an_error() {
        let session = write_temp(r#"{"user_id": "u-1", "role": "member"}"#);
        let records = write_temp("[]");

        let config = CrestgateConfig::default();
        let result = run(&config, session.path(), "payment", records.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_role_still_renders() {
        let session = write_temp(r#"{"user_id": "u-1", "role": "superuser"}"#);
        let records = write_temp("[]");

        let config = CrestgateConfig::default();
        let result = run(&config, session.path(), "member", records.path());
        assert!(result.is_ok());
    }
}
