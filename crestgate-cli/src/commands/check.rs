//! `crestgate check` — evaluate one action-gate decision.

use anyhow::{bail, Context, Result};
use crestgate_core::authz::{Action, ActionGate};
use crestgate_core::config::CrestgateConfig;
use crestgate_core::resource::ResourceKind;
use crestgate_core::session::{Session, SessionClaims};
use std::path::PathBuf;
use std::sync::Arc;

pub struct CheckArgs {
    pub role: String,
    pub user: String,
    pub chapter: Option<String>,
    pub region: Option<String>,
    pub action: String,
    pub resource: String,
    pub records: Option<PathBuf>,
    pub id: Option<String>,
}

pub fn run(config: &CrestgateConfig, args: CheckArgs) -> Result<()> {
    let registry = Arc::new(config.build_registry()?);
    let gate = ActionGate::new(registry);

    let mut claims = SessionClaims::new(args.user, args.role);
    claims.chapter = args.chapter;
    claims.region = args.region;
    let session = Session::try_from(claims).context("invalid session")?;

    let action: Action = args.action.parse()?;
    let kind: ResourceKind = args.resource.parse()?;

    let record = match (&args.records, &args.id) {
        (Some(path), Some(id)) => {
            let records = super::load_records(path)?;
            let record = records.into_iter().find(|r| r.id == *id);
            match record {
                Some(record) => Some(record),
                None => bail!("no record with id \"{id}\" in {}", path.display()),
            }
        }
        (None, Some(_)) => bail!("--id requires --records"),
        _ => None,
    };

    let allowed = gate.can_perform(&session, action, kind, record.as_ref());
    println!(
        "{} {} on {}: {}",
        session.role,
        action,
        kind,
        if allowed { "allowed" } else { "denied" }
    );
    Ok(())
}
