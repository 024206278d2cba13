//! `crestgate demo` — run the sample sessions over the demo dataset.

use anyhow::Result;
use crestgate_core::authz::ViewComposer;
use crestgate_core::config::CrestgateConfig;
use crestgate_core::resource::ResourceKind;
use crestgate_core::sample;
use std::sync::Arc;

pub fn run(config: &CrestgateConfig) -> Result<()> {
    let registry = Arc::new(config.build_registry()?);
    let composer = ViewComposer::new(registry);
    let dataset = sample::dataset();

    for session in sample::sessions() {
        let affiliation = match (&session.chapter, &session.region) {
            (Some(chapter), _) => format!("chapter {chapter}"),
            (None, Some(region)) => format!("region {region}"),
            (None, None) => "organization-wide".to_string(),
        };
        println!("{} ({affiliation})", session.role);

        for kind in ResourceKind::ALL {
            let page: Vec<_> = dataset.iter().filter(|r| r.kind == kind).cloned().collect();
            let total = page.len();
            let view = composer.compose(&session, kind, &page);
            if view.items.is_empty() && !view.actions.can_create {
                continue;
            }

            let mut actions = Vec::new();
            if view.actions.can_create {
                actions.push("create");
            }
            if view.actions.can_edit {
                actions.push("edit");
            }
            if view.actions.can_approve {
                actions.push("approve");
            }
            if view.actions.can_delete {
                actions.push("delete");
            }

            println!(
                "  {:<14} {}/{} records visible{}",
                kind.to_string(),
                view.items.len(),
                total,
                if actions.is_empty() {
                    String::new()
                } else {
                    format!("  [{}]", actions.join(", "))
                }
            );
        }
        println!();
    }
    Ok(())
}
