//! `crestgate roles` — print the capability matrix.

use anyhow::Result;
use crestgate_core::config::CrestgateConfig;
use crestgate_core::resource::ResourceKind;

pub fn run(config: &CrestgateConfig) -> Result<()> {
    let registry = config.build_registry()?;

    for role in registry.roles() {
        println!("{role}");
        for kind in ResourceKind::ALL {
            let cap = registry.capabilities(role, kind);
            if !cap.can_view && !cap.can_create {
                continue;
            }
            println!("  {kind:<14} {}", describe(cap));
        }
        println!();
    }
    Ok(())
}

fn describe(cap: &crestgate_core::authz::Capability) -> String {
    let mut flags = Vec::new();
    if cap.can_view {
        flags.push(if cap.can_view_all_scopes { "view(all-scopes)" } else { "view" });
    }
    if cap.can_create {
        flags.push("create");
    }
    if cap.can_edit {
        flags.push("edit");
    }
    if cap.can_approve {
        flags.push("approve");
    }
    if cap.can_delete {
        flags.push("delete");
    }
    let fields = if cap.visible_fields.is_all() {
        "all fields".to_string()
    } else {
        "restricted fields".to_string()
    };
    format!("{} [{fields}]", flags.join(", "))
}
