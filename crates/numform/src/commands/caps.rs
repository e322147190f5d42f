//! `numform caps` -- resolve what a formula version may do.

use anyhow::Result;
use numform_core::capability::resolve;
use numform_core::enums::LifecycleStatus;
use numform_ui::styles::{
    render_flag, render_lifecycle, render_muted, render_severity, render_severity_icon, render_warn,
};

use crate::cli::CapsArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `numform caps` command.
pub fn run(ctx: &RuntimeContext, args: &CapsArgs) -> Result<()> {
    let status = LifecycleStatus::from(args.status.as_str());
    let caps = resolve(&status, args.locked);

    if ctx.json {
        output_json(&caps);
        return Ok(());
    }

    let locked = if args.locked { render_muted(" (locked)") } else { String::new() };
    println!("Status:   {}{locked}", render_lifecycle(&status));
    println!("Compute:  {}", render_flag(caps.can_compute));
    println!("Copy:     {}", render_flag(caps.can_copy));
    let consent = if caps.requires_consent {
        render_warn("required")
    } else {
        render_muted("not required")
    };
    println!("Consent:  {consent}");
    println!("Blocked:  {}", if caps.is_blocked { "yes" } else { "no" });
    if let Some(message) = &caps.message {
        println!(
            "{} {}",
            render_severity_icon(caps.severity),
            render_severity(caps.severity, message)
        );
    }
    Ok(())
}
