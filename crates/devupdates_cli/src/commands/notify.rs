//! Notify command implementation

use std::path::Path;

use devupdates_core::{NotificationKind, NotificationPolicy, UpdateEmail};
use miette::{IntoDiagnostic, Result};

use crate::utils::load_config;

pub fn run_notify(
    config_path: Option<&Path>,
    kind: &str,
    subject: Option<String>,
    to: &str,
) -> Result<()> {
    let config = load_config(config_path)?;
    let policy = NotificationPolicy::new(&config.notifications);

    let kind: NotificationKind = kind.parse().into_diagnostic()?;
    if !policy.should_send_email(&kind) {
        println!("Suppressed: '{}' emails are not sent", kind);
        return Ok(());
    }

    let email = policy.modify_email(UpdateEmail {
        to: to.to_string(),
        subject,
        ..UpdateEmail::default()
    });

    println!("Send: '{}' email", kind);
    let output = serde_json::to_string_pretty(&email).into_diagnostic()?;
    println!("{}", output);
    Ok(())
}
