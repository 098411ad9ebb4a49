use std::process::Command;

use anyhow::{Context, Result};

const CRATE: &str = "keystone-common";

/// Each tier must build on its own; `platform` pulls in the others.
const FEATURE_COMBINATIONS: &[&[&str]] = &[
    &[], // default
    &["foundation"],
    &["observability"],
    &["platform"],
];

/// Check that every feature tier of the common crate compiles.
pub fn test_feature_matrix() -> Result<()> {
    println!("Testing {} {CRATE} feature combinations...", FEATURE_COMBINATIONS.len());

    for (index, features) in FEATURE_COMBINATIONS.iter().enumerate() {
        let joined = features.join(",");
        let label = if features.is_empty() { "default" } else { joined.as_str() };

        println!(
            "\n[{}/{}] cargo check -p {CRATE} --no-default-features{}",
            index + 1,
            FEATURE_COMBINATIONS.len(),
            if features.is_empty() { String::new() } else { format!(" --features {joined}") }
        );

        let mut command = Command::new("cargo");
        command.args(["check", "-p", CRATE, "--no-default-features"]);
        if !features.is_empty() {
            command.arg("--features").arg(&joined);
        }

        let status =
            command.status().with_context(|| format!("Failed to run cargo check for '{label}'"))?;

        if !status.success() {
            anyhow::bail!("Feature combination '{label}' failed to compile");
        }

        println!("✅ Features '{label}' compiled successfully");
    }

    println!("\n✅ All {} feature combinations compile successfully!", FEATURE_COMBINATIONS.len());

    Ok(())
}
