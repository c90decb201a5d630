use std::process::Command;

use anyhow::{Context, Result};

use crate::PACKAGE;

/// Feature tiers of the cache crate; each must build without the others
const FEATURE_COMBINATIONS: &[&[&str]] = &[
    &[], // default: empty crate
    &["foundation"],
    &["observability"],
    &["runtime"],
    &["runtime", "observability"],
    &["test-utils"],
];

/// Check that every feature tier compiles, tests and benches included.
pub fn test_feature_matrix() -> Result<()> {
    println!("Testing {} {PACKAGE} feature combinations...", FEATURE_COMBINATIONS.len());

    for (index, features) in FEATURE_COMBINATIONS.iter().enumerate() {
        let joined = features.join(",");
        let label = if features.is_empty() { "default" } else { joined.as_str() };

        println!(
            "\n[{}/{}] cargo check -p {PACKAGE} --features '{label}'",
            index + 1,
            FEATURE_COMBINATIONS.len()
        );

        let mut command = Command::new("cargo");
        command.args(["check", "-p", PACKAGE, "--all-targets", "--no-default-features"]);
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
