//! `boardgen families`: list supported families.

use anyhow::Result;

pub fn run() -> Result<()> {
    println!("Supported families:");
    println!();
    for rules in boardgen_family::all() {
        println!("  {:<13} {}", rules.family.as_str(), rules.description);
        let artifacts: Vec<&str> = rules.artifacts.iter().map(|a| a.file_name()).collect();
        println!("  {:<13} artifacts:   {}", "", artifacts.join(", "));
        let kinds: Vec<&str> = rules.flash_kinds.iter().map(|k| k.as_str()).collect();
        println!("  {:<13} flash kinds: {}", "", kinds.join(", "));
    }
    Ok(())
}
