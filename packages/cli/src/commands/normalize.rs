use anyhow::Context;
use clap::Args;
use pagecraft_editor::Page;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Page file to renumber in place
    pub page: PathBuf,
}

pub fn run(args: NormalizeArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.page)
        .with_context(|| format!("reading {}", args.page.display()))?;
    let mut page: Page = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", args.page.display()))?;
    page.normalize_sync();

    if page.order_is_contiguous() {
        println!("order indices already contiguous, nothing to do");
        return Ok(());
    }

    page.components.sort_by_key(|component| component.order_index);
    page.renumber();
    let pretty = serde_json::to_string_pretty(&page)?;
    std::fs::write(&args.page, pretty + "\n")
        .with_context(|| format!("writing {}", args.page.display()))?;
    println!(
        "renumbered {} blocks in {}",
        page.components.len(),
        args.page.display()
    );
    Ok(())
}
