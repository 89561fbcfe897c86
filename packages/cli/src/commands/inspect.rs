use anyhow::Context;
use clap::Args;
use pagecraft_editor::Page;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Page file to inspect
    pub page: PathBuf,
}

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.page)
        .with_context(|| format!("reading {}", args.page.display()))?;
    let mut page: Page = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", args.page.display()))?;
    page.normalize_sync();

    let identity = match page.id {
        Some(id) => format!("page {id}"),
        None => "unsaved page".to_string(),
    };
    println!("{} — {} ({})", identity, page.name, page.slug);
    println!(
        "  homepage: {}  published: {}  blocks: {}",
        page.is_homepage,
        page.is_published,
        page.components.len()
    );

    for component in &page.components {
        let visibility = if component.is_visible { "" } else { "  [hidden]" };
        println!(
            "  {:>3}. {:<12} {:<24} id={}{}",
            component.order_index,
            component.component_type,
            component.component_name,
            component.id,
            visibility
        );
    }

    if !page.order_is_contiguous() {
        println!("  warning: order indices are not contiguous (run `pagecraft normalize`)");
    }
    Ok(())
}
