use anyhow::Context;
use clap::Args;
use pagecraft_schema::SchemaInference;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct InferArgs {
    /// Content sample (JSON file) to infer a schema from
    pub content: PathBuf,
}

pub fn run(args: InferArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.content)
        .with_context(|| format!("reading {}", args.content.display()))?;
    let sample: Value = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", args.content.display()))?;

    let schema = SchemaInference::default().infer(&sample);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
