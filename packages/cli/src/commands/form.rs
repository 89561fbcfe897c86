use anyhow::Context;
use clap::Args;
use pagecraft_form::{render, Widget};
use pagecraft_schema::{ComponentSchema, SchemaInference};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct FormArgs {
    /// Content value (JSON file) to render a form for
    pub content: PathBuf,

    /// Declared schema (JSON file); inferred from the content when absent
    #[arg(short, long)]
    pub schema: Option<PathBuf>,
}

pub fn run(args: FormArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.content)
        .with_context(|| format!("reading {}", args.content.display()))?;
    let content: Value = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", args.content.display()))?;

    let schema: ComponentSchema = match &args.schema {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
        }
        None => SchemaInference::default().infer(&content),
    };

    let form = render(&schema, &content);
    for widget in &form.widgets {
        print_widget(widget, 0);
    }
    Ok(())
}

fn print_widget(widget: &Widget, depth: usize) {
    let indent = "  ".repeat(depth);
    match widget {
        Widget::Text {
            label,
            value,
            numeric,
            ..
        } => {
            let flavor = if *numeric { "number" } else { "text" };
            println!("{indent}{label} [{flavor}] = {value:?}");
        }
        Widget::Textarea { label, value, .. } => {
            println!("{indent}{label} [textarea] = {value:?}");
        }
        Widget::Select {
            label,
            value,
            options,
            ..
        } => {
            println!("{indent}{label} [select {options:?}] = {value:?}");
        }
        Widget::Media { label, url, .. } => {
            println!("{indent}{label} [media] = {url:?}");
        }
        Widget::TagList { label, tags, .. } => {
            println!("{indent}{label} [tags] = {tags:?}");
        }
        Widget::Group {
            label, children, ..
        } => {
            println!("{indent}{label}:");
            for child in children {
                print_widget(child, depth + 1);
            }
        }
        Widget::List {
            label, children, ..
        } => {
            println!("{indent}{label} ({} items):", children.len());
            for child in children {
                print_widget(child, depth + 1);
            }
        }
        Widget::Unconfigured { label, reason, .. } => {
            println!("{indent}{label} [unconfigured: {reason}]");
        }
    }
}
