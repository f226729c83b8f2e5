use std::path::PathBuf;

use serde::Serialize;
use snipgraph_bytecode::{Container, GraphVariants, dump};
use snipgraph_core::Colors;

use super::{CliError, finish};

pub struct DumpArgs {
    pub container: PathBuf,
    pub color: bool,
    pub json: bool,
}

#[derive(Serialize)]
struct Summary<'a> {
    objects: usize,
    unresolved: usize,
    blob_size: usize,
    node_classes: Vec<&'static str>,
    snippet_types: Vec<&'a str>,
    graphs: Vec<GraphSummary<'a>>,
}

#[derive(Serialize)]
struct GraphSummary<'a> {
    key: &'a str,
    original: Option<&'a str>,
    parameters: usize,
    variants: Vec<VariantSummary<'a>>,
}

#[derive(Serialize)]
struct VariantSummary<'a> {
    receiver: Option<&'a str>,
    offset: u32,
}

pub fn run(args: DumpArgs) {
    finish(render(&args));
}

pub(crate) fn render(args: &DumpArgs) -> Result<String, CliError> {
    let container = Container::from_path(&args.container)?;
    tracing::debug!(path = %args.container.display(), "loaded container");
    if args.json {
        let mut out = serde_json::to_string_pretty(&summarize(&container))?;
        out.push('\n');
        return Ok(out);
    }
    Ok(dump(&container, Colors::new(args.color)))
}

fn summarize(container: &Container) -> Summary<'_> {
    let objects = container.objects();
    let graphs = container
        .graphs()
        .iter()
        .map(|(key, data)| GraphSummary {
            key: key.as_str(),
            original: data.original.as_ref().map(|k| k.as_str()),
            parameters: data.parameters.len(),
            variants: match &data.variants {
                GraphVariants::Static { offset } => vec![VariantSummary {
                    receiver: None,
                    offset: *offset,
                }],
                GraphVariants::Virtual(entries) => entries
                    .iter()
                    .map(|e| VariantSummary {
                        receiver: Some(e.receiver.as_str()),
                        offset: e.offset,
                    })
                    .collect(),
            },
        })
        .collect();

    Summary {
        objects: objects.len(),
        unresolved: objects
            .iter()
            .filter(|(_, slot)| slot.entry().is_symbolic())
            .count(),
        blob_size: container.blob().len(),
        node_classes: container.node_classes().iter().map(|k| k.name()).collect(),
        snippet_types: container
            .snippet_types()
            .iter()
            .map(|t| t.name.as_str())
            .collect(),
        graphs,
    }
}
