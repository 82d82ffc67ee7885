//! Builds the module IR from a normalized batch.

use rustc_hash::FxHashSet;

use crate::config::Batch;

use super::ir::{Channel, Dispatch, ElmModule, RenderDef};
use super::serializer;

/// Modules the serializer always imports itself.
const PRELUDE_MODULES: &[&str] = &[
    "Platform",
    "Html",
    "ElmHtml.InternalTypes",
    "ElmHtml.ToString",
    "Json.Decode",
    "Native.Jsonify",
];

/// Build the IR for a batch.
///
/// Descriptors sharing a view hash collapse into one render definition; the
/// first occurrence supplies the decoder and formatting.
pub fn build_module(batch: &Batch) -> ElmModule {
    let mut imports = Vec::new();
    let mut seen = FxHashSet::default();
    for view in &batch.descriptors {
        let referenced = std::iter::once(view.view_function.as_str()).chain(view.decoder.as_deref());
        for id in referenced {
            let module = module_of(id);
            if PRELUDE_MODULES.contains(&module) {
                continue;
            }
            if seen.insert(module) {
                imports.push(module.to_string());
            }
        }
    }

    let render_defs = batch
        .unique_views()
        .into_iter()
        .map(|view| RenderDef {
            view_hash: view.view_hash.clone(),
            view_function: view.view_function.clone(),
            decoder: view.decoder.clone(),
            format: view.format,
        })
        .collect();

    let port = batch.port_name();

    ElmModule {
        name: batch.entry_point(),
        imports,
        render_defs,
        dispatch: Dispatch {
            routes: batch.descriptors.iter().map(|d| d.view_hash.clone()).collect(),
            channel: port.clone(),
        },
        channels: vec![Channel { name: port }],
    }
}

/// Generate the module's Elm source text.
pub fn generate_source(batch: &Batch) -> String {
    serializer::serialize(&build_module(batch))
}

/// `Pages.About.view` -> `Pages.About`.
fn module_of(id: &str) -> &str {
    id.rsplit_once('.').map_or(id, |(module, _)| module)
}
