//! Intermediate representation of a generated Elm module.
//!
//! The generator decides *what* goes into the module; the serializer decides
//! how it is spelled in Elm 0.18 syntax.

use crate::config::FormatOptions;

/// A complete generated module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElmModule {
    /// Module name, `PrivateMain<moduleHash>`.
    pub name: String,
    /// User modules to import, in first-seen order, without duplicates.
    pub imports: Vec<String>,
    /// One render definition per distinct view hash.
    pub render_defs: Vec<RenderDef>,
    /// Entry routine routing flags to render definitions.
    pub dispatch: Dispatch,
    /// Output port declarations.
    pub channels: Vec<Channel>,
}

/// Render definition for one distinct view function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderDef {
    pub view_hash: String,
    pub view_function: String,
    /// When absent the view is a plain `Html msg` value.
    pub decoder: Option<String>,
    pub format: FormatOptions,
}

impl RenderDef {
    /// Name of the generated Elm function.
    pub fn function_name(&self) -> String {
        format!("render{}", self.view_hash)
    }
}

/// The `init` routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// View hash for each flag pair, in batch order.
    pub routes: Vec<String>,
    /// Port the aggregate result is sent on.
    pub channel: String,
}

/// An outgoing port carrying `List (String, String)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub name: String,
}
