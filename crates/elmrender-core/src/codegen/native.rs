//! The `Native.Jsonify` helper module.
//!
//! Elm 0.18 keeps lazy nodes as thunks; they must be forced before the view
//! tree can be decoded back into an inspectable HTML structure.

/// Repository used by Elm when the manifest does not declare one.
const DEFAULT_REPOSITORY: &str = "https://github.com/user/project.git";

/// Derive the native-module namespace from a manifest `repository` URL.
///
/// `https://github.com/user/my-app.git` becomes `user$my_app`.
pub fn project_namespace(repository: Option<&str>) -> String {
    let repository = repository.unwrap_or(DEFAULT_REPOSITORY);
    let trimmed = repository
        .trim_start_matches("https://github.com/")
        .trim_end_matches(".git");

    trimmed.replacen('/', "$", 1).replace('-', "_")
}

/// JavaScript source of `Native/Jsonify.js` for the given project namespace.
pub fn jsonify_source(namespace: &str) -> String {
    let mut code = String::new();

    code.push_str("function forceThunks(vNode) {\n");
    code.push_str("    if (typeof vNode !== 'undefined' && vNode.ctor === '_Tuple2' && !vNode.node) {\n");
    code.push_str("        vNode._1 = forceThunks(vNode._1);\n");
    code.push_str("    }\n");
    code.push_str("    if (typeof vNode !== 'undefined' && vNode.type === 'thunk' && !vNode.node) {\n");
    code.push_str("        vNode.node = vNode.thunk.apply(vNode.thunk, vNode.args);\n");
    code.push_str("    }\n");
    code.push_str("    if (typeof vNode !== 'undefined' && typeof vNode.children !== 'undefined') {\n");
    code.push_str("        vNode.children = vNode.children.map(forceThunks);\n");
    code.push_str("    }\n");
    code.push_str("    return vNode;\n");
    code.push_str("}\n\n");

    code.push_str(&format!("var _{namespace}$Native_Jsonify = {{\n"));
    code.push_str("    stringify: function(thing) { return forceThunks(thing); }\n");
    code.push_str("};\n");

    code
}
