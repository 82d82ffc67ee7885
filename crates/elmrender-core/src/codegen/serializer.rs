//! Spells an [`ElmModule`] in Elm 0.18 syntax.

use super::ir::{Channel, Dispatch, ElmModule, RenderDef};

/// Prefix of every rendered text that represents a failure.
pub const ERROR_MARKER: &str = "ERROR:";

/// Serialize a module to Elm source.
pub fn serialize(module: &ElmModule) -> String {
    let mut code = String::new();

    code.push_str(&format!("port module {} exposing (..)\n\n", module.name));

    code.push_str("import Platform\n");
    code.push_str("import Html exposing (Html)\n");
    code.push_str("import ElmHtml.InternalTypes exposing (decodeElmHtml)\n");
    code.push_str(
        "import ElmHtml.ToString exposing (FormatOptions, nodeToStringWithOptions, defaultFormatOptions)\n",
    );
    code.push_str("import Json.Decode\n");
    code.push_str("import Native.Jsonify\n");
    for import in &module.imports {
        code.push_str(&format!("import {import}\n"));
    }
    code.push_str("\n\n");

    code.push_str("asJsonView : Html msg -> Json.Decode.Value\n");
    code.push_str("asJsonView =\n");
    code.push_str("    Native.Jsonify.stringify\n\n\n");

    code.push_str("decode : FormatOptions -> Html msg -> String\n");
    code.push_str("decode options view =\n");
    code.push_str("    case Json.Decode.decodeValue decodeElmHtml (asJsonView view) of\n");
    code.push_str("        Err err ->\n");
    code.push_str(&format!("            {} ++ err\n\n", string_literal(ERROR_MARKER)));
    code.push_str("        Ok node ->\n");
    code.push_str("            nodeToStringWithOptions options node\n\n\n");

    for def in &module.render_defs {
        push_render_def(&mut code, def);
    }

    push_render_for(&mut code, &module.render_defs);
    push_dispatch(&mut code, &module.dispatch);

    for channel in &module.channels {
        push_channel(&mut code, channel);
    }

    code.push_str("main =\n");
    code.push_str("    Platform.programWithFlags\n");
    code.push_str("        { init = init\n");
    code.push_str("        , update = \\_ model -> ( model, Cmd.none )\n");
    code.push_str("        , subscriptions = \\_ -> Sub.none\n");
    code.push_str("        }\n");

    code
}

fn push_render_def(code: &mut String, def: &RenderDef) {
    let name = def.function_name();
    let new_lines = if def.format.insert_newlines { "True" } else { "False" };

    code.push_str(&format!("{name} : Json.Decode.Value -> String\n"));
    match &def.decoder {
        Some(_) => code.push_str(&format!("{name} value =\n")),
        None => code.push_str(&format!("{name} _ =\n")),
    }
    code.push_str("    let\n");
    code.push_str("        options =\n");
    code.push_str(&format!(
        "            {{ defaultFormatOptions | newLines = {new_lines}, indent = {} }}\n",
        def.format.indent_width
    ));
    code.push_str("    in\n");

    match &def.decoder {
        Some(decoder) => {
            let failure = format!(
                "{ERROR_MARKER} I could not decode the argument for {}: ",
                def.view_function
            );
            code.push_str(&format!("        case Json.Decode.decodeValue {decoder} value of\n"));
            code.push_str("            Err err ->\n");
            code.push_str(&format!("                {} ++ err\n\n", string_literal(&failure)));
            code.push_str("            Ok model ->\n");
            code.push_str(&format!(
                "                decode options ({} model)\n\n\n",
                def.view_function
            ));
        }
        None => {
            code.push_str(&format!("        decode options {}\n\n\n", def.view_function));
        }
    }
}

/// Lookup from view hash to render definition.
fn push_render_for(code: &mut String, defs: &[RenderDef]) {
    code.push_str("renderFor : String -> Json.Decode.Value -> String\n");
    code.push_str("renderFor viewHash =\n");
    code.push_str("    case viewHash of\n");
    for def in defs {
        code.push_str(&format!("        {} ->\n", string_literal(&def.view_hash)));
        code.push_str(&format!("            {}\n\n", def.function_name()));
    }
    code.push_str("        _ ->\n");
    code.push_str(&format!(
        "            \\_ -> {} ++ viewHash\n\n\n",
        string_literal(&format!("{ERROR_MARKER} no render definition for "))
    ));
}

fn push_dispatch(code: &mut String, dispatch: &Dispatch) {
    code.push_str("routes : List String\n");
    code.push_str("routes =\n");
    for (i, route) in dispatch.routes.iter().enumerate() {
        let lead = if i == 0 { "[" } else { "," };
        code.push_str(&format!("    {lead} {}\n", string_literal(route)));
    }
    code.push_str("    ]\n\n\n");

    code.push_str("init : List ( String, Json.Decode.Value ) -> ( (), Cmd msg )\n");
    code.push_str("init models =\n");
    code.push_str("    ( ()\n");
    code.push_str(
        "    , List.map2 (\\viewHash ( key, model ) -> ( key, renderFor viewHash model )) routes models\n",
    );
    code.push_str(&format!("        |> {}\n", dispatch.channel));
    code.push_str("    )\n\n\n");
}

fn push_channel(code: &mut String, channel: &Channel) {
    code.push_str(&format!(
        "port {} : List ( String, String ) -> Cmd msg\n\n\n",
        channel.name
    ));
}

/// Quote a string as an Elm string literal.
fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
