use std::fs;

const EXTENSIONS: [&str; 6] = [
    "tables",
    "task_lists",
    "strikethrough",
    "highlight",
    "subscript",
    "superscript",
];

fn main() {
    // The bundled config is include_str!'d by Config::compiled_default, which
    // falls back to defaults on a parse error. Catch mistakes here instead.
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={config_path}");

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");
    let table = content
        .parse::<toml::Table>()
        .unwrap_or_else(|e| panic!("Invalid default_config.toml: {e}"));

    if !table.get("strip_frontmatter").is_some_and(|v| v.is_bool()) {
        panic!("default_config.toml: strip_frontmatter must be a boolean");
    }

    let extensions = table
        .get("extensions")
        .and_then(|v| v.as_table())
        .expect("default_config.toml: missing [extensions] table");
    for key in EXTENSIONS {
        if !extensions.get(key).is_some_and(|v| v.is_bool()) {
            panic!("default_config.toml: extensions.{key} must be a boolean");
        }
    }
    for key in extensions.keys() {
        if !EXTENSIONS.contains(&key.as_str()) {
            panic!("default_config.toml: unknown extension `{key}`");
        }
    }
}
