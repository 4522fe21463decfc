//! `--extra-*` arguments
//!
//! Clap never sees these: they are pulled out of argv before parsing. Two of them tune the
//! loaded configuration (`--extra-allow-h1`, `--extra-max-declarations`); every other key
//! names a style field and becomes part of a style patch, e.g. `--extra-h2-size 30` or
//! `--extra-primary-color '#0052ff'`.

use plume_babel::style::{StyleField, StylePatch, StyleValue};
use plume_config::PlumeConfig;
use std::collections::HashMap;

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
pub fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            // Colours start with '#', so only a leading dash marks the next flag
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

/// Apply the configuration-level extras, removing them from `extra_params`.
pub fn apply_config_overrides(
    config: &mut PlumeConfig,
    extra_params: &mut HashMap<String, String>,
) -> Result<(), String> {
    if let Some(raw) = take_override(extra_params, &["allow-h1", "allow_h1"]) {
        config.render.allow_h1 = parse_bool_arg("allow-h1", &raw)?;
    }
    if let Some(raw) = take_override(extra_params, &["max-declarations", "max_declarations"]) {
        config.inspect.max_declarations = raw
            .parse()
            .map_err(|_| format!("Invalid count '{raw}' for --extra-max-declarations"))?;
    }
    Ok(())
}

/// Turn the remaining extras into a style patch. Every key must name a style field.
pub fn style_overrides(extra_params: &HashMap<String, String>) -> Result<StylePatch, String> {
    let mut keys: Vec<&String> = extra_params.keys().collect();
    keys.sort();

    let mut patch = StylePatch::new();
    for key in keys {
        let field = StyleField::from_name(key)
            .ok_or_else(|| format!("Unknown style field '{key}' in --extra-{key}"))?;
        patch.insert(field, style_value(&extra_params[key]));
    }
    Ok(patch)
}

fn style_value(raw: &str) -> StyleValue {
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => StyleValue::Number(n),
        _ => StyleValue::Text(raw.to_string()),
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> Result<bool, String> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(format!("Invalid boolean value '{other}' for --extra-{flag}")),
    }
}
