//! Command handlers, one module per subcommand.

pub mod caps;
pub mod completion;
pub mod estimate;
pub mod generate;
pub mod modules;
pub mod run;
pub mod version;

use anyhow::{Result, bail};
use numform_engine::types::ParamSpec;
use serde_json::{Map, Value};

/// Returned by handlers whose request was refused. The outcome has already
/// been printed; `main` maps this to exit code 2.
#[derive(Debug)]
pub struct Blocked;

impl std::fmt::Display for Blocked {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("request blocked")
    }
}

impl std::error::Error for Blocked {}

/// Build a module parameter object from `key=value` pairs.
///
/// Parameters the module documents as `digits` are always strings, so
/// `excludeFront=1` stays `"1"`. Other values are read as JSON when they
/// parse (`3`, `true`), otherwise kept as strings. No pairs means "all
/// defaults".
pub fn parse_params(pairs: &[String], schema: &[ParamSpec]) -> Result<Value> {
    if pairs.is_empty() {
        return Ok(Value::Null);
    }
    let mut map = Map::new();
    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            bail!("invalid parameter '{pair}' (expected KEY=VALUE)");
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("invalid parameter '{pair}' (empty key)");
        }
        let is_digits = schema.iter().any(|spec| spec.name == key && spec.kind == "digits");
        let value = if is_digits {
            Value::String(raw.to_string())
        } else {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
        };
        map.insert(key.to_string(), value);
    }
    Ok(Value::Object(map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const SCHEMA: &[ParamSpec] = &[ParamSpec {
        name: "excludeFront",
        kind: "digits",
        default: "",
        description: "",
    }];

    fn pairs(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn values_are_json_or_strings() {
        let pairs = pairs(&[
            "groupSize=3",
            "allowRepeats=true",
            "mode=permutation",
            "excludeFront=1",
            "label=09",
        ]);
        let params = parse_params(&pairs, SCHEMA).unwrap();
        assert_eq!(
            params,
            json!({
                "groupSize": 3,
                "allowRepeats": true,
                "mode": "permutation",
                "excludeFront": "1",
                "label": "09",
            })
        );
    }

    #[test]
    fn quoted_json_values_are_unquoted() {
        let params = parse_params(&pairs(&["mode=\"perm\""]), SCHEMA).unwrap();
        assert_eq!(params, json!({"mode": "perm"}));
    }

    #[test]
    fn no_pairs_is_null() {
        assert!(parse_params(&[], SCHEMA).unwrap().is_null());
    }

    #[test]
    fn missing_equals_is_an_error() {
        assert!(parse_params(&pairs(&["groupSize"]), SCHEMA).is_err());
        assert!(parse_params(&pairs(&["=3"]), SCHEMA).is_err());
    }
}
