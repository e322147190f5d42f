//! Parse pipeline recipes (TOML and JSON) and resolve recipe paths.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{EngineError, PipelineRequest, PipelineStep, Result};

/// A named, reusable pipeline definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub recipe: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub steps: Vec<PipelineStep>,

    /// File the recipe was loaded from; empty for in-memory recipes.
    #[serde(skip)]
    pub source: String,
}

impl Recipe {
    /// Pair the recipe's steps with raw input text.
    pub fn request(&self, raw_text: impl Into<String>) -> PipelineRequest {
        PipelineRequest {
            raw_text: raw_text.into(),
            steps: self.steps.clone(),
        }
    }
}

/// Parse a recipe from a TOML string.
pub fn parse_toml(content: &str) -> Result<Recipe> {
    toml::from_str(content).map_err(|e| EngineError::Parse(e.to_string()))
}

/// Parse a recipe from a JSON string.
pub fn parse_json(content: &str) -> Result<Recipe> {
    serde_json::from_str(content).map_err(|e| EngineError::Parse(e.to_string()))
}

/// Load a recipe from a file path (TOML vs JSON by extension).
pub fn load_recipe(path: &Path) -> Result<Recipe> {
    let content = std::fs::read_to_string(path)?;
    let mut recipe = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => parse_toml(&content)?,
        Some("json") => parse_json(&content)?,
        _ => parse_json(&content).or_else(|_| parse_toml(&content))?,
    };
    recipe.source = path.display().to_string();
    Ok(recipe)
}

const SUFFIXES: [&str; 4] = [".recipe.toml", ".recipe.json", ".toml", ".json"];

/// Search for a recipe by name.
///
/// Search order:
/// 1. Exact path (absolute, or relative to `cwd`)
/// 2. `cwd` with standard suffixes
/// 3. `.numform/recipes/` under `cwd`
pub fn find_recipe(name: &str, cwd: &Path) -> Result<PathBuf> {
    let exact = Path::new(name);
    if exact.is_absolute() && exact.is_file() {
        return Ok(exact.to_path_buf());
    }
    let relative = cwd.join(name);
    if relative.is_file() {
        return Ok(relative);
    }

    let recipes_dir = cwd.join(".numform").join("recipes");
    for dir in [cwd, recipes_dir.as_path()] {
        if let Some(found) = with_suffixes(dir, name) {
            return Ok(found);
        }
    }

    Err(EngineError::Parse(format!(
        "recipe '{name}' not found (searched cwd, .numform/recipes/)"
    )))
}

fn with_suffixes(dir: &Path, name: &str) -> Option<PathBuf> {
    if !dir.is_dir() {
        return None;
    }
    SUFFIXES
        .iter()
        .map(|suffix| dir.join(format!("{name}{suffix}")))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parse_json_minimal() {
        let json = r#"{"recipe": "pairs", "steps": [{"id": "a", "module": "pair-permutations"}]}"#;
        let r = parse_json(json).unwrap();
        assert_eq!(r.recipe, "pairs");
        assert_eq!(r.description, "");
        assert_eq!(r.steps.len(), 1);
        assert_eq!(r.steps[0].step_id, "a");
        assert_eq!(r.steps[0].module_key, "pair-permutations");
        assert!(r.steps[0].params.is_null());
    }

    #[test]
    fn parse_toml_with_params() {
        let toml_str = r#"
recipe = "no-leading-one"
description = "Pairs of three digits that do not start with 1"

[[steps]]
stepId = "gen"
moduleKey = "digit-groups"
params = { groupSize = 3, mode = "permutation" }

[[steps]]
stepId = "cut"
moduleKey = "exclude-edges"

[steps.params]
excludeFront = "1"
"#;
        let r = parse_toml(toml_str).unwrap();
        assert_eq!(r.steps.len(), 2);
        assert_eq!(r.steps[0].params, json!({"groupSize": 3, "mode": "permutation"}));
        assert_eq!(r.steps[1].params, json!({"excludeFront": "1"}));
    }

    #[test]
    fn missing_module_key_is_parse_error() {
        let err = parse_json(r#"{"recipe": "x", "steps": [{"id": "a"}]}"#).unwrap_err();
        assert!(matches!(err, EngineError::Parse(_)));
    }

    #[test]
    fn load_by_extension_and_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("a.toml");
        std::fs::write(&toml_path, "recipe = \"a\"\n").unwrap();
        let r = load_recipe(&toml_path).unwrap();
        assert_eq!(r.recipe, "a");
        assert_eq!(r.source, toml_path.display().to_string());

        let bare = dir.path().join("b.recipe");
        std::fs::write(&bare, "recipe = \"b\"\n").unwrap();
        assert_eq!(load_recipe(&bare).unwrap().recipe, "b");
    }

    #[test]
    fn find_in_recipes_dir() {
        let dir = tempfile::tempdir().unwrap();
        let recipes = dir.path().join(".numform").join("recipes");
        std::fs::create_dir_all(&recipes).unwrap();
        std::fs::write(recipes.join("edges.recipe.json"), r#"{"recipe": "edges"}"#).unwrap();

        let found = find_recipe("edges", dir.path()).unwrap();
        assert_eq!(found, recipes.join("edges.recipe.json"));
        assert!(find_recipe("absent", dir.path()).is_err());
    }

    #[test]
    fn recipe_builds_pipeline_request() {
        let r = parse_json(r#"{"recipe": "p", "steps": [{"module": "pair-permutations"}]}"#).unwrap();
        let req = r.request("12");
        assert_eq!(req.raw_text, "12");
        assert_eq!(req.steps, r.steps);
    }
}
