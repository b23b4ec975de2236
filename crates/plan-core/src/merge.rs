//! Option merging and environment overrides
//!
//! Merging is shallow and per field: a field set in the overlay replaces the
//! base field as a whole. Lists are replaced, never concatenated, and nested
//! objects are replaced rather than merged key by key. A `null` in the
//! overlay means "not specified" and leaves the base value in place.
//!
//! The one exception is `envOverrides` when two task definitions are merged
//! along an `extends` chain: the per-environment entries are merged by
//! environment name so a descendant can add or adjust one environment
//! without discarding its ancestor's others.

use plan_meta::{ENV_OVERRIDES_KEY, OptionMap, TaskDefinition, value_kind};
use serde_json::Value;

/// The selected environment's override entry is not an object.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("override for environment '{env}' must be an object, found {found}")]
pub struct InvalidOverride {
    pub env: String,
    pub found: &'static str,
}

/// Merge `overlay` over `base`, field by field.
///
/// # Example
///
/// ```
/// use plan_core::merge::merge_options;
/// use serde_json::json;
///
/// let base = json!({"outDir": "dist", "assets": ["a", "b"], "minify": false});
/// let overlay = json!({"assets": ["c"], "minify": null});
/// let merged = merge_options(base.as_object().unwrap(), overlay.as_object().unwrap());
///
/// assert_eq!(
///     serde_json::Value::Object(merged),
///     json!({"outDir": "dist", "assets": ["c"], "minify": false})
/// );
/// ```
pub fn merge_options(base: &OptionMap, overlay: &OptionMap) -> OptionMap {
    let mut merged = base.clone();
    for (key, value) in overlay {
        if value.is_null() {
            continue;
        }
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Compute the effective options of `base` for the selected environment.
///
/// `overrides` maps environment names to partial option objects. With no
/// selected environment, or one that has no entry (or a `null` entry), the
/// result is a copy of `base`. Any `envOverrides` key inside the override
/// itself is ignored.
pub fn resolve_effective_options(
    base: &OptionMap,
    overrides: &OptionMap,
    selected_env: Option<&str>,
) -> Result<OptionMap, InvalidOverride> {
    let Some(env) = selected_env else {
        return Ok(base.clone());
    };

    match overrides.get(env) {
        None | Some(Value::Null) => Ok(base.clone()),
        Some(Value::Object(partial)) => {
            tracing::trace!(env, fields = partial.len(), "Applying environment override");
            let mut merged = merge_options(base, partial);
            if !base.contains_key(ENV_OVERRIDES_KEY) {
                merged.remove(ENV_OVERRIDES_KEY);
            } else if let Some(original) = base.get(ENV_OVERRIDES_KEY) {
                merged.insert(ENV_OVERRIDES_KEY.to_string(), original.clone());
            }
            Ok(merged)
        }
        Some(other) => Err(InvalidOverride {
            env: env.to_string(),
            found: value_kind(other),
        }),
    }
}

/// Apply a task's own `envOverrides` for `selected_env`.
///
/// The returned definition no longer carries `envOverrides`; its reserved
/// fields (`priority`, `skip`, `handler`) reflect the override.
pub fn apply_env_overrides(
    task: &TaskDefinition,
    selected_env: Option<&str>,
) -> Result<TaskDefinition, InvalidOverride> {
    let mut base = task.as_map().clone();
    let overrides = match base.remove(ENV_OVERRIDES_KEY) {
        None | Some(Value::Null) => OptionMap::new(),
        Some(Value::Object(map)) => map,
        Some(other) => match selected_env {
            Some(env) => {
                return Err(InvalidOverride {
                    env: env.to_string(),
                    found: value_kind(&other),
                });
            }
            None => OptionMap::new(),
        },
    };

    resolve_effective_options(&base, &overrides, selected_env).map(TaskDefinition::new)
}

/// Merge a descendant task definition over an ancestor's.
///
/// Fields follow [`merge_options`]; `envOverrides` objects are merged per
/// environment name, each entry shallowly.
pub fn merge_task_definitions(ancestor: &TaskDefinition, descendant: &TaskDefinition) -> TaskDefinition {
    let mut merged = merge_options(ancestor.as_map(), descendant.as_map());

    if let (Some(Value::Object(base)), Some(Value::Object(overlay))) = (
        ancestor.get(ENV_OVERRIDES_KEY),
        descendant.get(ENV_OVERRIDES_KEY),
    ) {
        let mut environments = base.clone();
        for (env, entry) in overlay {
            let combined = match (base.get(env), entry) {
                (_, Value::Null) => continue,
                (Some(Value::Object(a)), Value::Object(b)) => Value::Object(merge_options(a, b)),
                _ => entry.clone(),
            };
            environments.insert(env.clone(), combined);
        }
        merged.insert(ENV_OVERRIDES_KEY.to_string(), Value::Object(environments));
    }

    TaskDefinition::new(merged)
}
