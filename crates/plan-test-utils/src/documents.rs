//! Sample configuration documents shared by test suites.

use serde_json::{Value, json};

/// A `base` project with a build task and a `child` that extends it and
/// overrides the build priority for `prod`.
pub fn extends_with_prod_override() -> Value {
    json!({
        "projects": {
            "base": {"tasks": {"build": {"priority": 1}}},
            "child": {
                "extends": "base",
                "tasks": {"build": {"envOverrides": {"prod": {"priority": 9}}}}
            }
        }
    })
}

/// One project with four custom tasks whose priorities are
/// unset, 5, 1 and 5 in declaration order.
pub fn mixed_priorities() -> Value {
    json!({
        "projects": {
            "app": {
                "tasks": {
                    "t1": {"handler": "./t1.js"},
                    "t2": {"handler": "./t2.js", "priority": 5},
                    "t3": {"handler": "./t3.js", "priority": 1},
                    "t4": {"handler": "./t4.js", "priority": 5}
                }
            }
        }
    })
}

/// A three-project monorepo with inheritance, overrides and a skipped task.
pub fn monorepo() -> Value {
    json!({
        "$schema": "./node_modules/taskplan/schema.json",
        "projects": {
            "shared": {
                "tasks": {
                    "build": {
                        "outputPath": "dist",
                        "sourceMap": true,
                        "copy": ["README.md"],
                        "envOverrides": {"prod": {"sourceMap": false, "minify": true}}
                    },
                    "lint": {"handler": "./tools/lint.js", "priority": -1}
                }
            },
            "web": {
                "extends": "shared",
                "root": "packages/web",
                "tasks": {
                    "build": {"copy": ["public/**"]},
                    "e2e": {"handler": "./tools/e2e.js", "priority": 10, "skip": true}
                }
            },
            "api": {
                "extends": "shared",
                "root": "packages/api",
                "tasks": {
                    "deploy": {
                        "handler": "./tools/deploy.js",
                        "priority": 20,
                        "skip": true,
                        "envOverrides": {"prod": {"skip": false}}
                    }
                }
            }
        }
    })
}
