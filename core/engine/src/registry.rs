//! FILENAME: core/engine/src/registry.rs
//! PURPOSE: The global table of built-in functions.
//! CONTEXT: Built once on first use from `builtins::all()` and never modified
//! afterwards, so lookups need no lock. Contexts consult their own table first.

use crate::builtins;
use crate::function::Function;
use log::info;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

static REGISTRY: Lazy<HashMap<String, Arc<dyn Function>>> = Lazy::new(|| {
    let table: HashMap<String, Arc<dyn Function>> = builtins::all()
        .into_iter()
        .map(|f| (f.name().to_uppercase(), Arc::new(f) as Arc<dyn Function>))
        .collect();
    info!("REGISTRY initialised with {} built-in functions", table.len());
    table
});

/// Looks a built-in up by name, ignoring case.
pub fn lookup(name: &str) -> Option<Arc<dyn Function>> {
    REGISTRY.get(&name.to_uppercase()).cloned()
}

/// Names of every built-in, sorted.
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = REGISTRY.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}
