//! Database components

use super::value::{self, Block};
use crate::wire::{DatabaseEngine, DatabaseSpec};
use serde_json::{Value, json};

pub(crate) fn expand(block: &Block) -> DatabaseSpec {
    DatabaseSpec {
        name: value::string(block, "name"),
        engine: DatabaseEngine::lenient(&value::string(block, "engine")),
        version: value::string(block, "version"),
        production: value::boolean(block, "production"),
        cluster_name: value::string(block, "cluster_name"),
        db_name: value::string(block, "db_name"),
        db_user: value::string(block, "db_user"),
    }
}

pub(crate) fn flatten(db: &DatabaseSpec) -> Value {
    json!({
        "name": db.name,
        "engine": db.engine.as_ref().map(|e| e.as_str()).unwrap_or_default(),
        "version": db.version,
        "production": db.production,
        "cluster_name": db.cluster_name,
        "db_name": db.db_name,
        "db_user": db.db_user,
    })
}
