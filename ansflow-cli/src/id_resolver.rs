//! ID resolver module
//!
//! Lets users name records instead of looking up their numeric ids.

use ansflow_client::{AnsflowClient, Resource, ResourceTable};
use anyhow::{Context, Result, anyhow};

use crate::types::IdOrName;

/// Resolve an id or name to an id of a record of kind `R`
///
/// Ids are returned as is without a request. Names are matched
/// case-insensitively against the freshly fetched collection and must
/// match exactly one record.
pub async fn resolve_id<R: Resource>(client: &AnsflowClient, target: &str) -> Result<i64> {
    let name = match IdOrName::parse(target) {
        IdOrName::Id(id) => return Ok(id),
        IdOrName::Name(name) => name,
    };

    let mut table: ResourceTable<R> = ResourceTable::new(client.clone());
    let rows = table
        .load()
        .await
        .with_context(|| format!("Failed to fetch {} list for name resolution", R::KIND))?;

    match_name(rows, &name)
}

/// Resolve several ids or names, fetching the collection at most once
pub async fn resolve_ids<R: Resource>(
    client: &AnsflowClient,
    targets: &[String],
) -> Result<Vec<i64>> {
    let mut table: Option<ResourceTable<R>> = None;
    let mut ids = Vec::with_capacity(targets.len());

    for target in targets {
        let name = match IdOrName::parse(target) {
            IdOrName::Id(id) => {
                ids.push(id);
                continue;
            }
            IdOrName::Name(name) => name,
        };

        if table.is_none() {
            let mut loaded = ResourceTable::new(client.clone());
            loaded
                .load()
                .await
                .with_context(|| format!("Failed to fetch {} list for name resolution", R::KIND))?;
            table = Some(loaded);
        }
        if let Some(table) = &table {
            ids.push(match_name(table.rows(), &name)?);
        }
    }

    Ok(ids)
}

/// Find the single record in `rows` named `name`
pub fn match_name<R: Resource>(rows: &[R], name: &str) -> Result<i64> {
    let matches: Vec<&R> = rows
        .iter()
        .filter(|r| r.display_name().eq_ignore_ascii_case(name))
        .collect();

    match matches.len() {
        0 => Err(anyhow!("No {} named '{}'", R::KIND, name)),
        1 => Ok(matches[0].id()),
        _ => {
            let ids: Vec<String> = matches.iter().map(|r| r.id().to_string()).collect();
            Err(anyhow!(
                "Name '{}' matches multiple {} entries: {}",
                name,
                R::KIND,
                ids.join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ansflow_core::domain::project::Project;
    use serde_json::json;

    fn projects() -> Vec<Project> {
        serde_json::from_value(json!([
            {"id": 1, "name": "backend", "created_at": "2025-07-15T10:00:00Z"},
            {"id": 2, "name": "frontend", "created_at": "2025-07-15T10:00:00Z"},
            {"id": 3, "name": "Frontend", "created_at": "2025-07-15T10:00:00Z"},
        ]))
        .unwrap()
    }

    #[test]
    fn test_unique_match_ignores_case() {
        assert_eq!(match_name(&projects(), "BACKEND").unwrap(), 1);
    }

    #[test]
    fn test_ambiguous_name() {
        let err = match_name(&projects(), "frontend").unwrap_err();
        assert!(err.to_string().contains("2, 3"));
    }

    #[test]
    fn test_unknown_name() {
        let err = match_name(&projects(), "mobile").unwrap_err();
        assert_eq!(err.to_string(), "No project named 'mobile'");
    }
}
