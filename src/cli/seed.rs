//! `seed-db` command: populate a SQLite database with the sample dataset.

use anyhow::{Context, Result};
use orgdir_core::store::seed::sample_organizations;
use orgdir_core::SqliteStore;
use std::path::Path;
use tracing::{info, warn};

/// Seed the database at `path`. Organizations whose IDs are already
/// present are left untouched, so the command is safe to re-run.
pub async fn run(path: &Path) -> Result<()> {
    let store = SqliteStore::new(path)
        .await
        .with_context(|| format!("failed to open database at {}", path.display()))?;

    let mut inserted = 0;
    let mut skipped = 0;
    for organization in sample_organizations() {
        if store.insert_organization(&organization).await? {
            info!(org_id = organization.id(), name = organization.name(), "organization seeded");
            inserted += 1;
        } else {
            warn!(org_id = organization.id(), "organization already present, skipped");
            skipped += 1;
        }
    }

    info!(
        path = %path.display(),
        inserted = inserted,
        skipped = skipped,
        "seed complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgdir_core::DirectoryStore;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("seeded.db");

        run(&db_path).await.unwrap();
        // second run skips everything instead of failing
        run(&db_path).await.unwrap();

        let store = SqliteStore::new(&db_path).await.unwrap();
        let org = store.get_organization(1).await.unwrap().unwrap();
        assert_eq!(org.name(), "Acme Logistics");
        assert_eq!(store.get_employee(1, 1).await.unwrap().unwrap().salary(), 1000.0);
    }
}
