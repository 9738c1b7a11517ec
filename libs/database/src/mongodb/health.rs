use mongodb::{Database, bson::doc};

use crate::common::{DatabaseError, DatabaseResult};

/// Ping `db`; any failure becomes [`DatabaseError::HealthCheckFailed`].
pub async fn check_health(db: &Database) -> DatabaseResult<()> {
    db.run_command(doc! { "ping": 1 })
        .await
        .map(drop)
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))
}
