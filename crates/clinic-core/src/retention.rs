//! Appointment retention policy.

use tracing::info;

use crate::db::{Database, DbResult};

/// Maximum number of stored appointments once enforcement has run.
pub const DEFAULT_APPOINTMENT_LIMIT: usize = 20;

/// Caps the total appointment count, evicting the chronologically oldest
/// entries first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    limit: usize,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_APPOINTMENT_LIMIT)
    }
}

impl RetentionPolicy {
    /// Policy with a custom limit.
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Trim surplus appointments, oldest `scheduled_at` first.
    ///
    /// Runs in its own transaction so a failure here never rolls back the
    /// insert that triggered it. A no-op when the count is at or below the
    /// limit. Ties on `scheduled_at` fall back to insertion order; exactly
    /// `count - limit` rows are removed either way. Returns how many rows
    /// were trimmed.
    pub fn enforce(&self, db: &mut Database) -> DbResult<usize> {
        let tx = db.transaction()?;

        let count: i64 =
            tx.query_row("SELECT COUNT(*) FROM appointments", [], |row| row.get(0))?;
        let excess = (count as usize).saturating_sub(self.limit);
        if excess == 0 {
            return Ok(0);
        }

        let removed = tx.execute(
            r#"
            DELETE FROM appointments WHERE id IN (
                SELECT id FROM appointments
                ORDER BY scheduled_at ASC, id ASC
                LIMIT ?1
            )
            "#,
            [excess as i64],
        )?;
        tx.commit()?;

        info!(removed, limit = self.limit, "trimmed surplus appointments");
        Ok(removed)
    }
}
