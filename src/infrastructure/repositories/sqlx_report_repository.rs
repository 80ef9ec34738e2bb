use crate::domain::{
    errors::DomainError,
    report::{
        entity::{Report, ReportEntry, ReportTarget, SubmitOutcome, TargetType},
        repository::ReportRepository,
    },
};
use async_trait::async_trait;
use sqlx::{FromRow, PgPool, types::Json};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

#[derive(FromRow)]
struct ReportRow {
    id: Uuid,
    target_id: Uuid,
    target_type: String,
    entries: Json<Vec<ReportEntry>>,
}

impl TryFrom<ReportRow> for Report {
    type Error = DomainError;

    fn try_from(r: ReportRow) -> Result<Self, Self::Error> {
        let target_type: TargetType = r.target_type.parse().map_err(|e| {
            error!(report_id = %r.id, "Stored report has unknown target type");
            DomainError::InfrastructureError(format!("Corrupt report row: {}", e))
        })?;
        Ok(Report {
            id: r.id,
            target: ReportTarget::new(target_type, r.target_id),
            entries: r.entries.0,
        })
    }
}

fn collect_reports(rows: Vec<ReportRow>) -> Result<Vec<Report>, DomainError> {
    rows.into_iter().map(Report::try_from).collect()
}

/// Report Ledger backed by one row per target with a JSONB array of entries.
///
/// Submissions run as a single upsert whose update branch only fires when the
/// reporter is absent from `entries`, so concurrent first reports converge on
/// one row and a reporter can never be recorded twice.
pub struct SqlxReportRepository {
    pub pool: PgPool,
}

impl SqlxReportRepository {
    pub fn new(pool: PgPool) -> Self {
        info!("Initializing SqlxReportRepository with connection pool");
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for SqlxReportRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>, DomainError> {
        let row = sqlx::query_as::<_, ReportRow>(
            "SELECT id, target_id, target_type, entries FROM reports WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Report::try_from).transpose()
    }

    async fn find_by_target(&self, target: ReportTarget) -> Result<Option<Report>, DomainError> {
        let row = sqlx::query_as::<_, ReportRow>(
            "SELECT id, target_id, target_type, entries FROM reports \
             WHERE target_id = $1 AND target_type = $2",
        )
        .bind(target.id())
        .bind(target.target_type().as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Report::try_from).transpose()
    }

    #[instrument(skip(self, entry), fields(reporter_id = %entry.reporter_id))]
    async fn submit(
        &self,
        target: ReportTarget,
        entry: ReportEntry,
    ) -> Result<SubmitOutcome, DomainError> {
        let row = sqlx::query_as::<_, (Uuid, Uuid, String, Json<Vec<ReportEntry>>, bool)>(
            r#"INSERT INTO reports (id, target_id, target_type, entries, report_count)
               VALUES ($1, $2, $3, jsonb_build_array($4::jsonb), 1)
               ON CONFLICT (target_id, target_type) DO UPDATE
               SET entries = reports.entries || EXCLUDED.entries,
                   report_count = reports.report_count + 1
               WHERE NOT reports.entries @> jsonb_build_array(
                   jsonb_build_object('reporter_id', $5::text)
               )
               RETURNING id, target_id, target_type, entries, (xmax = 0) AS created"#,
        )
        .bind(Uuid::now_v7())
        .bind(target.id())
        .bind(target.target_type().as_str())
        .bind(Json(&entry))
        .bind(entry.reporter_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        let Some((id, target_id, target_type, entries, created)) = row else {
            debug!("Duplicate report rejected");
            return Err(DomainError::AlreadyReported);
        };
        let report = Report::try_from(ReportRow {
            id,
            target_id,
            target_type,
            entries,
        })?;
        Ok(SubmitOutcome { report, created })
    }

    async fn list_all(&self) -> Result<Vec<Report>, DomainError> {
        let rows = sqlx::query_as::<_, ReportRow>(
            "SELECT id, target_id, target_type, entries FROM reports ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        collect_reports(rows)
    }

    #[instrument(skip(self))]
    async fn delete_by_target_id(&self, target_id: Uuid) -> Result<Vec<Report>, DomainError> {
        let rows = sqlx::query_as::<_, ReportRow>(
            "DELETE FROM reports WHERE target_id = $1 \
             RETURNING id, target_id, target_type, entries",
        )
        .bind(target_id)
        .fetch_all(&self.pool)
        .await?;
        collect_reports(rows)
    }

    #[instrument(skip(self))]
    async fn delete_by_target(&self, target: ReportTarget) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM reports WHERE target_id = $1 AND target_type = $2")
            .bind(target.id())
            .bind(target.target_type().as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
