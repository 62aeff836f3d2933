use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::errors::AppError;
use crate::models::employee::{
    CognitiveRow, CompetencyRow, EmployeeRow, PapiScoreRow, PerformanceRow, PopulationSnapshot,
    StrengthRow,
};
use crate::store::AttributeStore;

const EMPLOYEES_SQL: &str = r#"
    SELECT
        e.employee_id::text AS employee_id,
        COALESCE(e.fullname, '') AS fullname,
        dir.name AS directorate,
        pos.name AS role,
        g.name AS grade,
        e.years_of_service_months::float8 AS years_of_service_months
    FROM employees e
    LEFT JOIN dim_directorates dir ON e.directorate_id = dir.directorate_id
    LEFT JOIN dim_positions pos ON e.position_id = pos.position_id
    LEFT JOIN dim_grades g ON e.grade_id = g.grade_id
    ORDER BY e.employee_id
"#;

const PERFORMANCE_SQL: &str = r#"
    SELECT employee_id::text AS employee_id, year::int4 AS year, rating::float8 AS rating
    FROM performance_yearly
    WHERE employee_id IS NOT NULL AND year IS NOT NULL
"#;

const COMPETENCIES_SQL: &str = r#"
    SELECT employee_id::text AS employee_id, year::int4 AS year, pillar_code, score::text AS score
    FROM competencies_yearly
    WHERE employee_id IS NOT NULL AND year IS NOT NULL AND pillar_code IS NOT NULL
"#;

const PAPI_SQL: &str = r#"
    SELECT employee_id::text AS employee_id, scale_code, score::float8 AS score
    FROM papi_scores
    WHERE employee_id IS NOT NULL AND scale_code IS NOT NULL
"#;

const STRENGTHS_SQL: &str = r#"
    SELECT employee_id::text AS employee_id, theme, rank::int4 AS rank
    FROM strengths
    WHERE employee_id IS NOT NULL
"#;

const COGNITIVE_SQL: &str = r#"
    SELECT employee_id::text AS employee_id, iq::float8 AS iq
    FROM profiles_psych
    WHERE employee_id IS NOT NULL
"#;

/// Reads the HR tables from PostgreSQL.
#[derive(Clone)]
pub struct PgAttributeStore {
    pool: PgPool,
}

impl PgAttributeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttributeStore for PgAttributeStore {
    async fn fetch_snapshot(&self) -> Result<PopulationSnapshot, AppError> {
        // One read-only repeatable-read transaction so every table reflects the same instant.
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let employees = sqlx::query_as::<_, EmployeeRow>(EMPLOYEES_SQL)
            .fetch_all(&mut *tx)
            .await?;
        let performance = sqlx::query_as::<_, PerformanceRow>(PERFORMANCE_SQL)
            .fetch_all(&mut *tx)
            .await?;
        let competencies = sqlx::query_as::<_, CompetencyRow>(COMPETENCIES_SQL)
            .fetch_all(&mut *tx)
            .await?;
        let papi_scores = sqlx::query_as::<_, PapiScoreRow>(PAPI_SQL)
            .fetch_all(&mut *tx)
            .await?;
        let strengths = sqlx::query_as::<_, StrengthRow>(STRENGTHS_SQL)
            .fetch_all(&mut *tx)
            .await?;
        let cognitive = sqlx::query_as::<_, CognitiveRow>(COGNITIVE_SQL)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(
            "Loaded snapshot: {} employees, {} performance, {} competency, {} papi, {} strength, {} cognitive rows",
            employees.len(),
            performance.len(),
            competencies.len(),
            papi_scores.len(),
            strengths.len(),
            cognitive.len()
        );

        Ok(PopulationSnapshot {
            employees,
            performance,
            competencies,
            papi_scores,
            strengths,
            cognitive,
        })
    }

    async fn healthcheck(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
