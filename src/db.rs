use anyhow::Context;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::SavedResult;

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query("CREATE SCHEMA IF NOT EXISTS cgpa_calculator")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cgpa_calculator.saved_results (
            id UUID PRIMARY KEY,
            student_name TEXT NOT NULL,
            cohort TEXT NOT NULL,
            gpa DOUBLE PRECISION NOT NULL,
            cgpa DOUBLE PRECISION NOT NULL,
            total_credit_hours DOUBLE PRECISION NOT NULL,
            calculated_on DATE NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let results = vec![
        (
            Uuid::parse_str("7b1e4a9c-53d2-4f8a-9c6e-2f1d8b0a44e1")?,
            "Avery Lee",
            "new",
            3.67,
            3.52,
            15.0,
            NaiveDate::from_ymd_opt(2026, 1, 28).context("invalid date")?,
        ),
        (
            Uuid::parse_str("4f6c2d81-08b7-4f33-b1da-6a9e57c3f0b4")?,
            "Jules Moreno",
            "returning",
            3.25,
            3.41,
            12.0,
            NaiveDate::from_ymd_opt(2026, 1, 30).context("invalid date")?,
        ),
        (
            Uuid::parse_str("9a3d7e52-6c14-4b0f-8e27-51f0b9d2c8a7")?,
            "Kiara Patel",
            "new",
            2.89,
            3.05,
            16.5,
            NaiveDate::from_ymd_opt(2026, 2, 2).context("invalid date")?,
        ),
    ];

    for (id, student_name, cohort, gpa, cgpa, total_credit_hours, calculated_on) in results {
        sqlx::query(
            r#"
            INSERT INTO cgpa_calculator.saved_results
            (id, student_name, cohort, gpa, cgpa, total_credit_hours, calculated_on)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE
            SET student_name = EXCLUDED.student_name,
                cohort = EXCLUDED.cohort,
                gpa = EXCLUDED.gpa,
                cgpa = EXCLUDED.cgpa,
                total_credit_hours = EXCLUDED.total_credit_hours,
                calculated_on = EXCLUDED.calculated_on
            "#,
        )
        .bind(id)
        .bind(student_name)
        .bind(cohort)
        .bind(gpa)
        .bind(cgpa)
        .bind(total_credit_hours)
        .bind(calculated_on)
        .execute(pool)
        .await?;
    }

    Ok(())
}

pub async fn save_result(pool: &PgPool, result: &SavedResult) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO cgpa_calculator.saved_results
        (id, student_name, cohort, gpa, cgpa, total_credit_hours, calculated_on)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(result.id)
    .bind(&result.student_name)
    .bind(&result.cohort)
    .bind(result.gpa)
    .bind(result.cgpa)
    .bind(result.total_credit_hours)
    .bind(result.calculated_on)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn list_results(pool: &PgPool) -> anyhow::Result<Vec<SavedResult>> {
    let rows = sqlx::query(
        "SELECT id, student_name, cohort, gpa, cgpa, total_credit_hours, calculated_on \
         FROM cgpa_calculator.saved_results \
         ORDER BY calculated_on DESC, student_name",
    )
    .fetch_all(pool)
    .await?;

    let mut results = Vec::new();

    for row in rows {
        results.push(SavedResult {
            id: row.get("id"),
            student_name: row.get("student_name"),
            cohort: row.get("cohort"),
            gpa: row.get("gpa"),
            cgpa: row.get("cgpa"),
            total_credit_hours: row.get("total_credit_hours"),
            calculated_on: row.get("calculated_on"),
        });
    }

    Ok(results)
}

pub async fn delete_result(pool: &PgPool, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM cgpa_calculator.saved_results WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
