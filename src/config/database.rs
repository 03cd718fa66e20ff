use crate::domain::survey::entity::{
    answer_choice, department, survey, survey_question, survey_response, survey_response_answer,
};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Schema, Statement};
use std::env;
use tracing::info;

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;
    info!("Successfully connected to the database.");

    // Check if schema update is enabled
    let should_update_schema = env::var("DB_SCHEMA_UPDATE")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or_else(|_| {
            tracing::warn!(
                "Invalid DB_SCHEMA_UPDATE value, defaulting to false. Use 'true' or 'false'."
            );
            false
        });

    if should_update_schema {
        create_tables(&db).await?;
    } else {
        info!("Skipping database schema synchronization (DB_SCHEMA_UPDATE is not true).");
    }

    Ok(db)
}

/// 엔티티 정의로 테이블과 인덱스를 생성합니다. 이미 있으면 건너뜁니다.
pub async fn create_tables<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    info!("Starting database schema synchronization...");

    // Order matters for foreign keys! (Parent first, then Child)
    create_table_if_not_exists(db, &schema, department::Entity).await?;
    create_table_if_not_exists(db, &schema, survey::Entity).await?;
    create_table_if_not_exists(db, &schema, survey_question::Entity).await?;
    create_table_if_not_exists(db, &schema, answer_choice::Entity).await?;
    create_table_if_not_exists(db, &schema, survey_response::Entity).await?;
    create_table_if_not_exists(db, &schema, survey_response_answer::Entity).await?;

    // 통계 조회(설문 + 기간) 최적화
    create_index_if_not_exists(
        db,
        "idx_survey_response_survey_timestamp",
        "survey_response",
        &["survey_id", "timestamp"],
    )
    .await?;
    // 선택지 조회/생성 (값, 질문)
    create_index_if_not_exists(
        db,
        "idx_answer_choice_question_value",
        "answer_choice",
        &["question_id", "choice_value"],
    )
    .await?;
    create_index_if_not_exists(
        db,
        "idx_survey_response_answer_response",
        "survey_response_answer",
        &["response_id"],
    )
    .await?;

    info!("Database schema synchronization completed.");
    Ok(())
}

async fn create_index_if_not_exists<C: ConnectionTrait>(
    db: &C,
    index_name: &str,
    table_name: &str,
    columns: &[&str],
) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let cols = columns.join(", ");
    let sql = format!("CREATE INDEX {} ON {} ({})", index_name, table_name, cols);
    let stmt = Statement::from_string(backend, sql);
    match db.execute(stmt).await {
        Ok(_) => Ok(()),
        Err(e) => {
            let err_str = e.to_string().to_lowercase();
            if err_str.contains("duplicate") || err_str.contains("exists") {
                Ok(())
            } else {
                tracing::error!("Failed to create index {}: {}", index_name, e);
                Err(e)
            }
        }
    }
}

async fn create_table_if_not_exists<C, E>(db: &C, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: sea_orm::EntityTrait,
{
    let backend = db.get_database_backend();
    let table_name = entity.table_name().to_string();
    let create_stmt: Statement =
        backend.build(schema.create_table_from_entity(entity).if_not_exists());

    db.execute(create_stmt).await.map(|_| ()).map_err(|e| {
        tracing::error!(table = %table_name, "Failed to create table: {}", e);
        e
    })
}
