mod common;

use common::{create_test_pool, create_test_profile, create_test_record};

use hs_core::{CoreError, MedicalRecordRepository, RecordType, Role};
use hs_db::SqliteMedicalRecordRepository;

use chrono::Duration;
use googletest::prelude::*;
use uuid::Uuid;

#[tokio::test]
async fn given_record_when_created_then_listed_for_patient() {
    // Given
    let pool = create_test_pool().await;
    create_test_profile(&pool, "patient-1", Role::Patient).await;
    create_test_profile(&pool, "doctor-1", Role::Doctor).await;
    let repo = SqliteMedicalRecordRepository::new(pool);
    let mut record = create_test_record("patient-1", "Blood panel");
    record.doctor_id = Some("doctor-1".to_string());
    record.file_url = Some("records/patient-1/blood.pdf".to_string());

    // When
    repo.create(&record).await.unwrap();

    // Then
    let listed = repo.list_for_patient("patient-1").await.unwrap();
    assert_that!(listed.len(), eq(1));
    assert_that!(listed[0].title, eq("Blood panel"));
    assert_that!(listed[0].record_type, eq(RecordType::LabReport));
    assert_that!(listed[0].doctor_id.as_deref(), some(eq("doctor-1")));
    assert_that!(listed[0].file_url, eq(&record.file_url));
}

#[tokio::test]
async fn given_records_of_different_ages_when_listed_then_newest_first() {
    // Given
    let pool = create_test_pool().await;
    create_test_profile(&pool, "patient-1", Role::Patient).await;
    let repo = SqliteMedicalRecordRepository::new(pool);
    let mut older = create_test_record("patient-1", "X-ray");
    older.created_at -= Duration::days(30);
    let newer = create_test_record("patient-1", "Prescription");
    repo.create(&older).await.unwrap();
    repo.create(&newer).await.unwrap();

    // When
    let listed = repo.list_for_patient("patient-1").await.unwrap();

    // Then
    let titles: Vec<&str> = listed.iter().map(|r| r.title.as_str()).collect();
    assert_that!(titles, eq(&vec!["Prescription", "X-ray"]));
}

#[tokio::test]
async fn given_blank_title_when_created_then_returns_validation_error() {
    // Given
    let pool = create_test_pool().await;
    create_test_profile(&pool, "patient-1", Role::Patient).await;
    let repo = SqliteMedicalRecordRepository::new(pool);
    let record = create_test_record("patient-1", "   ");

    // When
    let result = repo.create(&record).await;

    // Then
    assert!(matches!(result, Err(CoreError::Validation { .. })));
}

#[tokio::test]
async fn given_existing_record_when_deleted_then_returns_true_and_is_gone() {
    // Given
    let pool = create_test_pool().await;
    create_test_profile(&pool, "patient-1", Role::Patient).await;
    let repo = SqliteMedicalRecordRepository::new(pool);
    let record = create_test_record("patient-1", "Old scan");
    repo.create(&record).await.unwrap();

    // When
    let deleted = repo.delete(record.id).await.unwrap();

    // Then
    assert_that!(deleted, eq(true));
    let listed = repo.list_for_patient("patient-1").await.unwrap();
    assert_that!(listed, is_empty());
}

#[tokio::test]
async fn given_unknown_id_when_deleted_then_returns_false() {
    // Given
    let pool = create_test_pool().await;
    let repo = SqliteMedicalRecordRepository::new(pool);

    // When
    let deleted = repo.delete(Uuid::new_v4()).await.unwrap();

    // Then
    assert_that!(deleted, eq(false));
}
