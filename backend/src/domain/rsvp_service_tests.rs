//! Tests for the RSVP submission service.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use super::*;
use crate::domain::ports::{MockNotifier, MockRsvpRepository};
use crate::domain::{AccessCode, ErrorCode, MockAccessCodeGenerator};
use chrono::Utc;
use mockall::Sequence;
use rstest::rstest;

const ORGANIZER: &str = "organizers@example.com";

fn code(index: u32) -> AccessCode {
    AccessCode::new(format!("WED-{index:05}-0000")).expect("fixture code")
}

fn sequential_generator() -> MockAccessCodeGenerator {
    let counter = AtomicU32::new(1);
    let mut generator = MockAccessCodeGenerator::new();
    generator
        .expect_generate()
        .returning(move || code(counter.fetch_add(1, Ordering::SeqCst)));
    generator
}

fn stored(record: &NewRsvp) -> Rsvp {
    Rsvp {
        id: 7,
        name: record.submission.name().to_owned(),
        email: record.submission.email().to_owned(),
        goodwill_message: record.submission.goodwill_message().map(str::to_owned),
        access_code: record.access_code.clone(),
        created_at: Utc::now(),
    }
}

fn make_service(
    repository: MockRsvpRepository,
    notifier: MockNotifier,
) -> RsvpService<MockRsvpRepository, MockNotifier> {
    RsvpService::new(
        Arc::new(repository),
        Arc::new(notifier),
        Arc::new(sequential_generator()),
        vec![ORGANIZER.to_owned()],
    )
}

fn request(name: &str, email: &str, message: Option<&str>) -> RsvpSubmissionRequest {
    RsvpSubmissionRequest {
        name: Some(name.to_owned()),
        email: Some(email.to_owned()),
        goodwill_message: message.map(str::to_owned),
    }
}

fn accepting_repository() -> MockRsvpRepository {
    let mut repository = MockRsvpRepository::new();
    repository
        .expect_access_code_exists()
        .returning(|_| Ok(false));
    repository
        .expect_insert()
        .times(1)
        .returning(|record| Ok(stored(record)));
    repository
}

#[tokio::test]
async fn submit_stores_then_notifies_both_parties() {
    let mut seq = Sequence::new();
    let mut repository = MockRsvpRepository::new();
    repository
        .expect_access_code_exists()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(false));
    repository
        .expect_insert()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|record| Ok(stored(record)));

    let mut notifier = MockNotifier::new();
    notifier
        .expect_send()
        .withf(|message| message.to == vec![ORGANIZER.to_owned()])
        .times(1)
        .returning(|_| Ok(()));
    notifier
        .expect_send()
        .withf(|message| message.to == vec!["ada@example.com".to_owned()])
        .times(1)
        .returning(|_| Ok(()));

    let receipt = make_service(repository, notifier)
        .submit(request("Ada Lovelace", "ada@example.com", Some("Congrats!")))
        .await
        .expect("submission succeeds");

    assert_eq!(receipt.name, "Ada Lovelace");
    assert_eq!(receipt.email, "ada@example.com");
    assert_eq!(receipt.access_code, code(1));
}

#[rstest]
#[case(None, Some("ada@example.com"), None, "name")]
#[case(Some("  "), Some("ada@example.com"), None, "name")]
#[case(Some("Ada"), None, None, "email")]
#[case(Some("Ada"), Some("not-an-email"), None, "email")]
#[tokio::test]
async fn invalid_input_never_touches_the_store(
    #[case] name: Option<&str>,
    #[case] email: Option<&str>,
    #[case] message: Option<&str>,
    #[case] field: &str,
) {
    let mut repository = MockRsvpRepository::new();
    repository.expect_access_code_exists().never();
    repository.expect_insert().never();
    let mut notifier = MockNotifier::new();
    notifier.expect_send().never();

    let error = make_service(repository, notifier)
        .submit(RsvpSubmissionRequest {
            name: name.map(str::to_owned),
            email: email.map(str::to_owned),
            goodwill_message: message.map(str::to_owned),
        })
        .await
        .expect_err("validation fails");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("details");
    assert_eq!(details["field"], field);
}

#[tokio::test]
async fn overlong_message_is_rejected() {
    let mut repository = MockRsvpRepository::new();
    repository.expect_insert().never();
    let mut notifier = MockNotifier::new();
    notifier.expect_send().never();

    let long = "x".repeat(251);
    let error = make_service(repository, notifier)
        .submit(request("Ada", "ada@example.com", Some(&long)))
        .await
        .expect_err("message too long");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "message too long");
}

#[tokio::test]
async fn notification_failures_do_not_fail_the_submission() {
    let mut notifier = MockNotifier::new();
    notifier
        .expect_send()
        .times(2)
        .returning(|_| Err(NotifierError::transport("connection reset")));

    let receipt = make_service(accepting_repository(), notifier)
        .submit(request("Ada", "ada@example.com", None))
        .await
        .expect("stored rsvp still reported");

    assert_eq!(receipt.access_code, code(1));
}

#[tokio::test]
async fn exhausted_code_space_is_a_generic_internal_error() {
    let mut repository = MockRsvpRepository::new();
    repository
        .expect_access_code_exists()
        .times(10)
        .returning(|_| Ok(true));
    repository.expect_insert().never();
    let mut notifier = MockNotifier::new();
    notifier.expect_send().never();

    let error = make_service(repository, notifier)
        .submit(request("Ada", "ada@example.com", None))
        .await
        .expect_err("exhausted");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), "failed to save RSVP");
    assert_eq!(
        error.details().expect("details")["code"],
        "code_space_exhausted"
    );
}

#[tokio::test]
async fn duplicate_on_insert_reissues_a_code() {
    let mut repository = MockRsvpRepository::new();
    repository
        .expect_access_code_exists()
        .times(2)
        .returning(|_| Ok(false));
    let first = code(1);
    repository.expect_insert().times(2).returning(move |record| {
        if record.access_code == first {
            Err(RsvpRepositoryError::duplicate_access_code(first.as_str()))
        } else {
            Ok(stored(record))
        }
    });
    let mut notifier = MockNotifier::new();
    notifier.expect_send().returning(|_| Ok(()));

    let receipt = make_service(repository, notifier)
        .submit(request("Ada", "ada@example.com", None))
        .await
        .expect("second code stored");

    assert_eq!(receipt.access_code, code(2));
}

#[tokio::test]
async fn persistent_insert_race_reports_conflict() {
    let mut repository = MockRsvpRepository::new();
    repository
        .expect_access_code_exists()
        .returning(|_| Ok(false));
    repository
        .expect_insert()
        .times(MAX_WRITE_ATTEMPTS as usize)
        .returning(|record| {
            Err(RsvpRepositoryError::duplicate_access_code(
                record.access_code.as_str(),
            ))
        });
    let mut notifier = MockNotifier::new();
    notifier.expect_send().never();

    let error = make_service(repository, notifier)
        .submit(request("Ada", "ada@example.com", None))
        .await
        .expect_err("conflict");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[case(RsvpRepositoryError::connection("refused"), ErrorCode::InternalError)]
#[case(RsvpRepositoryError::query("syntax error"), ErrorCode::InternalError)]
#[tokio::test]
async fn insert_failures_map_to_error_codes(
    #[case] failure: RsvpRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repository = MockRsvpRepository::new();
    repository
        .expect_access_code_exists()
        .returning(|_| Ok(false));
    repository
        .expect_insert()
        .times(1)
        .return_once(move |_| Err(failure));
    let mut notifier = MockNotifier::new();
    notifier.expect_send().never();

    let error = make_service(repository, notifier)
        .submit(request("Ada", "ada@example.com", None))
        .await
        .expect_err("insert fails");

    assert_eq!(error.code(), expected);
    assert_eq!(error.message(), "failed to save RSVP");
}

#[tokio::test]
async fn organizer_email_is_skipped_without_recipients() {
    let mut notifier = MockNotifier::new();
    notifier
        .expect_send()
        .withf(|message| message.to == vec!["ada@example.com".to_owned()])
        .times(1)
        .returning(|_| Ok(()));

    let service = RsvpService::new(
        Arc::new(accepting_repository()),
        Arc::new(notifier),
        Arc::new(sequential_generator()),
        Vec::new(),
    );

    service
        .submit(request("Ada", "ada@example.com", None))
        .await
        .expect("submission succeeds");
}
