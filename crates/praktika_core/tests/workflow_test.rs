//! Integration tests for the submission workflow state machine.

mod support;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use praktika_core::domain::FieldValue;
use praktika_core::forms;
use praktika_core::ports::{MarketplaceApi, PortError};
use praktika_core::workflow::{SubmissionWorkflow, SubmitError, WorkflowState};

use support::MockApi;

/// A student registration with every step filled in validly.
fn filled_student_registration() -> SubmissionWorkflow {
    let mut wf = forms::registration();
    wf.set_field("role", "student");
    wf.next().unwrap();
    wf.set_field("name", "John Doe");
    wf.set_field("email", "john@example.com");
    wf.set_field("password", "secret1");
    wf.set_field("confirmPassword", "secret1");
    wf.next().unwrap();
    wf.set_field("university", "University of Dar es Salaam");
    wf.set_field("fieldOfStudy", "Computer Science");
    wf
}

#[test]
fn starts_editing_the_first_step() {
    let wf = forms::registration();
    assert_eq!(wf.current_step(), Some(1));
    assert_eq!(wf.step_count(), 3);
    assert_eq!(wf.inline_error(), None);
}

#[test]
fn missing_required_field_blocks_advancing() {
    let mut wf = forms::registration();
    wf.set_field("role", "student");
    wf.next().unwrap();
    assert_eq!(wf.current_step(), Some(2));

    // Nothing filled in on the credentials step.
    let err = wf.next().unwrap_err();
    assert_eq!(err.0, "Name is required");
    assert_eq!(wf.current_step(), Some(2));
    assert_eq!(wf.inline_error(), Some("Name is required"));
}

#[test]
fn short_password_is_rejected() {
    let mut wf = forms::registration();
    wf.set_field("role", "student");
    wf.next().unwrap();
    wf.set_field("name", "John Doe");
    wf.set_field("email", "john@example.com");
    wf.set_field("password", "abc");
    wf.set_field("confirmPassword", "abc");

    let err = wf.next().unwrap_err();
    assert_eq!(err.0, "Password must be at least 6 characters long");
    assert_eq!(wf.current_step(), Some(2));
}

#[tokio::test]
async fn password_mismatch_is_rejected_before_any_network_call() {
    let api = Arc::new(MockApi::new());
    let mut wf = forms::registration();
    wf.set_field("role", "student");
    wf.next().unwrap();
    wf.set_field("name", "John Doe");
    wf.set_field("email", "john@example.com");
    wf.set_field("password", "secret1");
    wf.set_field("confirmPassword", "secret2");

    let err = wf.next().unwrap_err();
    assert_eq!(err.0, "Passwords do not match");
    assert_eq!(wf.current_step(), Some(2));

    // Forcing a submit from here is refused too; nothing goes out.
    let outcome = wf
        .submit_with(|payload| {
            let api = Arc::clone(&api);
            async move { api.register(&payload).await.map(|_| ()) }
        })
        .await;

    assert!(matches!(outcome, Err(SubmitError::NotReady)));
    assert_eq!(api.calls.register.load(Ordering::SeqCst), 0);
}

#[test]
fn prev_steps_back_without_revalidating() {
    let mut wf = forms::registration();
    wf.set_field("role", "student");
    wf.next().unwrap();
    wf.set_field("name", "John Doe");

    // The half-finished step can always be left backwards.
    wf.prev();
    assert_eq!(wf.current_step(), Some(1));
    wf.prev();
    assert_eq!(wf.current_step(), Some(1));
}

#[test]
fn submit_revalidates_every_step() {
    let mut wf = filled_student_registration();
    assert_eq!(wf.current_step(), Some(3));

    // The final step is missing a role-conditional required field.
    wf.set_field("fieldOfStudy", "");
    let err = wf.begin_submit().unwrap_err();
    assert!(matches!(err, SubmitError::Invalid(ref msg) if msg == "Field of study is required"));
    assert_eq!(wf.current_step(), Some(3));
}

#[test]
fn non_numeric_integer_field_cannot_leave_editing() {
    let mut wf = filled_student_registration();
    // A student does not fill these, but an organization's year must parse.
    let mut wf_org = forms::registration();
    wf_org.set_field("role", "organization");
    wf_org.next().unwrap();
    wf_org.set_field("companyName", "Vodacom Tanzania Ltd");
    wf_org.set_field("email", "hr@vodacom.example");
    wf_org.set_field("password", "secret1");
    wf_org.set_field("confirmPassword", "secret1");
    wf_org.next().unwrap();
    wf_org.set_field("industry", "telecommunications");
    wf_org.set_field("description", "Mobile network operator");
    wf_org.set_field("location", "Dar es Salaam");
    wf_org.set_field("foundedYear", "two thousand");

    let err = wf_org.begin_submit().unwrap_err();
    assert!(matches!(err, SubmitError::Invalid(ref msg) if msg == "Founded year must be a number"));
    assert_eq!(wf_org.current_step(), Some(3));

    // The valid student draft is unaffected by any of this.
    assert!(wf.begin_submit().is_ok());
}

#[tokio::test]
async fn server_failure_preserves_every_entered_value() {
    let api = Arc::new(
        MockApi::new().with_submit_error(PortError::Rejected(
            "You have already applied for this internship".to_string(),
        )),
    );
    let mut wf = forms::application(1, 42);
    wf.set_field("coverLetter", "Dear team, ...");
    wf.set_field("whyInterested", "The stack matches my studies.");
    wf.set_field("availability", "June through September");

    let outcome = wf
        .submit_with(|payload| {
            let api = Arc::clone(&api);
            async move { api.submit_application(&payload).await }
        })
        .await;

    assert!(matches!(outcome, Err(SubmitError::Rejected(_))));
    assert_eq!(
        wf.state(),
        &WorkflowState::Failed {
            message: "You have already applied for this internship".to_string()
        }
    );

    wf.resume();
    assert_eq!(wf.current_step(), Some(1));
    assert_eq!(wf.field("coverLetter"), Some("Dear team, ..."));
    assert_eq!(wf.field("whyInterested"), Some("The stack matches my studies."));
    assert_eq!(wf.field("availability"), Some("June through September"));
    assert_eq!(
        wf.inline_error(),
        Some("You have already applied for this internship")
    );
}

#[tokio::test]
async fn double_submit_issues_exactly_one_call() {
    let api = Arc::new(MockApi::new());
    let mut wf = forms::application(1, 42);
    wf.set_field("coverLetter", "Dear team, ...");
    wf.set_field("whyInterested", "The stack matches my studies.");

    // First trigger takes the payload and parks the machine in Submitting.
    let payload = wf.begin_submit().unwrap();
    assert!(wf.is_submitting());

    // A second trigger while in flight is refused outright.
    assert!(matches!(wf.begin_submit(), Err(SubmitError::NotReady)));

    api.submit_application(&payload).await.unwrap();
    wf.complete(Ok(()));
    assert_eq!(api.calls.submit_application.load(Ordering::SeqCst), 1);
    assert_eq!(wf.state(), &WorkflowState::Succeeded);
}

#[test]
fn success_clears_the_draft() {
    let mut wf = forms::application(1, 42);
    wf.set_field("coverLetter", "Dear team, ...");
    wf.set_field("whyInterested", "The stack matches my studies.");

    wf.begin_submit().unwrap();
    wf.complete(Ok(()));

    assert_eq!(wf.state(), &WorkflowState::Succeeded);
    assert_eq!(wf.field("coverLetter"), None);
}

#[test]
fn stale_completion_is_discarded() {
    let mut wf = forms::application(1, 42);
    wf.set_field("coverLetter", "Dear team, ...");

    // No submission is in flight; a late failure report changes nothing.
    wf.complete(Err("timed out".to_string()));
    assert_eq!(wf.current_step(), Some(1));
    assert_eq!(wf.field("coverLetter"), Some("Dear team, ..."));
}

#[test]
fn payload_splits_lists_and_parses_numbers() {
    let mut wf = forms::internship_posting(5);
    wf.set_field("title", "Backend Intern");
    wf.set_field("description", "Work on the placement API");
    wf.set_field("location", "Zanzibar");
    wf.set_field("spotsAvailable", "3");
    wf.set_field("requirements", "Rust\nSQL basics\n\n  Git  ");
    wf.set_field("responsibilities", "Code reviews, On-call shadowing");

    let payload = wf.begin_submit().unwrap();

    assert_eq!(
        payload.get("spotsAvailable"),
        Some(&FieldValue::Number(3))
    );
    assert_eq!(
        payload.get("requirements"),
        Some(&FieldValue::List(vec![
            "Rust".to_string(),
            "SQL basics".to_string(),
            "Git".to_string()
        ]))
    );
    assert_eq!(
        payload.get("responsibilities"),
        Some(&FieldValue::List(vec![
            "Code reviews".to_string(),
            "On-call shadowing".to_string()
        ]))
    );
    // The owning organization is attached from context.
    assert_eq!(payload.get("organizationId"), Some(&FieldValue::Number(5)));
}

#[test]
fn registration_payload_attaches_no_confirmation_field() {
    let mut wf = filled_student_registration();
    let payload = wf.begin_submit().unwrap();

    assert_eq!(
        payload.get("email"),
        Some(&FieldValue::Text("john@example.com".to_string()))
    );
    assert!(payload.get("confirmPassword").is_none());
}

#[test]
fn application_payload_carries_ownership_ids() {
    let mut wf = forms::application(7, 42);
    wf.set_field("coverLetter", "Dear team, ...");
    wf.set_field("whyInterested", "The stack matches my studies.");

    let payload = wf.begin_submit().unwrap();
    assert_eq!(payload.get("studentId"), Some(&FieldValue::Number(7)));
    assert_eq!(payload.get("internshipId"), Some(&FieldValue::Number(42)));
}
