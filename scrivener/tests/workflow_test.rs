//! Workflow tests against the scripted model client.

#![allow(clippy::unwrap_used, clippy::panic, clippy::clone_on_ref_ptr)]

use std::sync::Arc;
use std::time::Duration;

use assert_fs::TempDir;
use scrivener::prelude::*;
use scrivener::workflow::refinement_context;

fn orchestrator(mock: &Arc<MockProvider>) -> Orchestrator {
    Orchestrator::new(mock.clone(), &Settings::default()).unwrap()
}

fn user_prompt(request: &ChatRequest) -> String {
    request
        .messages
        .iter()
        .filter(|m| m.role == Role::User)
        .filter_map(Message::text)
        .collect()
}

fn steps(history: &[AuditRecord]) -> Vec<&str> {
    history.iter().map(|r| r.step.as_str()).collect()
}

fn simple_mock() -> MockProvider {
    MockProvider::new()
        .with_response("research", "R")
        .with_response("fact_check", "Overall accuracy: HIGH")
        .with_response("write", "W")
}

fn comparative_mock() -> MockProvider {
    MockProvider::new()
        .with_responses("research", ["E", "S", "P"])
        .with_response("cross_check", "C")
        .with_response("fact_check", "F: LOW")
        .with_response("write_comparison", "CMP")
}

#[tokio::test]
async fn test_simple_workflow() {
    let mock = Arc::new(simple_mock());
    let mut orchestrator = orchestrator(&mock);

    let result = orchestrator
        .simple_workflow(&SimpleRequest::new("tides"))
        .await
        .unwrap();

    assert_eq!(result.workflow_type, WorkflowType::Simple);
    assert_eq!(result.topic, "tides");
    assert_eq!(result.research.as_ref().unwrap().findings, "R");
    let review = result.fact_check.as_ref().unwrap();
    assert_eq!(review.fact_check_report, "Overall accuracy: HIGH");
    assert_eq!(review.status, ReviewStatus::Reviewed);
    assert_eq!(review.accuracy_rating, Some(AccuracyRating::High));
    assert_eq!(result.final_content(), Some("W"));
    assert!(result.perspectives.is_none());

    assert_eq!(mock.call_count(), 3);
    assert_eq!(mock.role_sequence(), ["research", "fact_check", "write"]);
    assert_eq!(steps(&result.workflow_history), ["research", "fact_check", "write"]);
    assert_eq!(result.workflow_history, orchestrator.history());

    let requests = mock.requests();
    assert!(user_prompt(&requests[0]).contains("General overview needed"));
    assert!(user_prompt(&requests[1]).contains('R'));
    let write_prompt = user_prompt(&requests[2]);
    assert!(write_prompt.contains("Overall accuracy: HIGH"));
    assert!(write_prompt.contains("informative"));
}

#[tokio::test]
async fn test_simple_workflow_passes_style_and_length() {
    let mock = Arc::new(simple_mock());
    let mut orchestrator = orchestrator(&mock);

    let request = SimpleRequest::new("tides")
        .with_context("Focus on coastal flooding")
        .with_style(WritingStyle::Technical)
        .with_length(ContentLength::Short);
    let result = orchestrator.simple_workflow(&request).await.unwrap();

    assert_eq!(result.article.unwrap().style, Some(WritingStyle::Technical));
    let requests = mock.requests();
    assert!(user_prompt(&requests[0]).contains("Focus on coastal flooding"));
    let write_prompt = user_prompt(&requests[2]);
    assert!(write_prompt.contains("technical"));
    assert!(write_prompt.contains(ContentLength::Short.guidance()));
}

#[tokio::test]
async fn test_iterative_workflow_keeps_second_round() {
    let mock = Arc::new(
        MockProvider::new()
            .with_responses("research", ["R1", "R2"])
            .with_responses("fact_check", ["F1: LOW", "F2: HIGH"])
            .with_response("write", "W"),
    );
    let mut orchestrator = orchestrator(&mock);

    let result = orchestrator
        .iterative_workflow(&IterativeRequest::new("tides"))
        .await
        .unwrap();

    assert_eq!(mock.call_count(), 5);
    assert_eq!(
        mock.role_sequence(),
        ["research", "fact_check", "research", "fact_check", "write"]
    );
    assert_eq!(
        steps(&result.workflow_history),
        [
            "initial_research",
            "fact_check",
            "refined_research",
            "final_fact_check",
            "write"
        ]
    );

    assert_eq!(result.research.as_ref().unwrap().findings, "R2");
    let review = result.fact_check.as_ref().unwrap();
    assert_eq!(review.fact_check_report, "F2: HIGH");
    assert_eq!(review.status, ReviewStatus::Reviewed);
    assert_eq!(result.final_content(), Some("W"));

    let first_round = &result.workflow_history[1].data;
    assert_eq!(first_round.text(), "F1: LOW");

    let requests = mock.requests();
    assert!(user_prompt(&requests[2]).contains(&refinement_context("F1: LOW")));
    assert!(user_prompt(&requests[3]).contains("R2"));
    let write_prompt = user_prompt(&requests[4]);
    assert!(write_prompt.contains("R2"));
    assert!(write_prompt.contains("F2: HIGH"));
}

#[tokio::test]
async fn test_comparative_workflow() {
    let mock = Arc::new(comparative_mock());
    let mut orchestrator = orchestrator(&mock);

    let request = ComparativeRequest::new("remote work", ["economic", "social"]);
    let result = orchestrator.comparative_workflow(&request).await.unwrap();

    assert_eq!(mock.call_count(), 2 + 3);
    assert_eq!(
        mock.role_sequence(),
        ["research", "research", "fact_check", "fact_check", "write"]
    );
    assert_eq!(
        steps(&result.workflow_history),
        [
            "research_perspective_1",
            "research_perspective_2",
            "cross_check",
            "overall_fact_check",
            "write_comparison"
        ]
    );

    assert_eq!(
        result.perspectives.as_deref().unwrap(),
        [Perspective::new("economic", "E"), Perspective::new("social", "S")]
    );
    let cross_check = result.cross_check.as_ref().unwrap();
    assert_eq!(cross_check.cross_check_report, "C");
    assert_eq!(cross_check.sources, ["economic", "social"]);
    assert_eq!(result.fact_check.as_ref().unwrap().status, ReviewStatus::Flagged);
    assert!(result.article.is_none());
    assert_eq!(result.final_content(), Some("CMP"));

    let requests = mock.requests();
    assert!(user_prompt(&requests[0]).contains("Focus on this perspective: economic"));
    assert!(user_prompt(&requests[1]).contains("Focus on this perspective: social"));
    assert!(user_prompt(&requests[3]).contains("economic:\nE\n\n---\n\nsocial:\nS"));
    let write_prompt = user_prompt(&requests[4]);
    assert!(write_prompt.contains("Perspective 1 (economic):\nE"));
    assert!(write_prompt.contains("Perspective 2 (social):\nS"));
    assert!(write_prompt.contains("Cross-Check Analysis:\nC"));
}

#[tokio::test]
async fn test_comparative_keeps_input_order_when_first_finishes_last() {
    let mock = Arc::new(comparative_mock().delay_call(1, Duration::from_millis(50)));
    let mut orchestrator = orchestrator(&mock);

    let request = ComparativeRequest::new("remote work", ["economic", "social", "political"]);
    let result = orchestrator.comparative_workflow(&request).await.unwrap();

    assert_eq!(mock.call_count(), 3 + 3);
    let names: Vec<_> = result
        .perspectives
        .as_ref()
        .unwrap()
        .iter()
        .map(|p| (p.name.as_str(), p.findings.as_str()))
        .collect();
    assert_eq!(names, [("economic", "E"), ("social", "S"), ("political", "P")]);
    assert_eq!(
        steps(&result.workflow_history[..3]),
        [
            "research_perspective_1",
            "research_perspective_2",
            "research_perspective_3"
        ]
    );
    assert_eq!(result.workflow_history[0].data.text(), "E");
}

#[tokio::test]
async fn test_comparative_single_perspective_still_cross_checks() {
    let mock = Arc::new(comparative_mock());
    let mut orchestrator = orchestrator(&mock);

    let result = orchestrator
        .comparative_workflow(&ComparativeRequest::new("remote work", ["economic"]))
        .await
        .unwrap();

    assert_eq!(mock.call_count(), 4);
    assert_eq!(result.cross_check.unwrap().sources, ["economic"]);
}

#[tokio::test]
async fn test_comparative_sequential_research() {
    let mock = Arc::new(comparative_mock());
    let mut settings = Settings::default();
    settings.workflow.parallel_research = false;
    let mut orchestrator = Orchestrator::new(mock.clone(), &settings).unwrap();

    let request = ComparativeRequest::new("remote work", ["economic", "social"]);
    let result = orchestrator.comparative_workflow(&request).await.unwrap();

    assert_eq!(mock.call_count(), 5);
    assert_eq!(result.perspectives.unwrap()[1], Perspective::new("social", "S"));
}

#[tokio::test]
async fn test_failure_keeps_completed_steps() {
    let mock = Arc::new(simple_mock().fail_on_call(2, LlmError::network("connection reset")));
    let mut orchestrator = orchestrator(&mock);

    let err = orchestrator
        .simple_workflow(&SimpleRequest::new("tides"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Llm(LlmError::Network(_))));
    assert_eq!(mock.call_count(), 2);
    assert_eq!(steps(orchestrator.history()), ["research"]);
}

#[tokio::test]
async fn test_iterative_failure_on_fourth_call() {
    let mock = Arc::new(
        simple_mock().fail_on_call(4, LlmError::http_status(500, "internal error")),
    );
    let mut orchestrator = orchestrator(&mock);

    assert!(
        orchestrator
            .iterative_workflow(&IterativeRequest::new("tides"))
            .await
            .is_err()
    );
    assert_eq!(mock.call_count(), 4);
    assert_eq!(
        steps(orchestrator.history()),
        ["initial_research", "fact_check", "refined_research"]
    );
}

#[tokio::test]
async fn test_comparative_failure_records_earlier_perspectives_only() {
    let mock = Arc::new(comparative_mock().fail_on_call(2, LlmError::rate_limited("mock")));
    let mut orchestrator = orchestrator(&mock);

    let request = ComparativeRequest::new("remote work", ["economic", "social", "political"]);
    let err = orchestrator.comparative_workflow(&request).await.unwrap_err();

    assert!(matches!(err, Error::Llm(LlmError::RateLimited { .. })));
    assert_eq!(steps(orchestrator.history()), ["research_perspective_1"]);
    assert_eq!(mock.role_sequence(), ["research", "research", "research"]);
}

#[tokio::test]
async fn test_sequential_failure_stops_research() {
    let mock = Arc::new(comparative_mock().fail_on_call(2, LlmError::network("reset")));
    let mut settings = Settings::default();
    settings.workflow.parallel_research = false;
    let mut orchestrator = Orchestrator::new(mock.clone(), &settings).unwrap();

    let request = ComparativeRequest::new("remote work", ["economic", "social", "political"]);
    assert!(orchestrator.comparative_workflow(&request).await.is_err());
    assert_eq!(mock.call_count(), 2);
    assert_eq!(steps(orchestrator.history()), ["research_perspective_1"]);
}

#[tokio::test]
async fn test_retry_policy_recovers_transient_failure() {
    let mock = Arc::new(simple_mock().fail_on_call(1, LlmError::network("reset")));
    let mut settings = Settings::default();
    settings.retry = RetryPolicy::none()
        .with_max_retries(1)
        .with_initial_backoff_ms(1);
    let mut orchestrator = Orchestrator::new(mock.clone(), &settings).unwrap();

    let result = orchestrator
        .simple_workflow(&SimpleRequest::new("tides"))
        .await
        .unwrap();

    assert_eq!(mock.call_count(), 4);
    assert_eq!(result.workflow_history.len(), 3);
}

#[tokio::test]
async fn test_invalid_requests_make_no_calls() {
    let mock = Arc::new(comparative_mock());
    let mut orchestrator = orchestrator(&mock);

    let blank = orchestrator
        .simple_workflow(&SimpleRequest::new("  "))
        .await
        .unwrap_err();
    assert!(matches!(blank, Error::InvalidInput(_)));

    let none = orchestrator
        .comparative_workflow(&ComparativeRequest::new("remote work", Vec::<String>::new()))
        .await
        .unwrap_err();
    assert!(matches!(none, Error::InvalidInput(_)));

    let duplicate = orchestrator
        .comparative_workflow(&ComparativeRequest::new("remote work", ["social", "social"]))
        .await
        .unwrap_err();
    assert!(matches!(duplicate, Error::InvalidInput(_)));

    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_each_run_starts_fresh_history() {
    let mock = Arc::new(simple_mock());
    let mut orchestrator = orchestrator(&mock);
    let request = SimpleRequest::new("tides");

    let first = orchestrator.simple_workflow(&request).await.unwrap();
    let second = orchestrator.simple_workflow(&request).await.unwrap();

    let shape = |result: &WorkflowResult| {
        result
            .workflow_history
            .iter()
            .map(|r| (r.step.clone(), r.agent.clone(), r.data.text().to_owned()))
            .collect::<Vec<_>>()
    };
    assert_eq!(shape(&first), shape(&second));
    assert_eq!(orchestrator.history().len(), 3);

    assert!(
        orchestrator
            .simple_workflow(&SimpleRequest::new(""))
            .await
            .is_err()
    );
    assert!(orchestrator.history().is_empty());
}

#[tokio::test]
async fn test_summarize_is_not_recorded() {
    let mock = Arc::new(simple_mock().with_response("write_summary", "Short version"));
    let mut orchestrator = orchestrator(&mock);

    let result = orchestrator
        .simple_workflow(&SimpleRequest::new("tides"))
        .await
        .unwrap();
    let summary = orchestrator.summarize(&result).await.unwrap();

    assert_eq!(summary, "Short version");
    assert_eq!(mock.call_count(), 4);
    assert_eq!(orchestrator.history().len(), 3);

    let request = &mock.requests()[3];
    assert_eq!(request.task_tag(), Some("write_summary"));
    assert!(user_prompt(request).contains('W'));
}

#[tokio::test]
async fn test_transcript_round_trip() {
    let mock = Arc::new(comparative_mock());
    let mut orchestrator = orchestrator(&mock);
    let result = orchestrator
        .comparative_workflow(&ComparativeRequest::new("remote work", ["economic", "social"]))
        .await
        .unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir
        .path()
        .join("runs")
        .join(WorkflowType::Comparative.default_output_file());
    result.save(&path).await.unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["workflow_type"], "comparative");
    assert_eq!(json["workflow_history"][2]["step"], "cross_check");
    assert_eq!(json["workflow_history"][2]["agent"], "FactChecker");
    assert!(json.get("article").is_none());

    let loaded = WorkflowResult::load(&path).await.unwrap();
    assert_eq!(loaded, result);
}

#[tokio::test]
async fn test_invalid_settings_are_rejected() {
    let mut settings = Settings::default();
    settings.agents.writer.temperature = 3.0;

    let err = Orchestrator::new(Arc::new(MockProvider::new()), &settings).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
