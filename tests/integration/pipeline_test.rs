//! Answer Pipeline Integration Tests
//!
//! Runs `SurveyFiller` against a scripted generator and checks what ends up
//! in the store.

use std::sync::Arc;

use persona_survey::services::prompt::{PromptBuilder, PromptTemplates};
use persona_survey::services::validation::{AnswerValidator, ValidationWarning};
use persona_survey::storage::{MemoryStore, SurveyStore};
use persona_survey::utils::error::AppError;
use persona_survey::{AnalyticsEngine, SurveyFiller};
use persona_survey_core::{Answer, QuestionType, RatingScale, Survey};

use crate::support::{filler, personas, ReadOnlyStore, ScriptedGenerator};

const SATISFACTION: [&str; 3] = ["滿意", "普通", "不滿意"];

fn options(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

async fn stored(store: &dyn SurveyStore, survey: &Survey) {
    store.save_survey(survey).await.unwrap();
}

fn rating_survey() -> Survey {
    let mut survey = Survey::new("咖啡廳滿意度", "");
    survey
        .add_question(QuestionType::Rating, "請為本店打分", vec![], true)
        .unwrap();
    survey
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[tokio::test]
async fn test_rating_batch_then_analytics() {
    let store = Arc::new(MemoryStore::new());
    let survey = rating_survey();
    stored(store.as_ref(), &survey).await;

    let generator = Arc::new(
        ScriptedGenerator::new()
            .reply("Alice", "I'd say 4 out of 5")
            .reply("Bob", "5")
            .reply("Carol", "not great, maybe 2"),
    );
    let filler = filler(&["Alice", "Bob", "Carol"], generator.clone(), store.clone());

    let report = filler.fill_all(&survey.id).await.unwrap();
    assert_eq!(report.succeeded(), 3);
    assert_eq!(generator.calls(), 3);

    let responses = store.list_responses(&survey.id).await.unwrap();
    assert_eq!(responses.len(), 3);
    assert!(responses.iter().all(|r| r.is_completed()));

    let analytics = AnalyticsEngine::default().analyze(&survey, &responses);
    let json = serde_json::to_value(&analytics).unwrap();
    let question = &json["questions"][0];
    assert_eq!(question["type"], "rating");
    assert!((question["average"].as_f64().unwrap() - 3.6667).abs() < 0.001);
    assert_eq!(question["min"], 2);
    assert_eq!(question["max"], 5);
    assert_eq!(
        question["distribution"],
        serde_json::json!({"1": 0, "2": 1, "3": 0, "4": 1, "5": 1})
    );
    assert_eq!(json["summary"]["completion_rate"], 100.0);
}

#[tokio::test]
async fn test_single_choice_substring_match() {
    let store = Arc::new(MemoryStore::new());
    let mut survey = Survey::new("滿意度", "");
    survey
        .add_question(
            QuestionType::SingleChoice,
            "您對服務的整體感受？",
            options(&SATISFACTION),
            true,
        )
        .unwrap();
    stored(store.as_ref(), &survey).await;

    let generator = Arc::new(ScriptedGenerator::new().reply("Alice", "我覺得還算普通啦"));
    let filler = filler(&["Alice"], generator, store.clone());

    let response = filler.fill_for(&survey.id, "Alice").await.unwrap();
    assert_eq!(response.answer(1), Some(&Answer::Text("普通".to_string())));
}

#[tokio::test]
async fn test_mixed_survey_answers_and_warnings() {
    let store = Arc::new(MemoryStore::new());
    let mut survey = Survey::new("生活習慣", "");
    survey
        .add_question(
            QuestionType::MultipleChoice,
            "平常去哪些地方？",
            options(&["A", "B", "C"]),
            true,
        )
        .unwrap();
    survey
        .add_question(QuestionType::Rating, "喜歡程度", vec![], true)
        .unwrap();
    survey
        .add_question(QuestionType::Text, "有什麼建議？", vec![], false)
        .unwrap();
    stored(store.as_ref(), &survey).await;

    let generator = Arc::new(
        ScriptedGenerator::new()
            .reply("Alice", "A、C")
            .reply("Alice", "很難說")
            .reply("Alice", "  希望營業時間更長  "),
    );
    let filler = filler(&["Alice"], generator, store.clone());

    let report = filler.fill_all(&survey.id).await.unwrap();
    let outcome = report.outcome("Alice").unwrap();
    assert!(outcome.succeeded());
    assert!(outcome.fallback_answers.is_empty());
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].question_id, 2);
    assert_eq!(outcome.warnings[0].warning, ValidationWarning::UnparseableRating);

    let response = outcome.response.as_ref().unwrap();
    assert_eq!(
        response.answer(1),
        Some(&Answer::Choices(vec!["A".to_string(), "C".to_string()]))
    );
    assert_eq!(response.answer(2), Some(&Answer::Rating(5)));
    assert_eq!(
        response.answer(3),
        Some(&Answer::Text("希望營業時間更長".to_string()))
    );
}

#[tokio::test]
async fn test_timeout_for_one_persona_uses_fallback() {
    let store = Arc::new(MemoryStore::new());
    let mut survey = Survey::new("滿意度", "");
    survey
        .add_question(
            QuestionType::SingleChoice,
            "整體感受？",
            options(&SATISFACTION),
            true,
        )
        .unwrap();
    survey
        .add_question(QuestionType::Rating, "打分", vec![], true)
        .unwrap();
    stored(store.as_ref(), &survey).await;

    let generator = Arc::new(
        ScriptedGenerator::new()
            .reply("Alice", "滿意")
            .reply("Alice", "4")
            .time_out("Bob")
            .reply("Bob", "3")
            .reply("Carol", "不滿意")
            .reply("Carol", "1"),
    );
    let filler = filler(&["Alice", "Bob", "Carol"], generator.clone(), store.clone());

    let report = filler.fill_all(&survey.id).await.unwrap();
    assert_eq!(report.succeeded(), 3);
    assert_eq!(generator.calls(), 6);

    let bob = report.outcome("Bob").unwrap();
    assert_eq!(bob.fallback_answers, vec![1]);
    let response = bob.response.as_ref().unwrap();
    assert!(response.is_completed());
    assert_eq!(response.answer(1), Some(&Answer::Text("無法回答".to_string())));
    assert_eq!(response.answer(2), Some(&Answer::Rating(3)));

    let carol = report.outcome("Carol").unwrap().response.as_ref().unwrap();
    assert_eq!(carol.answer(1), Some(&Answer::Text("不滿意".to_string())));
    assert_eq!(store.list_responses(&survey.id).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_outcomes_keep_persona_order_under_concurrency() {
    let store = Arc::new(MemoryStore::new());
    let survey = rating_survey();
    stored(store.as_ref(), &survey).await;

    let generator = Arc::new(
        ScriptedGenerator::new()
            .reply("Alice", "1")
            .delay("Alice", 60)
            .reply("Bob", "2")
            .delay("Bob", 30)
            .reply("Carol", "3"),
    );
    let filler =
        filler(&["Carol", "Alice", "Bob"], generator, store.clone()).with_max_concurrency(3);

    let report = filler.fill_all(&survey.id).await.unwrap();
    let names: Vec<&str> = report.outcomes.iter().map(|o| o.persona.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Carol"]);

    let ratings: Vec<Option<&Answer>> = report.responses().map(|r| r.answer(1)).collect();
    assert_eq!(
        ratings,
        vec![
            Some(&Answer::Rating(1)),
            Some(&Answer::Rating(2)),
            Some(&Answer::Rating(3))
        ]
    );
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_missing_template_fails_before_generation() {
    let store = Arc::new(MemoryStore::new());
    let mut survey = rating_survey();
    survey
        .add_question(QuestionType::Text, "其他意見", vec![], false)
        .unwrap();
    stored(store.as_ref(), &survey).await;

    let mut templates = PromptTemplates::new();
    templates.insert(QuestionType::Rating, "$agent_name 請打分：$question_text");
    let generator = Arc::new(ScriptedGenerator::new().reply("Alice", "4"));
    let filler = SurveyFiller::new(
        personas(&["Alice"]),
        PromptBuilder::new(templates, 1000, RatingScale::default()),
        AnswerValidator::new(RatingScale::default(), "抱歉，目前無法提供回答。"),
        generator.clone(),
        store.clone(),
    );

    let err = filler.fill_all(&survey.id).await.unwrap_err();
    assert!(matches!(err, AppError::TemplateMissing(QuestionType::Text)));
    assert_eq!(generator.calls(), 0);
    assert!(store.list_responses(&survey.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_survey_and_persona() {
    let store = Arc::new(MemoryStore::new());
    let survey = rating_survey();
    stored(store.as_ref(), &survey).await;
    let generator = Arc::new(ScriptedGenerator::new());
    let filler = filler(&["Alice"], generator.clone(), store);

    assert!(matches!(
        filler.fill_all("no-such-survey").await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        filler.fill_for(&survey.id, "Nobody").await,
        Err(AppError::NotFound(_))
    ));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_batch_fails_when_nothing_is_stored() {
    let store = Arc::new(ReadOnlyStore::default());
    let survey = rating_survey();
    stored(store.as_ref(), &survey).await;

    let generator = Arc::new(ScriptedGenerator::new().reply("Alice", "4").reply("Bob", "5"));
    let filler = filler(&["Alice", "Bob"], generator, store);

    let err = filler.fill_all(&survey.id).await.unwrap_err();
    assert!(matches!(err, AppError::BatchFailed { attempted: 2 }));
}
