//! Analytics Integration Tests
//!
//! Aggregation over responses read back from the JSON file store.

use persona_survey::models::analytics::QuestionStats;
use persona_survey::services::import::import_survey_json;
use persona_survey::storage::{JsonFileStore, SurveyStore};
use persona_survey::AnalyticsEngine;
use persona_survey_core::{Answer, QuestionType, Response, Survey};

fn community_survey() -> Survey {
    let mut survey = Survey::new("社區生活調查", "居民對社區設施的看法");
    survey
        .add_question(
            QuestionType::SingleChoice,
            "最常去的地方？",
            vec!["咖啡廳".into(), "公園".into(), "圖書館".into()],
            true,
        )
        .unwrap();
    survey
        .add_question(
            QuestionType::MultipleChoice,
            "希望增加哪些設施？",
            vec!["停車場".into(), "運動中心".into(), "市場".into()],
            true,
        )
        .unwrap();
    survey
        .add_question(QuestionType::Rating, "整體滿意度", vec![], true)
        .unwrap();
    survey
        .add_question(QuestionType::Text, "其他建議", vec![], false)
        .unwrap();
    survey
}

fn answered(
    survey: &Survey,
    who: &str,
    place: &str,
    wants: &[&str],
    score: i64,
    text: &str,
) -> Response {
    let mut response = Response::new(&survey.id, who);
    response
        .record_answer(1, Answer::Text(place.to_string()))
        .unwrap();
    response
        .record_answer(
            2,
            Answer::Choices(wants.iter().map(|s| s.to_string()).collect()),
        )
        .unwrap();
    response.record_answer(3, Answer::Rating(score)).unwrap();
    response
        .record_answer(4, Answer::Text(text.to_string()))
        .unwrap();
    response.complete(survey).unwrap();
    response
}

#[test]
fn test_survey_json_round_trip() {
    let survey = community_survey();
    let json = serde_json::to_string(&survey).unwrap();
    let back: Survey = serde_json::from_str(&json).unwrap();
    assert_eq!(back, survey);
    assert_eq!(
        back.questions.iter().map(|q| q.id).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
}

#[tokio::test]
async fn test_analytics_over_stored_responses() {
    let temp = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(temp.path()).await.unwrap();
    let survey = community_survey();
    store.save_survey(&survey).await.unwrap();

    for response in [
        answered(&survey, "A", "咖啡廳", &["停車場", "市場"], 4, "Need more parking spaces"),
        answered(&survey, "B", "公園", &["市場"], 3, "trees please"),
        answered(&survey, "C", "咖啡廳", &[], 5, "Parking is hard"),
        answered(&survey, "D", "無法回答", &["運動中心"], 2, "抱歉，目前無法提供回答。"),
    ] {
        store.save_response(&response).await.unwrap();
    }
    // An abandoned response counts toward the summary only.
    store
        .save_response(&Response::new(&survey.id, "E"))
        .await
        .unwrap();

    let responses = store.list_responses(&survey.id).await.unwrap();
    let analytics = AnalyticsEngine::default().analyze(&survey, &responses);
    assert_eq!(analytics.summary.total_responses, 5);
    assert_eq!(analytics.summary.completed_responses, 4);
    assert_eq!(analytics.summary.completion_rate, 80.0);

    let QuestionStats::SingleChoice(place) = &analytics.question(1).unwrap() else {
        panic!("expected single choice");
    };
    assert_eq!(place.total_responses, 4);
    assert_eq!(place.count("咖啡廳"), Some(2));
    assert_eq!(place.count("公園"), Some(1));
    assert_eq!(place.count("圖書館"), Some(0));
    let counted: usize = place.choices.iter().map(|c| c.count).sum();
    let percent: f64 = place.choices.iter().map(|c| c.percentage).sum();
    assert_eq!(counted, 3);
    assert!((percent - 75.0).abs() < 1e-9);

    let QuestionStats::MultipleChoice(wants) = &analytics.question(2).unwrap() else {
        panic!("expected multiple choice");
    };
    assert_eq!(wants.count("市場"), Some(2));
    assert_eq!(wants.percentage("市場"), Some(50.0));
    assert_eq!(wants.percentage("運動中心"), Some(25.0));

    let QuestionStats::Rating(rating) = &analytics.question(3).unwrap() else {
        panic!("expected rating");
    };
    assert_eq!(rating.average, 3.5);
    assert_eq!((rating.min, rating.max), (2, 5));

    let QuestionStats::Text(text) = &analytics.question(4).unwrap() else {
        panic!("expected text");
    };
    assert_eq!(text.total_responses, 4);
    assert_eq!(text.common_words[0].word, "parking");
    assert_eq!(text.common_words[0].count, 2);
}

#[test]
fn test_analysis_ignores_response_order() {
    let survey = community_survey();
    let mut responses = vec![
        answered(&survey, "A", "公園", &["市場"], 1, "quiet park nearby"),
        answered(&survey, "B", "咖啡廳", &["停車場"], 5, "good coffee nearby"),
        answered(&survey, "C", "公園", &[], 3, "park benches"),
    ];
    let engine = AnalyticsEngine::default();
    let forward = serde_json::to_value(engine.analyze(&survey, &responses)).unwrap();
    responses.reverse();
    let backward = serde_json::to_value(engine.analyze(&survey, &responses)).unwrap();
    assert_eq!(forward, backward);
}

#[test]
fn test_empty_rating_summary() {
    let survey = community_survey();
    let analytics = AnalyticsEngine::default().analyze(&survey, &[]);
    assert_eq!(analytics.summary.completion_rate, 0.0);

    let QuestionStats::Rating(rating) = &analytics.question(3).unwrap() else {
        panic!("expected rating");
    };
    assert_eq!(rating.total_responses, 0);
    assert_eq!(rating.average, 0.0);
    assert_eq!((rating.min, rating.max), (0, 0));
    assert!(rating.distribution.values().all(|&count| count == 0));
    assert_eq!(rating.distribution.len(), 5);
}

#[tokio::test]
async fn test_imported_survey_exports_with_analytics() {
    let survey = import_survey_json(
        r#"{
            "title": "快速調查",
            "questions": [
                {"type": "scale", "text": "今天心情？"},
                {"type": "checkbox", "text": "喜歡的飲料", "choices": ["咖啡", "茶"]}
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(survey.questions[0].question_type, QuestionType::Rating);
    assert_eq!(survey.questions[1].question_type, QuestionType::MultipleChoice);

    let mut response = Response::new(&survey.id, "A");
    response.record_answer(1, Answer::Rating(4)).unwrap();
    response
        .record_answer(2, Answer::Choices(vec!["茶".to_string()]))
        .unwrap();
    response.complete(&survey).unwrap();

    let json = AnalyticsEngine::default()
        .export_json(&survey, &[response])
        .unwrap();
    let document: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(document["export_info"]["completed_responses"], 1);
    assert_eq!(document["survey"]["title"], "快速調查");
    assert_eq!(document["analytics"]["questions"][1]["type"], "multiple_choice");
}
