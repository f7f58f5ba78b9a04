//! Persona Loading Integration Tests
//!
//! Builds a persona directory and activity log on disk, loads the context
//! and checks what reaches the rendered prompt.

use std::path::Path;
use std::sync::Arc;

use persona_survey::models::settings::AppConfig;
use persona_survey::services::persona::PersonaContext;
use persona_survey::services::prompt::{PromptBuilder, PromptTemplates};
use persona_survey::storage::{MemoryStore, SurveyStore};
use persona_survey::SurveyFiller;
use persona_survey_core::{Answer, QuestionType, RatingScale, Survey};

use crate::support::ScriptedGenerator;

const LOG: &str = "# 小鎮模擬記錄\n\
### Isabella Rodriguez\n\
位置：咖啡廳\n\
活動：準備開店\n\
備註：無\n\
### Klaus Mueller\n\
活動：在圖書館寫論文\n\
### Isabella Rodriguez\n\
活動：招呼客人\n";

fn write_agent(root: &Path, dir: &str, descriptor: &str) {
    let dir = root.join(dir);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("agent.json"), descriptor).unwrap();
}

fn town(root: &Path) -> std::path::PathBuf {
    let agents = root.join("agents");
    write_agent(
        &agents,
        "Isabella_Rodriguez",
        r#"{
            "currently": "籌備情人節派對",
            "scratch": {
                "age": 34,
                "innate": "friendly, outgoing",
                "learned": ["咖啡", "烘焙"],
                "lifestyle": "早上六點起床"
            }
        }"#,
    );
    write_agent(
        &agents,
        "Klaus_Mueller",
        r#"{"age": 20, "personality": "好奇、認真", "interests": ["社會學"]}"#,
    );
    write_agent(&agents, "Broken_Agent", "{ not json");
    std::fs::create_dir_all(agents.join("no_descriptor")).unwrap();
    agents
}

#[test]
fn test_load_context_from_disk() {
    let temp = tempfile::tempdir().unwrap();
    let agents = town(temp.path());
    let log = temp.path().join("activity.md");
    std::fs::write(&log, LOG).unwrap();

    let context = PersonaContext::load(&agents, Some(log.as_path()), 100).unwrap();
    assert_eq!(context.names(), vec!["Isabella Rodriguez", "Klaus Mueller"]);

    let isabella = context.get("Isabella Rodriguez").unwrap();
    assert_eq!(isabella.age, Some(34));
    assert_eq!(isabella.personality, vec!["friendly", "outgoing"]);
    assert_eq!(isabella.current_activity.as_deref(), Some("籌備情人節派對"));
    assert_eq!(
        isabella.activity_history,
        vec!["位置：咖啡廳", "活動：準備開店", "活動：招呼客人"]
    );

    let klaus = context.get("Klaus Mueller").unwrap();
    assert_eq!(klaus.personality, vec!["好奇", "認真"]);
    assert_eq!(klaus.activity_history, vec!["活動：在圖書館寫論文"]);
}

#[test]
fn test_missing_activity_log_means_no_history() {
    let temp = tempfile::tempdir().unwrap();
    let agents = town(temp.path());

    let context = PersonaContext::load(&agents, Some(temp.path().join("missing.md").as_path()), 100).unwrap();
    assert_eq!(context.len(), 2);
    assert!(context.iter().all(|p| p.activity_history.is_empty()));
}

#[test]
fn test_prompt_carries_persona_and_recent_history() {
    let temp = tempfile::tempdir().unwrap();
    let agents = town(temp.path());
    let log = temp.path().join("activity.md");
    std::fs::write(&log, LOG).unwrap();
    let context = PersonaContext::load(&agents, Some(log.as_path()), 2).unwrap();

    let mut survey = Survey::new("t", "");
    survey
        .add_question(
            QuestionType::SingleChoice,
            "你最常去哪裡？",
            vec!["咖啡廳".to_string(), "圖書館".to_string()],
            true,
        )
        .unwrap();

    let builder = PromptBuilder::new(PromptTemplates::builtin(), 1000, RatingScale::default());
    let prompt = builder
        .build(context.get("Isabella Rodriguez").unwrap(), &survey.questions[0])
        .unwrap();

    assert!(prompt.contains("Isabella Rodriguez"));
    assert!(prompt.contains("friendly, outgoing"));
    assert!(prompt.contains("1. 咖啡廳\n2. 圖書館"));
    assert!(prompt.contains("活動：招呼客人"));
    // Only the last two activity lines were kept.
    assert!(!prompt.contains("位置：咖啡廳"));
    assert!(prompt.contains("無相關資訊"));
}

#[tokio::test]
async fn test_fill_with_loaded_personas() {
    let temp = tempfile::tempdir().unwrap();
    let agents = town(temp.path());
    let context = Arc::new(PersonaContext::load(&agents, None, 100).unwrap());

    let store = Arc::new(MemoryStore::new());
    let mut survey = Survey::new("t", "");
    survey
        .add_question(QuestionType::Text, "今天過得如何？", vec![], true)
        .unwrap();
    store.save_survey(&survey).await.unwrap();

    let generator = Arc::new(
        ScriptedGenerator::new()
            .reply("Isabella Rodriguez", "很忙碌")
            .reply("Klaus Mueller", ""),
    );
    let config = AppConfig::default();
    let filler = SurveyFiller::from_config(&config, context, generator, store.clone()).unwrap();

    let report = filler.fill_all(&survey.id).await.unwrap();
    assert_eq!(report.succeeded(), 2);

    let klaus = report.outcome("Klaus Mueller").unwrap().response.as_ref().unwrap();
    assert_eq!(klaus.answer(1), Some(&Answer::Text(config.no_answer_text.clone())));
}
