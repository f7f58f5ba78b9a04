//! Prompt Templates
//!
//! One template per question type, addressed by the type's identifier
//! (`survey_<type>.txt` on disk). Placeholders use `$name` or `${name}`;
//! `$$` is a literal dollar sign. Substitution never fails: placeholders
//! without a value are left exactly as written.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use persona_survey_core::{QuestionType, Survey};
use regex::{Captures, Regex};

use crate::utils::error::AppResult;
use crate::utils::paths::ensure_dir;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\$(?:(\$)|([_a-zA-Z][_a-zA-Z0-9]*)|\{([_a-zA-Z][_a-zA-Z0-9]*)\})")
            .expect("placeholder pattern is valid")
    })
}

/// Replace `$name` / `${name}` with values from `vars`, leaving unknown
/// placeholders and stray `$` untouched.
pub fn safe_substitute(template: &str, vars: &HashMap<&str, String>) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &Captures| {
            if caps.get(1).is_some() {
                return "$".to_string();
            }
            let name = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            match vars.get(name) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// File name of the template for a question type
pub fn template_file_name(question_type: QuestionType) -> String {
    format!("survey_{}.txt", question_type.as_str())
}

/// Templates keyed by question type.
#[derive(Debug, Clone, Default)]
pub struct PromptTemplates {
    templates: HashMap<QuestionType, String>,
}

impl PromptTemplates {
    /// An empty set; every type is missing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in templates for all four question types.
    pub fn builtin() -> Self {
        let mut templates = Self::new();
        for question_type in QuestionType::ALL {
            templates.insert(question_type, builtin_template(question_type));
        }
        templates
    }

    /// Read `survey_<type>.txt` for every type present in `dir`. Types
    /// without a file are simply absent.
    pub fn from_dir(dir: &Path) -> AppResult<Self> {
        let mut templates = Self::new();
        for question_type in QuestionType::ALL {
            let path = dir.join(template_file_name(question_type));
            if path.is_file() {
                templates.insert(question_type, std::fs::read_to_string(&path)?);
            } else {
                tracing::debug!(path = %path.display(), "prompt template not found");
            }
        }
        Ok(templates)
    }

    /// Write every template to `dir`, returning the paths written.
    pub fn write_to_dir(&self, dir: &Path) -> AppResult<Vec<PathBuf>> {
        ensure_dir(dir)?;
        let mut written = Vec::new();
        for question_type in QuestionType::ALL {
            if let Some(template) = self.get(question_type) {
                let path = dir.join(template_file_name(question_type));
                std::fs::write(&path, template)?;
                written.push(path);
            }
        }
        Ok(written)
    }

    pub fn insert(&mut self, question_type: QuestionType, template: impl Into<String>) {
        self.templates.insert(question_type, template.into());
    }

    pub fn get(&self, question_type: QuestionType) -> Option<&str> {
        self.templates.get(&question_type).map(String::as_str)
    }

    /// Question types used by `survey` that have no template, in type order.
    pub fn missing_for(&self, survey: &Survey) -> Vec<QuestionType> {
        QuestionType::ALL
            .into_iter()
            .filter(|t| survey.questions.iter().any(|q| q.question_type == *t))
            .filter(|t| !self.templates.contains_key(t))
            .collect()
    }
}

const PERSONA_BLOCK: &str = "你是 $agent_name，請以這個身分回答問卷。

【基本資料】
年齡：$age
個性：$personality
興趣：$interests
生活方式：$lifestyle
目前活動：$current_activity
家庭背景：$family_background
經濟狀況：$wealth_level

【最近的活動記錄】
$activity_history
";

fn builtin_template(question_type: QuestionType) -> String {
    let instructions = match question_type {
        QuestionType::SingleChoice => {
            "【問題】
$question_text

【選項】
$options

請從選項中選出最符合你情況的一個，只回答選項內容，不要解釋。"
        }
        QuestionType::MultipleChoice => {
            "【問題】
$question_text

【選項】
$options

請選出所有符合你情況的選項，以逗號分隔，只回答選項內容，不要解釋。"
        }
        QuestionType::Rating => {
            "【問題】
$question_text

請以 $rating_min 到 $rating_max 分評分（$rating_min 最低，$rating_max 最高），只回答一個數字。"
        }
        QuestionType::Text => {
            "【問題】
$question_text

請以第一人稱、用一到三句話回答。"
        }
    };
    format!("{}\n{}\n", PERSONA_BLOCK, instructions)
}
