use askama::Template;
use serde::{Deserialize, Serialize};

/// A one-shot message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    /// "success" or "error"; used as a CSS class.
    pub category: String,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self { category: "success".into(), message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { category: "error".into(), message: message.into() }
    }
}

/// Upload form of the plain variant; results are fetched from `/predict` by the page script.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate<'a> {
    pub messages: &'a [Flash],
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate<'a> {
    pub messages: &'a [Flash],
}

#[derive(Template)]
#[template(path = "analysis.html")]
pub struct AnalysisTemplate<'a> {
    pub messages: &'a [Flash],
}

#[derive(Template)]
#[template(path = "surveyform.html")]
pub struct SurveyTemplate;

#[derive(Template)]
#[template(path = "lab_results.html")]
pub struct LabResultsTemplate;

/// Outcome block of the ultrasound page. Absent before the first upload.
pub struct ScanOutcome<'a> {
    pub result: &'a str,
    pub confidence: f32,
    pub marked_image: &'a str,
}

#[derive(Template)]
#[template(path = "ultrasound.html")]
pub struct UltrasoundTemplate<'a> {
    pub messages: &'a [Flash],
    pub outcome: Option<ScanOutcome<'a>>,
}
