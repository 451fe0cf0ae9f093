//! # fw-api Handlers
//!
//! This module coordinates the flow between HTTP requests and Core traits.

use crate::flash;
use crate::screening::{screen, Screening};
use crate::upload::read_upload;
use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use askama::Template;
use fw_core::accounts;
use fw_core::error::AppError;
use fw_core::models::{Credentials, Registration};
use fw_core::traits::{AccountRepo, AuthProvider, Classifier, ImageStore};
use fw_ui::{
    AnalysisTemplate, Flash, IndexTemplate, LabResultsTemplate, LoginTemplate, RegisterTemplate, ScanOutcome,
    SurveyTemplate, UltrasoundTemplate,
};
use serde::Serialize;
use std::sync::Arc;

/// Screening collaborators shared across all Actix-web workers.
pub struct AppState {
    pub classifier: Arc<dyn Classifier>,
    pub store: Box<dyn ImageStore>,
    pub max_upload_bytes: usize,
}

/// Account collaborators; only registered when the account pages are mounted.
pub struct AccountState {
    pub repo: Box<dyn AccountRepo>,
    pub auth: Box<dyn AuthProvider>,
}

#[derive(Serialize)]
struct PredictResponse<'a> {
    result: &'a str,
    confidence: f32,
    marked_image: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// HTTP status for an error answered directly (not via redirect).
pub fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::NoFile | AppError::InvalidFile(_) | AppError::Validation(_) | AppError::PasswordMismatch => {
            StatusCode::BAD_REQUEST
        }
        AppError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AppError::DuplicateUsername(_) => StatusCode::CONFLICT,
        AppError::AuthenticationFailure => StatusCode::UNAUTHORIZED,
        AppError::ModelLoad(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn log_failure(context: &str, err: &AppError) {
    if err.is_client_error() {
        log::warn!("{context}: {err}");
    } else {
        log::error!("{context}: {err}");
    }
}

fn json_error(err: &AppError) -> HttpResponse {
    HttpResponse::build(status_for(err)).json(ErrorResponse { error: err.public_message() })
}

fn render<T: Template>(req: &HttpRequest, template: &T) -> HttpResponse {
    match template.render() {
        Ok(html) => flash::page(req, html),
        Err(e) => {
            log::error!("template rendering failed: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Landing page of the screening-only server.
pub async fn index(req: HttpRequest) -> impl Responder {
    render(&req, &IndexTemplate)
}

/// Classifies one upload and answers with JSON.
pub async fn predict(data: web::Data<AppState>, req: HttpRequest, payload: Multipart) -> impl Responder {
    let outcome = match read_upload(payload, data.max_upload_bytes).await {
        Ok(upload) => screen(&data, upload).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(Screening { prediction, marked_path }) => {
            let info = req.connection_info();
            HttpResponse::Ok().json(PredictResponse {
                result: prediction.verdict.label(),
                confidence: prediction.confidence,
                marked_image: format!("{}://{}{}", info.scheme(), info.host(), marked_path),
            })
        }
        Err(e) => {
            log_failure("predict", &e);
            json_error(&e)
        }
    }
}

pub async fn login_page(req: HttpRequest) -> impl Responder {
    let messages = flash::incoming(&req);
    render(&req, &LoginTemplate { messages: &messages })
}

/// Checks credentials; success moves on to the dashboard.
pub async fn login(
    accounts_state: web::Data<AccountState>,
    req: HttpRequest,
    form: web::Form<Credentials>,
) -> impl Responder {
    match accounts::login(accounts_state.repo.as_ref(), accounts_state.auth.as_ref(), &form).await {
        Ok(account) => {
            log::info!("login succeeded for {}", account.username);
            flash::redirect("/analysis", Flash::success("Login successful!"))
        }
        Err(e) => {
            log_failure("login", &e);
            let mut messages = flash::incoming(&req);
            messages.push(Flash::error(e.public_message()));
            let mut resp = render(&req, &LoginTemplate { messages: &messages });
            if !e.is_client_error() && resp.status().is_success() {
                *resp.status_mut() = status_for(&e);
            }
            resp
        }
    }
}

pub async fn register_page(req: HttpRequest) -> impl Responder {
    let messages = flash::incoming(&req);
    render(&req, &RegisterTemplate { messages: &messages })
}

pub async fn register(accounts_state: web::Data<AccountState>, form: web::Form<Registration>) -> impl Responder {
    match accounts::register(accounts_state.repo.as_ref(), accounts_state.auth.as_ref(), form.into_inner()).await {
        Ok(_) => flash::redirect("/", Flash::success("User registered successfully! You can now log in.")),
        Err(e) => {
            log_failure("register", &e);
            flash::redirect("/register", Flash::error(e.public_message()))
        }
    }
}

pub async fn analysis(req: HttpRequest) -> impl Responder {
    let messages = flash::incoming(&req);
    render(&req, &AnalysisTemplate { messages: &messages })
}

pub async fn survey(req: HttpRequest) -> impl Responder {
    render(&req, &SurveyTemplate)
}

pub async fn lab_results(req: HttpRequest) -> impl Responder {
    render(&req, &LabResultsTemplate)
}

pub async fn ultrasound_page(req: HttpRequest) -> impl Responder {
    let messages = flash::incoming(&req);
    render(&req, &UltrasoundTemplate { messages: &messages, outcome: None })
}

/// Same flow as [`predict`], answered with the ultrasound page.
pub async fn ultrasound(data: web::Data<AppState>, req: HttpRequest, payload: Multipart) -> impl Responder {
    let outcome = match read_upload(payload, data.max_upload_bytes).await {
        Ok(upload) => screen(&data, upload).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(screening) => {
            let template = UltrasoundTemplate {
                messages: &[],
                outcome: Some(ScanOutcome {
                    result: screening.prediction.verdict.label(),
                    confidence: screening.prediction.confidence,
                    marked_image: &screening.marked_path,
                }),
            };
            render(&req, &template)
        }
        Err(e) => {
            log_failure("ultrasound", &e);
            flash::redirect("/ultrasound", Flash::error(e.public_message()))
        }
    }
}
