//! Analyzer page handlers.

use askama::Template;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use super::super::template_structs::IndexTemplate;
use super::super::AppState;
use crate::input::{AnalysisForm, UploadedFile};
use crate::models::InputMode;
use crate::pipeline::{self, Outcome};

/// Empty analyzer form.
pub async fn index(State(state): State<AppState>) -> Response {
    render_page(
        IndexTemplate::new(state.default_endpoint.clone().unwrap_or_default()),
        StatusCode::OK,
    )
}

/// Handle a form submission: validate, analyze, and re-render the page
/// with the result, a warning, or an error inline.
pub async fn analyze_form(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let form = match read_form(&mut multipart).await {
        Ok(form) => form,
        Err(e) => {
            let page = IndexTemplate::new(state.default_endpoint.clone().unwrap_or_default())
                .with_outcome(Outcome::Warning(format!(
                    "Could not read the submitted form: {}",
                    e
                )));
            return render_page(page, StatusCode::BAD_REQUEST);
        }
    };

    let endpoint = form.endpoint.clone();
    let mode = form.mode.unwrap_or_default();
    let url = form.url.clone().unwrap_or_default();

    let result = pipeline::run(state.analyzer.as_ref(), form).await;

    let page = IndexTemplate::new(endpoint)
        .with_input(mode, url)
        .with_outcome(Outcome::from_result(&result));
    render_page(page, StatusCode::OK)
}

/// Collect multipart fields into a form. Unknown fields are ignored.
async fn read_form(multipart: &mut Multipart) -> Result<AnalysisForm, MultipartError> {
    let mut form = AnalysisForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "endpoint" => form.endpoint = field.text().await?,
            "key" => form.key = field.text().await?,
            "mode" => form.mode = InputMode::from_str(&field.text().await?),
            "url" => form.url = Some(field.text().await?),
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?.to_vec();
                form.file = Some(UploadedFile { file_name, data });
            }
            _ => {}
        }
    }

    Ok(form)
}

fn render_page(page: IndexTemplate<'_>, status: StatusCode) -> Response {
    match page.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Template error: {}", e),
        )
            .into_response(),
    }
}
