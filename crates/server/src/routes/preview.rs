use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse};
use tracing::info;

use crate::error::ApiError;
use crate::form::ConversionForm;
use crate::state::AppState;
use crate::types::PreviewResponse;

/// First `max_chars` characters of `text`
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Process the beginning of an upload with a single completion call
#[post("/preview")]
pub async fn preview(
    payload: Multipart,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let form = ConversionForm::read(payload, state.config.max_file_size).await?;
    let max_preview_length = form.max_preview_length;
    let document = form.into_document()?;

    let original_length = document.text.chars().count();
    let head = truncate_chars(&document.text, max_preview_length);
    let preview_length = head.chars().count();

    info!(
        "Preview of {}/{} chars as {} (use_ai={})",
        preview_length, original_length, document.format, document.use_ai
    );

    let preview = if document.use_ai {
        state
            .processor
            .process_single(head, document.format, &document.guidance)
            .await
            .text
    } else {
        head.to_string()
    };

    Ok(HttpResponse::Ok().json(PreviewResponse {
        preview,
        original_length,
        preview_length,
        is_truncated: original_length > max_preview_length,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::{self, MockLlm};
    use actix_web::http::header::CONTENT_TYPE;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    fn request(fields: &[(&str, &[u8])]) -> test::TestRequest {
        let (content_type, body) = testing::multipart(fields);
        test::TestRequest::post()
            .uri("/preview")
            .insert_header((CONTENT_TYPE, content_type))
            .set_payload(body)
    }

    #[::core::prelude::v1::test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[actix_web::test]
    async fn test_preview_truncates_long_document() {
        let client = MockLlm::new(false);
        let app = test::init_service(
            App::new()
                .app_data(testing::state(testing::config(), client.clone()))
                .service(preview),
        )
        .await;

        let text = "a".repeat(5000);
        let resp = test::call_service(
            &app,
            request(&[
                ("file", text.as_bytes()),
                ("output_format", b"markdown"),
                ("max_preview_length", b"1000"),
            ])
            .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: PreviewResponse = test::read_body_json(resp).await;
        assert_eq!(body.original_length, 5000);
        assert_eq!(body.preview_length, 1000);
        assert!(body.is_truncated);
        assert_eq!(body.preview, "A".repeat(1000));
        assert_eq!(client.calls(), 1);
    }

    #[actix_web::test]
    async fn test_preview_without_ai_or_truncation() {
        let client = MockLlm::new(false);
        let app = test::init_service(
            App::new()
                .app_data(testing::state(testing::config(), client.clone()))
                .service(preview),
        )
        .await;

        let resp = test::call_service(
            &app,
            request(&[
                ("file", b"short text"),
                ("output_format", b"html"),
                ("use_ai", b"false"),
            ])
            .to_request(),
        )
        .await;

        let body: PreviewResponse = test::read_body_json(resp).await;
        assert_eq!(body.preview, "short text");
        assert_eq!(body.original_length, 10);
        assert_eq!(body.preview_length, 10);
        assert!(!body.is_truncated);
        assert_eq!(client.calls(), 0);
    }

    #[actix_web::test]
    async fn test_preview_falls_back_when_service_fails() {
        let app = test::init_service(
            App::new()
                .app_data(testing::state(testing::config(), MockLlm::new(true)))
                .service(preview),
        )
        .await;

        let resp = test::call_service(
            &app,
            request(&[("file", b"keep this"), ("output_format", b"docx")])
            .to_request(),
        )
        .await;

        let body: PreviewResponse = test::read_body_json(resp).await;
        assert_eq!(body.preview, "keep this");
    }

    #[actix_web::test]
    async fn test_preview_rejects_bad_length() {
        let app = test::init_service(
            App::new()
                .app_data(testing::state(testing::config(), MockLlm::new(false)))
                .service(preview),
        )
        .await;

        let resp = test::call_service(
            &app,
            request(&[
                ("file", b"text"),
                ("output_format", b"pdf"),
                ("max_preview_length", b"-5"),
            ])
            .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
