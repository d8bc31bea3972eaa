use actix_multipart::Multipart;
use actix_web::http::header::CONTENT_DISPOSITION;
use actix_web::{post, web, HttpResponse};
use futures::StreamExt;
use std::convert::Infallible;
use std::sync::Arc;
use textconvert_common::{ConverterError, OutputFormat};
use textconvert_llm::{CancellationToken, CHUNK_JOINER};
use textconvert_render::{DocumentRenderer, RenderedDocument};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::form::{ConversionForm, Document};
use crate::state::AppState;

/// Run the chunk pipeline, or return the text untouched when AI is off
///
/// A client disconnect drops this future, which stops further chunk submissions.
async fn assemble(state: &AppState, document: Document) -> String {
    if !document.use_ai {
        return document.text;
    }

    let chunks = state.chunker.split(&document.text);
    state
        .processor
        .process_all(
            chunks,
            document.format,
            &document.guidance,
            CancellationToken::new(),
        )
        .await
        .text
}

/// Rendering is CPU-bound, so it runs on the blocking pool
async fn render(
    renderer: Arc<dyn DocumentRenderer>,
    text: String,
    format: OutputFormat,
) -> Result<RenderedDocument, ApiError> {
    let rendered = web::block(move || renderer.render(&text, format))
        .await
        .map_err(|e| {
            ConverterError::render(format!(
                "{} generation failed: {}",
                format.as_str().to_uppercase(),
                e
            ))
        })??;

    Ok(rendered)
}

/// Convert an uploaded text file into the requested document format
#[post("/convert")]
pub async fn convert(
    payload: Multipart,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let form = ConversionForm::read(payload, state.config.max_file_size).await?;
    let filename = form.filename.clone().unwrap_or_else(|| "upload".to_string());
    let document = form.into_document()?;
    let format = document.format;

    let span = info_span!("convert", job_id = %Uuid::new_v4(), %format);
    async move {
        info!(
            "Converting {} ({} bytes, use_ai={})",
            filename,
            document.text.len(),
            document.use_ai
        );

        let text = assemble(&state, document).await;
        let rendered = render(state.renderer.clone(), text, format).await?;

        info!("Conversion finished: {} ({} bytes)", rendered.filename, rendered.bytes.len());

        Ok::<_, ApiError>(HttpResponse::Ok()
            .content_type(rendered.content_type)
            .insert_header((
                CONTENT_DISPOSITION,
                format!("attachment; filename={}", rendered.filename),
            ))
            .body(rendered.bytes))
    }
    .instrument(span)
    .await
}

/// Stream processed chunks as markdown while later chunks are still pending
#[post("/convert/stream")]
pub async fn convert_stream(
    payload: Multipart,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let form = ConversionForm::read(payload, state.config.max_file_size).await?;
    let document = form.into_document()?;

    let mut response = HttpResponse::Ok();
    response.content_type("text/markdown; charset=utf-8");

    if !document.use_ai {
        return Ok(response.body(document.text));
    }

    let chunks = state.chunker.split(&document.text);
    info!(
        "Streaming {} chunk(s) as {}",
        chunks.len(),
        document.format
    );

    // Dropping the body on disconnect ends the stream before the next submission
    let body = state
        .processor
        .stream(
            chunks,
            document.format,
            document.guidance,
            CancellationToken::new(),
        )
        .map(|chunk| {
            let mut piece = String::with_capacity(chunk.text.len() + CHUNK_JOINER.len());
            if chunk.index > 0 {
                piece.push_str(CHUNK_JOINER);
            }
            piece.push_str(&chunk.text);
            Ok::<_, Infallible>(web::Bytes::from(piece))
        });

    Ok(response.streaming(body))
}
