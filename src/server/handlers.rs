use super::types::{ErrorResponse, IMAGE_FIELD, INTERNAL_ERROR_MESSAGE, NO_IMAGE_MESSAGE};
use crate::relay::{ImageRelay, UploadedImage};
use axum::{
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ImageRelay>,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

pub async fn analyze_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Option<String>>, HandlerError> {
    let upload = match multipart {
        Ok(mut multipart) => read_image_field(&mut multipart).await?,
        Err(rejection) => {
            // Not a multipart body at all, so there is no file in it either
            debug!("Request body is not multipart: {}", rejection);
            None
        }
    };

    let Some(upload) = upload else {
        info!("Rejected request without an image field");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(NO_IMAGE_MESSAGE)),
        ));
    };

    let file_name = upload.file_name.clone();
    match state.relay.analyze(upload).await {
        // A reply without text is still relayed, as JSON null
        Ok(text) => {
            info!("Successfully analyzed image {}", file_name);
            Ok(Json(text))
        }
        Err(e) => {
            if e.is_upstream() {
                error!("Gemini failed to analyze image {}: {}", file_name, e);
            } else {
                error!("Failed to analyze image {}: {}", file_name, e);
            }
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(INTERNAL_ERROR_MESSAGE)),
            ))
        }
    }
}

/// First `image` field that was sent as a file. A plain form value named
/// `image` carries no file name and does not count.
async fn read_image_field(
    multipart: &mut Multipart,
) -> Result<Option<UploadedImage>, HandlerError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok(Some(UploadedImage::new(file_name, bytes.to_vec())));
    }

    Ok(None)
}

fn multipart_error(e: MultipartError) -> HandlerError {
    debug!("Failed to read multipart body: {}", e);
    (e.status(), Json(ErrorResponse::new(e.body_text())))
}
