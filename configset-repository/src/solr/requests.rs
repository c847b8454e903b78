//! Request builders for each upload strategy.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

use crate::errors::DeployError;
use crate::interfaces::HttpRequest;
use configset_shared::{ConfigFileSet, DeploymentTarget};

/// Name of the configset every upload targets.
pub const CONFIGSET_NAME: &str = "_default";

/// Statuses accepted for whole-call uploads.
const BATCH_SUCCESS: [u16; 5] = [200, 201, 202, 203, 204];

/// Statuses accepted for per-file uploads.
const FILE_SUCCESS: [u16; 4] = [200, 201, 202, 203];

/// Success classification for a whole-call upload.
pub fn is_batch_success(status: u16) -> bool {
    BATCH_SUCCESS.contains(&status)
}

/// Success classification for a per-file upload. `204` is not accepted here.
pub fn is_file_success(status: u16) -> bool {
    FILE_SUCCESS.contains(&status)
}

/// Content type sent with a per-file upload.
pub fn infer_content_type(filename: &str) -> &'static str {
    if filename.to_ascii_lowercase().ends_with(".xml") {
        "application/xml"
    } else {
        "text/plain"
    }
}

#[derive(Debug, Serialize)]
struct EncodedFile<'a> {
    filename: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
struct DirectUploadPayload<'a> {
    files: Vec<EncodedFile<'a>>,
}

/// JSON body for the direct multi-file upload.
///
/// Entries follow the set's filename order, so the same input always yields
/// the same bytes.
pub fn direct_upload_body(files: &ConfigFileSet) -> Result<Vec<u8>, DeployError> {
    let payload = DirectUploadPayload {
        files: files
            .iter()
            .map(|(filename, content)| EncodedFile {
                filename,
                content: STANDARD.encode(content),
            })
            .collect(),
    };

    serde_json::to_vec(&payload).map_err(|e| DeployError::serialization(e.to_string()))
}

/// `POST <schema-upload-uri>` with every file in one JSON body.
pub fn direct_upload_request(
    target: &DeploymentTarget,
    files: &ConfigFileSet,
) -> Result<HttpRequest, DeployError> {
    Ok(HttpRequest::post(target.schema_upload_uri().clone())
        .with_header("Accept", "application/json")
        .with_header("Content-Type", "application/json")
        .with_body(direct_upload_body(files)?))
}

/// `POST <schema-upload-uri>?action=UPLOAD...` carrying a single raw file.
pub fn file_upload_request(
    target: &DeploymentTarget,
    filename: &str,
    content: &[u8],
) -> HttpRequest {
    HttpRequest::post(target.schema_upload_uri().clone())
        .with_query("action", "UPLOAD")
        .with_query("name", CONFIGSET_NAME)
        .with_query("filePath", filename)
        .with_query("contentType", infer_content_type(filename))
        .with_query("overwrite", "true")
        .with_header("Content-Type", "application/octet-stream")
        .with_body(content)
}

/// `PUT <base-uri>/api/core/configs/_default?action=UPLOAD...` carrying a zip.
pub fn archive_upload_request(target: &DeploymentTarget, archive: Vec<u8>) -> HttpRequest {
    HttpRequest::put(target.configset_upload_uri())
        .with_query("action", "UPLOAD")
        .with_query("name", CONFIGSET_NAME)
        .with_query("overwrite", "TRUE")
        .with_query("configSet", CONFIGSET_NAME)
        .with_query("create", "TRUE")
        .with_header("Content-Type", "application/octet-stream")
        .with_body(archive)
}

/// `GET <core-base-uri>/admin/file?action=VIEW&file=<filename>`.
pub fn view_file_request(target: &DeploymentTarget, filename: &str) -> HttpRequest {
    HttpRequest::get(target.file_view_uri())
        .with_query("action", "VIEW")
        .with_query("file", filename)
}
