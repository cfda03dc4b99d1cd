pub mod blob;
pub mod model;

use tracing::debug;

use crate::error::Result;
use model::Response;

/// Two steps: html → embedded blob → decoded response.
pub fn parse_page(html: &str) -> Result<Response> {
    let blob = blob::extract_blob(html)?;
    debug!(bytes = blob.len(), "Found embedded page data");
    parse_response(blob)
}

pub fn parse_response(blob: &str) -> Result<Response> {
    Ok(serde_json::from_str(blob)?)
}
