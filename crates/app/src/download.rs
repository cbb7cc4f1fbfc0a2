//! Saving exported blobs.
//!
//! The browser gets a temporary object URL clicked through a hidden anchor;
//! desktop builds write the file into the working directory.

use admin_client::ExportFile;
use shared_types::AppError;

#[cfg(feature = "web")]
pub fn save_export(file: &ExportFile) -> Result<(), AppError> {
    use wasm_bindgen::JsCast;

    let fail = |what: &str| AppError::internal(format!("Could not save {}: {what}", file.filename));

    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::new();
    parts.push(&bytes.buffer());

    let options = web_sys::BlobPropertyBag::new();
    options.set_type(file.mime);
    let blob = web_sys::Blob::new_with_buffer_source_sequence_and_options(&parts, &options)
        .map_err(|_| fail("blob"))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|_| fail("object url"))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| fail("no document"))?;
    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| fail("anchor"))?
        .dyn_into()
        .map_err(|_| fail("anchor"))?;
    anchor.set_href(&url);
    anchor.set_download(&file.filename);
    anchor.click();

    if let Err(e) = web_sys::Url::revoke_object_url(&url) {
        tracing::debug!(error = ?e, "Failed to revoke export object URL");
    }
    tracing::info!(filename = %file.filename, size = file.bytes.len(), "Export downloaded");
    Ok(())
}

#[cfg(not(feature = "web"))]
pub fn save_export(file: &ExportFile) -> Result<(), AppError> {
    std::fs::write(&file.filename, &file.bytes)
        .map_err(|e| AppError::internal(format!("Could not save {}: {e}", file.filename)))?;
    tracing::info!(filename = %file.filename, size = file.bytes.len(), "Export written");
    Ok(())
}
