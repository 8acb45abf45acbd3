//! Object path construction for uploaded evidence.

use dormhub_core::types::{DbId, Timestamp};

/// Build the object path for an evidence upload:
/// `{owner_account_id}/{upload_millis}.{extension}`.
///
/// The extension is taken from the uploaded file's name (everything after
/// the last dot, or the whole name if it has none). Two uploads by the
/// same owner within the same millisecond collide; callers accept this.
pub fn evidence_path(owner_id: DbId, uploaded_at: Timestamp, file_name: &str) -> String {
    let ext = file_name.rsplit('.').next().unwrap_or("bin");
    format!("{owner_id}/{}.{ext}", uploaded_at.timestamp_millis())
}

/// Reject paths that could escape the bucket root when mapped onto a
/// filesystem backend.
pub fn validate_object_path(path: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err("Object path must not be empty".to_string());
    }
    if path.starts_with('/') || path.split('/').any(|seg| seg.is_empty() || seg == "..") {
        return Err(format!("Object path '{path}' contains invalid segments"));
    }
    Ok(())
}
