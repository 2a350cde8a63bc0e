//! Snapshot file naming

use regex::Regex;

/// Replace characters that are invalid in file names with `_`
pub fn sanitize_file_component(name: &str) -> Result<String, regex::Error> {
    let invalid_chars = Regex::new(r#"[<>:"/\\|?*\x00-\x1f]"#)?;
    let safe = invalid_chars.replace_all(name, "_").to_string();

    // Leading dots would hide the file or walk up the tree
    let safe = safe.trim_start_matches('.').trim().to_string();

    if safe.is_empty() {
        Ok("channel".to_string())
    } else {
        Ok(safe)
    }
}

/// File name of the snapshot for a channel handle: `channel_<handle>.json`
pub fn snapshot_file_name(handle: &str) -> Result<String, regex::Error> {
    Ok(format!("channel_{}.json", sanitize_file_component(handle)?))
}
