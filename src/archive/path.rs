// file: src/archive/path.rs
// description: archive entry path selection and normalization
// reference: zip entry naming (forward-slash separated)

/// Drop the archive's top-level directory from an entry path.
///
/// `repo-main/docs/a.md` becomes `docs/a.md`; a path without any `/` is
/// returned unchanged.
pub fn strip_top_level(path: &str) -> String {
    match path.split_once('/') {
        Some((_, rest)) => rest.to_string(),
        None => path.to_string(),
    }
}

/// Case-sensitive suffix match against the configured extensions.
pub fn has_extension(path: &str, extensions: &[String]) -> bool {
    extensions.iter().any(|ext| path.ends_with(ext.as_str()))
}

/// Decode UTF-8, dropping invalid byte sequences.
///
/// Returns the text and whether anything had to be dropped.
pub fn decode_lossy(bytes: &[u8]) -> (String, bool) {
    let mut text = String::with_capacity(bytes.len());
    let mut lossy = false;

    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        if !chunk.invalid().is_empty() {
            lossy = true;
        }
    }

    (text, lossy)
}
