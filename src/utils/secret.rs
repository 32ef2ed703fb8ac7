use std::{env, fs};

use tracing::{debug, error};

/// Looks up a secret, preferring a file over a plain environment variable.
///
/// When `file_var` names a path, the trimmed file content is used and
/// `value_var` is ignored, even if the file can't be read. Empty values count
/// as absent.
pub fn get_secret(file_var: &str, value_var: &str) -> Option<String> {
    let secret = match env::var(file_var) {
        Ok(path) => match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(%path, "Loaded secret from file");
                content.trim().to_owned()
            }
            Err(e) => {
                error!(%path, ?e, "Error reading secret file");
                return None;
            }
        },
        Err(_) => env::var(value_var).ok()?,
    };

    (!secret.is_empty()).then_some(secret)
}
