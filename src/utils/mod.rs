use once_cell::sync::OnceCell;
use std::env;

static INIT_DOTENV: OnceCell<String> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is chosen once per process: `DPO_ENV_FILE` if set, otherwise
/// `.env`. A missing file is not an error; variables may already be present
/// in the environment.
///
/// # Return
///
/// The path of the env file that was (or would have been) loaded.
pub fn ensure_dotenv_loaded() -> String {
    INIT_DOTENV
        .get_or_init(|| {
            let dotenv_path = env_opt("DPO_ENV_FILE").unwrap_or_else(|| ".env".to_string());
            if dotenv::from_filename(&dotenv_path).is_err() {
                tracing::debug!(path = %dotenv_path, "env file not found, using process environment");
            }
            dotenv_path
        })
        .clone()
}

/// Reads an environment variable, treating empty values as unset.
pub fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
