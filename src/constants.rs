//! Centralized constants for permissions, file names, and limits.

/// Directory name under `$HOME` holding the credentials file.
pub const DEFAULT_CONFIG_DIR_NAME: &str = ".cloudflare";

/// File name of the JSON credentials file.
pub const CREDENTIALS_FILE: &str = "credentials.json";

/// File name of the optional settings file.
pub const SETTINGS_FILE: &str = "config.toml";

/// Default environment-file destination (relative to the working directory).
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Default provider API base used by the identity verifier.
pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default posting API base.
pub const DEFAULT_POST_API_BASE: &str = "https://api.twitter.com";

/// Permission mode for the config directory.
pub const CONFIG_DIR_MODE: u32 = 0o700;

/// Permission mode for the credentials file.
pub const CREDENTIALS_FILE_MODE: u32 = 0o600;

/// Character used to redact secrets on display.
pub const MASK_CHAR: char = '*';

/// Number of leading characters left visible by masking.
pub const MASK_VISIBLE_PREFIX: usize = 8;

/// Number of trailing characters left visible by masking.
pub const MASK_VISIBLE_SUFFIX: usize = 4;

/// Maximum post length in characters.
pub const MAX_POST_CHARS: usize = 280;

/// Marker appended to truncated posts.
pub const TRUNCATION_MARKER: &str = "...";

/// Maximum media attachments per post.
pub const MAX_MEDIA_PER_POST: usize = 4;
