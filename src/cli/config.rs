pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const API_URL_ENV: &str = "THESIS_API_URL";

/// `--url` wins, then THESIS_API_URL, then the local default.
pub fn resolve_base_url(flag: Option<&str>) -> String {
    resolve_with(flag, std::env::var(API_URL_ENV).ok().as_deref())
}

fn resolve_with(flag: Option<&str>, env_value: Option<&str>) -> String {
    flag.or(env_value)
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_URL)
        .to_string()
}
