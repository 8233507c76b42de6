pub const ENV_REDIS_URL: &str = "REDIS_URL";
pub const ENV_RELAX_CORS: &str = "RELAX_CORS";
pub const ENV_DB_LOCAL: &str = "DDB_LOCAL";
pub const ENV_DB_URL: &str = "DDB_URL";
pub const ENV_PORT: &str = "BLOG_PORT";

pub fn port() -> u16 {
    std::env::var(ENV_PORT)
        .ok()
        .and_then(|port| port.parse::<u16>().ok())
        .unwrap_or(8090)
}

pub fn relax_cors() -> bool {
    std::env::var(ENV_RELAX_CORS)
        .map(|value| value == "1")
        .unwrap_or_default()
}

pub fn redis_url() -> Option<String> {
    std::env::var(ENV_REDIS_URL).ok()
}

pub fn use_dynamo() -> bool {
    std::env::var(ENV_DB_LOCAL).is_ok() || std::env::var(ENV_DB_URL).is_ok()
}

pub fn local_db() -> bool {
    std::env::var(ENV_DB_LOCAL).is_ok()
}

pub fn db_url() -> String {
    std::env::var(ENV_DB_URL).unwrap_or_else(|_| String::from("http://localhost:8000"))
}
