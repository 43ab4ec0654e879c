/// Service Now instance, credentials and paging behaviour.
#[derive(Clone)]
pub struct SnowConfig {
    pub username: String,
    pub password: String,
    pub instance_url: String,
    pub table: String,
    pub paginate: bool,
    pub page_limit: u32,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for SnowConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnowConfig")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .field("instance_url", &self.instance_url)
            .field("table", &self.table)
            .field("paginate", &self.paginate)
            .field("page_limit", &self.page_limit)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Outgoing mail server and sender address.
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .field("from", &self.from)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub snow: SnowConfig,
    /// `None` when `SMTP_HOST` is unset; delivery commands refuse to run.
    pub smtp: Option<SmtpConfig>,
}
