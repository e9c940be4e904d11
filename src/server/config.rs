/**
 * Server Configuration
 *
 * One explicit configuration struct, loaded from the environment exactly
 * once at startup and injected into components. Nothing downstream
 * branches on APP_ENV; the environment only picks defaults here.
 *
 * # Sources
 *
 * - `APP_ENV` - `development` (default) or `production`
 * - `SERVER_PORT` - listen port (default 3030)
 * - `MONGODB_URI` / `DB_NAME` - document store location
 * - `SECRET1` - session token secret; a hardcoded development default is
 *   used when unset (and logged loudly - do not ship that way)
 * - `COOKIE_SECURE` / `COOKIE_SAME_SITE` / `COOKIE_MAX_AGE_DAYS` -
 *   explicit login-cookie attributes (0 days = session cookie)
 * - `CORS_ORIGINS` - comma-separated allowed origins
 * - `CLOUDINARY_CLOUD_NAME` / `CLOUDINARY_API_KEY` /
 *   `CLOUDINARY_API_SECRET` - media host credentials
 */

/// Fallback token secret, retained from the source for parity. Startup
/// warns whenever it is in effect.
const DEFAULT_TOKEN_SECRET: &str = "Secret-Puk-1234";

/// Dev-server origins the original backend whitelists
const DEV_ORIGINS: &[&str] = &[
    "http://127.0.0.1:5173",
    "http://localhost:5173",
    "http://127.0.0.1:5174",
    "http://localhost:5174",
    "http://127.0.0.1:3000",
    "http://localhost:3000",
    "http://127.0.0.1:8080",
    "http://localhost:8080",
];

/// Attributes of the `loginToken` cookie
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: String,
    /// 0 means a session cookie (no Max-Age attribute)
    pub max_age_days: u32,
}

impl CookieConfig {
    /// Build the Set-Cookie value that establishes a session
    pub fn set_value(&self, token: &str) -> String {
        let mut value = format!(
            "{}={}; Path=/; SameSite={}",
            self.name, token, self.same_site
        );
        if self.secure {
            value.push_str("; Secure");
        }
        if self.http_only {
            value.push_str("; HttpOnly");
        }
        if self.max_age_days > 0 {
            let seconds = u64::from(self.max_age_days) * 24 * 60 * 60;
            value.push_str(&format!("; Max-Age={}", seconds));
        }
        value
    }

    /// Build the Set-Cookie value that clears the session
    pub fn clear_value(&self) -> String {
        let mut value = format!("{}=; Path=/; SameSite={}", self.name, self.same_site);
        if self.secure {
            value.push_str("; Secure");
        }
        if self.http_only {
            value.push_str("; HttpOnly");
        }
        value.push_str("; Max-Age=0");
        value
    }
}

/// Media host (Cloudinary) credentials
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Default upload folder
    pub folder: String,
}

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub db_url: String,
    pub db_name: String,
    pub token_secret: String,
    pub cookie: CookieConfig,
    pub media: MediaConfig,
    pub cors_origins: Vec<String>,
    pub public_dir: String,
}

impl AppConfig {
    /// Load configuration from the environment
    pub fn from_env() -> Self {
        let production = std::env::var("APP_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);

        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3030);

        let db_url = std::env::var("MONGODB_URI").unwrap_or_else(|_| {
            if production {
                String::new()
            } else {
                "mongodb://127.0.0.1:27017".to_string()
            }
        });
        let db_name = std::env::var("DB_NAME").unwrap_or_else(|_| "marshmelloDB".to_string());

        let token_secret = std::env::var("SECRET1").unwrap_or_else(|_| {
            tracing::warn!("SECRET1 not set; using the default token secret. Do not run production this way.");
            DEFAULT_TOKEN_SECRET.to_string()
        });

        let cookie = CookieConfig {
            name: "loginToken".to_string(),
            http_only: env_flag("COOKIE_HTTP_ONLY", true),
            secure: env_flag("COOKIE_SECURE", true),
            same_site: std::env::var("COOKIE_SAME_SITE").unwrap_or_else(|_| "None".to_string()),
            max_age_days: std::env::var("COOKIE_MAX_AGE_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(7),
        };

        let media = MediaConfig {
            cloud_name: std::env::var("CLOUDINARY_CLOUD_NAME").unwrap_or_default(),
            api_key: std::env::var("CLOUDINARY_API_KEY").unwrap_or_default(),
            api_secret: std::env::var("CLOUDINARY_API_SECRET").unwrap_or_default(),
            folder: std::env::var("UPLOAD_FOLDER").unwrap_or_else(|_| "uploads".to_string()),
        };

        let cors_origins = match std::env::var("CORS_ORIGINS") {
            Ok(list) => list
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            Err(_) if production => Vec::new(),
            Err(_) => DEV_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        let public_dir = std::env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string());

        Self {
            port,
            db_url,
            db_name,
            token_secret,
            cookie,
            media,
            cors_origins,
            public_dir,
        }
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(default)
}
