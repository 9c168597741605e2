use anyhow::Context;

const DEFAULT_API_BASE: &str = "https://hacker-news.firebaseio.com/v0";

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) api_base: String,

    pub(crate) num_stories: usize,
    pub(crate) batch_size: usize,

    pub(crate) featured_text_length: usize,
    pub(crate) column_text_length: usize,

    pub(crate) run_timeout_secs: u64,
    pub(crate) log_to_console: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            num_stories: 28,
            batch_size: 10,
            featured_text_length: 400,
            column_text_length: 250,
            run_timeout_secs: 300,
            log_to_console: false,
        }
    }
}

impl Config {
    /// Reads the config from the environment, with `.env` loaded if present.
    /// Anything unset falls back to the defaults.
    pub(crate) fn from_env() -> anyhow::Result<Self> {
        allow_missing_dotenv(dotenvy::dotenv())?;

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let config = Self {
            api_base: lookup("HN_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            num_stories: parse_var(&lookup, "NUM_STORIES")?.unwrap_or(defaults.num_stories),
            batch_size: parse_var(&lookup, "BATCH_SIZE")?.unwrap_or(defaults.batch_size),
            featured_text_length: parse_var(&lookup, "FEATURED_TEXT_LENGTH")?
                .unwrap_or(defaults.featured_text_length),
            column_text_length: parse_var(&lookup, "COLUMN_TEXT_LENGTH")?
                .unwrap_or(defaults.column_text_length),
            run_timeout_secs: parse_var(&lookup, "RUN_TIMEOUT_SECS")?
                .unwrap_or(defaults.run_timeout_secs),
            log_to_console: parse_var(&lookup, "LOG_TO_CONSOLE")?
                .unwrap_or(defaults.log_to_console),
        };

        if config.batch_size == 0 {
            anyhow::bail!("BATCH_SIZE must be at least 1");
        }

        Ok(config)
    }
}

/// A missing .env file is fine, everything has a default. One that exists
/// but can't be read or parsed is an error.
fn allow_missing_dotenv<T>(loaded: Result<T, dotenvy::Error>) -> anyhow::Result<()> {
    match loaded {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e).context("Failed to load .env"),
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .with_context(|| format!("{key} has an invalid value: {value:?}"))
        })
        .transpose()
}
