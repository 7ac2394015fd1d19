use anyhow::Result;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line, without timestamps (CloudWatch adds them).
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    #[must_use]
    pub fn from_arg(value: Option<&str>) -> Self {
        match value {
            Some("pretty") => Self::Pretty,
            _ => Self::Json,
        }
    }
}

fn filter(verbosity_level: Level) -> Result<EnvFilter> {
    Ok(EnvFilter::builder()
        .with_default_directive(verbosity_level.into())
        .from_env_lossy()
        .add_directive("hyper=error".parse()?)
        .add_directive("tokio=error".parse()?)
        .add_directive("aws_config=warn".parse()?)
        .add_directive("aws_smithy_runtime=warn".parse()?))
}

/// Initialize logging.
///
/// `RUST_LOG` overrides the default directive derived from the verbosity flag.
///
/// # Errors
///
/// Returns an error if a filter directive is invalid or a global subscriber is already set
pub fn init(verbosity_level: Option<Level>, format: LogFormat) -> Result<()> {
    let filter = filter(verbosity_level.unwrap_or(Level::ERROR))?;

    match format {
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_current_span(false)
                .with_target(false)
                .without_time();

            let subscriber = Registry::default().with(fmt_layer).with(filter);
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .with_file(false)
                .with_line_number(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_target(false)
                .pretty();

            let subscriber = Registry::default().with(fmt_layer).with(filter);
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_arg() {
        assert_eq!(LogFormat::from_arg(Some("pretty")), LogFormat::Pretty);
        assert_eq!(LogFormat::from_arg(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::from_arg(None), LogFormat::Json);
    }

    #[test]
    fn test_filter_directives() {
        temp_env::with_var("RUST_LOG", None::<&str>, || {
            let filter = filter(Level::INFO);
            assert!(filter.is_ok());
        });
    }
}
