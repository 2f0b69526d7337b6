use crate::config::from_env_or_panic;
use crate::prelude::*;
use serde::Deserialize;
use serde_with::serde_as;
use std::collections::HashMap;
use std::ops::Deref;
use tracing_subscriber::prelude::*;

/// Handle of the background task that ships logs to Loki. The task exists
/// only if Loki was configured.
pub struct LoggingTask {
    loki: Option<(tokio::task::JoinHandle<()>, tracing_loki::BackgroundTaskController)>,
}

impl LoggingTask {
    pub async fn shutdown(self) {
        let Some((task, controller)) = self.loki else {
            return;
        };

        info!("Waiting for the logging task to finish nicely...");

        let ((), duration) = controller.shutdown().with_duration().await;

        eprintln!("Stopped logging task in {:.2?}: {:?}", duration, task.await);
    }
}

/// Must be called from within the tokio runtime
pub fn init_logging() -> LoggingTask {
    LoggingConfig::load_or_panic().init_logging()
}

#[serde_as]
#[derive(Deserialize)]
struct LoggingConfig {
    /// Logs are sent to Loki only if this is set
    loki_url: Option<url::Url>,

    #[serde_as(as = "Option<serde_with::json::JsonString>")]
    #[serde(default)]
    tg_bot_log_labels: Option<HashMap<String, String>>,
}

impl LoggingConfig {
    fn load_or_panic() -> LoggingConfig {
        from_env_or_panic("")
    }

    fn init_logging(self) -> LoggingTask {
        let env_filter = tracing_subscriber::EnvFilter::try_from_env("TG_BOT_LOG")
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,dota1x6_tg=debug"));

        let fmt = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_ansi(std::env::var("COLORS").as_deref() != Ok("0"))
            .pretty();

        let mut loki_task = None;

        let loki = self.loki_url.map(|loki_url| {
            let mut labels = self.tg_bot_log_labels.unwrap_or_default();
            labels.insert("source".to_owned(), "dota1x6-tg".to_owned());
            labels.insert("app_version".to_owned(), env!("CARGO_PKG_VERSION").to_owned());

            let (loki, controller, task) = labels
                .into_iter()
                .fold(tracing_loki::builder(), |builder, (key, value)| {
                    builder
                        .label(key.as_str(), value)
                        .unwrap_or_else(|err| panic!("BUG: invalid Loki label {key:?}: {err}"))
                })
                .build_controller_url(loki_url)
                .unwrap_or_else(|err| panic!("BUG: failed to initialize Loki: {err}"));

            loki_task = Some((tokio::spawn(task), controller));

            loki
        });

        tracing_subscriber::registry()
            .with(fmt)
            .with(loki)
            .with(env_filter)
            .with(tracing_error::ErrorLayer::default())
            .init();

        init_panic_hook();

        LoggingTask { loki: loki_task }
    }
}

fn init_panic_hook() {
    let current_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        // It's super-important to call the default panic hook, otherwise
        // we may not see it in the logs at all, because the panic may
        // happen inside of `tracing` logging system itself.
        current_hook(panic_info);

        let location = panic_info.location().map(|location| {
            format!(
                "{}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            )
        });

        // If the panic message was formatted using interpolated values,
        // it will be a `String`. Otherwise, it will be a `&str`.
        let payload = panic_info.payload();
        let message = payload
            .downcast_ref::<String>()
            .map(<_>::deref)
            .or_else(|| payload.downcast_ref::<&str>().map(<_>::deref))
            .unwrap_or("<unknown>");

        let span_trace = tracing_error::SpanTrace::capture();

        error!(
            target: "panic",
            thread = std::thread::current().name(),
            location,
            span_trace = %span_trace,
            "{message}"
        );
    }));
}
