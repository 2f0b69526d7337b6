pub(crate) mod logging;

pub use logging::{init_logging, tracing_err, LoggingTask};
