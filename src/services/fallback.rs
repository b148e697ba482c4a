use std::error::Error;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::services::json_extract::ExtractionError;

/// A provider attempt that has not been polled yet. Attempts that are never
/// selected are never executed.
pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ProviderError>> + 'a>>;

#[derive(Debug)]
pub enum ProviderError {
    Transport(reqwest::Error),
    Status { status: u16, body: String },
    Extraction(ExtractionError),
    Empty(String),
    Unavailable(String),
    /// Caller-declared fatal condition (e.g. malformed input). Propagates
    /// immediately; the rest of the chain is not attempted.
    Fatal(String),
}

impl ProviderError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, ProviderError::Fatal(_))
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Transport(err) => write!(f, "Transport error: {}", err),
            ProviderError::Status { status, body } => {
                write!(f, "Provider returned status {}: {}", status, body)
            }
            ProviderError::Extraction(err) => write!(f, "Extraction error: {}", err),
            ProviderError::Empty(msg) => write!(f, "Empty response: {}", msg),
            ProviderError::Unavailable(msg) => write!(f, "Provider unavailable: {}", msg),
            ProviderError::Fatal(msg) => write!(f, "{}", msg),
        }
    }
}

impl Error for ProviderError {}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Transport(err)
    }
}

impl From<ExtractionError> for ProviderError {
    fn from(err: ExtractionError) -> Self {
        ProviderError::Extraction(err)
    }
}

/// The value that won, together with the label of the attempt (or terminal
/// fallback) that supplied it. Endpoints surface the label as their
/// `source` / `provider` field.
pub struct Resolved<T> {
    pub value: T,
    pub source: String,
}

/// Ordered chain of provider attempts with a deterministic terminal
/// fallback. Exactly one of {primary, one fallback, terminal} supplies the
/// returned value; errors from losing attempts surface only through logging.
pub struct ResilientCall<'a, T> {
    attempts: Vec<(String, ProviderFuture<'a, T>)>,
}

impl<'a, T> ResilientCall<'a, T> {
    pub fn new<F>(source: impl Into<String>, attempt: F) -> Self
    where
        F: Future<Output = Result<T, ProviderError>> + 'a,
    {
        Self {
            attempts: vec![(source.into(), Box::pin(attempt))],
        }
    }

    pub fn or_else<F>(mut self, source: impl Into<String>, attempt: F) -> Self
    where
        F: Future<Output = Result<T, ProviderError>> + 'a,
    {
        self.attempts.push((source.into(), Box::pin(attempt)));
        self
    }

    /// Run the chain without a terminal value. Fatal errors propagate
    /// immediately; otherwise the last attempt's error is returned once the
    /// chain is exhausted.
    pub async fn try_run(self) -> Result<Resolved<T>, ProviderError> {
        let mut last_err: Option<ProviderError> = None;
        for (source, attempt) in self.attempts {
            match attempt.await {
                Ok(value) => return Ok(Resolved { value, source }),
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    log::warn!("Provider '{}' failed: {}", source, err);
                    last_err = Some(err);
                }
            }
        }
        Err(last_err
            .unwrap_or_else(|| ProviderError::Unavailable("no provider attempts".to_string())))
    }

    /// Run the chain, falling back to a precomputed terminal value when
    /// every attempt fails. Only a fatal error is ever returned as `Err`.
    pub async fn run(
        self,
        terminal_source: impl Into<String>,
        terminal: T,
    ) -> Result<Resolved<T>, ProviderError> {
        match self.try_run().await {
            Ok(resolved) => Ok(resolved),
            Err(err) if err.is_fatal() => Err(err),
            Err(_) => Ok(Resolved {
                value: terminal,
                source: terminal_source.into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counted(
        counter: Arc<AtomicUsize>,
        result: Result<&'static str, ProviderError>,
    ) -> impl Future<Output = Result<&'static str, ProviderError>> {
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            result
        }
    }

    #[actix_rt::test]
    async fn primary_success_skips_fallbacks() {
        let primary_calls = Arc::new(AtomicUsize::new(0));
        let fallback_calls = Arc::new(AtomicUsize::new(0));

        let resolved = ResilientCall::new("primary", counted(primary_calls.clone(), Ok("ok")))
            .or_else(
                "fallback",
                counted(
                    fallback_calls.clone(),
                    Err(ProviderError::Empty("unused".to_string())),
                ),
            )
            .run("terminal", "terminal value")
            .await
            .unwrap();

        assert_eq!(resolved.value, "ok");
        assert_eq!(resolved.source, "primary");
        assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
    }

    #[actix_rt::test]
    async fn exhausted_chain_returns_terminal_value() {
        let primary_calls = Arc::new(AtomicUsize::new(0));
        let fallback_calls = Arc::new(AtomicUsize::new(0));

        let resolved = ResilientCall::new(
            "primary",
            counted(
                primary_calls.clone(),
                Err(ProviderError::Empty("primary down".to_string())),
            ),
        )
        .or_else(
            "fallback",
            counted(
                fallback_calls.clone(),
                Err(ProviderError::Empty("fallback down".to_string())),
            ),
        )
        .run("terminal", "terminal value")
        .await
        .unwrap();

        assert_eq!(resolved.value, "terminal value");
        assert_eq!(resolved.source, "terminal");
        assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
    }

    #[actix_rt::test]
    async fn fatal_error_propagates_without_fallback() {
        let fallback_calls = Arc::new(AtomicUsize::new(0));

        let result = ResilientCall::new("primary", async {
            Err::<&str, _>(ProviderError::Fatal("bad input".to_string()))
        })
        .or_else(
            "fallback",
            counted(
                fallback_calls.clone(),
                Err(ProviderError::Empty("unused".to_string())),
            ),
        )
        .run("terminal", "terminal value")
        .await;

        match result {
            Err(ProviderError::Fatal(msg)) => assert_eq!(msg, "bad input"),
            other => panic!("expected fatal error, got {:?}", other.map(|r| r.value)),
        }
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
    }

    #[actix_rt::test]
    async fn middle_fallback_supplies_value() {
        let resolved = ResilientCall::new("primary", async {
            Err::<&str, _>(ProviderError::Empty("down".to_string()))
        })
        .or_else("fallback", async { Ok("recovered") })
        .run("terminal", "terminal value")
        .await
        .unwrap();

        assert_eq!(resolved.value, "recovered");
        assert_eq!(resolved.source, "fallback");
    }
}
