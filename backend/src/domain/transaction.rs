//! Named multi-step pipelines that always answer with an [`Outcome`].
//!
//! Each [`Step`] either forwards its output to the next step or fails, which
//! short-circuits the rest of the chain. [`Transaction::call`] is the service
//! boundary: a panic raised inside any step is contained there and reported
//! as an `internal_error` failure carrying the transaction's fallback message.

use std::panic::AssertUnwindSafe;

use async_trait::async_trait;
use futures_util::FutureExt;
use tracing::{Instrument, debug, error, info_span, warn};

use super::{ApiResult, Error, Outcome};

/// One stage of a [`Transaction`].
///
/// # Examples
/// ```
/// use async_trait::async_trait;
/// use floofloo::domain::{ApiResult, Error, Step, Transaction};
///
/// struct Trim;
///
/// #[async_trait]
/// impl Step<String> for Trim {
///     type Output = String;
///     fn name(&self) -> &'static str { "trim" }
///     async fn run(&self, input: String) -> Result<String, Error> {
///         Ok(input.trim().to_owned())
///     }
/// }
///
/// struct Wrap;
///
/// #[async_trait]
/// impl Step<String> for Wrap {
///     type Output = ApiResult<String>;
///     fn name(&self) -> &'static str { "wrap" }
///     async fn run(&self, input: String) -> Result<ApiResult<String>, Error> {
///         Ok(ApiResult::ok(input))
///     }
/// }
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let transaction = Transaction::new("tidy", "Could not tidy", Trim).then(Wrap);
/// let result = transaction.call(" x ".to_owned()).await.expect("success");
/// assert_eq!(result.message, "x");
/// # });
/// ```
#[async_trait]
pub trait Step<I: Send + 'static>: Send + Sync {
    /// Value forwarded to the next step.
    type Output: Send + 'static;

    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    /// Execute the step.
    async fn run(&self, input: I) -> Result<Self::Output, Error>;
}

/// Two steps run in sequence; built by [`Transaction::then`].
pub struct Then<A, B> {
    first: A,
    second: B,
}

#[async_trait]
impl<I, A, B> Step<I> for Then<A, B>
where
    I: Send + 'static,
    A: Step<I>,
    B: Step<A::Output>,
{
    type Output = B::Output;

    fn name(&self) -> &'static str {
        self.second.name()
    }

    async fn run(&self, input: I) -> Result<Self::Output, Error> {
        let forwarded = self.first.run(input).await.inspect_err(|err| {
            warn!(step = self.first.name(), code = ?err.code(), error = %err, "step failed");
        })?;
        debug!(step = self.first.name(), "step succeeded");
        self.second.run(forwarded).await
    }
}

/// A named chain of steps with a panic-safe call boundary.
pub struct Transaction<S> {
    name: &'static str,
    fallback: &'static str,
    steps: S,
}

impl<S> Transaction<S> {
    /// Start a transaction with its first step.
    ///
    /// `fallback` is the failure message reported when a step panics.
    pub fn new(name: &'static str, fallback: &'static str, first: S) -> Self {
        Self {
            name,
            fallback,
            steps: first,
        }
    }

    /// Append a step that receives the current chain's output.
    pub fn then<N>(self, next: N) -> Transaction<Then<S, N>> {
        Transaction {
            name: self.name,
            fallback: self.fallback,
            steps: Then {
                first: self.steps,
                second: next,
            },
        }
    }

    /// Transaction name as used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run every step against `input`.
    pub async fn call<I, T>(&self, input: I) -> Outcome<T>
    where
        I: Send + 'static,
        S: Step<I, Output = ApiResult<T>>,
        T: Send + 'static,
    {
        let span = info_span!("transaction", name = self.name);
        let run = AssertUnwindSafe(self.steps.run(input)).catch_unwind();
        match run.instrument(span).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(err)) => {
                warn!(
                    transaction = self.name,
                    code = ?err.code(),
                    error = %err,
                    "transaction failed"
                );
                Err(err)
            }
            Err(panic) => {
                error!(
                    transaction = self.name,
                    panic = panic_message(panic.as_ref()),
                    "transaction aborted by an unexpected fault"
                );
                Err(Error::internal(self.fallback))
            }
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
