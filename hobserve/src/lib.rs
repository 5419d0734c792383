//! Observability hooks for factory launches, checkpoints and teardown.
//!
//! ```rust
//! use hobserve::{MetricsObservabilityHooks, SafeFactoryHooks, TracingObservabilityHooks};
//!
//! let _factory_hooks = SafeFactoryHooks::new(TracingObservabilityHooks);
//! let _metrics = MetricsObservabilityHooks;
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{FanoutFactoryHooks, SafeFactoryHooks};
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        FanoutFactoryHooks, MetricsObservabilityHooks, SafeFactoryHooks,
        TracingObservabilityHooks,
    };
}

#[cfg(test)]
mod tests;
