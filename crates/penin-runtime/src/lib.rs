//! Runtime state for PENIN-Ω (C8): the champion, its metric history, the
//! daily budget envelope, and the rolling checkpoint store, all owned by
//! [`PeninRuntime`].

pub mod budget;
pub mod champion;
pub mod checkpoint;
pub mod error;
pub mod metric;
pub mod runtime;
pub mod window;

pub use budget::BudgetTracker;
pub use champion::ChampionState;
pub use checkpoint::{Checkpoint, CheckpointStore};
pub use error::{RuntimeError, RuntimeResult};
pub use metric::{MetricVector, RawMetricInputs};
pub use runtime::PeninRuntime;
pub use window::MetricWindow;
