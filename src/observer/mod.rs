//! Observation plumbing shared by games.
//!
//! - `obs_type`: what a requested view may contain, and the disclosure
//!   mode and tensor fields it resolves to
//! - `allocator`: where observers write their tensors
//! - `format`: number formatting for observation strings
//!
//! Game-specific observers (see `games::bertrand::BertrandObserver`) build
//! on these.

pub mod allocator;
pub mod format;
pub mod obs_type;

pub use allocator::{ContiguousAllocator, Field, FieldAllocator, TensorAllocator, TensorView};
pub use format::format_real;
pub use obs_type::{Disclosure, ObservationType, PrivateInfo, TensorFields};
