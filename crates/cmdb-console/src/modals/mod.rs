//! Modal dialogs
//!
//! Each modal owns its form state and reports the outcome through a result
//! enum from `ui()`; the owning page performs the actual API call.

pub mod asset_form;
pub mod ci_type_form;
pub mod confirm;

pub use asset_form::{AssetFormModal, AssetFormResult};
pub use ci_type_form::{CiTypeFormModal, CiTypeFormResult};
pub use confirm::ConfirmModal;
