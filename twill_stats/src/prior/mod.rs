//! Conjugate prior families with closed-form posterior predictives
mod ng;
mod niw;

pub use ng::NormalGamma;
pub use niw::NormalInvWishart;
