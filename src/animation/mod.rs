pub(crate) mod behavior;
pub(crate) mod ease;
pub(crate) mod entry;
pub(crate) mod exit;
pub(crate) mod transform;
