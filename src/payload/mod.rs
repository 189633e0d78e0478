pub(crate) mod lenient;
pub(crate) mod model;
