pub(crate) mod collision;
pub(crate) mod measure;
pub(crate) mod solver;
