pub(crate) mod grouper;
