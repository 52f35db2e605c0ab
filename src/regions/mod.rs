pub(crate) mod merge;
