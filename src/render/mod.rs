pub(crate) mod backend;
pub(crate) mod batch;
pub(crate) mod blend;
pub(crate) mod cpu;
