pub(crate) mod orbit;
