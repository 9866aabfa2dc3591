pub(crate) mod gif;
