pub(crate) mod segment;
