pub(crate) mod classify;
pub(crate) mod group;
pub(crate) mod list;
pub(crate) mod split;
