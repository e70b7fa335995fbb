pub(crate) mod gameplay;
pub(crate) mod shop;
