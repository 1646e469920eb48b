pub(crate) mod calendar;
pub(crate) mod health;
pub(crate) mod hotels;
pub(crate) mod overrides;
