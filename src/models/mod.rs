mod cell;
mod hotel;
mod price_override;
mod rate;

pub use cell::{AggregatedCell, AlertLevel, CalendarEvent, DisplayColor};
pub use hotel::{CreateHotel, Hotel, UpdateHotel};
pub use price_override::{OverrideWriteBatch, OverrideWriteEntry, PriceOverride, SetOverrideRequest};
pub use rate::{OccupancyRecord, RateOrigin, RateRecord};
