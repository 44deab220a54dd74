/// Catalog identifiers are small positive integers assigned at build time.
pub type DestinationId = u32;

/// Stay lengths and day counts are whole calendar days.
pub type DayCount = u32;
