/// Schema version stamped on month snapshots.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Decimal precision for persisted amounts (cents).
pub const CENT_PRECISION: u32 = 2;
