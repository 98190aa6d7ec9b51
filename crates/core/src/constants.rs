/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Decimal precision for derived ratios (savings rate)
pub const RATIO_DECIMAL_PRECISION: u32 = 4;

/// Length of the rolling weekly budget window, in days
pub const WEEKLY_WINDOW_DAYS: i64 = 7;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 6;
