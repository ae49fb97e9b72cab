//! Booking saga constants.

/// The saga type identifier for booking creation.
pub const SAGA_TYPE: &str = "BookingCreation";

/// Step name: quote the stay's total cost from the Listing Directory.
pub const STEP_QUOTE: &str = "quote_total_cost";

/// Step name: debit the guest's wallet at the Payments Ledger.
pub const STEP_DEBIT: &str = "debit_wallet";

/// Step name: persist the booking in the Booking Store.
pub const STEP_PERSIST: &str = "persist_booking";
