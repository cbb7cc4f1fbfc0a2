pub mod bulk_actions;
pub mod filter_panel;
pub mod period_select;
pub mod reason_dialog;

pub use bulk_actions::BulkActions;
pub use filter_panel::{BidFilterPanel, JobFilterPanel, UserFilterPanel};
pub use period_select::PeriodSelect;
pub use reason_dialog::ReasonDialog;
