pub mod badge;
pub mod button;
pub mod card;
pub mod checkbox;
pub mod data_table;
pub mod dialog;
pub mod form_select;
pub mod input;
pub mod page_header;
pub mod progress;
pub mod search_bar;
pub mod skeleton;
pub mod stat_card;
pub mod tabs;
pub mod textarea;
pub mod toast;

pub use badge::*;
pub use button::*;
pub use card::*;
pub use checkbox::*;
pub use data_table::*;
pub use dialog::*;
pub use form_select::*;
pub use input::*;
pub use page_header::*;
pub use progress::*;
pub use search_bar::*;
pub use skeleton::*;
pub use stat_card::*;
pub use tabs::*;
pub use textarea::*;
pub use toast::*;
