pub mod add_price_form;
pub mod chart;
pub mod dashboard;
pub mod login_form;
pub mod notices;
pub mod price_trends;
pub mod product_list;
pub mod session_gate;
pub mod status;

pub use notices::Notices;
pub use session_gate::SessionGate;
